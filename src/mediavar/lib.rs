//! # Mediavar Architecture
//!
//! Mediavar keeps **derived media variants** in lockstep with their original.
//! A variant is whatever an image engine produced from an original by applying a
//! recipe (`resize 250x250`, then `colorize`, ...). Its filename is derived from
//! the recipe rather than stored anywhere:
//!
//! ```text
//! foo/bar.jpg                                        original
//! foo/bar-resize+250,250.jpg                         variant
//! foo/bar-colorize+250,250,250|resize+250,250.jpg    variant
//! foo/bar.jpg.json                                   manipulation log
//! ```
//!
//! The hard part is moving or renaming the original: every variant has to follow,
//! nothing may be overwritten, and the asset record must only change once the
//! files are in place.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + Commands (commands/*.rs)              │
//! │  - Selectors -> assets, config -> explicit parameters       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - canonical / recipe / registry: recipe -> name fragment   │
//! │  - paths: (dir, name, recipe, ext) -> disk path             │
//! │  - manipulation_log: per-asset history of recipes           │
//! │  - mover: relocation of original + variants + log           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage                                                    │
//! │  - disk/: file capability set (FsDisk, MemDisk)             │
//! │  - store/: asset records (FileStore, InMemoryStore)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing from `api.rs` inward writes to stdout or exits the process.
//!
//! ## Concurrency
//!
//! Everything is synchronous and single-threaded. A move or a log append on one
//! asset must not overlap with another on the same asset; the host application
//! is responsible for that. Different assets never share files.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`canonical`], [`recipe`], [`registry`]: Recipes and their canonical form
//! - [`paths`]: Path resolution for originals, variants and logs
//! - [`manipulation_log`]: Sidecar history of materialized recipes
//! - [`mover`]: Relocation of an asset and all its variants
//! - [`materialize`]: Producing variants through an external engine
//! - [`disk`]: Storage capability set
//! - [`store`]: Asset record store
//! - [`model`]: `Asset`, `AssetKind`
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod canonical;
pub mod commands;
pub mod config;
pub mod disk;
pub mod error;
pub mod manipulation_log;
pub mod materialize;
pub mod model;
pub mod mover;
pub mod paths;
pub mod recipe;
pub mod registry;
pub mod store;

use clap::{Parser, Subcommand};
use mediavar::model::AssetKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mediavar")]
#[command(about = "Keep derived media variants in step with their originals", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a file already on a disk as an asset
    Add {
        /// Path relative to the disk root (e.g. photos/cat.jpg)
        path: String,

        /// Disk to use (defaults to the configured default disk)
        #[arg(short, long)]
        disk: Option<String>,

        /// Override the kind guessed from the extension
        #[arg(short, long)]
        kind: Option<AssetKind>,
    },

    /// List registered assets
    #[command(alias = "ls")]
    List {
        /// Only assets on this disk
        #[arg(short, long)]
        disk: Option<String>,
    },

    /// Move and/or rename an asset with all of its variants
    #[command(alias = "mv")]
    Move {
        /// Asset id or current path
        asset: String,

        /// Target directory (use "/" for the disk root)
        directory: String,

        /// New base filename; a matching extension is dropped
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show the original and every logged variant of an asset
    Paths {
        /// Asset id or path
        asset: String,

        /// Show where this canonical recipe's variant lives instead
        #[arg(short, long)]
        recipe: Option<String>,
    },

    /// Show the manipulation log of an asset
    History {
        /// Asset id or path
        asset: String,
    },

    /// Log a variant that was produced outside mediavar
    Record {
        /// Asset id or path
        asset: String,

        /// Canonical recipe, e.g. "resize+250,250|colorize+0,0,0"
        recipe: String,

        /// Only accept the built-in image operations
        #[arg(long)]
        strict: bool,
    },

    /// Delete all logged variants of an asset (the original is kept)
    Purge {
        /// Asset id or path
        asset: String,
    },

    /// Show or change configuration
    Config {
        /// Key to show or set
        key: Option<String>,

        /// New value
        value: Option<String>,

        /// Add a disk: --disk NAME --root DIR
        #[arg(long, requires = "root", conflicts_with_all = ["key", "value"])]
        disk: Option<String>,

        #[arg(long, requires = "disk")]
        root: Option<PathBuf>,
    },
}

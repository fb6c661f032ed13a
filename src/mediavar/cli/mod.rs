//! # CLI Layer
//!
//! One possible client of the [`mediavar::api::MediaApi`] facade. This is the
//! only place that parses shell arguments, writes to the terminal or decides
//! exit codes. Business logic lives in the command layer; handlers here only
//! translate arguments into API calls and `CmdResult`s into output.

mod commands;
mod print;

pub use commands::run;

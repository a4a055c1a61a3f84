//! # CLI Layer
//!
//! This module is **one possible UI client** for tango. It is the only place
//! that parses arguments, writes to stdout/stderr, or decides exit codes.
//!
//! - `setup`: clap definitions
//! - `commands`: `run()`, context setup and one `handle_*` per command
//! - `print`: rendering of words, lists, the daily card and messages

mod commands;
mod print;
mod setup;

pub use commands::run;

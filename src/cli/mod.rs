//! Command-line interface handling.

pub mod args;

pub use args::{parse_args, CliCommand};

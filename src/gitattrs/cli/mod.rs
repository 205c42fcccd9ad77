//! # CLI Layer
//!
//! One client of the gitattrs library. This is the only place that:
//! - parses arguments (clap)
//! - installs the log subscriber
//! - writes to stdout/stderr and picks exit codes
//!
//! Handlers call [`gitattrs::api::GitattrsApi`] and hand the returned
//! `CmdResult` to the printers in `print.rs`.

mod commands;
mod logging;
mod print;
mod setup;

pub use commands::run;

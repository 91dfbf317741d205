//! # session-maker
//!
//! Command-line front end of the session maker. Two binaries share this
//! library:
//!
//! - `session-maker` reads an Excel inventory and writes a SecureCRT XML
//!   session export or a Devolutions RDM JSON connection list
//! - `session-reader` reads a SecureCRT XML export back into Excel
//!
//! Architecture:
//! - `cli` — clap argument definitions for both binaries
//! - `logging` — tracing subscriber set up from `-v` / `RUST_LOG`
//! - `paths` — default destination next to the source file
//! - `runner` — the maker and reader flows with their progress output

pub mod cli;
pub mod logging;
pub mod paths;
pub mod runner;

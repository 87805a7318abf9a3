//! # CLI Behavior
//!
//! This is **one possible UI client** for parent-hub, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, logging
//! setup and output formatting.
//!
//! ### Naked Execution (`parent-hub`)
//!
//! Running `parent-hub` with no arguments lists the whole directory, same as
//! `parent-hub browse` with no filters.
//!
//! ### Where the data comes from
//!
//! 1. `--data FILE`
//! 2. `data-file` from `config.json`
//! 3. `data/daycares.json` under the working directory
//!
//! `config.json` lives in the platform config directory, or in
//! `$PARENT_HUB_HOME` when that is set.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print output
//! - `render`: Output formatting (lists, colours, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;

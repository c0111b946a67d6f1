//! CLI module
//!
//! Command-line interface for the pagination service.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP server
//! - `seed` - Create and populate the books and cars tables
//! - `check` - Test the database connection

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;

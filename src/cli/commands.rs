//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated books and cars API
#[derive(Parser, Debug)]
#[command(name = "pagination-service")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Create the tables and insert this many books and cars before serving
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Create the tables and insert generated rows (DuckDB only)
    Seed {
        /// Number of books to insert
        #[arg(long, default_value = "10")]
        books: u32,

        /// Number of cars to insert
        #[arg(long, default_value = "10")]
        cars: u32,
    },

    /// Test the database connection
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from([
            "pagination-service",
            "--config",
            "service.yaml",
            "serve",
            "--port",
            "9000",
            "--seed",
            "25",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("service.yaml")));
        assert!(!cli.verbose);
        match cli.command {
            Commands::Serve { host, port, seed } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
                assert_eq!(seed, Some(25));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_seed_defaults() {
        let cli = Cli::parse_from(["pagination-service", "seed", "-v"]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Seed { books, cars } => {
                assert_eq!(books, 10);
                assert_eq!(cars, 10);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["pagination-service", "discover"]).is_err());
    }
}

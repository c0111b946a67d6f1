//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_config, AppConfig};
use crate::database::DatabaseEngine;
use crate::error::Result;
use crate::server::{build_dispatcher, serve};
use serde_json::{json, Value};
use std::sync::Arc;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Serve { host, port, seed } => {
                let mut config = config;
                if let Some(host) = host {
                    config.server.host.clone_from(host);
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
                config.validate()?;
                self.serve(config, *seed).await
            }
            Commands::Seed { books, cars } => self.seed(&config, *books, *cars),
            Commands::Check => self.check(&config),
        }
    }

    /// Load configuration from `--config` (or defaults) plus the environment
    fn load_config(&self) -> Result<AppConfig> {
        let config = match &self.cli.config {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration");
                load_config(path)?
            }
            None => AppConfig::default(),
        };
        config.with_env_overrides()
    }

    /// Open storage, optionally seed it, and serve until shutdown
    async fn serve(&self, config: AppConfig, seed: Option<u32>) -> Result<()> {
        let engine = Arc::new(DatabaseEngine::open(&config.database)?);

        if engine.is_writable() {
            engine.create_tables(&config.database.books_table, &config.database.cars_table)?;
        }
        if let Some(count) = seed {
            Self::populate(&engine, &config, count, count)?;
        }

        let dispatcher = build_dispatcher(engine, &config);
        serve(&config.server, dispatcher).await
    }

    /// Create and populate the tables, then exit
    fn seed(&self, config: &AppConfig, books: u32, cars: u32) -> Result<()> {
        let engine = DatabaseEngine::open(&config.database)?;
        Self::populate(&engine, config, books, cars)?;

        self.output_message(&json!({
            "type": "SEED",
            "seed": {
                "books_table": config.database.books_table,
                "books": books,
                "cars_table": config.database.cars_table,
                "cars": cars
            }
        }));
        Ok(())
    }

    fn populate(engine: &DatabaseEngine, config: &AppConfig, books: u32, cars: u32) -> Result<()> {
        let books_table = &config.database.books_table;
        let cars_table = &config.database.cars_table;

        engine.create_tables(books_table, cars_table)?;
        engine.seed_books(books_table, books)?;
        engine.seed_cars(cars_table, cars)?;

        tracing::info!(books, cars, "Seeded database");
        Ok(())
    }

    /// Check the database connection
    fn check(&self, config: &AppConfig) -> Result<()> {
        let status = DatabaseEngine::open(&config.database)
            .and_then(|engine| engine.check_connection().map(|()| engine.connection_info()));

        match status {
            Ok(info) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "SUCCEEDED",
                        "message": format!("Connected to {info}")
                    }
                }));
            }
            Err(e) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "FAILED",
                        "message": format!("Connection failed: {e}")
                    }
                }));
            }
        }

        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        if self.cli.verbose {
            println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
        } else {
            println!("{}", serde_json::to_string(msg).unwrap_or_default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_flag() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 9100\npagination:\n  max_limit: 50").unwrap();

        let cli = Cli::parse_from([
            "pagination-service",
            "--config",
            file.path().to_str().unwrap(),
            "check",
        ]);
        let config = Runner::new(cli).load_config().unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.pagination.max_limit, Some(50));
    }

    #[test]
    fn test_load_config_missing_file_fails() {
        let cli = Cli::parse_from([
            "pagination-service",
            "--config",
            "/nonexistent/service.yaml",
            "check",
        ]);
        assert!(Runner::new(cli).load_config().is_err());
    }

    #[tokio::test]
    async fn test_seed_and_check_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("library.duckdb");
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "database:\n  engine: duckdb\n  connection_string: {}",
            db_path.display()
        )
        .unwrap();
        let config_path = file.path().to_str().unwrap().to_string();

        let seed = Cli::parse_from([
            "pagination-service",
            "--config",
            &config_path,
            "seed",
            "--books",
            "4",
            "--cars",
            "2",
        ]);
        Runner::new(seed).run().await.unwrap();

        let check = Cli::parse_from(["pagination-service", "--config", &config_path, "check"]);
        Runner::new(check).run().await.unwrap();

        let config = load_config(&config_path).unwrap();
        let engine = DatabaseEngine::open(&config.database).unwrap();
        let count: Vec<i64> = engine
            .query_rows("SELECT COUNT(*) FROM books", duckdb::params![], |row| row.get(0))
            .unwrap();
        assert_eq!(count, vec![4]);
    }
}

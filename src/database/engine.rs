//! DuckDB-based storage handle
//!
//! Serves native DuckDB databases (file or in-memory) directly, and
//! PostgreSQL, MySQL, SQLite through DuckDB extensions attached read-only.

use crate::config::{DatabaseKind, DatabaseSettings};
use crate::error::{Error, Result};
use duckdb::types::{TimeUnit, ToSql, Value};
use duckdb::{Connection, Row};
use std::sync::{Mutex, MutexGuard};

/// Catalog alias of an attached external database
const SOURCE_DB: &str = "source_db";

/// Storage handle shared by the collection readers
///
/// Constructed once at startup and passed around behind an `Arc`. The
/// connection is guarded by a mutex since a DuckDB connection is not `Sync`.
pub struct DatabaseEngine {
    /// DuckDB connection
    conn: Mutex<Connection>,
    /// Database type
    kind: DatabaseKind,
    /// Connection string used (for logging)
    connection_string: String,
}

impl DatabaseEngine {
    /// Open the database described by `settings`
    pub fn open(settings: &DatabaseSettings) -> Result<Self> {
        let connection_string = Self::build_connection_string(settings);

        let conn = match settings.engine {
            DatabaseKind::Duckdb if connection_string != ":memory:" => {
                Connection::open(&connection_string).map_err(|e| {
                    Error::config(format!(
                        "Failed to open DuckDB database '{connection_string}': {e}"
                    ))
                })?
            }
            _ => Connection::open_in_memory()
                .map_err(|e| Error::config(format!("Failed to create DuckDB connection: {e}")))?,
        };

        let engine = Self {
            conn: Mutex::new(conn),
            kind: settings.engine,
            connection_string,
        };

        if engine.kind != DatabaseKind::Duckdb {
            engine.attach_database()?;
        }

        tracing::info!(
            engine = ?engine.kind,
            connection = %engine.connection_info(),
            "Database connected"
        );

        Ok(engine)
    }

    /// Open a private in-memory DuckDB database
    pub fn in_memory() -> Result<Self> {
        Self::open(&DatabaseSettings::default())
    }

    /// Build connection string from config
    fn build_connection_string(settings: &DatabaseSettings) -> String {
        // If connection_string is provided, use it directly
        if let Some(ref conn_str) = settings.connection_string {
            return conn_str.clone();
        }

        let host = settings.host.as_deref().unwrap_or("localhost");
        let user = settings.user.as_deref().unwrap_or("books");
        let password = settings.password.as_deref().unwrap_or("books");
        let database = settings.database.as_deref().unwrap_or("booksdb");

        let port = settings.port.unwrap_or(match settings.engine {
            DatabaseKind::Postgres => 5432,
            DatabaseKind::Mysql => 3306,
            DatabaseKind::Sqlite | DatabaseKind::Duckdb => 0,
        });

        match settings.engine {
            DatabaseKind::Postgres => {
                format!("postgresql://{user}:{password}@{host}:{port}/{database}")
            }
            DatabaseKind::Mysql => format!("mysql://{user}:{password}@{host}:{port}/{database}"),
            // File path
            DatabaseKind::Sqlite => settings
                .database
                .clone()
                .unwrap_or_else(|| "books.sqlite".to_string()),
            // File path or :memory:
            DatabaseKind::Duckdb => settings
                .database
                .clone()
                .unwrap_or_else(|| ":memory:".to_string()),
        }
    }

    /// Attach external database to DuckDB
    fn attach_database(&self) -> Result<()> {
        let (extension, db_type) = match self.kind {
            DatabaseKind::Postgres => ("postgres", "POSTGRES"),
            DatabaseKind::Mysql => ("mysql", "MYSQL"),
            DatabaseKind::Sqlite => ("sqlite", "SQLITE"),
            DatabaseKind::Duckdb => return Ok(()),
        };

        let conn = self.lock()?;
        conn.execute_batch(&format!("INSTALL {extension}; LOAD {extension};"))
            .map_err(|e| Error::config(format!("Failed to load {extension} extension: {e}")))?;

        let attach_sql = format!(
            "ATTACH {} AS {SOURCE_DB} (TYPE {db_type}, READ_ONLY);",
            quote_literal(&self.connection_string)
        );
        conn.execute_batch(&attach_sql)
            .map_err(|e| Error::config(format!("Failed to attach {db_type} database: {e}")))?;

        Ok(())
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::storage("database connection lock poisoned"))
    }

    /// Test database connection
    pub fn check_connection(&self) -> Result<()> {
        let query = match self.kind {
            DatabaseKind::Postgres => "SELECT 1 FROM source_db.pg_catalog.pg_tables LIMIT 1",
            DatabaseKind::Mysql => "SELECT 1 FROM source_db.information_schema.tables LIMIT 1",
            DatabaseKind::Sqlite => "SELECT 1 FROM source_db.sqlite_master LIMIT 1",
            DatabaseKind::Duckdb => "SELECT 1",
        };

        self.lock()?
            .execute(query, [])
            .map_err(|e| Error::storage(format!("Connection check failed: {e}")))?;

        Ok(())
    }

    /// Fully qualified name of `table` for this engine
    pub fn table_ref(&self, table: &str) -> String {
        match self.kind {
            DatabaseKind::Duckdb => table.to_string(),
            // Default to public schema for postgres
            DatabaseKind::Postgres if !table.contains('.') => {
                format!("{SOURCE_DB}.public.{table}")
            }
            _ => format!("{SOURCE_DB}.{table}"),
        }
    }

    /// Run a prepared query with bound parameters and map every row
    pub fn query_rows<T, F>(&self, sql: &str, params: &[&dyn ToSql], map: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> duckdb::Result<T>,
    {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, map)?
            .collect::<duckdb::Result<Vec<T>>>()?;
        Ok(rows)
    }

    /// Whether tables can be created and seeded through this handle
    pub fn is_writable(&self) -> bool {
        self.kind == DatabaseKind::Duckdb
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.is_writable() {
            Ok(())
        } else {
            Err(Error::config(format!(
                "{:?} databases are attached read-only; seeding needs a DuckDB database",
                self.kind
            )))
        }
    }

    /// Create the books and cars tables if they do not exist
    pub fn create_tables(&self, books_table: &str, cars_table: &str) -> Result<()> {
        self.ensure_writable()?;

        self.lock()?.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {books_table} (
                book_id INTEGER PRIMARY KEY,
                title VARCHAR(100) NOT NULL,
                author VARCHAR(100) NOT NULL,
                created_at TIMESTAMP NOT NULL
            );
            CREATE TABLE IF NOT EXISTS {cars_table} (
                car_id INTEGER PRIMARY KEY,
                brand VARCHAR(100) NOT NULL,
                model VARCHAR(100) NOT NULL,
                created_at TIMESTAMP NOT NULL
            );"
        ))?;

        Ok(())
    }

    /// Append `count` generated books (`Title-N`, `Author-N`)
    pub fn seed_books(&self, table: &str, count: u32) -> Result<u32> {
        self.seed(table, "book_id", ("Title", "Author"), count)
    }

    /// Append `count` generated cars (`Brand-N`, `Model-N`)
    pub fn seed_cars(&self, table: &str, count: u32) -> Result<u32> {
        self.seed(table, "car_id", ("Brand", "Model"), count)
    }

    /// Insert rows with ids continuing after the current maximum
    fn seed(&self, table: &str, key: &str, labels: (&str, &str), count: u32) -> Result<u32> {
        self.ensure_writable()?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let last_id: i64 =
            tx.query_row(&format!("SELECT COALESCE(MAX({key}), 0) FROM {table}"), [], |row| {
                row.get(0)
            })?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table} VALUES (?, ?, ?, CAST(current_timestamp AS TIMESTAMP))"
            ))?;
            for id in (last_id + 1)..=(last_id + i64::from(count)) {
                stmt.execute(duckdb::params![
                    id,
                    format!("{}-{id}", labels.0),
                    format!("{}-{id}", labels.1)
                ])?;
            }
        }

        tx.commit()?;
        tracing::debug!(table, count, "Seeded rows");
        Ok(count)
    }

    /// Get database type
    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    /// Get connection string (for logging - password masked)
    pub fn connection_info(&self) -> String {
        // Mask password in connection string for logging
        if let Some(at_pos) = self.connection_string.find('@') {
            if let Some(colon_pos) = self.connection_string[..at_pos].rfind(':') {
                if !self.connection_string[colon_pos + 1..].starts_with("//") {
                    let before_pass = &self.connection_string[..=colon_pos];
                    let after_at = &self.connection_string[at_pos..];
                    return format!("{before_pass}****{after_at}");
                }
            }
        }
        self.connection_string.clone()
    }
}

/// Quote `s` as a SQL string literal
fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Read column `idx` of `row` as an ISO-8601 timestamp string
///
/// NULL and non-temporal values fail the row like any other scan error.
pub fn read_timestamp(row: &Row<'_>, idx: usize) -> duckdb::Result<String> {
    let value: Value = row.get(idx)?;
    let data_type = value.data_type();
    timestamp_to_string(value).ok_or_else(|| {
        duckdb::Error::FromSqlConversionFailure(
            idx,
            data_type.clone(),
            format!("cannot render {data_type} as a timestamp").into(),
        )
    })
}

/// Render a timestamp value as an ISO-8601 string
pub fn timestamp_to_string(value: Value) -> Option<String> {
    match value {
        Value::Text(s) => Some(s),
        Value::Timestamp(unit, i) => {
            let micros = match unit {
                TimeUnit::Second => i.saturating_mul(1_000_000),
                TimeUnit::Millisecond => i.saturating_mul(1_000),
                TimeUnit::Microsecond => i,
                TimeUnit::Nanosecond => i / 1_000,
            };
            let secs = micros.div_euclid(1_000_000);
            let nsecs = (micros.rem_euclid(1_000_000) * 1000) as u32;
            chrono::DateTime::from_timestamp(secs, nsecs)
                .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string())
        }
        Value::Date32(d) => {
            // Days since epoch (719163 is the number of days from 1 CE to 1970-01-01)
            chrono::NaiveDate::from_num_days_from_ce_opt(d + 719_163)
                .map(|date| date.format("%Y-%m-%d").to_string())
        }
        _ => None,
    }
}

//! Cursor-paginated reader over the cars table

use super::{run_blocking, CollectionReader};
use crate::database::{read_timestamp, DatabaseEngine};
use crate::error::Result;
use crate::pagination::CursorPage;
use crate::types::Car;
use async_trait::async_trait;
use std::sync::Arc;

/// Reads cars whose `car_id` is at least the cursor, ordered by `car_id`
pub struct CarReader {
    engine: Arc<DatabaseEngine>,
    query: String,
}

impl CarReader {
    /// Create a reader over `table`
    pub fn new(engine: Arc<DatabaseEngine>, table: &str) -> Self {
        let query = format!(
            "SELECT car_id, brand, model, created_at FROM {} WHERE car_id >= ? ORDER BY car_id LIMIT ?",
            engine.table_ref(table)
        );
        Self { engine, query }
    }

    /// SQL executed for every fetch
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[async_trait]
impl CollectionReader<CursorPage> for CarReader {
    type Record = Car;

    async fn fetch(&self, page: CursorPage) -> Result<Vec<Car>> {
        tracing::debug!(cursor = page.cursor, limit = page.limit, "Fetching cars");

        let engine = Arc::clone(&self.engine);
        let query = self.query.clone();
        run_blocking(move || {
            engine.query_rows(&query, duckdb::params![page.cursor, page.limit], |row| {
                Ok(Car {
                    id: row.get(0)?,
                    brand: row.get(1)?,
                    model: row.get(2)?,
                    created_at: read_timestamp(row, 3)?,
                })
            })
        })
        .await
    }
}

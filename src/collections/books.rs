//! Offset-paginated reader over the books table

use super::{run_blocking, CollectionReader};
use crate::database::{read_timestamp, DatabaseEngine};
use crate::error::Result;
use crate::pagination::OffsetPage;
use crate::types::Book;
use async_trait::async_trait;
use std::sync::Arc;

/// Reads books ordered by `book_id`, skipping `offset` rows
pub struct BookReader {
    engine: Arc<DatabaseEngine>,
    query: String,
}

impl BookReader {
    /// Create a reader over `table`
    pub fn new(engine: Arc<DatabaseEngine>, table: &str) -> Self {
        let query = format!(
            "SELECT book_id, title, author, created_at FROM {} ORDER BY book_id LIMIT ? OFFSET ?",
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
impl CollectionReader<OffsetPage> for BookReader {
    type Record = Book;

    async fn fetch(&self, page: OffsetPage) -> Result<Vec<Book>> {
        tracing::debug!(limit = page.limit, offset = page.offset, "Fetching books");

        let engine = Arc::clone(&self.engine);
        let query = self.query.clone();
        run_blocking(move || {
            engine.query_rows(&query, duckdb::params![page.limit, page.offset], |row| {
                Ok(Book {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    created_at: read_timestamp(row, 3)?,
                })
            })
        })
        .await
    }
}

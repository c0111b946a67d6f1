//! Tests for collection readers against an in-memory database

use super::*;
use crate::database::DatabaseEngine;
use crate::pagination::{CursorPage, OffsetPage};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use test_case::test_case;

fn seeded_engine(books: u32, cars: u32) -> Arc<DatabaseEngine> {
    let engine = DatabaseEngine::in_memory().unwrap();
    engine.create_tables("books", "cars").unwrap();
    engine.seed_books("books", books).unwrap();
    engine.seed_cars("cars", cars).unwrap();
    Arc::new(engine)
}

// ============================================================================
// Book Reader Tests
// ============================================================================

#[test_case(5, 1, vec![2, 3, 4, 5, 6] ; "books 2 to 6")]
#[test_case(3, 3, vec![4, 5, 6] ; "books 4 to 6")]
#[test_case(10, 0, (1..=10).collect::<Vec<i64>>() ; "whole first page")]
#[test_case(5, 8, vec![9, 10] ; "short last page")]
#[test_case(3, 11, Vec::<i64>::new() ; "offset past the end")]
#[test_case(0, 0, Vec::<i64>::new() ; "zero limit")]
#[tokio::test]
async fn test_book_reader_slices(limit: i64, offset: i64, expected: Vec<i64>) {
    let reader = BookReader::new(seeded_engine(10, 0), "books");
    let ids: Vec<i64> = reader
        .fetch(OffsetPage::new(limit, offset))
        .await
        .unwrap()
        .into_iter()
        .map(|book| book.id)
        .collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_book_reader_maps_columns() {
    let reader = BookReader::new(seeded_engine(3, 0), "books");
    let books = reader.fetch(OffsetPage::new(1, 1)).await.unwrap();

    assert_eq!(books.len(), 1);
    let book = &books[0];
    assert_eq!(book.id, 2);
    assert_eq!(book.title, "Title-2");
    assert_eq!(book.author, "Author-2");
    assert!(book.created_at.ends_with('Z'), "{}", book.created_at);
}

#[tokio::test]
async fn test_book_reader_missing_table_fails() {
    let engine = Arc::new(DatabaseEngine::in_memory().unwrap());
    let reader = BookReader::new(engine, "books");
    let err = reader.fetch(OffsetPage::new(10, 0)).await.unwrap_err();
    assert_eq!(
        err.status_code(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_book_reader_query_shape() {
    let reader = BookReader::new(Arc::new(DatabaseEngine::in_memory().unwrap()), "library");
    assert_eq!(
        reader.query(),
        "SELECT book_id, title, author, created_at FROM library ORDER BY book_id LIMIT ? OFFSET ?"
    );
}

// ============================================================================
// Car Reader Tests
// ============================================================================

#[test_case(4, 5, vec![4, 5, 6, 7, 8] ; "cars 4 to 8")]
#[test_case(1, 3, vec![1, 2, 3] ; "from the start")]
#[test_case(0, 2, vec![1, 2] ; "cursor below the key space")]
#[test_case(9, 5, vec![9, 10] ; "short last page")]
#[test_case(11, 5, Vec::<i64>::new() ; "cursor past the end")]
#[tokio::test]
async fn test_car_reader_slices(cursor: i64, limit: i64, expected: Vec<i64>) {
    let reader = CarReader::new(seeded_engine(0, 10), "cars");
    let ids: Vec<i64> = reader
        .fetch(CursorPage::new(cursor, limit))
        .await
        .unwrap()
        .into_iter()
        .map(|car| car.id)
        .collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_car_reader_maps_columns() {
    let reader = CarReader::new(seeded_engine(0, 2), "cars");
    let cars = reader.fetch(CursorPage::new(2, 10)).await.unwrap();

    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].brand, "Brand-2");
    assert_eq!(cars[0].model, "Model-2");
}

#[tokio::test]
async fn test_car_reader_is_repeatable() {
    let reader = CarReader::new(seeded_engine(0, 6), "cars");
    let first = reader.fetch(CursorPage::new(2, 3)).await.unwrap();
    let second = reader.fetch(CursorPage::new(2, 3)).await.unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_car_reader_query_shape() {
    let reader = CarReader::new(Arc::new(DatabaseEngine::in_memory().unwrap()), "cars");
    assert_eq!(
        reader.query(),
        "SELECT car_id, brand, model, created_at FROM cars WHERE car_id >= ? ORDER BY car_id LIMIT ?"
    );
}

// ============================================================================
// Scan Failure Tests
// ============================================================================

fn engine_with(sql: &str) -> Arc<DatabaseEngine> {
    let engine = DatabaseEngine::in_memory().unwrap();
    engine.lock().unwrap().execute_batch(sql).unwrap();
    Arc::new(engine)
}

#[test_case("TIMESTAMP", "NULL" ; "null created_at")]
#[test_case("INTEGER", "42" ; "integer created_at")]
#[tokio::test]
async fn test_book_reader_unreadable_created_at_fails(column_type: &str, value: &str) {
    let engine = engine_with(&format!(
        "CREATE TABLE books (book_id INTEGER PRIMARY KEY, title VARCHAR, author VARCHAR, created_at {column_type});
         INSERT INTO books VALUES (1, 'T', 'A', {value});"
    ));
    let err = BookReader::new(engine, "books")
        .fetch(OffsetPage::new(5, 0))
        .await
        .unwrap_err();
    assert_eq!(
        err.status_code(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test_case("TIMESTAMP", "NULL" ; "null created_at")]
#[test_case("INTEGER", "42" ; "integer created_at")]
#[tokio::test]
async fn test_car_reader_unreadable_created_at_fails(column_type: &str, value: &str) {
    let engine = engine_with(&format!(
        "CREATE TABLE cars (car_id INTEGER PRIMARY KEY, brand VARCHAR, model VARCHAR, created_at {column_type});
         INSERT INTO cars VALUES (1, 'B', 'M', {value});"
    ));
    let err = CarReader::new(engine, "cars")
        .fetch(CursorPage::new(1, 5))
        .await
        .unwrap_err();
    assert_eq!(
        err.status_code(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

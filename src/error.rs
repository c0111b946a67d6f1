//! Error types for the pagination service
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use axum::http::StatusCode;
use thiserror::Error;

/// The main error type for the pagination service
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Missing query parameter: {name}")]
    MissingParam { name: String },

    #[error("Invalid value for query parameter '{name}': {value:?}")]
    InvalidParam { name: String, value: String },

    #[error("Method {method} not allowed")]
    MethodNotAllowed { method: String },

    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    #[error("Storage error: {message}")]
    Storage { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing query parameter error
    pub fn missing_param(name: impl Into<String>) -> Self {
        Self::MissingParam { name: name.into() }
    }

    /// Create an invalid query parameter error
    pub fn invalid_param(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidParam {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a method not allowed error
    pub fn method_not_allowed(method: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            method: method.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the caller is at fault (bad query parameters)
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::MissingParam { .. } | Error::InvalidParam { .. })
    }

    /// HTTP status this error is surfaced as
    ///
    /// Missing and malformed parameters collapse to the same status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingParam { .. } | Error::InvalidParam { .. } => StatusCode::BAD_REQUEST,
            Error::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias for the pagination service
pub type Result<T> = std::result::Result<T, Error>;

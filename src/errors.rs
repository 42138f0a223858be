#![allow(dead_code)]

use thiserror::Error;

/// Application-wide error type — single point of truth.
#[derive(Error, Debug)]
pub enum AppError {
    /// Metadata store operations.
    #[error("metadata store error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Artifact store I/O.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Configuration issues: missing field definition, non-positive decimal
    /// scale, unknown date format, missing client/file_control row.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unparseable interchange criterion cell — fatal to the interchange
    /// stage.
    #[error("rule DSL error: {0}")]
    RuleDsl(String),

    /// Unknown header length, or other file-shape problem the framer
    /// recovers from by emitting an empty artifact. Carried as an error
    /// variant so call sites can log it, but the framer itself converts it
    /// to an empty `Table` rather than propagating it past stage 1.
    #[error("input shape error: {0}")]
    InputShape(String),

    #[error("invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
}

/// Application-wide result type — single point of truth.
pub type AppResult<T> = Result<T, AppError>;

// crates/ticketdash-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Ticket ingestion failed: {0}")]
    Parser(#[from] ticketdash_parser::ParserError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file could not be parsed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

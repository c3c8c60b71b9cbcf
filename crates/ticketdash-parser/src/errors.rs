use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Coarse classification surfaced to callers that only need to know which
/// stage of ingestion rejected the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Decode,
    Schema,
    TimestampFormat,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Decode => "decode",
            ErrorKind::Schema => "schema",
            ErrorKind::TimestampFormat => "timestamp_format",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("payload could not be decoded: {message}")]
    Decode { message: String },

    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    #[error("missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("column '{column}' row {line_index}: invalid timestamp '{value}'")]
    TimestampFormat {
        column: String,
        line_index: usize,
        value: String,
    },

    #[error("column '{column}' row {line_index}: {message}")]
    Field {
        column: String,
        line_index: usize,
        message: String,
    },
}

impl ParserError {
    pub fn decode(message: impl Into<String>) -> Self {
        ParserError::Decode {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParserError::Decode { .. } | ParserError::Csv { .. } | ParserError::Field { .. } => {
                ErrorKind::Decode
            }
            ParserError::Schema { .. } => ErrorKind::Schema,
            ParserError::TimestampFormat { .. } => ErrorKind::TimestampFormat,
        }
    }
}

impl From<csv::Error> for ParserError {
    fn from(source: csv::Error) -> Self {
        ParserError::Csv { source }
    }
}

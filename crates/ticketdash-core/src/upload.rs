use serde::Serialize;
use ticketdash_parser::{parse_ticket_upload, ErrorKind, ParserError};
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::report::{build_report, DashboardReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl StatusMessage {
    pub fn success(filename: &str, rows: usize) -> Self {
        Self {
            level: MessageLevel::Success,
            text: format!("File {filename} processed successfully! Total of {rows} tickets."),
            error_kind: None,
        }
    }

    pub fn failure(kind: ErrorKind, detail: impl std::fmt::Display) -> Self {
        Self {
            level: MessageLevel::Error,
            text: format!("Error processing file: {detail}"),
            error_kind: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == MessageLevel::Success
    }
}

/// Result of one upload: the report on success, always a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadOutcome {
    pub report: Option<DashboardReport>,
    pub message: StatusMessage,
}

impl UploadOutcome {
    pub fn rejected(err: &ParserError) -> Self {
        Self {
            report: None,
            message: StatusMessage::failure(err.kind(), err),
        }
    }
}

/// Ingests one payload and, only if every row normalizes, aggregates it.
///
/// `filename` is used for the message and nothing else.
pub fn process_upload(payload: &[u8], filename: &str, config: &DashboardConfig) -> UploadOutcome {
    match parse_ticket_upload(payload, &config.ingest) {
        Ok(table) => {
            let report = build_report(&table, &config.aggregate);
            info!(
                filename,
                rows = table.len(),
                file_hash = %table.file_hash,
                "upload processed"
            );
            UploadOutcome {
                message: StatusMessage::success(filename, table.len()),
                report: Some(report),
            }
        }
        Err(err) => {
            warn!(filename, kind = %err.kind(), error = %err, "upload rejected");
            UploadOutcome::rejected(&err)
        }
    }
}

/// What a dashboard currently shows.
///
/// A failed upload only replaces the message; the views from the last good
/// upload stay on screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub report: Option<DashboardReport>,
    pub message: Option<StatusMessage>,
}

impl DashboardState {
    pub fn apply(&mut self, outcome: UploadOutcome) {
        if let Some(report) = outcome.report {
            self.report = Some(report);
        }
        self.message = Some(outcome.message);
    }
}

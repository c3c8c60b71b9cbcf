pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod report;
pub mod upload;
pub mod views;

pub use config::{AggregationOptions, DashboardConfig};
pub use error::{DashboardError, Result};
pub use report::{build_report, DashboardReport};
pub use upload::{process_upload, DashboardState, MessageLevel, StatusMessage, UploadOutcome};

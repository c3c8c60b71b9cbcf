use std::path::Path;

use serde::{Deserialize, Serialize};
use ticketdash_parser::IngestOptions;
use tracing::info;

use crate::error::{DashboardError, Result};

pub const CONFIG_ENV_VAR: &str = "TICKETDASH_CONFIG";
pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationOptions {
    /// Length cap for the tag and agent rankings.
    pub top_k: usize,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Everything a caller must state up front: delimiter, date order, header
/// names and ranking length.
///
/// ```toml
/// [ingest]
/// delimiter = ";"
/// date_order = "month_first"
///
/// [ingest.columns]
/// agent = "OPERADOR"
///
/// [aggregate]
/// top_k = 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub ingest: IngestOptions,
    pub aggregate: AggregationOptions,
}

impl DashboardConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        info!(path = %path.display(), "loaded dashboard config");
        Ok(config)
    }

    /// Reads the file named by `TICKETDASH_CONFIG`, or the defaults when the
    /// variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.aggregate.top_k == 0 {
            return Err(DashboardError::Validation(
                "aggregate.top_k must be at least 1".to_string(),
            ));
        }

        let columns = &self.ingest.columns;
        let headers = [
            &columns.customer_key,
            &columns.name,
            &columns.status,
            &columns.department,
            &columns.tags,
            &columns.agent,
            &columns.opened_at,
            &columns.closed_at,
            &columns.last_message_at,
        ];
        for (idx, header) in headers.iter().enumerate() {
            if header.trim().is_empty() {
                return Err(DashboardError::Validation(
                    "ingest.columns entries must not be blank".to_string(),
                ));
            }
            if headers[..idx]
                .iter()
                .any(|other| other.trim().eq_ignore_ascii_case(header.trim()))
            {
                return Err(DashboardError::Validation(format!(
                    "ingest.columns maps two fields to header '{}'",
                    header.trim()
                )));
            }
        }

        Ok(())
    }
}

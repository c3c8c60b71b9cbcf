use chrono::NaiveDateTime;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::formats::TicketColumn;

const MICROS_PER_HOUR: f64 = 60.0 * 60.0 * 1_000_000.0;

/// One customer-service ticket, i.e. one row of the uploaded export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub customer_key: String,
    pub name: String,
    pub status: String,
    pub department: String,
    pub tags: Option<String>,
    pub agent: String,
    pub opened_at: NaiveDateTime,
    pub closed_at: Option<NaiveDateTime>,
    pub last_message_at: Option<NaiveDateTime>,
}

impl Ticket {
    /// Comma-separated tags, trimmed, with empty fragments dropped.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    /// Hours between opening and closing. Negative when the export has the
    /// close before the open; `None` while the ticket is still open.
    pub fn handling_hours(&self) -> Option<f64> {
        self.closed_at.map(|closed| {
            let micros = (closed - self.opened_at).num_microseconds().unwrap_or(
                if closed < self.opened_at {
                    i64::MIN
                } else {
                    i64::MAX
                },
            );
            micros as f64 / MICROS_PER_HOUR
        })
    }
}

/// The normalized table: every ticket of one upload, in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketTable {
    pub file_hash: String,
    pub tickets: Vec<Ticket>,
}

impl TicketTable {
    pub fn new(tickets: Vec<Ticket>, file_hash: impl Into<String>) -> Self {
        Self {
            file_hash: file_hash.into(),
            tickets,
        }
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ticket> {
        self.tickets.iter()
    }

    /// Columnar copy of the table with microsecond datetime columns.
    pub fn to_dataframe(&self) -> Result<DataFrame, PolarsError> {
        let datetime = DataType::Datetime(TimeUnit::Microseconds, None);

        let opened: Vec<i64> = self
            .tickets
            .iter()
            .map(|t| t.opened_at.and_utc().timestamp_micros())
            .collect();
        let closed: Vec<Option<i64>> = self
            .tickets
            .iter()
            .map(|t| t.closed_at.map(|dt| dt.and_utc().timestamp_micros()))
            .collect();
        let last_message: Vec<Option<i64>> = self
            .tickets
            .iter()
            .map(|t| t.last_message_at.map(|dt| dt.and_utc().timestamp_micros()))
            .collect();
        let tags: Vec<Option<&str>> = self.tickets.iter().map(|t| t.tags.as_deref()).collect();

        let columns: Vec<Column> = vec![
            Series::new(
                TicketColumn::CustomerKey.canonical_name().into(),
                text_column(&self.tickets, |t| t.customer_key.as_str()),
            )
            .into(),
            Series::new(
                TicketColumn::Name.canonical_name().into(),
                text_column(&self.tickets, |t| t.name.as_str()),
            )
            .into(),
            Series::new(
                TicketColumn::Status.canonical_name().into(),
                text_column(&self.tickets, |t| t.status.as_str()),
            )
            .into(),
            Series::new(
                TicketColumn::Department.canonical_name().into(),
                text_column(&self.tickets, |t| t.department.as_str()),
            )
            .into(),
            Series::new(TicketColumn::Tags.canonical_name().into(), tags).into(),
            Series::new(
                TicketColumn::Agent.canonical_name().into(),
                text_column(&self.tickets, |t| t.agent.as_str()),
            )
            .into(),
            Series::new(TicketColumn::OpenedAt.canonical_name().into(), opened)
                .cast(&datetime)?
                .into(),
            Series::new(TicketColumn::ClosedAt.canonical_name().into(), closed)
                .cast(&datetime)?
                .into(),
            Series::new(TicketColumn::LastMessageAt.canonical_name().into(), last_message)
                .cast(&datetime)?
                .into(),
        ];

        DataFrame::new(columns)
    }
}

fn text_column<'a>(tickets: &'a [Ticket], field: impl Fn(&'a Ticket) -> &'a str) -> Vec<&'a str> {
    tickets.iter().map(field).collect()
}

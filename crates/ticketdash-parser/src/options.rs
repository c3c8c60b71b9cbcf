use std::fmt;

use serde::{Deserialize, Serialize};

use crate::formats::schema::TicketColumn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Delimiter {
    #[default]
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = ";")]
    Semicolon,
}

impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Delimiter::Comma => ",",
            Delimiter::Semicolon => ";",
        })
    }
}

impl TryFrom<&str> for Delimiter {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "," | "comma" => Ok(Delimiter::Comma),
            ";" | "semicolon" => Ok(Delimiter::Semicolon),
            other => Err(format!("unsupported delimiter '{other}' (expected ',' or ';')")),
        }
    }
}

/// Field order of slash-separated dates such as `03/04/2024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    #[default]
    DayFirst,
    MonthFirst,
}

impl DateOrder {
    pub(crate) fn formats(&self) -> &'static [&'static str] {
        match self {
            DateOrder::DayFirst => &[
                "%d/%m/%Y %H:%M:%S",
                "%d/%m/%Y %H:%M",
                "%Y-%m-%d %H:%M:%S%.f",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%d %H:%M",
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%dT%H:%M:%S",
            ],
            DateOrder::MonthFirst => &[
                "%m/%d/%Y %H:%M:%S",
                "%m/%d/%Y %H:%M",
                "%Y-%m-%d %H:%M:%S%.f",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%d %H:%M",
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%dT%H:%M:%S",
            ],
        }
    }

    pub(crate) fn date_only_formats(&self) -> &'static [&'static str] {
        match self {
            DateOrder::DayFirst => &["%d/%m/%Y", "%Y-%m-%d"],
            DateOrder::MonthFirst => &["%m/%d/%Y", "%Y-%m-%d"],
        }
    }
}

/// Header names for each ticket field. Matching is trimmed and ASCII
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub customer_key: String,
    pub name: String,
    pub status: String,
    pub department: String,
    pub tags: String,
    pub agent: String,
    pub opened_at: String,
    pub closed_at: String,
    pub last_message_at: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            customer_key: "NUMERO".to_string(),
            name: "NOME".to_string(),
            status: "STATUS".to_string(),
            department: "DEPARTAMENTO".to_string(),
            tags: "TAGS".to_string(),
            agent: "ATENDENTE".to_string(),
            opened_at: "DATA".to_string(),
            closed_at: "DATAFINALIZACAO".to_string(),
            last_message_at: "ULTIMAMENSAGEM".to_string(),
        }
    }
}

impl ColumnMap {
    pub fn header_for(&self, column: TicketColumn) -> &str {
        match column {
            TicketColumn::CustomerKey => &self.customer_key,
            TicketColumn::Name => &self.name,
            TicketColumn::Status => &self.status,
            TicketColumn::Department => &self.department,
            TicketColumn::Tags => &self.tags,
            TicketColumn::Agent => &self.agent,
            TicketColumn::OpenedAt => &self.opened_at,
            TicketColumn::ClosedAt => &self.closed_at,
            TicketColumn::LastMessageAt => &self.last_message_at,
        }
    }
}

/// Caller-declared conventions for one upload. Nothing here is auto-detected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    pub delimiter: Delimiter,
    pub date_order: DateOrder,
    pub columns: ColumnMap,
}

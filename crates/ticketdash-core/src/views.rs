use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;
use serde::Serialize;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

/// `(label, count)` pairs, highest count first; equal counts keep the order in
/// which their labels first appeared in the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountView {
    pub entries: Vec<CountEntry>,
}

impl CountView {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    pub fn pairs(&self) -> Vec<(&str, usize)> {
        self.entries
            .iter()
            .map(|entry| (entry.label.as_str(), entry.count))
            .collect()
    }

    pub fn to_dataframe(&self, label_column: &str) -> Result<DataFrame, PolarsError> {
        let labels: Vec<&str> = self.entries.iter().map(|e| e.label.as_str()).collect();
        let counts: Vec<u64> = self.entries.iter().map(|e| e.count as u64).collect();
        DataFrame::new(vec![
            Series::new(label_column.into(), labels).into(),
            Series::new("count".into(), counts).into(),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Tickets opened per calendar day, ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DailyVolume {
    pub entries: Vec<DailyCount>,
}

impl DailyVolume {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_dataframe(&self) -> Result<DataFrame, PolarsError> {
        let days: Vec<i32> = self
            .entries
            .iter()
            .map(|e| days_since_epoch(e.date))
            .collect();
        let counts: Vec<u64> = self.entries.iter().map(|e| e.count as u64).collect();
        DataFrame::new(vec![
            Series::new("date".into(), days).cast(&DataType::Date)?.into(),
            Series::new("count".into(), counts).into(),
        ])
    }
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    let seconds = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    (seconds / SECONDS_PER_DAY) as i32
}

/// Follow-up staleness of one `(customer_key, name, status)` group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowupRow {
    pub customer_key: String,
    pub name: String,
    pub status: String,
    pub last_message_at: Option<NaiveDateTime>,
    pub opened_at: NaiveDateTime,
    pub days_since_contact: Option<i64>,
    pub days_total: Option<i64>,
}

pub fn followup_dataframe(rows: &[FollowupRow]) -> Result<DataFrame, PolarsError> {
    let datetime = DataType::Datetime(TimeUnit::Microseconds, None);

    let keys: Vec<&str> = rows.iter().map(|r| r.customer_key.as_str()).collect();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    let statuses: Vec<&str> = rows.iter().map(|r| r.status.as_str()).collect();
    let last_message: Vec<Option<i64>> = rows
        .iter()
        .map(|r| r.last_message_at.map(|dt| dt.and_utc().timestamp_micros()))
        .collect();
    let opened: Vec<i64> = rows
        .iter()
        .map(|r| r.opened_at.and_utc().timestamp_micros())
        .collect();
    let since_contact: Vec<Option<i64>> = rows.iter().map(|r| r.days_since_contact).collect();
    let total: Vec<Option<i64>> = rows.iter().map(|r| r.days_total).collect();

    DataFrame::new(vec![
        Series::new("customer_key".into(), keys).into(),
        Series::new("name".into(), names).into(),
        Series::new("status".into(), statuses).into(),
        Series::new("last_message_at".into(), last_message)
            .cast(&datetime)?
            .into(),
        Series::new("opened_at".into(), opened).cast(&datetime)?.into(),
        Series::new("days_since_contact".into(), since_contact).into(),
        Series::new("days_total".into(), total).into(),
    ])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalCount {
    pub label: String,
    pub value: usize,
}

/// Time from opening to closing over the tickets that have a close timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandlingTime {
    pub resolved: usize,
    pub mean_hours: Option<f64>,
}

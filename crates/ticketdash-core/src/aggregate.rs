//! Derived views over a normalized ticket table.
//!
//! Every function here reads the table and returns a fresh structure. Nothing
//! is cached between calls, so running them twice on the same table yields
//! identical output.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use ticketdash_parser::{Ticket, TicketTable};

use crate::views::{
    CountEntry, CountView, DailyCount, DailyVolume, FollowupRow, HandlingTime, TotalCount,
};

pub const TOTAL_COUNT_LABEL: &str = "Total tickets";

/// Counts labels while remembering the order each one was first seen.
#[derive(Default)]
struct FirstSeenCounter<'a> {
    order: Vec<&'a str>,
    counts: HashMap<&'a str, usize>,
}

impl<'a> FirstSeenCounter<'a> {
    fn push(&mut self, label: &'a str) {
        let count = self.counts.entry(label).or_insert_with(|| {
            self.order.push(label);
            0
        });
        *count += 1;
    }

    /// Count descending; the sort is stable so ties stay in first-seen order.
    fn into_view(self, limit: Option<usize>) -> CountView {
        let mut entries: Vec<CountEntry> = self
            .order
            .into_iter()
            .map(|label| CountEntry {
                label: label.to_string(),
                count: self.counts.get(label).copied().unwrap_or_default(),
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        CountView { entries }
    }
}

fn count_by<'a>(
    table: &'a TicketTable,
    label: impl Fn(&'a Ticket) -> &'a str,
    limit: Option<usize>,
) -> CountView {
    let mut counter = FirstSeenCounter::default();
    for ticket in table.iter() {
        counter.push(label(ticket));
    }
    counter.into_view(limit)
}

pub fn status_counts(table: &TicketTable) -> CountView {
    count_by(table, |t| t.status.as_str(), None)
}

pub fn department_counts(table: &TicketTable) -> CountView {
    count_by(table, |t| t.department.as_str(), None)
}

pub fn top_agents(table: &TicketTable, k: usize) -> CountView {
    count_by(table, |t| t.agent.as_str(), Some(k))
}

/// Splits every `tags` field on commas and ranks the trimmed fragments.
pub fn top_tags(table: &TicketTable, k: usize) -> CountView {
    let mut counter = FirstSeenCounter::default();
    for tag in table.iter().flat_map(Ticket::tag_list) {
        counter.push(tag);
    }
    counter.into_view(Some(k))
}

pub fn daily_volume(table: &TicketTable) -> DailyVolume {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for ticket in table.iter() {
        *per_day.entry(ticket.opened_at.date()).or_default() += 1;
    }
    DailyVolume {
        entries: per_day
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect(),
    }
}

struct FollowupGroup<'a> {
    customer_key: &'a str,
    name: &'a str,
    status: &'a str,
    last_message_at: Option<NaiveDateTime>,
    opened_at: NaiveDateTime,
}

/// One row per `(customer_key, name, status)`.
///
/// Staleness is measured against the latest `last_message_at` anywhere in the
/// table, not the wall clock. Day counts truncate toward zero and are not
/// clamped, so a group opened after that reference gets a negative
/// `days_total`. Rows are ordered by `days_since_contact` descending, groups
/// without any contact timestamp last, ties in first-seen order.
pub fn followup_table(table: &TicketTable) -> Vec<FollowupRow> {
    let mut order: Vec<(&str, &str, &str)> = Vec::new();
    let mut groups: HashMap<(&str, &str, &str), FollowupGroup<'_>> = HashMap::new();

    for ticket in table.iter() {
        let key = (
            ticket.customer_key.as_str(),
            ticket.name.as_str(),
            ticket.status.as_str(),
        );
        groups
            .entry(key)
            .and_modify(|group| {
                if ticket.opened_at < group.opened_at {
                    group.opened_at = ticket.opened_at;
                }
                group.last_message_at = group.last_message_at.max(ticket.last_message_at);
            })
            .or_insert_with(|| {
                order.push(key);
                FollowupGroup {
                    customer_key: key.0,
                    name: key.1,
                    status: key.2,
                    last_message_at: ticket.last_message_at,
                    opened_at: ticket.opened_at,
                }
            });
    }

    let now_ref = reference_timestamp(table);

    let mut rows: Vec<FollowupRow> = order
        .iter()
        .filter_map(|key| groups.get(key))
        .map(|group| FollowupRow {
            customer_key: group.customer_key.to_string(),
            name: group.name.to_string(),
            status: group.status.to_string(),
            last_message_at: group.last_message_at,
            opened_at: group.opened_at,
            days_since_contact: now_ref
                .zip(group.last_message_at)
                .map(|(reference, contact)| (reference - contact).num_days()),
            days_total: now_ref.map(|reference| (reference - group.opened_at).num_days()),
        })
        .collect();

    rows.sort_by(|a, b| b.days_since_contact.cmp(&a.days_since_contact));
    rows
}

/// Latest `last_message_at` across the whole table.
pub fn reference_timestamp(table: &TicketTable) -> Option<NaiveDateTime> {
    table.iter().filter_map(|t| t.last_message_at).max()
}

pub fn total_count(table: &TicketTable) -> TotalCount {
    TotalCount {
        label: TOTAL_COUNT_LABEL.to_string(),
        value: table.len(),
    }
}

pub fn handling_time(table: &TicketTable) -> HandlingTime {
    let hours: Vec<f64> = table.iter().filter_map(Ticket::handling_hours).collect();
    let mean_hours = if hours.is_empty() {
        None
    } else {
        Some(hours.iter().sum::<f64>() / hours.len() as f64)
    };
    HandlingTime {
        resolved: hours.len(),
        mean_hours,
    }
}

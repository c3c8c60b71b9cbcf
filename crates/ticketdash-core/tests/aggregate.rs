use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use ticketdash_core::aggregate::{
    daily_volume, department_counts, followup_table, handling_time, reference_timestamp,
    status_counts, top_agents, top_tags, total_count, TOTAL_COUNT_LABEL,
};
use ticketdash_core::{build_report, AggregationOptions};
use ticketdash_parser::{parse_ticket_upload, IngestOptions, Ticket, TicketTable};

fn fixture(name: &str) -> Vec<u8> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../ticketdash-parser/tests/data")
        .join(name);
    std::fs::read(path).expect("read fixture")
}

fn fixture_table() -> TicketTable {
    parse_ticket_upload(&fixture("tickets_day_first.csv"), &IngestOptions::default())
        .expect("fixture parses")
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn ticket(key: &str, status: &str, opened_at: NaiveDateTime) -> Ticket {
    Ticket {
        customer_key: key.to_string(),
        name: format!("Customer {key}"),
        status: status.to_string(),
        department: "Support".to_string(),
        tags: None,
        agent: "Ana".to_string(),
        opened_at,
        closed_at: None,
        last_message_at: None,
    }
}

fn table(tickets: Vec<Ticket>) -> TicketTable {
    TicketTable::new(tickets, "test")
}

#[test]
fn status_counts_order_by_count_then_first_seen() {
    let base = at(2024, 1, 1, 9, 0);
    let t = table(vec![
        ticket("1", "Open", base),
        ticket("2", "Closed", base),
        ticket("3", "Open", base),
    ]);

    assert_eq!(status_counts(&t).pairs(), vec![("Open", 2), ("Closed", 1)]);
    assert_eq!(total_count(&t).value, 3);
    assert_eq!(total_count(&t).label, TOTAL_COUNT_LABEL);
}

#[test]
fn top_tags_split_trim_and_skip_missing() {
    let base = at(2024, 1, 1, 9, 0);
    let mut first = ticket("1", "Open", base);
    first.tags = Some("vip, urgent".to_string());
    let mut second = ticket("2", "Open", base);
    second.tags = Some("urgent".to_string());
    let third = ticket("3", "Open", base);

    let t = table(vec![first, second, third]);
    assert_eq!(top_tags(&t, 10).pairs(), vec![("urgent", 2), ("vip", 1)]);
}

#[test]
fn rankings_are_capped_at_k() {
    let base = at(2024, 1, 1, 9, 0);
    let tickets: Vec<Ticket> = (0..15)
        .map(|idx| {
            let mut t = ticket(&idx.to_string(), "Open", base);
            t.agent = format!("agent-{idx}");
            t.tags = Some(format!("tag-{idx}, shared"));
            t
        })
        .collect();
    let t = table(tickets);

    let agents = top_agents(&t, 10);
    assert_eq!(agents.len(), 10);
    assert_eq!(agents.entries[0].label, "agent-0");
    assert_eq!(agents.entries[9].label, "agent-9");

    let tags = top_tags(&t, 10);
    assert_eq!(tags.len(), 10);
    assert_eq!(tags.entries[0].label, "shared");
    assert_eq!(tags.entries[0].count, 15);
    assert_eq!(tags.entries[1].label, "tag-0");

    assert_eq!(top_agents(&t, 3).len(), 3);
}

#[test]
fn fixture_views_match_hand_counts() {
    let t = fixture_table();

    assert_eq!(
        status_counts(&t).pairs(),
        vec![("Finalizado", 3), ("Aberto", 2), ("Em atendimento", 1)]
    );
    assert_eq!(
        department_counts(&t).pairs(),
        vec![("Suporte", 3), ("Financeiro", 2), ("Comercial", 1)]
    );
    assert_eq!(
        top_tags(&t, 10).pairs(),
        vec![("vip", 2), ("urgente", 2), ("cobranca", 1), ("segunda via", 1)]
    );
    assert_eq!(
        top_agents(&t, 10).pairs(),
        vec![("Carlos", 3), ("Marina", 2), ("Joao", 1)]
    );

    let daily: Vec<(NaiveDate, usize)> = daily_volume(&t)
        .entries
        .iter()
        .map(|e| (e.date, e.count))
        .collect();
    assert_eq!(
        daily,
        vec![
            (NaiveDate::from_ymd_opt(2024, 4, 3).unwrap(), 2),
            (NaiveDate::from_ymd_opt(2024, 4, 4).unwrap(), 1),
            (NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(), 1),
            (NaiveDate::from_ymd_opt(2024, 4, 6).unwrap(), 2),
        ]
    );
}

#[test]
fn daily_volume_is_strictly_increasing() {
    let t = table(vec![
        ticket("1", "Open", at(2024, 3, 10, 23, 59)),
        ticket("2", "Open", at(2024, 3, 1, 0, 0)),
        ticket("3", "Open", at(2024, 3, 10, 0, 1)),
        ticket("4", "Open", at(2023, 12, 31, 12, 0)),
    ]);
    let volume = daily_volume(&t);

    assert_eq!(volume.len(), 3);
    assert!(volume
        .entries
        .windows(2)
        .all(|pair| pair[0].date < pair[1].date));
    assert_eq!(volume.entries[2].count, 2);
}

#[test]
fn followup_groups_against_table_wide_reference() {
    let t = fixture_table();
    assert_eq!(reference_timestamp(&t), Some(at(2024, 4, 6, 18, 0)));

    let rows = followup_table(&t);
    let summary: Vec<(&str, &str, Option<i64>, Option<i64>)> = rows
        .iter()
        .map(|r| {
            (
                r.customer_key.as_str(),
                r.status.as_str(),
                r.days_since_contact,
                r.days_total,
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("5511990001", "Finalizado", Some(2), Some(3)),
            ("5511990002", "Aberto", Some(0), Some(3)),
            ("5511990003", "Em atendimento", Some(0), Some(1)),
            ("5511990004", "Finalizado", Some(0), Some(0)),
        ]
    );

    let ana = &rows[0];
    assert_eq!(ana.name, "Ana Souza");
    assert_eq!(ana.last_message_at, Some(at(2024, 4, 4, 8, 55)));
    assert_eq!(ana.opened_at, at(2024, 4, 3, 9, 15));
}

#[test]
fn followup_has_one_row_per_distinct_triple() {
    let t = fixture_table();
    let rows = followup_table(&t);

    let distinct: HashSet<(&str, &str, &str)> = t
        .iter()
        .map(|tk| (tk.customer_key.as_str(), tk.name.as_str(), tk.status.as_str()))
        .collect();
    assert_eq!(rows.len(), distinct.len());

    let reference = reference_timestamp(&t).unwrap();
    for row in &rows {
        if row.last_message_at.is_some_and(|ts| ts <= reference) {
            assert!(row.days_since_contact.unwrap() >= 0);
        }
    }
}

#[test]
fn followup_keeps_negative_totals_and_puts_silent_groups_last() {
    let mut early = ticket("1", "Open", at(2024, 5, 1, 8, 0));
    early.last_message_at = Some(at(2024, 5, 2, 8, 0));
    // Opened three days after the latest contact anywhere in the table.
    let mut late = ticket("2", "Open", at(2024, 5, 5, 8, 0));
    late.last_message_at = Some(at(2024, 5, 1, 20, 0));
    let silent = ticket("3", "Open", at(2024, 4, 30, 9, 0));

    let rows = followup_table(&table(vec![silent, late, early]));

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].customer_key, "2");
    assert_eq!(rows[0].days_since_contact, Some(0));
    assert_eq!(rows[0].days_total, Some(-3));
    assert_eq!(rows[1].customer_key, "1");
    assert_eq!(rows[2].customer_key, "3");
    assert_eq!(rows[2].days_since_contact, None);
    assert_eq!(rows[2].days_total, Some(1));
}

#[test]
fn followup_without_any_contact_has_no_reference() {
    let rows = followup_table(&table(vec![ticket("1", "Open", at(2024, 5, 1, 8, 0))]));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].days_since_contact, None);
    assert_eq!(rows[0].days_total, None);
}

#[test]
fn counts_sum_to_total() {
    let t = fixture_table();
    let total = total_count(&t).value;

    assert_eq!(total, t.len());
    assert_eq!(status_counts(&t).total(), total);
    assert_eq!(department_counts(&t).total(), total);
    assert_eq!(
        daily_volume(&t).entries.iter().map(|e| e.count).sum::<usize>(),
        total
    );
}

#[test]
fn rankings_are_sorted_descending() {
    let t = fixture_table();
    for view in [top_tags(&t, 10), top_agents(&t, 10)] {
        assert!(view.len() <= 10);
        assert!(view
            .entries
            .windows(2)
            .all(|pair| pair[0].count >= pair[1].count));
    }
}

#[test]
fn handling_time_averages_resolved_tickets() {
    let handling = handling_time(&fixture_table());
    assert_eq!(handling.resolved, 3);
    let mean = handling.mean_hours.expect("resolved tickets present");
    assert!((mean - 2.5 / 3.0).abs() < 1e-9);

    let open_only = table(vec![ticket("1", "Open", at(2024, 1, 1, 0, 0))]);
    assert_eq!(handling_time(&open_only).resolved, 0);
    assert_eq!(handling_time(&open_only).mean_hours, None);
}

#[test]
fn empty_table_yields_empty_views() {
    let t = parse_ticket_upload(&fixture("tickets_header_only.csv"), &IngestOptions::default())
        .expect("header-only fixture parses");
    let report = build_report(&t, &AggregationOptions::default());

    assert_eq!(report.total.value, 0);
    assert!(report.status_counts.is_empty());
    assert!(report.department_counts.is_empty());
    assert!(report.daily_volume.is_empty());
    assert!(report.top_tags.is_empty());
    assert!(report.top_agents.is_empty());
    assert!(report.followup.is_empty());
    assert_eq!(report.handling_time.mean_hours, None);
}

#[test]
fn aggregating_twice_is_deterministic() {
    let t = fixture_table();
    let options = AggregationOptions::default();

    let first = build_report(&t, &options);
    let second = build_report(&t, &options);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

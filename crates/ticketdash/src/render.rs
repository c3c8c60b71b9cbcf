use std::fmt::Write;

use comfy_table::{presets::UTF8_FULL, Table};
use ticketdash_core::views::CountView;
use ticketdash_core::DashboardReport;

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

fn titled(title: &str, table: &Table) -> String {
    format!("{title}\n{table}\n")
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

fn count_table(title: &str, label_header: &str, view: &CountView) -> String {
    let mut table = new_table(&[label_header, "Tickets"]);
    for entry in &view.entries {
        table.add_row(vec![entry.label.clone(), entry.count.to_string()]);
    }
    titled(title, &table)
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Plain-text rendering of every view, in dashboard order.
pub fn render_report(report: &DashboardReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}: {}", report.total.label, report.total.value);
    match report.handling_time.mean_hours {
        Some(mean) => {
            let _ = writeln!(
                out,
                "Mean handling time: {mean:.1} h over {} resolved tickets",
                report.handling_time.resolved
            );
        }
        None => {
            let _ = writeln!(out, "Mean handling time: - (no resolved tickets)");
        }
    }
    out.push('\n');

    out.push_str(&count_table("Status distribution", "Status", &report.status_counts));
    out.push_str(&count_table(
        "Tickets by department",
        "Department",
        &report.department_counts,
    ));

    let mut daily = new_table(&["Date", "Tickets"]);
    for entry in &report.daily_volume.entries {
        daily.add_row(vec![
            entry.date.format("%d/%m/%Y").to_string(),
            entry.count.to_string(),
        ]);
    }
    out.push_str(&titled("Tickets per day", &daily));

    out.push_str(&count_table("Top tags", "Tag", &report.top_tags));
    out.push_str(&count_table("Top agents", "Agent", &report.top_agents));

    let mut followup = new_table(&[
        "Customer",
        "Name",
        "Status",
        "Last contact",
        "Opened",
        "Days since contact",
        "Days total",
    ]);
    for row in &report.followup {
        followup.add_row(vec![
            row.customer_key.clone(),
            row.name.clone(),
            row.status.clone(),
            optional(row.last_message_at.map(|ts| ts.format(TIMESTAMP_FORMAT))),
            row.opened_at.format(TIMESTAMP_FORMAT).to_string(),
            optional(row.days_since_contact),
            optional(row.days_total),
        ]);
    }
    out.push_str(&titled("Follow-up status", &followup));

    out
}

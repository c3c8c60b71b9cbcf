use serde::Serialize;
use ticketdash_parser::TicketTable;
use tracing::debug;

use crate::aggregate::{
    daily_volume, department_counts, followup_table, handling_time, status_counts, top_agents,
    top_tags, total_count,
};
use crate::config::AggregationOptions;
use crate::views::{CountView, DailyVolume, FollowupRow, HandlingTime, TotalCount};

/// Every derived view of one upload, ready for a rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub file_hash: String,
    pub total: TotalCount,
    pub status_counts: CountView,
    pub department_counts: CountView,
    pub daily_volume: DailyVolume,
    pub top_tags: CountView,
    pub top_agents: CountView,
    pub followup: Vec<FollowupRow>,
    pub handling_time: HandlingTime,
}

pub fn build_report(table: &TicketTable, options: &AggregationOptions) -> DashboardReport {
    let report = DashboardReport {
        file_hash: table.file_hash.clone(),
        total: total_count(table),
        status_counts: status_counts(table),
        department_counts: department_counts(table),
        daily_volume: daily_volume(table),
        top_tags: top_tags(table, options.top_k),
        top_agents: top_agents(table, options.top_k),
        followup: followup_table(table),
        handling_time: handling_time(table),
    };

    debug!(
        file_hash = %report.file_hash,
        statuses = report.status_counts.len(),
        departments = report.department_counts.len(),
        days = report.daily_volume.len(),
        tags = report.top_tags.len(),
        agents = report.top_agents.len(),
        followups = report.followup.len(),
        "dashboard views computed"
    );

    report
}

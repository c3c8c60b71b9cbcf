use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::{DataFrame, ParquetWriter};
use tracing::info;

use crate::error::Result;
use crate::report::DashboardReport;
use crate::views::followup_dataframe;

pub const REPORT_JSON: &str = "report.json";

/// Writes one Parquet file per view plus the whole report as JSON.
/// Returns the written paths in a fixed order.
pub fn export_report(report: &DashboardReport, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let frames: [(&str, DataFrame); 6] = [
        ("status_counts", report.status_counts.to_dataframe("status")?),
        (
            "department_counts",
            report.department_counts.to_dataframe("department")?,
        ),
        ("daily_volume", report.daily_volume.to_dataframe()?),
        ("top_tags", report.top_tags.to_dataframe("tag")?),
        ("top_agents", report.top_agents.to_dataframe("agent")?),
        ("followup", followup_dataframe(&report.followup)?),
    ];

    let mut written = Vec::with_capacity(frames.len() + 1);
    for (name, mut df) in frames {
        let path = dir.join(format!("{name}.parquet"));
        let mut file = File::create(&path)?;
        ParquetWriter::new(&mut file).finish(&mut df)?;
        written.push(path);
    }

    let json_path = dir.join(REPORT_JSON);
    let file = File::create(&json_path)?;
    serde_json::to_writer_pretty(file, report)?;
    written.push(json_path);

    info!(dir = %dir.display(), files = written.len(), "dashboard report exported");
    Ok(written)
}

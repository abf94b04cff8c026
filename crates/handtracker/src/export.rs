use std::path::Path;

use anyhow::{Context, Result};

use handtracker_core::{Report, Session};

const CSV_HEADER: &str = "session_id,start_time,end_time,duration_minutes,hands_count,stake_level,total_result_money,total_result_bb,bb_per_100";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render sessions as CSV, one row per session. Absent values are empty cells.
pub fn sessions_to_csv(sessions: &[Session]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for s in sessions {
        let row = [
            s.session_id.to_string(),
            s.start_time.format(TIME_FORMAT).to_string(),
            s.end_time.format(TIME_FORMAT).to_string(),
            s.duration_minutes.to_string(),
            s.hands_count.to_string(),
            escape_field(&s.stake_level),
            s.total_result_money.to_string(),
            optional(s.total_result_bb),
            optional(s.bb_per_100),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

pub fn export_csv(path: &Path, sessions: &[Session]) -> Result<()> {
    std::fs::write(path, sessions_to_csv(sessions))
        .with_context(|| format!("Failed to write CSV export to {}", path.display()))
}

/// Write summary, sessions and stakes as pretty JSON.
pub fn export_json(path: &Path, report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON export to {}", path.display()))
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

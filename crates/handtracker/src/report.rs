use clap::ValueEnum;
use colored::Colorize;
use serde::Deserialize;

use handtracker_core::{Report, Session, StakeStat, Summary};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Console reports that can be printed after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Totals over every hand
    Summary,
    /// One row per session
    Sessions,
    /// One row per stake level
    #[value(alias = "limits")]
    #[serde(alias = "limits")]
    Stakes,
}

impl ReportKind {
    pub fn defaults() -> Vec<Self> {
        vec![Self::Summary, Self::Sessions]
    }
}

/// Requested kinds in print order, each once.
fn selected(kinds: &[ReportKind]) -> Vec<ReportKind> {
    [ReportKind::Summary, ReportKind::Sessions, ReportKind::Stakes]
        .into_iter()
        .filter(|kind| kinds.contains(kind))
        .collect()
}

pub fn print_reports(report: &Report, kinds: &[ReportKind]) {
    for kind in selected(kinds) {
        match kind {
            ReportKind::Summary => print_summary(&report.summary),
            ReportKind::Sessions => print_sessions(&report.sessions),
            ReportKind::Stakes => print_stakes(&report.stakes),
        }
    }
}

fn print_summary(summary: &Summary) {
    println!();
    println!("{}", "=== Summary ===".bright_blue().bold());
    println!("{}  {}", "Hands:".dimmed(), summary.total_hands);
    println!("{}  {}", "Sessions:".dimmed(), summary.total_sessions);
    println!(
        "{}  {}",
        "Result:".dimmed(),
        colored_result(Some(summary.total_result_money))
    );
    println!(
        "{}  {}",
        "Result (bb):".dimmed(),
        colored_result(summary.total_result_bb)
    );
    println!(
        "{}  {}",
        "bb/100:".dimmed(),
        colored_result(summary.overall_bb_per_100)
    );
    println!(
        "{}  {}",
        "First hand:".dimmed(),
        summary
            .first_hand_time
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "{}  {}",
        "Last hand:".dimmed(),
        summary
            .last_hand_time
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string())
    );
}

fn print_sessions(sessions: &[Session]) {
    println!();
    println!("{}", "=== Sessions ===".bright_blue().bold());
    if sessions.is_empty() {
        println!("{}", "No timed hands, no sessions.".dimmed());
        return;
    }

    println!(
        "{:<4} {:<20} {:>6} {:<10} {:>10} {:>10} {:>9} {:>8}",
        "ID".dimmed(),
        "START".dimmed(),
        "HANDS".dimmed(),
        "STAKE".dimmed(),
        "RESULT".dimmed(),
        "RESULT(BB)".dimmed(),
        "BB/100".dimmed(),
        "MINUTES".dimmed(),
    );

    for s in sessions {
        println!(
            "{:<4} {:<20} {:>6} {:<10} {:>10} {:>10} {:>9} {:>8}",
            s.session_id,
            s.start_time.format(TIME_FORMAT).to_string(),
            s.hands_count,
            s.stake_level,
            colored_result(Some(s.total_result_money)),
            colored_result(s.total_result_bb),
            colored_result(s.bb_per_100),
            s.duration_minutes,
        );
    }
}

fn print_stakes(stakes: &[StakeStat]) {
    println!();
    println!("{}", "=== Stakes ===".bright_blue().bold());
    if stakes.is_empty() {
        println!("{}", "No single-stake sessions.".dimmed());
        return;
    }

    println!(
        "{:<10} {:>8} {:>6} {:>10} {:>10} {:>9}",
        "STAKE".dimmed(),
        "SESSIONS".dimmed(),
        "HANDS".dimmed(),
        "RESULT".dimmed(),
        "RESULT(BB)".dimmed(),
        "BB/100".dimmed(),
    );

    for s in stakes {
        println!(
            "{:<10} {:>8} {:>6} {:>10} {:>10} {:>9}",
            s.stake_level,
            s.sessions_count,
            s.hands_count,
            colored_result(Some(s.total_result_money)),
            colored_result(Some(s.total_result_bb)),
            colored_result(s.bb_per_100),
        );
    }
}

/// Two-decimal amount, green when up and red when down; `-` when absent.
fn colored_result(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("{:.2}", v).bright_green().to_string(),
        Some(v) if v < 0.0 => format!("{:.2}", v).bright_red().to_string(),
        Some(v) => format!("{:.2}", v),
        None => "-".dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Reports {
        reports: Vec<ReportKind>,
    }

    #[test]
    fn test_colored_result_plain() {
        colored::control::set_override(false);
        assert_eq!(colored_result(None), "-");
        assert_eq!(colored_result(Some(1.5)), "1.50");
        assert_eq!(colored_result(Some(-2.0)), "-2.00");
        assert_eq!(colored_result(Some(0.0)), "0.00");
        assert_eq!(colored_result(Some(266.666)), "266.67");
    }

    #[test]
    fn test_report_kind_from_cli() {
        assert_eq!(
            <ReportKind as ValueEnum>::from_str("limits", true),
            Ok(ReportKind::Stakes)
        );
        assert_eq!(
            <ReportKind as ValueEnum>::from_str("sessions", true),
            Ok(ReportKind::Sessions)
        );
        assert!(<ReportKind as ValueEnum>::from_str("hands", true).is_err());
    }

    #[test]
    fn test_report_kind_from_config() {
        let parsed: Reports = toml::from_str(r#"reports = ["limits", "summary"]"#).unwrap();
        assert_eq!(parsed.reports, vec![ReportKind::Stakes, ReportKind::Summary]);
        assert!(toml::from_str::<Reports>(r#"reports = ["Stakes"]"#).is_err());
    }

    #[test]
    fn test_selected_uses_print_order() {
        assert_eq!(
            selected(&[ReportKind::Stakes, ReportKind::Summary, ReportKind::Stakes]),
            vec![ReportKind::Summary, ReportKind::Stakes]
        );
        assert!(selected(&[]).is_empty());
    }
}

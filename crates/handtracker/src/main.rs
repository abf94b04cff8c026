mod config;
mod discovery;
mod export;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing::info;

use handtracker_core::{analyze, TrackerOptions};
use handtracker_logging::{init_tracing, LogFormat};

use config::{Overrides, ProjectConfig, Settings};
use discovery::{discover_hand_files, read_sources, InputEncoding};
use report::{print_reports, ReportKind};

#[derive(Parser, Debug)]
#[command(
    name = "handtracker",
    about = "Offline poker session tracker for hand history files",
    version,
    author
)]
struct Cli {
    /// Directory (or single file) with hand history files
    #[arg(short = 'p', long)]
    hands_path: PathBuf,

    /// Name of the tracked player
    #[arg(long)]
    hero_name: Option<String>,

    /// Minutes of inactivity that start a new session (default: 30)
    #[arg(short = 'g', long)]
    session_gap_minutes: Option<u32>,

    /// Walk subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Read every file, not only hand history extensions
    #[arg(long)]
    all_files: bool,

    /// Extension treated as a hand history file (repeatable, default: txt)
    #[arg(long = "ext")]
    extensions: Vec<String>,

    /// How input files are decoded
    #[arg(long, value_name = "LABEL")]
    encoding: Option<InputEncoding>,

    /// Reports to print (repeatable, default: summary and sessions)
    #[arg(long, value_enum)]
    report: Vec<ReportKind>,

    /// Print the full report as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Export sessions to a CSV file
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Export summary, sessions and stakes to a JSON file
    #[arg(long)]
    export_json: Option<PathBuf>,

    /// Config file (default: ./handtracker.toml, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level for diagnostics on stderr
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format.into());

    let config = match cli.config {
        Some(ref path) => ProjectConfig::load_from(path)?,
        None => {
            let working_dir =
                std::env::current_dir().context("Failed to get current directory")?;
            ProjectConfig::load(&working_dir)?.unwrap_or_default()
        }
    };

    let settings = Settings::resolve(
        Overrides {
            hero_name: cli.hero_name.clone(),
            session_gap_minutes: cli.session_gap_minutes,
            recursive: cli.recursive,
            all_files: cli.all_files,
            extensions: cli.extensions.clone(),
            encoding: cli.encoding,
            reports: cli.report.clone(),
        },
        config,
    )?;

    let files = discover_hand_files(&cli.hands_path, &settings.discovery)?;
    let sources = read_sources(&files, settings.encoding);
    info!(files = files.len(), read = sources.len(), "Loaded hand files");

    let options = TrackerOptions::new(settings.hero_name.as_str())
        .with_session_gap(settings.session_gap_minutes);
    let report = analyze(&sources, &options)?;

    if report.is_empty() {
        println!("{}", "No hands found.".dimmed());
        return Ok(());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_reports(&report, &settings.reports);
    }

    if let Some(ref path) = cli.export_csv {
        export::export_csv(path, &report.sessions)?;
        eprintln!("CSV exported to {}", path.display());
    }

    if let Some(ref path) = cli.export_json {
        export::export_json(path, &report)?;
        eprintln!("JSON exported to {}", path.display());
    }

    Ok(())
}

//! Configuration file support for handtracker.
//!
//! Loads `handtracker.toml` from the working directory, falling back to the
//! user config directory. Command-line flags override anything set here.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use handtracker_core::DEFAULT_SESSION_GAP_MINUTES;

use crate::discovery::{DiscoveryOptions, InputEncoding};
use crate::report::ReportKind;

/// Settings loaded from `handtracker.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Name of the tracked player
    pub hero_name: Option<String>,
    /// Inactivity gap in minutes that starts a new session
    pub session_gap_minutes: Option<u32>,
    /// Walk subdirectories
    pub recursive: Option<bool>,
    /// Read every file regardless of extension
    pub all_files: Option<bool>,
    /// Extensions treated as hand history files
    pub extensions: Option<Vec<String>>,
    /// How input files are decoded
    pub encoding: Option<InputEncoding>,
    /// Reports printed when none are given on the command line
    pub reports: Option<Vec<ReportKind>>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "handtracker.toml";

impl ProjectConfig {
    /// Load configuration from the working directory, then the user config dir.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if a file exists and parses successfully
    /// - `Ok(None)` if neither file exists
    /// - `Err(...)` if a file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let local = working_dir.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Self::load_from(&local).map(Some);
        }

        match user_config_path() {
            Some(path) if path.exists() => Self::load_from(&path).map(Some),
            _ => Ok(None),
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("handtracker").join(CONFIG_FILE_NAME))
}

/// Command-line values that may override the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub hero_name: Option<String>,
    pub session_gap_minutes: Option<u32>,
    pub recursive: bool,
    pub all_files: bool,
    pub extensions: Vec<String>,
    pub encoding: Option<InputEncoding>,
    pub reports: Vec<ReportKind>,
}

/// Fully resolved settings for one run.
#[derive(Debug)]
pub struct Settings {
    pub hero_name: String,
    pub session_gap_minutes: u32,
    pub discovery: DiscoveryOptions,
    pub encoding: InputEncoding,
    pub reports: Vec<ReportKind>,
}

impl Settings {
    /// Merge flags over the config file over built-in defaults.
    pub fn resolve(overrides: Overrides, config: ProjectConfig) -> Result<Self> {
        let hero_name = overrides
            .hero_name
            .or(config.hero_name)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .with_context(|| {
                format!(
                    "No hero name given. Use --hero-name or set hero_name in {}",
                    CONFIG_FILE_NAME
                )
            })?;

        let extensions = if !overrides.extensions.is_empty() {
            overrides.extensions
        } else {
            config
                .extensions
                .unwrap_or_else(|| vec!["txt".to_string()])
        };

        let reports = if !overrides.reports.is_empty() {
            overrides.reports
        } else {
            config.reports.unwrap_or_else(ReportKind::defaults)
        };

        Ok(Self {
            hero_name,
            session_gap_minutes: overrides
                .session_gap_minutes
                .or(config.session_gap_minutes)
                .unwrap_or(DEFAULT_SESSION_GAP_MINUTES),
            discovery: DiscoveryOptions {
                recursive: overrides.recursive || config.recursive.unwrap_or(false),
                all_files: overrides.all_files || config.all_files.unwrap_or(false),
                extensions,
            },
            encoding: overrides
                .encoding
                .or(config.encoding)
                .unwrap_or_default(),
            reports,
        })
    }
}

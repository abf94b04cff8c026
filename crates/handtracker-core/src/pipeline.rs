use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TrackerError;
use crate::extractor::split_hands;
use crate::parser::HandParser;
use crate::sessions::build_sessions;
use crate::stakes::build_stake_stats;
use crate::summary::build_summary;
use crate::types::{Hand, Report};

/// Default inactivity gap that closes a session.
pub const DEFAULT_SESSION_GAP_MINUTES: u32 = 30;

/// Inputs that shape one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerOptions {
    pub hero_name: String,
    pub session_gap_minutes: u32,
}

impl TrackerOptions {
    pub fn new(hero_name: impl Into<String>) -> Self {
        Self {
            hero_name: hero_name.into(),
            session_gap_minutes: DEFAULT_SESSION_GAP_MINUTES,
        }
    }

    pub fn with_session_gap(mut self, minutes: u32) -> Self {
        self.session_gap_minutes = minutes;
        self
    }
}

/// Parse every hand in `sources` and build sessions, stake stats and a summary.
///
/// Sources are decoded file contents in discovery order. A block that fails to
/// parse is logged and skipped; it never aborts the run.
pub fn analyze<I, S>(sources: I, options: &TrackerOptions) -> Result<Report, TrackerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parser = HandParser::new(&options.hero_name)?;
    let hands = parse_sources(&parser, sources);

    if hands.is_empty() {
        debug!("No hands found");
        return Ok(Report::default());
    }

    let sessions = build_sessions(&hands, options.session_gap_minutes);
    let stakes = build_stake_stats(&sessions);
    let summary = build_summary(&hands, &sessions);

    Ok(Report {
        hands,
        summary,
        sessions,
        stakes,
    })
}

/// Split and parse all sources, skipping blocks that fail to parse.
pub fn parse_sources<I, S>(parser: &HandParser, sources: I) -> Vec<Hand>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hands = Vec::new();
    let mut skipped = 0usize;

    for (source_index, source) in sources.into_iter().enumerate() {
        for (block_index, block) in split_hands(source.as_ref()).enumerate() {
            match parser.parse(block) {
                Ok(hand) => hands.push(hand),
                Err(e) => {
                    skipped += 1;
                    warn!(source_index, block_index, "Skipping malformed hand: {}", e);
                }
            }
        }
    }

    debug!(hands = hands.len(), skipped, "Parsed hand blocks");
    hands
}

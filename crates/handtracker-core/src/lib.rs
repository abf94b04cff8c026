//! # handtracker-core
//!
//! Turns plain-text poker hand histories into per-session and per-stake results
//! for a single tracked player (the hero).
//!
//! ## Pipeline
//!
//! 1. [`split_hands`] cuts file contents into hand blocks at blank lines.
//! 2. [`HandParser`] extracts time, stake and hero result from each block.
//! 3. [`build_sessions`] clusters timed hands by an inactivity gap.
//! 4. [`build_stake_stats`] and [`build_summary`] roll sessions and hands up.
//!
//! [`analyze`] runs all of the above over a batch of sources.
//!
//! ```rust,ignore
//! use handtracker_core::{analyze, TrackerOptions};
//!
//! let text = std::fs::read_to_string("hands.txt")?;
//! let report = analyze([text], &TrackerOptions::new("Hero").with_session_gap(45))?;
//! println!("bb/100: {:?}", report.summary.overall_bb_per_100);
//! ```

mod error;
mod extractor;
mod parser;
mod pipeline;
mod sessions;
mod stakes;
mod summary;
mod types;

pub use error::{ParseError, TrackerError};
pub use extractor::split_hands;
pub use parser::{parse_hand_id, parse_stake, parse_time, HandParser};
pub use pipeline::{analyze, parse_sources, TrackerOptions, DEFAULT_SESSION_GAP_MINUTES};
pub use sessions::build_sessions;
pub use stakes::build_stake_stats;
pub use summary::build_summary;
pub use types::{round2, Hand, Report, Session, StakeStat, Summary, MIXED_STAKE, UNKNOWN_STAKE};

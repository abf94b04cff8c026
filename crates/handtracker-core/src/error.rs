use thiserror::Error;

/// Errors that stop a pipeline run before any hand is parsed.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid hero name pattern: {0}")]
    HeroPattern(#[from] regex::Error),
}

/// A hand block that cannot be turned into a [`crate::Hand`].
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

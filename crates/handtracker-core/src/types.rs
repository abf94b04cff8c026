use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Stake label used when no `NL`/`PL` token is found in a hand.
pub const UNKNOWN_STAKE: &str = "unknown";

/// Stake label of a session whose hands were played at more than one stake.
pub const MIXED_STAKE: &str = "mixed";

/// One played hand, as extracted from a hand history block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    /// Hand number from the text, or a run-scoped `auto-<n>` identifier.
    pub id: String,
    pub time: Option<NaiveDateTime>,
    pub stake_level: String,
    pub big_blind_size: Option<f64>,
    pub hero_result_money: f64,
    pub hero_result_bb: Option<f64>,
    /// The block the hand was parsed from.
    pub raw: String,
}

/// A run of time-ordered hands with no gap above the session threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: usize,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_minutes: i64,
    pub hands_count: usize,
    pub stake_level: String,
    pub total_result_money: f64,
    pub total_result_bb: Option<f64>,
    pub bb_per_100: Option<f64>,
    /// Positions of this session's hands in the hand list it was built from.
    #[serde(skip)]
    pub hand_indices: Vec<usize>,
}

impl Session {
    /// Resolve this session's hands against the list it was built from.
    pub fn hands<'a>(&'a self, all: &'a [Hand]) -> impl Iterator<Item = &'a Hand> + 'a {
        self.hand_indices.iter().filter_map(move |&i| all.get(i))
    }

    pub fn is_mixed(&self) -> bool {
        self.stake_level == MIXED_STAKE
    }
}

/// Totals for every non-mixed session played at one stake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeStat {
    pub stake_level: String,
    pub sessions_count: usize,
    pub hands_count: usize,
    pub total_result_money: f64,
    pub total_result_bb: f64,
    pub bb_per_100: Option<f64>,
}

/// Totals over every parsed hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_hands: usize,
    pub total_sessions: usize,
    pub total_result_money: f64,
    pub total_result_bb: Option<f64>,
    pub overall_bb_per_100: Option<f64>,
    pub first_hand_time: Option<NaiveDateTime>,
    pub last_hand_time: Option<NaiveDateTime>,
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    #[serde(skip)]
    pub hands: Vec<Hand>,
    pub summary: Summary,
    pub sessions: Vec<Session>,
    pub stakes: Vec<StakeStat>,
}

impl Report {
    /// True when no hands were found at all. This is a valid, empty result.
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

/// Round to two decimals.
///
/// Formatting works on the exact binary value, so `-2.825` (stored just past
/// the tie) becomes `-2.83`. Scaling by 100 first would round the product
/// onto the tie and land on `-2.82`.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Big blinds won per hundred hands.
pub(crate) fn bb_per_100(total_bb: f64, hands: usize) -> f64 {
    total_bb / hands as f64 * 100.0
}

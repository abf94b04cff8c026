use std::cell::Cell;

use chrono::{NaiveDateTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::error::{ParseError, TrackerError};
use crate::types::{Hand, UNKNOWN_STAKE};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

lazy_static! {
    static ref TIME_RE: Regex =
        Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}").unwrap();
    static ref STAKE_RE: Regex = Regex::new(r"(?i)(NL|PL)\s?([0-9]+)").unwrap();
    static ref HAND_ID_RE: Regex = Regex::new(r"(?i)Hand\s*#([0-9]+)").unwrap();
}

/// Turns raw hand blocks into [`Hand`] records for one hero.
///
/// Each field is extracted by an independent pattern search, so a block that
/// lacks one piece of information still yields the others. Hands without an
/// in-text number get an `auto-<n>` id that is unique for this parser.
pub struct HandParser {
    hero_result: Regex,
    next_synthetic_id: Cell<u64>,
}

impl HandParser {
    /// Build a parser for `hero_name`. The name is matched literally and
    /// case-insensitively.
    pub fn new(hero_name: &str) -> Result<Self, TrackerError> {
        let pattern = format!(
            r"(?is){}.*?(won|lost)\s([+-]?[0-9]+(?:\.[0-9]+)?)",
            regex::escape(hero_name)
        );
        Ok(Self {
            hero_result: Regex::new(&pattern)?,
            next_synthetic_id: Cell::new(1),
        })
    }

    /// Parse one hand block.
    ///
    /// Fails only when the block carries a timestamp-shaped value that is not
    /// a real date and time.
    pub fn parse(&self, raw: &str) -> Result<Hand, ParseError> {
        let time = parse_time(raw)?;
        let (stake_level, big_blind_size) = parse_stake(raw);
        let hero_result_money = self.hero_result_money(raw);

        let hero_result_bb = big_blind_size
            .filter(|bb| *bb > 0.0)
            .map(|bb| hero_result_money / bb);

        let id = match parse_hand_id(raw) {
            Some(id) => id,
            None => self.synthetic_id(),
        };

        trace!(hand_id = %id, stake = %stake_level, "Parsed hand");

        Ok(Hand {
            id,
            time,
            stake_level,
            big_blind_size,
            hero_result_money,
            hero_result_bb,
            raw: raw.to_string(),
        })
    }

    /// Signed amount the hero won (positive) or lost (negative); zero if absent.
    pub fn hero_result_money(&self, raw: &str) -> f64 {
        let Some(caps) = self.hero_result.captures(raw) else {
            return 0.0;
        };
        let sign = if caps[1].eq_ignore_ascii_case("won") {
            1.0
        } else {
            -1.0
        };
        caps[2].parse::<f64>().map(|amount| sign * amount).unwrap_or(0.0)
    }

    fn synthetic_id(&self) -> String {
        let n = self.next_synthetic_id.get();
        self.next_synthetic_id.set(n + 1);
        format!("auto-{}", n)
    }
}

/// First `YYYY-MM-DD HH:MM:SS` timestamp in the block, if any.
///
/// A timestamp-shaped value that is not a real date and time, including a
/// leap second, is an error.
pub fn parse_time(raw: &str) -> Result<Option<NaiveDateTime>, ParseError> {
    let Some(m) = TIME_RE.find(raw) else {
        return Ok(None);
    };
    let invalid = |reason: String| ParseError::InvalidTimestamp {
        value: m.as_str().to_string(),
        reason,
    };

    let time = NaiveDateTime::parse_from_str(m.as_str(), TIME_FORMAT)
        .map_err(|e| invalid(e.to_string()))?;
    // chrono encodes second 60 as an overflowing nanosecond field
    if time.nanosecond() >= 1_000_000_000 {
        return Err(invalid("second must be in 0..59".to_string()));
    }
    Ok(Some(time))
}

/// Stake label (uppercased as found) and the big blind it implies.
///
/// `NL25` means a 0.25 big blind. Without a stake token the label is
/// [`UNKNOWN_STAKE`] and the big blind is unknown.
pub fn parse_stake(raw: &str) -> (String, Option<f64>) {
    match STAKE_RE.captures(raw) {
        Some(caps) => {
            let label = caps[0].to_uppercase();
            let big_blind = caps[2].parse::<f64>().ok().map(|n| n / 100.0);
            (label, big_blind)
        }
        None => (UNKNOWN_STAKE.to_string(), None),
    }
}

/// Digits of the first `Hand #<digits>` marker.
pub fn parse_hand_id(raw: &str) -> Option<String> {
    HAND_ID_RE.captures(raw).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parser() -> HandParser {
        HandParser::new("Hero").unwrap()
    }

    #[test]
    fn test_parse_time() {
        let time = parse_time("Table 'Alpha' 2024-01-01 10:20:30 MSK").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 20, 30)
            .unwrap();
        assert_eq!(time, Some(expected));
    }

    #[test]
    fn test_parse_time_absent() {
        assert_eq!(parse_time("2024/01/01 10:20").unwrap(), None);
    }

    #[test]
    fn test_parse_time_invalid_calendar_value() {
        let result = parse_time("2024-13-45 25:61:00");
        assert!(matches!(result, Err(ParseError::InvalidTimestamp { .. })));
    }

    #[test]
    fn test_parse_time_rejects_leap_second() {
        let result = parse_time("Hand #1 NL25 2024-01-01 23:59:60 Hero won 1");
        assert!(matches!(result, Err(ParseError::InvalidTimestamp { .. })));

        let hand = parser().parse("Hand #1 NL25 2024-01-01 23:59:60 Hero won 1");
        assert!(hand.is_err());
    }

    #[test]
    fn test_parse_time_last_second_of_day() {
        let time = parse_time("2024-01-01 23:59:59").unwrap().unwrap();
        assert_eq!(time.second(), 59);
    }

    #[test]
    fn test_parse_stake() {
        assert_eq!(parse_stake("Hold'em NL25"), ("NL25".to_string(), Some(0.25)));
        assert_eq!(parse_stake("Omaha pl 100"), ("PL 100".to_string(), Some(1.0)));
        assert_eq!(parse_stake("nl 25 table"), ("NL 25".to_string(), Some(0.25)));
    }

    #[test]
    fn test_parse_stake_unknown() {
        assert_eq!(parse_stake("Limit Hold'em 2/4"), ("unknown".to_string(), None));
    }

    #[test]
    fn test_parse_hand_id() {
        assert_eq!(parse_hand_id("PokerStars Hand #12345: NL25"), Some("12345".into()));
        assert_eq!(parse_hand_id("hand#77"), Some("77".into()));
        assert_eq!(parse_hand_id("Game 12345"), None);
    }

    #[test]
    fn test_hero_won() {
        let p = parser();
        assert_eq!(p.hero_result_money("Hero won 2.50"), 2.5);
        assert_eq!(p.hero_result_money("hero collected and WON 3"), 3.0);
    }

    #[test]
    fn test_hero_lost() {
        let p = parser();
        assert_eq!(p.hero_result_money("Hero: bets\nsummary: lost 1.00"), -1.0);
    }

    #[test]
    fn test_hero_result_absent_defaults_to_zero() {
        let p = parser();
        assert_eq!(p.hero_result_money("Villain won 5.00"), 0.0);
        assert_eq!(p.hero_result_money("Hero folded"), 0.0);
    }

    #[test]
    fn test_hero_name_is_literal() {
        let p = HandParser::new("a.b+(c)").unwrap();
        assert_eq!(p.hero_result_money("a.b+(c) won 4.00"), 4.0);
        assert_eq!(p.hero_result_money("axb+(c) won 4.00"), 0.0);
    }

    #[test]
    fn test_parse_full_hand() {
        let raw = "Hand #42 NL25 2024-01-01 10:00:00\nHero won 2.50";
        let hand = parser().parse(raw).unwrap();
        assert_eq!(hand.id, "42");
        assert_eq!(hand.stake_level, "NL25");
        assert_eq!(hand.big_blind_size, Some(0.25));
        assert_eq!(hand.hero_result_money, 2.5);
        assert_eq!(hand.hero_result_bb, Some(10.0));
        assert_eq!(hand.raw, raw);
        assert!(hand.time.is_some());
    }

    #[test]
    fn test_zero_big_blind_has_no_bb_result() {
        let hand = parser().parse("Hand #1 NL0 Hero won 1.00").unwrap();
        assert_eq!(hand.big_blind_size, Some(0.0));
        assert_eq!(hand.hero_result_bb, None);
    }

    #[test]
    fn test_synthetic_ids_are_unique() {
        let p = parser();
        let a = p.parse("NL25 Hero won 1").unwrap();
        let b = p.parse("NL25 Hero won 1").unwrap();
        assert_eq!(a.id, "auto-1");
        assert_eq!(b.id, "auto-2");
    }
}

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use crate::types::{bb_per_100, round2, Hand, Session, MIXED_STAKE};

/// Group hands into sessions separated by more than `gap_minutes` of inactivity.
///
/// Hands without a timestamp are left out. The rest are ordered by time (ties
/// keep their input order) and a new session starts whenever the gap to the
/// previous hand is strictly greater than the threshold.
pub fn build_sessions(hands: &[Hand], gap_minutes: u32) -> Vec<Session> {
    let mut timed: Vec<(usize, NaiveDateTime)> = hands
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.time.map(|t| (i, t)))
        .collect();
    timed.sort_by_key(|&(_, time)| time);

    let gap = Duration::minutes(i64::from(gap_minutes));
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut prev_time: Option<NaiveDateTime> = None;

    for (index, time) in timed {
        if let Some(prev) = prev_time {
            if time - prev > gap {
                groups.push(std::mem::take(&mut current));
            }
        }
        current.push(index);
        prev_time = Some(time);
    }
    if !current.is_empty() {
        groups.push(current);
    }

    debug!(
        hands = hands.len(),
        sessions = groups.len(),
        gap_minutes,
        "Built sessions"
    );

    groups
        .into_iter()
        .enumerate()
        .filter_map(|(i, indices)| summarize_session(i + 1, hands, indices))
        .collect()
}

fn summarize_session(session_id: usize, hands: &[Hand], indices: Vec<usize>) -> Option<Session> {
    let members: Vec<&Hand> = indices.iter().map(|&i| &hands[i]).collect();
    let start_time = members.first()?.time?;
    let end_time = members.last()?.time?;
    let hands_count = members.len();

    let duration_secs = (end_time - start_time).num_seconds() as f64;
    let duration_minutes = (duration_secs / 60.0).round_ties_even() as i64;

    let stakes: BTreeSet<&str> = members.iter().map(|h| h.stake_level.as_str()).collect();
    let stake_level = if stakes.len() == 1 {
        stakes.into_iter().next().unwrap_or(MIXED_STAKE).to_string()
    } else {
        MIXED_STAKE.to_string()
    };

    let total_money: f64 = members.iter().map(|h| h.hero_result_money).sum();

    let bb_results: Vec<f64> = members.iter().filter_map(|h| h.hero_result_bb).collect();
    let total_bb = if bb_results.is_empty() {
        None
    } else {
        Some(bb_results.iter().sum::<f64>())
    };

    Some(Session {
        session_id,
        start_time,
        end_time,
        duration_minutes,
        hands_count,
        stake_level,
        total_result_money: round2(total_money),
        total_result_bb: total_bb.map(round2),
        bb_per_100: total_bb.map(|bb| round2(bb_per_100(bb, hands_count))),
        hand_indices: indices,
    })
}

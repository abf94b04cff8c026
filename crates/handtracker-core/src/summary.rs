use crate::types::{bb_per_100, round2, Hand, Session, Summary};

/// Totals over every hand, including hands that never made it into a session.
pub fn build_summary(hands: &[Hand], sessions: &[Session]) -> Summary {
    if hands.is_empty() {
        return Summary::default();
    }

    let total_hands = hands.len();
    let total_money: f64 = hands.iter().map(|h| h.hero_result_money).sum();

    let bb_results: Vec<f64> = hands.iter().filter_map(|h| h.hero_result_bb).collect();
    let total_bb = if bb_results.is_empty() {
        None
    } else {
        Some(bb_results.iter().sum::<f64>())
    };

    let times = hands.iter().filter_map(|h| h.time);

    Summary {
        total_hands,
        total_sessions: sessions.len(),
        total_result_money: round2(total_money),
        total_result_bb: total_bb.map(round2),
        overall_bb_per_100: total_bb.map(|bb| round2(bb_per_100(bb, total_hands))),
        first_hand_time: times.clone().min(),
        last_hand_time: times.max(),
    }
}

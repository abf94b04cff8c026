use crate::types::{bb_per_100, round2, Session, StakeStat};

/// Roll sessions up per stake label, in order of first appearance.
///
/// Mixed-stake sessions are skipped entirely. A stake whose big blind total
/// sums to exactly zero reports no bb/100, the same as one with no big blind
/// data at all.
pub fn build_stake_stats(sessions: &[Session]) -> Vec<StakeStat> {
    let mut stats: Vec<StakeStat> = Vec::new();

    for session in sessions.iter().filter(|s| !s.is_mixed()) {
        let position = match stats.iter().position(|s| s.stake_level == session.stake_level) {
            Some(position) => position,
            None => {
                stats.push(StakeStat {
                    stake_level: session.stake_level.clone(),
                    sessions_count: 0,
                    hands_count: 0,
                    total_result_money: 0.0,
                    total_result_bb: 0.0,
                    bb_per_100: None,
                });
                stats.len() - 1
            }
        };

        let stat = &mut stats[position];
        stat.sessions_count += 1;
        stat.hands_count += session.hands_count;
        stat.total_result_money += session.total_result_money;
        if let Some(bb) = session.total_result_bb {
            stat.total_result_bb += bb;
        }
    }

    for stat in &mut stats {
        stat.bb_per_100 = if stat.hands_count > 0 && stat.total_result_bb != 0.0 {
            Some(round2(bb_per_100(stat.total_result_bb, stat.hands_count)))
        } else {
            None
        };
        stat.total_result_money = round2(stat.total_result_money);
        stat.total_result_bb = round2(stat.total_result_bb);
    }

    stats
}

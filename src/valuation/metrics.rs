// Per-player derived valuation outputs.
//
// Combines the positional baselines with the raw rating sources into one
// enriched row per player: value over baseline, local scarcity gap,
// remaining value percent, overall rank, and market delta. Missing inputs
// yield None fields; the engine never errors over a data gap, and one
// player's missing data never affects another's outputs.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::LeagueShape;
use crate::player::{PlayerRecord, Position, ScoringVariant};
use crate::valuation::baseline::{baselines_for_groups, rank_eligible, RankedGroup};

/// One player with all derived valuation fields attached. Input order is
/// preserved and no player is ever dropped.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedPlayer {
    pub id: String,
    pub name: String,
    pub team: String,
    pub position: Position,
    /// Points under the selected scoring variant.
    pub points: Option<f64>,
    pub adp: Option<f64>,
    pub ecr: Option<f64>,
    pub owned_pct: Option<f64>,
    /// `round(points - baseline)`. May be negative.
    pub value_over_baseline: Option<i64>,
    /// Forward points gap to the next-lower player at the same position
    /// (backward gap at the tail). Never negative.
    pub local_scarcity_gap: Option<f64>,
    /// Share of the position's positive starter-window value still on the
    /// board strictly below this player, as a rounded percentage.
    pub remaining_value_percent: Option<u32>,
    /// ADP-derived rank across the whole pool; points-derived fallback.
    pub overall_rank: Option<u32>,
    /// `round(adp - ecr)`. Negative means the market drafts the player
    /// earlier than the experts rank him.
    pub market_delta: Option<i64>,
}

/// Compute all derived valuation fields for a player pool.
///
/// Never errors: players with missing sources receive None for the fields
/// that depend on them and are still present in the output, in input order.
pub fn compute_valuations(
    players: &[PlayerRecord],
    shape: &LeagueShape,
    variant: ScoringVariant,
) -> Vec<EnrichedPlayer> {
    let groups = rank_eligible(players, variant);
    let baselines = baselines_for_groups(&groups, shape);

    // Where each eligible player sits inside its sorted position group.
    let mut group_index: HashMap<usize, usize> = HashMap::new();
    for group in groups.values() {
        for (rank, &(input_index, _)) in group.iter().enumerate() {
            group_index.insert(input_index, rank);
        }
    }

    // Per-position remaining positive value after each group index.
    let mut remaining_percent: HashMap<Position, Vec<u32>> = HashMap::new();
    for (&pos, group) in &groups {
        let starter_count = baselines[&pos].starter_count;
        let baseline = baselines[&pos].baseline_points;
        remaining_percent.insert(pos, remaining_value_percents(group, starter_count, baseline));
    }

    // Sorted signal vectors for overall rank: ascending ADP, ascending points.
    let mut adps: Vec<f64> = players.iter().filter_map(|p| p.adp()).collect();
    adps.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mut all_points: Vec<f64> = players
        .iter()
        .filter_map(|p| p.points.get(variant))
        .collect();
    all_points.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    players
        .iter()
        .enumerate()
        .map(|(index, player)| {
            let points = player.points.get(variant);
            let adp = player.adp();
            let ecr = player.ecr();
            let rank_in_group = group_index.get(&index).copied();
            let group = groups.get(&player.position);
            let baseline = &baselines[&player.position];

            let value_over_baseline =
                points.map(|pts| (pts - baseline.baseline_points).round() as i64);

            let local_scarcity_gap = match (group, rank_in_group) {
                (Some(group), Some(rank)) => Some(local_gap(group, rank)),
                _ => None,
            };

            let remaining = match rank_in_group {
                Some(rank) => remaining_percent
                    .get(&player.position)
                    .and_then(|percents| percents.get(rank).copied()),
                None => None,
            };

            let overall_rank = overall_rank(adp, points, &adps, &all_points);

            let market_delta = match (adp, ecr) {
                (Some(adp), Some(ecr)) => Some((adp - ecr).round() as i64),
                _ => None,
            };

            EnrichedPlayer {
                id: player.id.clone(),
                name: player.name.clone(),
                team: player.team.clone(),
                position: player.position,
                points,
                adp,
                ecr,
                owned_pct: player.owned_pct(),
                value_over_baseline,
                local_scarcity_gap,
                remaining_value_percent: remaining,
                overall_rank,
                market_delta,
            }
        })
        .collect()
}

/// Forward points gap to the next player down the position list; at the
/// tail, the backward gap. Clamped to zero.
fn local_gap(group: &RankedGroup, rank: usize) -> f64 {
    let gap = if rank + 1 < group.len() {
        group[rank].1 - group[rank + 1].1
    } else if rank >= 1 {
        group[rank - 1].1 - group[rank].1
    } else {
        0.0
    };
    gap.max(0.0)
}

/// Percent of the position's positive starter-window value remaining
/// strictly after each group index. Non-increasing as rank worsens.
fn remaining_value_percents(group: &RankedGroup, starter_count: usize, baseline: f64) -> Vec<u32> {
    let window = starter_count.min(group.len());
    let positive: Vec<f64> = (0..window)
        .map(|j| (group[j].1 - baseline).max(0.0))
        .collect();
    let pool: f64 = positive.iter().sum();
    if !(pool > 0.0) || !pool.is_finite() {
        return vec![0; group.len()];
    }

    // suffix[i] = positive value strictly after index i within the window
    let mut percents = vec![0u32; group.len()];
    let mut suffix = 0.0;
    for i in (0..group.len()).rev() {
        percents[i] = (suffix / pool * 100.0).round() as u32;
        if i < window {
            suffix += positive[i];
        }
    }
    percents
}

/// Overall rank: count of players drafted at or before this ADP (1-based,
/// self included). Without ADP, fall back to points standing.
fn overall_rank(
    adp: Option<f64>,
    points: Option<f64>,
    sorted_adps: &[f64],
    sorted_points: &[f64],
) -> Option<u32> {
    if let Some(adp) = adp {
        let rank = sorted_adps.partition_point(|&v| v <= adp);
        return Some(rank as u32);
    }
    points.map(|pts| {
        let below = sorted_points.partition_point(|&v| v < pts);
        (sorted_points.len() - below) as u32
    })
}

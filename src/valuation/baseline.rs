// Replacement baseline (VORP) computation.
//
// Determines how many starters each position supports in a given league
// shape — dedicated slots plus a greedy marginal allocation of FLEX and
// SUPERFLEX slots — and reads the replacement level off the sorted points
// list at the starter boundary.

use std::collections::HashMap;

use crate::arena::PositionArena;
use crate::config::LeagueShape;
use crate::player::{PlayerRecord, Position, ScoringVariant, ALL_POSITIONS};

/// Baseline figures for one position under one league shape.
#[derive(Debug, Clone, Copy)]
pub struct PositionBaseline {
    pub position: Position,
    /// `num_teams × dedicated slots` for the position.
    pub dedicated_starters: usize,
    /// FLEX plus SUPERFLEX slots the greedy allocation awarded here.
    pub flex_awarded: usize,
    /// Total starters: dedicated + awarded.
    pub starter_count: usize,
    /// Points of the first player past the starter window (clamped to the
    /// last player when the pool runs short). 0 when the position has no
    /// eligible players or no starters.
    pub baseline_points: f64,
    /// Points gap at the replacement boundary.
    pub replacement_slope: f64,
}

/// Per-position eligible players: `(input index, points)`, sorted descending
/// by points. The sort is stable, so ties keep input order.
pub(crate) type RankedGroup = Vec<(usize, f64)>;

/// Group players with a usable points value for the variant by position and
/// sort each group best-first. Players without usable points do not appear
/// in any group.
pub(crate) fn rank_eligible(
    players: &[PlayerRecord],
    variant: ScoringVariant,
) -> HashMap<Position, RankedGroup> {
    let mut groups: HashMap<Position, RankedGroup> = HashMap::new();
    for (index, player) in players.iter().enumerate() {
        if let Some(points) = player.points.get(variant) {
            groups.entry(player.position).or_default().push((index, points));
        }
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    }
    groups
}

/// Compute per-position baselines for a player pool and league shape.
///
/// Algorithm:
/// 1. Dedicated starters per position = `num_teams × slots`.
/// 2. FLEX slots (`num_teams × flex` of them) are awarded one at a time to
///    whichever FLEX-eligible position offers the highest next-player points
///    at its current boundary. Ties break by the configured position
///    priority order (default RB, WR, TE). Exhausted positions drop out.
/// 3. SUPERFLEX slots repeat the procedure over QB plus the FLEX positions,
///    continuing the same boundary cursors.
/// 4. The baseline is the points of the first player past the starter
///    window; the slope is the gap at that boundary.
pub fn compute_baselines(
    players: &[PlayerRecord],
    shape: &LeagueShape,
    variant: ScoringVariant,
) -> HashMap<Position, PositionBaseline> {
    baselines_for_groups(&rank_eligible(players, variant), shape)
}

pub(crate) fn baselines_for_groups(
    groups: &HashMap<Position, RankedGroup>,
    shape: &LeagueShape,
) -> HashMap<Position, PositionBaseline> {
    let mut dedicated: HashMap<Position, usize> = HashMap::new();
    for &pos in ALL_POSITIONS {
        dedicated.insert(pos, shape.num_teams * shape.starters_for(pos));
    }

    // Arena over raw points; cursors start at the dedicated starter count so
    // take_best always inspects the first not-yet-allocated player.
    let lists: HashMap<Position, Vec<f64>> = groups
        .iter()
        .map(|(&pos, group)| (pos, group.iter().map(|&(_, pts)| pts).collect()))
        .collect();
    let mut arena = PositionArena::new(lists);
    for &pos in ALL_POSITIONS {
        arena.set_cursor(pos, dedicated[&pos]);
    }

    let flex_rounds = shape.num_teams * shape.flex;
    for _ in 0..flex_rounds {
        if arena.take_best(&shape.flex_positions, |a, b| a > b).is_none() {
            break;
        }
    }

    let superflex_candidates = shape.superflex_positions();
    let superflex_rounds = shape.num_teams * shape.superflex;
    for _ in 0..superflex_rounds {
        if arena.take_best(&superflex_candidates, |a, b| a > b).is_none() {
            break;
        }
    }

    let mut baselines = HashMap::new();
    for &pos in ALL_POSITIONS {
        let dedicated_starters = dedicated[&pos];
        let flex_awarded = arena.taken(pos).saturating_sub(dedicated_starters);
        let starter_count = dedicated_starters + flex_awarded;

        let empty = RankedGroup::new();
        let group = groups.get(&pos).unwrap_or(&empty);
        let (baseline_points, replacement_slope) = boundary_figures(group, starter_count);

        baselines.insert(
            pos,
            PositionBaseline {
                position: pos,
                dedicated_starters,
                flex_awarded,
                starter_count,
                baseline_points,
                replacement_slope,
            },
        );
    }
    baselines
}

/// Baseline points and replacement slope at the starter boundary.
fn boundary_figures(group: &RankedGroup, starter_count: usize) -> (f64, f64) {
    if starter_count == 0 || group.is_empty() {
        return (0.0, 0.0);
    }
    let boundary = starter_count.min(group.len() - 1);
    let baseline = group[boundary].1;

    let slope = if boundary + 1 < group.len() {
        group[boundary].1 - group[boundary + 1].1
    } else if boundary >= 1 {
        group[boundary - 1].1 - group[boundary].1
    } else {
        0.0
    };
    (baseline, slope)
}

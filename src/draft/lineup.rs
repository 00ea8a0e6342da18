// Starting lineup optimization.
//
// Assigns a team's owned players to an ordered slot template in three
// passes — dedicated slots, FLEX, then SUPERFLEX — taking the best-ranked
// unused player each time. Run once per ranking system; results are fully
// deterministic under the documented tie-break (active rank, other rank,
// player id).

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::arena::PositionArena;
use crate::config::LeagueShape;
use crate::player::{Position, Slot};

/// Which ranking system drives the assignment. The other system serves as
/// the first tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankSystem {
    Adp,
    Ecr,
}

/// Lookup value for one owned player: position plus both rank numbers.
#[derive(Debug, Clone)]
pub struct LineupEntry {
    pub position: Position,
    pub adp_rank: Option<f64>,
    pub ecr_rank: Option<f64>,
}

/// A starting slot filled with a player. Slots are numbered per kind
/// ("RB1", "RB2", "FLEX1"); players left unassigned are implicitly benched.
#[derive(Debug, Clone, Serialize)]
pub struct LineupAssignment {
    pub slot: Slot,
    pub label: String,
    pub player_id: String,
}

/// Sort key under one ranking system. Missing ranks sort last; the player
/// id keeps fully tied entries deterministic.
#[derive(Debug, Clone)]
struct SlottablePlayer {
    id: String,
    active_rank: f64,
    other_rank: f64,
}

impl SlottablePlayer {
    fn key(&self) -> (f64, f64, &str) {
        (self.active_rank, self.other_rank, self.id.as_str())
    }
}

fn sanitize_rank(rank: Option<f64>) -> f64 {
    match rank {
        Some(v) if v.is_finite() => v,
        _ => f64::INFINITY,
    }
}

fn key_less(a: &SlottablePlayer, b: &SlottablePlayer) -> bool {
    let (ar, ao, ai) = a.key();
    let (br, bo, bi) = b.key();
    (ar, ao, ai) < (br, bo, bi)
}

/// Assign owned players to the starting slots of `template`.
///
/// Pass order: dedicated slots, then FLEX, then SUPERFLEX, each preserving
/// template order within the pass; bench slots receive nothing here. A slot
/// is skipped only when no eligible unused player remains. Owned ids absent
/// from the lookup are logged and skipped.
pub fn optimize_lineup(
    owned_ids: &[String],
    lookup: &HashMap<String, LineupEntry>,
    template: &[Slot],
    shape: &LeagueShape,
    system: RankSystem,
) -> Vec<LineupAssignment> {
    // Partition the owned players by position, sorted best-first under the
    // active system. Iteration follows owned_ids order, not map order.
    let mut by_position: HashMap<Position, Vec<SlottablePlayer>> = HashMap::new();
    for id in owned_ids {
        let Some(entry) = lookup.get(id) else {
            warn!("owned player {id} missing from lookup, skipping");
            continue;
        };
        let (active, other) = match system {
            RankSystem::Adp => (entry.adp_rank, entry.ecr_rank),
            RankSystem::Ecr => (entry.ecr_rank, entry.adp_rank),
        };
        by_position.entry(entry.position).or_default().push(SlottablePlayer {
            id: id.clone(),
            active_rank: sanitize_rank(active),
            other_rank: sanitize_rank(other),
        });
    }
    for players in by_position.values_mut() {
        players.sort_by(|a, b| {
            a.key()
                .partial_cmp(&b.key())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
    let mut arena = PositionArena::new(by_position);

    // `(template index, assignment)` so the output can be restored to
    // template order after the three passes.
    let mut picks: Vec<(usize, Slot, String)> = Vec::new();

    // Pass 1: dedicated position slots.
    for (index, &slot) in template.iter().enumerate() {
        let Some(pos) = slot.dedicated_position() else {
            continue;
        };
        if let Some(player) = arena.take(pos) {
            picks.push((index, slot, player.id));
        }
    }

    // Pass 2: FLEX slots over the eligible positions.
    for (index, &slot) in template.iter().enumerate() {
        if slot != Slot::Flex {
            continue;
        }
        if let Some((_, player)) = arena.take_best(&shape.flex_positions, key_less) {
            picks.push((index, slot, player.id));
        }
    }

    // Pass 3: SUPERFLEX slots over QB plus the FLEX positions.
    let superflex_candidates = shape.superflex_positions();
    for (index, &slot) in template.iter().enumerate() {
        if slot != Slot::Superflex {
            continue;
        }
        if let Some((_, player)) = arena.take_best(&superflex_candidates, key_less) {
            picks.push((index, slot, player.id));
        }
    }

    picks.sort_by_key(|&(index, _, _)| index);

    // Number slots per kind in template order: RB1, RB2, FLEX1, ...
    let mut seen: HashMap<Slot, usize> = HashMap::new();
    picks
        .into_iter()
        .map(|(_, slot, player_id)| {
            let n = seen.entry(slot).or_insert(0);
            *n += 1;
            LineupAssignment {
                slot,
                label: format!("{}{}", slot.display_str(), n),
                player_id,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pos: Position, adp: Option<f64>, ecr: Option<f64>) -> LineupEntry {
        LineupEntry {
            position: pos,
            adp_rank: adp,
            ecr_rank: ecr,
        }
    }

    fn roster(entries: &[(&str, Position, f64, f64)]) -> (Vec<String>, HashMap<String, LineupEntry>) {
        let owned = entries.iter().map(|(id, ..)| id.to_string()).collect();
        let lookup = entries
            .iter()
            .map(|&(id, pos, adp, ecr)| (id.to_string(), entry(pos, Some(adp), Some(ecr))))
            .collect();
        (owned, lookup)
    }

    fn one_team_shape() -> LeagueShape {
        let mut shape = LeagueShape::default();
        shape.num_teams = 1;
        shape
    }

    fn assigned<'a>(lineup: &'a [LineupAssignment], label: &str) -> &'a str {
        lineup
            .iter()
            .find(|a| a.label == label)
            .map(|a| a.player_id.as_str())
            .unwrap_or_else(|| panic!("slot {label} unassigned"))
    }

    #[test]
    fn fills_dedicated_slots_with_best_ranked() {
        let (owned, lookup) = roster(&[
            ("qb_a", Position::Quarterback, 20.0, 18.0),
            ("rb_a", Position::RunningBack, 5.0, 6.0),
            ("rb_b", Position::RunningBack, 2.0, 1.0),
            ("rb_c", Position::RunningBack, 30.0, 28.0),
            ("wr_a", Position::WideReceiver, 8.0, 9.0),
            ("wr_b", Position::WideReceiver, 12.0, 11.0),
            ("te_a", Position::TightEnd, 40.0, 44.0),
            ("k_a", Position::Kicker, 150.0, 151.0),
            ("def_a", Position::Defense, 140.0, 139.0),
        ]);
        let shape = one_team_shape();
        let lineup = optimize_lineup(
            &owned,
            &lookup,
            &shape.slot_template(),
            &shape,
            RankSystem::Adp,
        );

        assert_eq!(assigned(&lineup, "QB1"), "qb_a");
        assert_eq!(assigned(&lineup, "RB1"), "rb_b");
        assert_eq!(assigned(&lineup, "RB2"), "rb_a");
        assert_eq!(assigned(&lineup, "WR1"), "wr_a");
        assert_eq!(assigned(&lineup, "WR2"), "wr_b");
        assert_eq!(assigned(&lineup, "TE1"), "te_a");
        // Best leftover flex-eligible player takes the FLEX.
        assert_eq!(assigned(&lineup, "FLEX1"), "rb_c");
        assert_eq!(assigned(&lineup, "K1"), "k_a");
        assert_eq!(assigned(&lineup, "DEF1"), "def_a");
    }

    #[test]
    fn no_player_assigned_twice() {
        let (owned, lookup) = roster(&[
            ("rb_a", Position::RunningBack, 1.0, 1.0),
            ("rb_b", Position::RunningBack, 2.0, 2.0),
            ("wr_a", Position::WideReceiver, 3.0, 3.0),
        ]);
        let shape = one_team_shape();
        let lineup = optimize_lineup(
            &owned,
            &lookup,
            &shape.slot_template(),
            &shape,
            RankSystem::Adp,
        );
        let mut ids: Vec<&str> = lineup.iter().map(|a| a.player_id.as_str()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn slot_positions_are_compatible() {
        let (owned, lookup) = roster(&[
            ("qb_a", Position::Quarterback, 10.0, 10.0),
            ("rb_a", Position::RunningBack, 1.0, 1.0),
            ("rb_b", Position::RunningBack, 2.0, 2.0),
            ("rb_c", Position::RunningBack, 3.0, 3.0),
            ("wr_a", Position::WideReceiver, 4.0, 4.0),
            ("te_a", Position::TightEnd, 5.0, 5.0),
        ]);
        let mut shape = one_team_shape();
        shape.superflex = 1;
        let template = shape.slot_template();
        let lineup = optimize_lineup(&owned, &lookup, &template, &shape, RankSystem::Ecr);

        for assignment in &lineup {
            let pos = lookup[&assignment.player_id].position;
            match assignment.slot {
                Slot::Flex => assert!(shape.is_flex_eligible(pos)),
                Slot::Superflex => assert!(shape.is_superflex_eligible(pos)),
                Slot::Bench => panic!("bench slots must not be assigned"),
                dedicated => assert_eq!(dedicated.dedicated_position(), Some(pos)),
            }
        }
    }

    #[test]
    fn dedicated_filled_before_flex() {
        // Only two RBs: both must land in RB slots, leaving FLEX empty
        // rather than an RB slot.
        let (owned, lookup) = roster(&[
            ("rb_a", Position::RunningBack, 1.0, 1.0),
            ("rb_b", Position::RunningBack, 9.0, 9.0),
        ]);
        let shape = one_team_shape();
        let lineup = optimize_lineup(
            &owned,
            &lookup,
            &shape.slot_template(),
            &shape,
            RankSystem::Adp,
        );
        let slots: Vec<Slot> = lineup.iter().map(|a| a.slot).collect();
        assert_eq!(slots, vec![Slot::RunningBack, Slot::RunningBack]);
    }

    #[test]
    fn superflex_prefers_best_remaining_including_qb() {
        let (owned, lookup) = roster(&[
            ("qb_a", Position::Quarterback, 3.0, 3.0),
            ("qb_b", Position::Quarterback, 15.0, 15.0),
            ("rb_a", Position::RunningBack, 20.0, 20.0),
        ]);
        let mut shape = one_team_shape();
        shape.superflex = 1;
        shape.starters.clear();
        shape.starters.insert(Position::Quarterback, 1);
        shape.starters.insert(Position::RunningBack, 1);
        shape.flex = 0;
        let lineup = optimize_lineup(
            &owned,
            &lookup,
            &shape.slot_template(),
            &shape,
            RankSystem::Adp,
        );
        assert_eq!(assigned(&lineup, "QB1"), "qb_a");
        assert_eq!(assigned(&lineup, "RB1"), "rb_a");
        assert_eq!(assigned(&lineup, "SUPERFLEX1"), "qb_b");
    }

    #[test]
    fn tie_break_by_other_system_then_id() {
        // Identical ECR; wr_b wins on the secondary (ADP) rank.
        let (owned, lookup) = roster(&[
            ("wr_a", Position::WideReceiver, 12.0, 10.0),
            ("wr_b", Position::WideReceiver, 11.0, 10.0),
        ]);
        let mut shape = one_team_shape();
        shape.starters.clear();
        shape.starters.insert(Position::WideReceiver, 1);
        shape.flex = 0;
        let lineup = optimize_lineup(
            &owned,
            &lookup,
            &shape.slot_template(),
            &shape,
            RankSystem::Ecr,
        );
        assert_eq!(assigned(&lineup, "WR1"), "wr_b");

        // Fully tied ranks: lowest id wins, on every run.
        let (owned, lookup) = roster(&[
            ("wr_z", Position::WideReceiver, 10.0, 10.0),
            ("wr_a", Position::WideReceiver, 10.0, 10.0),
        ]);
        for _ in 0..3 {
            let lineup = optimize_lineup(
                &owned,
                &lookup,
                &shape.slot_template(),
                &shape,
                RankSystem::Ecr,
            );
            assert_eq!(assigned(&lineup, "WR1"), "wr_a");
        }
    }

    #[test]
    fn missing_rank_sorts_last_but_still_assignable() {
        let owned = vec!["wr_a".to_string(), "wr_b".to_string()];
        let mut lookup = HashMap::new();
        lookup.insert(
            "wr_a".to_string(),
            entry(Position::WideReceiver, None, None),
        );
        lookup.insert(
            "wr_b".to_string(),
            entry(Position::WideReceiver, Some(5.0), Some(5.0)),
        );
        let mut shape = one_team_shape();
        shape.starters.clear();
        shape.starters.insert(Position::WideReceiver, 2);
        shape.flex = 0;
        let lineup = optimize_lineup(
            &owned,
            &lookup,
            &shape.slot_template(),
            &shape,
            RankSystem::Adp,
        );
        assert_eq!(assigned(&lineup, "WR1"), "wr_b");
        assert_eq!(assigned(&lineup, "WR2"), "wr_a");
    }

    #[test]
    fn unknown_owned_id_is_skipped() {
        let (mut owned, lookup) = roster(&[("rb_a", Position::RunningBack, 1.0, 1.0)]);
        owned.push("mystery".to_string());
        let shape = one_team_shape();
        let lineup = optimize_lineup(
            &owned,
            &lookup,
            &shape.slot_template(),
            &shape,
            RankSystem::Adp,
        );
        assert_eq!(lineup.len(), 1);
        assert_eq!(assigned(&lineup, "RB1"), "rb_a");
    }

    #[test]
    fn slot_left_empty_when_no_eligible_player() {
        let (owned, lookup) = roster(&[("qb_a", Position::Quarterback, 1.0, 1.0)]);
        let shape = one_team_shape();
        let lineup = optimize_lineup(
            &owned,
            &lookup,
            &shape.slot_template(),
            &shape,
            RankSystem::Adp,
        );
        // Only QB1 fills; no kicker, defense, or flex assignments appear.
        assert_eq!(lineup.len(), 1);
        assert_eq!(lineup[0].label, "QB1");
    }

    #[test]
    fn assignments_emitted_in_template_order() {
        let (owned, lookup) = roster(&[
            ("def_a", Position::Defense, 1.0, 1.0),
            ("qb_a", Position::Quarterback, 2.0, 2.0),
            ("rb_a", Position::RunningBack, 3.0, 3.0),
            ("rb_b", Position::RunningBack, 4.0, 4.0),
            ("rb_c", Position::RunningBack, 5.0, 5.0),
        ]);
        let shape = one_team_shape();
        let lineup = optimize_lineup(
            &owned,
            &lookup,
            &shape.slot_template(),
            &shape,
            RankSystem::Adp,
        );
        let labels: Vec<&str> = lineup.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["QB1", "RB1", "RB2", "FLEX1", "DEF1"]);
    }
}

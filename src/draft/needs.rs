// Live roster needs tracking during a snakedraft.
//
// Starts from the league's per-slot requirement counts and walks one team's
// drafted players in order, attributing each pick to exactly one slot:
// dedicated first, then FLEX, then SUPERFLEX, then bench.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::LeagueShape;
use crate::player::{Position, Slot};

/// One pick already made by the team being tracked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftedPlayer {
    pub id: String,
    pub position: Position,
}

impl DraftedPlayer {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        DraftedPlayer {
            id: id.into(),
            position,
        }
    }
}

/// Remaining requirements and current holdings for one team.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RosterNeeds {
    /// Slots still required. Never goes negative.
    pub needs: HashMap<Slot, usize>,
    /// Players held per position. Flex-attributed players still count under
    /// their position, so the values sum to the number of drafted players.
    pub position_counts: HashMap<Position, usize>,
    /// How many picks were attributed to FLEX slots.
    pub flex_attributed: usize,
    /// How many picks were attributed to SUPERFLEX slots.
    pub superflex_attributed: usize,
}

impl RosterNeeds {
    /// Remaining requirement for a slot (0 when satisfied or not configured).
    pub fn remaining(&self, slot: Slot) -> usize {
        self.needs.get(&slot).copied().unwrap_or(0)
    }

    /// Players currently held at a position.
    pub fn held(&self, pos: Position) -> usize {
        self.position_counts.get(&pos).copied().unwrap_or(0)
    }

    /// Whether the position's dedicated slot is still open.
    pub fn needs_dedicated(&self, pos: Position) -> bool {
        self.remaining(pos.dedicated_slot()) > 0
    }

    fn decrement(&mut self, slot: Slot) -> bool {
        match self.needs.get_mut(&slot) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }
}

/// Fold one team's drafted players into remaining needs and position counts.
///
/// Attribution per player is exclusive: a pick never consumes both a
/// dedicated slot and FLEX. Dedicated wins over FLEX, FLEX over SUPERFLEX,
/// SUPERFLEX over bench; a pick with nowhere to go decrements nothing but
/// is still counted as held.
pub fn compute_roster_needs(drafted: &[DraftedPlayer], shape: &LeagueShape) -> RosterNeeds {
    let mut state = RosterNeeds {
        needs: shape.initial_needs(),
        ..RosterNeeds::default()
    };

    for player in drafted {
        let pos = player.position;
        *state.position_counts.entry(pos).or_insert(0) += 1;

        if state.decrement(pos.dedicated_slot()) {
            continue;
        }
        if shape.is_flex_eligible(pos) && state.decrement(Slot::Flex) {
            state.flex_attributed += 1;
            continue;
        }
        if shape.is_superflex_eligible(pos) && state.decrement(Slot::Superflex) {
            state.superflex_attributed += 1;
            continue;
        }
        state.decrement(Slot::Bench);
    }

    state
}

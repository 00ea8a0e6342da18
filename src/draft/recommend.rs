// Next-pick recommendation lists.
//
// Four overlapping views of the same undrafted pool, each sorted by
// (tier, rank, id) and truncated for presentation: key positions still
// needed, best available under depth caps, depth backups, and the non-key
// positions (K/DEF).

use serde::Serialize;

use crate::draft::needs::RosterNeeds;
use crate::player::{Position, Slot};

/// How many players each recommendation list shows.
pub const RECOMMENDATION_LIMIT: usize = 5;

/// Positions a draft should prioritize early.
pub const KEY_POSITIONS: &[Position] = &[
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
];

/// Per-position roster depth caps for recommendation filtering. RB and WR
/// are uncapped.
fn position_cap(pos: Position) -> Option<usize> {
    match pos {
        Position::Quarterback | Position::TightEnd => Some(2),
        Position::Kicker | Position::Defense => Some(1),
        Position::RunningBack | Position::WideReceiver => None,
    }
}

/// One undrafted player with a usable rank and tier.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPlayer {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub rank: f64,
    pub tier: u32,
}

/// The four recommendation lists. Computed from the same pool; entries may
/// appear in more than one list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Recommendations {
    pub key_positions: Vec<RankedPlayer>,
    pub best_available: Vec<RankedPlayer>,
    pub backups: Vec<RankedPlayer>,
    pub non_key_positions: Vec<RankedPlayer>,
}

/// Build the recommendation lists for the next pick.
///
/// Flex eligibility for the key-position check follows the needs tracker's
/// shape via `RosterNeeds`: a flex-eligible player stays "needed" while an
/// open FLEX slot remains.
pub fn recommend_next_picks(
    available: &[RankedPlayer],
    state: &RosterNeeds,
    flex_positions: &[Position],
) -> Recommendations {
    let mut pool: Vec<&RankedPlayer> = available.iter().collect();
    pool.sort_by(|a, b| {
        a.tier
            .cmp(&b.tier)
            .then_with(|| a.rank.partial_cmp(&b.rank).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| a.id.cmp(&b.id))
    });

    let under_cap = |pos: Position| match position_cap(pos) {
        Some(cap) => state.held(pos) < cap,
        None => true,
    };
    let flex_open = state.remaining(Slot::Flex) > 0;
    let still_needed = |pos: Position| {
        state.needs_dedicated(pos) || (flex_open && flex_positions.contains(&pos))
    };

    let take = |filter: &dyn Fn(&RankedPlayer) -> bool| -> Vec<RankedPlayer> {
        pool.iter()
            .filter(|p| filter(p))
            .take(RECOMMENDATION_LIMIT)
            .map(|p| (*p).clone())
            .collect()
    };

    Recommendations {
        key_positions: take(&|p| KEY_POSITIONS.contains(&p.position) && still_needed(p.position)),
        best_available: take(&|p| under_cap(p.position)),
        backups: take(&|p| under_cap(p.position) && !state.needs_dedicated(p.position)),
        non_key_positions: take(&|p| {
            !KEY_POSITIONS.contains(&p.position) && under_cap(p.position)
        }),
    }
}

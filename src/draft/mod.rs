// Draft-time roster logic: needs tracking, pick recommendations, lineups.

pub mod lineup;
pub mod needs;
pub mod recommend;

pub use lineup::{optimize_lineup, LineupAssignment, LineupEntry, RankSystem};
pub use needs::{compute_roster_needs, DraftedPlayer, RosterNeeds};
pub use recommend::{recommend_next_picks, RankedPlayer, Recommendations};

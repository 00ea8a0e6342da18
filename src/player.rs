// Core player and slot types shared across the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Football positions used for valuation and roster slot assignment.
///
/// A player's position is always one of these six after normalization.
/// FLEX and SUPERFLEX are slot concepts only (see `Slot`) and are never
/// stored as a player's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
}

/// All core positions, in canonical display order.
pub const ALL_POSITIONS: &[Position] = &[
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
    Position::Kicker,
    Position::Defense,
];

/// Default FLEX eligibility and greedy-allocation tie-break priority.
pub const FLEX_PRIORITY: &[Position] = &[
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
];

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles the common aggregator spellings:
    /// - "QB", "RB", "WR", "TE", "K", "PK"
    /// - "DEF", "DST", "D/ST" all map to Defense
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" | "PK" => Some(Position::Kicker),
            "DEF" | "DST" | "D/ST" => Some(Position::Defense),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
        }
    }

    /// The dedicated roster slot for this position.
    pub fn dedicated_slot(&self) -> Slot {
        match self {
            Position::Quarterback => Slot::Quarterback,
            Position::RunningBack => Slot::RunningBack,
            Position::WideReceiver => Slot::WideReceiver,
            Position::TightEnd => Slot::TightEnd,
            Position::Kicker => Slot::Kicker,
            Position::Defense => Slot::Defense,
        }
    }

    /// Deterministic ordering index for display and slot templates.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::Quarterback => 0,
            Position::RunningBack => 1,
            Position::WideReceiver => 2,
            Position::TightEnd => 3,
            Position::Kicker => 4,
            Position::Defense => 5,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Roster slot designations, including the shared FLEX/SUPERFLEX slots and
/// the bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Flex,
    Superflex,
    Kicker,
    Defense,
    Bench,
}

impl Slot {
    /// Parse a roster config key (e.g. "QB", "FLEX", "BN") into a Slot.
    pub fn from_str_slot(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "FLEX" | "W/R/T" => Some(Slot::Flex),
            "SUPERFLEX" | "SFLEX" | "OP" => Some(Slot::Superflex),
            "BN" | "BE" | "BENCH" => Some(Slot::Bench),
            other => Position::from_str_pos(other).map(|p| p.dedicated_slot()),
        }
    }

    /// Return the display string for this slot.
    pub fn display_str(&self) -> &'static str {
        match self {
            Slot::Quarterback => "QB",
            Slot::RunningBack => "RB",
            Slot::WideReceiver => "WR",
            Slot::TightEnd => "TE",
            Slot::Flex => "FLEX",
            Slot::Superflex => "SUPERFLEX",
            Slot::Kicker => "K",
            Slot::Defense => "DEF",
            Slot::Bench => "BN",
        }
    }

    /// The single position a dedicated slot holds, or None for shared slots
    /// (FLEX, SUPERFLEX) and the bench.
    pub fn dedicated_position(&self) -> Option<Position> {
        match self {
            Slot::Quarterback => Some(Position::Quarterback),
            Slot::RunningBack => Some(Position::RunningBack),
            Slot::WideReceiver => Some(Position::WideReceiver),
            Slot::TightEnd => Some(Position::TightEnd),
            Slot::Kicker => Some(Position::Kicker),
            Slot::Defense => Some(Position::Defense),
            Slot::Flex | Slot::Superflex | Slot::Bench => None,
        }
    }

    /// Deterministic ordering index for slot template construction.
    pub fn sort_order(&self) -> u8 {
        match self {
            Slot::Quarterback => 0,
            Slot::RunningBack => 1,
            Slot::WideReceiver => 2,
            Slot::TightEnd => 3,
            Slot::Flex => 4,
            Slot::Superflex => 5,
            Slot::Kicker => 6,
            Slot::Defense => 7,
            Slot::Bench => 8,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Scoring variant selecting which projected-points column applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringVariant {
    Standard,
    HalfPpr,
    Ppr,
}

impl ScoringVariant {
    pub fn from_str_variant(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Some(ScoringVariant::Standard),
            "half" | "half_ppr" | "half-ppr" => Some(ScoringVariant::HalfPpr),
            "ppr" => Some(ScoringVariant::Ppr),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            ScoringVariant::Standard => "standard",
            ScoringVariant::HalfPpr => "half_ppr",
            ScoringVariant::Ppr => "ppr",
        }
    }
}

/// Projected season points per scoring variant. Absence is `None`, never a
/// sentinel zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProjectedPoints {
    pub standard: Option<f64>,
    pub half_ppr: Option<f64>,
    pub ppr: Option<f64>,
}

impl ProjectedPoints {
    /// Points for the given scoring variant, if present and finite.
    pub fn get(&self, variant: ScoringVariant) -> Option<f64> {
        let raw = match variant {
            ScoringVariant::Standard => self.standard,
            ScoringVariant::HalfPpr => self.half_ppr,
            ScoringVariant::Ppr => self.ppr,
        };
        raw.filter(|v| v.is_finite())
    }
}

/// One pre-merged record per player, keyed by a stable player id.
///
/// The aggregation layer that merges the ranking sources lives outside this
/// crate; the engine only consumes the merged record. Any rating source may
/// be missing for any player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub team: String,
    pub position: Position,
    #[serde(default)]
    pub points: ProjectedPoints,
    pub adp: Option<f64>,
    pub ecr: Option<f64>,
    pub owned_pct: Option<f64>,
}

impl PlayerRecord {
    /// Average draft position, sanitized: non-finite or non-positive values
    /// are treated as absent.
    pub fn adp(&self) -> Option<f64> {
        self.adp.filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Expert consensus rank, sanitized the same way as ADP.
    pub fn ecr(&self) -> Option<f64> {
        self.ecr.filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Ownership percentage, sanitized: non-finite or negative values are
    /// treated as absent.
    pub fn owned_pct(&self) -> Option<f64> {
        self.owned_pct.filter(|v| v.is_finite() && *v >= 0.0)
    }
}

// League configuration loading and parsing (league.toml).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::player::{Position, Slot, ALL_POSITIONS, FLEX_PRIORITY};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

fn validation(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: RawLeague,
}

/// Raw deserialization target before validation. Slot counts come in as i64
/// so that negative values are rejected with a proper validation error
/// instead of a serde type error.
#[derive(Debug, Clone, Deserialize)]
struct RawLeague {
    #[serde(default)]
    name: String,
    num_teams: i64,
    roster: HashMap<String, i64>,
    /// Positions eligible for the FLEX slot. Defaults to RB/WR/TE.
    #[serde(default)]
    flex_positions: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// LeagueShape
// ---------------------------------------------------------------------------

/// Validated league configuration: team count and per-slot starter counts.
/// Immutable for the duration of one computation.
#[derive(Debug, Clone)]
pub struct LeagueShape {
    pub name: String,
    pub num_teams: usize,
    /// Dedicated starter slots per team, by position.
    pub starters: HashMap<Position, usize>,
    /// FLEX slots per team.
    pub flex: usize,
    /// Positions eligible for FLEX. SUPERFLEX eligibility is QB plus these.
    pub flex_positions: Vec<Position>,
    /// SUPERFLEX slots per team.
    pub superflex: usize,
    /// Bench slots per team.
    pub bench: usize,
}

impl Default for LeagueShape {
    /// A standard 12-team league: QB/2RB/2WR/TE/FLEX/K/DEF plus 6 bench.
    fn default() -> Self {
        let mut starters = HashMap::new();
        starters.insert(Position::Quarterback, 1);
        starters.insert(Position::RunningBack, 2);
        starters.insert(Position::WideReceiver, 2);
        starters.insert(Position::TightEnd, 1);
        starters.insert(Position::Kicker, 1);
        starters.insert(Position::Defense, 1);
        LeagueShape {
            name: String::new(),
            num_teams: 12,
            starters,
            flex: 1,
            flex_positions: default_flex_positions(),
            superflex: 0,
            bench: 6,
        }
    }
}

/// Default FLEX eligibility: RB/WR/TE.
pub fn default_flex_positions() -> Vec<Position> {
    FLEX_PRIORITY.to_vec()
}

impl LeagueShape {
    /// Dedicated starter slots per team for a position (0 when absent).
    pub fn starters_for(&self, pos: Position) -> usize {
        self.starters.get(&pos).copied().unwrap_or(0)
    }

    /// Whether a position may fill a FLEX slot.
    pub fn is_flex_eligible(&self, pos: Position) -> bool {
        self.flex_positions.contains(&pos)
    }

    /// Whether a position may fill a SUPERFLEX slot (QB plus FLEX-eligible).
    pub fn is_superflex_eligible(&self, pos: Position) -> bool {
        pos == Position::Quarterback || self.is_flex_eligible(pos)
    }

    /// SUPERFLEX candidate positions, in fixed priority order.
    pub fn superflex_positions(&self) -> Vec<Position> {
        let mut positions = vec![Position::Quarterback];
        positions.extend(self.flex_positions.iter().copied());
        positions
    }

    /// The ordered starting-slot template for one team, in canonical slot
    /// order: QB, RB, WR, TE, FLEX, SUPERFLEX, K, DEF, then bench.
    pub fn slot_template(&self) -> Vec<Slot> {
        let mut template = Vec::new();
        for &pos in ALL_POSITIONS {
            let slot = pos.dedicated_slot();
            for _ in 0..self.starters_for(pos) {
                template.push(slot);
            }
        }
        for _ in 0..self.flex {
            template.push(Slot::Flex);
        }
        for _ in 0..self.superflex {
            template.push(Slot::Superflex);
        }
        for _ in 0..self.bench {
            template.push(Slot::Bench);
        }
        template.sort_by_key(|s| s.sort_order());
        template
    }

    /// Per-slot requirement counts, the starting point of the needs tracker.
    pub fn initial_needs(&self) -> HashMap<Slot, usize> {
        let mut needs = HashMap::new();
        for &pos in ALL_POSITIONS {
            let count = self.starters_for(pos);
            if count > 0 {
                needs.insert(pos.dedicated_slot(), count);
            }
        }
        if self.flex > 0 {
            needs.insert(Slot::Flex, self.flex);
        }
        if self.superflex > 0 {
            needs.insert(Slot::Superflex, self.superflex);
        }
        if self.bench > 0 {
            needs.insert(Slot::Bench, self.bench);
        }
        needs
    }

    /// Validate the shape: team count at least 1, at least one starter slot,
    /// and FLEX eligibility present whenever shared slots exist.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_teams == 0 {
            return Err(validation("num_teams", "must be at least 1"));
        }
        let starter_total: usize =
            self.starters.values().sum::<usize>() + self.flex + self.superflex;
        if starter_total == 0 {
            return Err(validation("roster", "league has no starter slots"));
        }
        if self.flex_positions.is_empty() && (self.flex > 0 || self.superflex > 0) {
            return Err(validation(
                "flex_positions",
                "FLEX slots configured but no eligible positions",
            ));
        }
        Ok(())
    }

    fn from_raw(raw: RawLeague) -> Result<Self, ConfigError> {
        if raw.num_teams <= 0 {
            return Err(validation("num_teams", "must be at least 1"));
        }

        let mut starters = HashMap::new();
        let mut flex = 0usize;
        let mut superflex = 0usize;
        let mut bench = 0usize;
        for (key, count) in &raw.roster {
            if *count < 0 {
                return Err(validation(key, "slot count cannot be negative"));
            }
            let count = *count as usize;
            match Slot::from_str_slot(key) {
                Some(Slot::Flex) => flex = count,
                Some(Slot::Superflex) => superflex = count,
                Some(Slot::Bench) => bench = count,
                // Dedicated slots map 1:1 onto positions
                Some(slot) => match slot.dedicated_position() {
                    Some(pos) => {
                        starters.insert(pos, count);
                    }
                    None => return Err(validation(key, "unknown roster slot")),
                },
                None => {
                    return Err(validation(key, "unknown roster slot"));
                }
            }
        }

        let flex_positions = match &raw.flex_positions {
            Some(keys) => {
                let mut positions = Vec::new();
                for key in keys {
                    let pos = Position::from_str_pos(key).ok_or_else(|| {
                        validation("flex_positions", format!("unknown position `{key}`"))
                    })?;
                    if !positions.contains(&pos) {
                        positions.push(pos);
                    }
                }
                positions
            }
            None => default_flex_positions(),
        };

        let shape = LeagueShape {
            name: raw.name,
            num_teams: raw.num_teams as usize,
            starters,
            flex,
            flex_positions,
            superflex,
            bench,
        };
        shape.validate()?;
        Ok(shape)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate a `LeagueShape` from a league.toml file.
pub fn load_league_shape(path: &Path) -> Result<LeagueShape, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_league_shape(&text, path)
}

/// Parse league.toml text. Split out from `load_league_shape` so tests can
/// run without touching the filesystem.
fn parse_league_shape(text: &str, path: &Path) -> Result<LeagueShape, ConfigError> {
    let file: LeagueFile = toml::from_str(text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;
    LeagueShape::from_raw(file.league)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<LeagueShape, ConfigError> {
        parse_league_shape(text, Path::new("league.toml"))
    }

    const STANDARD_LEAGUE: &str = r#"
        [league]
        name = "Test League"
        num_teams = 12

        [league.roster]
        QB = 1
        RB = 2
        WR = 2
        TE = 1
        FLEX = 1
        K = 1
        DEF = 1
        BN = 6
    "#;

    #[test]
    fn parses_standard_league() {
        let shape = parse(STANDARD_LEAGUE).unwrap();
        assert_eq!(shape.name, "Test League");
        assert_eq!(shape.num_teams, 12);
        assert_eq!(shape.starters_for(Position::RunningBack), 2);
        assert_eq!(shape.starters_for(Position::Quarterback), 1);
        assert_eq!(shape.flex, 1);
        assert_eq!(shape.superflex, 0);
        assert_eq!(shape.bench, 6);
        assert_eq!(shape.flex_positions, default_flex_positions());
    }

    #[test]
    fn parses_superflex_and_custom_flex_positions() {
        let shape = parse(
            r#"
            [league]
            num_teams = 10
            flex_positions = ["RB", "WR"]

            [league.roster]
            QB = 1
            RB = 2
            WR = 2
            FLEX = 2
            SUPERFLEX = 1
        "#,
        )
        .unwrap();
        assert_eq!(shape.superflex, 1);
        assert_eq!(shape.flex, 2);
        assert_eq!(
            shape.flex_positions,
            vec![Position::RunningBack, Position::WideReceiver]
        );
        assert!(shape.is_superflex_eligible(Position::Quarterback));
        assert!(!shape.is_flex_eligible(Position::TightEnd));
        assert_eq!(
            shape.superflex_positions(),
            vec![
                Position::Quarterback,
                Position::RunningBack,
                Position::WideReceiver
            ]
        );
    }

    #[test]
    fn rejects_zero_teams() {
        let err = parse(
            r#"
            [league]
            num_teams = 0
            [league.roster]
            QB = 1
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn rejects_negative_slot_count() {
        let err = parse(
            r#"
            [league]
            num_teams = 12
            [league.roster]
            QB = 1
            RB = -2
        "#,
        )
        .unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "RB"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_roster_key() {
        let err = parse(
            r#"
            [league]
            num_teams = 12
            [league.roster]
            QB = 1
            UTIL = 1
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn rejects_league_without_starters() {
        let err = parse(
            r#"
            [league]
            num_teams = 12
            [league.roster]
            BN = 6
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn slot_template_canonical_order() {
        let shape = parse(STANDARD_LEAGUE).unwrap();
        let template = shape.slot_template();
        assert_eq!(
            template[..9],
            [
                Slot::Quarterback,
                Slot::RunningBack,
                Slot::RunningBack,
                Slot::WideReceiver,
                Slot::WideReceiver,
                Slot::TightEnd,
                Slot::Flex,
                Slot::Kicker,
                Slot::Defense,
            ]
        );
        // 9 starters + 6 bench
        assert_eq!(template.len(), 15);
        assert!(template[9..].iter().all(|&s| s == Slot::Bench));
    }

    #[test]
    fn initial_needs_matches_roster() {
        let shape = parse(STANDARD_LEAGUE).unwrap();
        let needs = shape.initial_needs();
        assert_eq!(needs.get(&Slot::RunningBack), Some(&2));
        assert_eq!(needs.get(&Slot::Flex), Some(&1));
        assert_eq!(needs.get(&Slot::Bench), Some(&6));
        assert_eq!(needs.get(&Slot::Superflex), None);
    }

    #[test]
    fn default_shape_is_valid() {
        let shape = LeagueShape::default();
        assert!(shape.validate().is_ok());
        assert_eq!(shape.slot_template().len(), 9 + 6);
    }

    #[test]
    fn missing_file_error() {
        let err = load_league_shape(Path::new("/nonexistent/league.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}

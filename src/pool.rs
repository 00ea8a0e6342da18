// Player pool loading and normalization.
//
// Reads a pre-merged players CSV: one row per player with projected points
// for all three scoring variants plus the market columns (ADP, ECR, owned%).
// Rating columns may be blank for any player; blanks become `None`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::player::{PlayerRecord, Position, ProjectedPoints};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// One merged players-CSV row. The rating columns deserialize as
/// `Option<f64>` so blank cells survive as absent instead of failing the
/// row. Extra columns are silently ignored via `#[serde(flatten)]`.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct RawPoolRow {
    id: String,
    name: String,
    #[serde(default)]
    team: String,
    position: String,
    #[serde(default)]
    pts_std: Option<f64>,
    #[serde(default)]
    pts_half: Option<f64>,
    #[serde(default)]
    pts_ppr: Option<f64>,
    #[serde(default)]
    adp: Option<f64>,
    #[serde(default)]
    ecr: Option<f64>,
    #[serde(default)]
    owned_pct: Option<f64>,
    /// Absorb any extra columns the upstream merge includes.
    #[serde(flatten)]
    _extra: std::collections::HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Reader-based loader (private, enables testing without temp files)
// ---------------------------------------------------------------------------

fn load_pool_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawPoolRow>() {
        match result {
            Ok(raw) => {
                let id = raw.id.trim().to_string();
                if id.is_empty() {
                    warn!("skipping player '{}': empty id", raw.name.trim());
                    continue;
                }
                let Some(position) = Position::from_str_pos(raw.position.trim()) else {
                    warn!(
                        "skipping player '{}': unknown position '{}'",
                        raw.name.trim(),
                        raw.position
                    );
                    continue;
                };
                players.push(PlayerRecord {
                    id,
                    name: raw.name.trim().to_string(),
                    team: raw.team.trim().to_string(),
                    position,
                    points: ProjectedPoints {
                        standard: raw.pts_std,
                        half_ppr: raw.pts_half,
                        ppr: raw.pts_ppr,
                    },
                    adp: raw.adp,
                    ecr: raw.ecr,
                    owned_pct: raw.owned_pct,
                });
            }
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }
    Ok(players)
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

/// Load the merged player pool from a CSV file. Rows with an unknown
/// position or no id are skipped with a warning; an entirely empty pool is
/// an error.
pub fn load_player_pool(path: &Path) -> Result<Vec<PlayerRecord>, PoolError> {
    let file = std::fs::File::open(path).map_err(|e| PoolError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = load_pool_from_reader(file).map_err(|e| PoolError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    if players.is_empty() {
        return Err(PoolError::Validation(
            "players CSV produced zero valid rows".into(),
        ));
    }
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

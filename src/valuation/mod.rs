// Valuation engine: replacement baselines (VORP), scarcity metrics, ranks.

pub mod baseline;
pub mod metrics;

pub use baseline::{compute_baselines, PositionBaseline};
pub use metrics::{compute_valuations, EnrichedPlayer};

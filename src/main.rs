// Valuation engine entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, filtered by RUST_LOG)
// 2. Load league configuration
// 3. Load the merged player pool CSV
// 4. Compute valuations for the chosen scoring variant
// 5. Print position baselines and the top of the board

use std::path::Path;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use draftval::config;
use draftval::player::{ScoringVariant, ALL_POSITIONS};
use draftval::pool;
use draftval::valuation;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (stderr so the board stays clean on stdout)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let league_path = args.next().unwrap_or_else(|| "league.toml".to_string());
    let players_path = args.next().unwrap_or_else(|| "players.csv".to_string());
    let variant = match args.next() {
        Some(name) => ScoringVariant::from_str_variant(&name)
            .with_context(|| format!("unknown scoring variant `{name}`"))?,
        None => ScoringVariant::Ppr,
    };
    info!("valuation engine starting ({})", variant.display_str());

    // 2. Load league configuration
    let shape = config::load_league_shape(Path::new(&league_path))
        .context("failed to load league configuration")?;
    info!(
        "league loaded: {} teams, {} starting slots per team",
        shape.num_teams,
        shape.slot_template().len() - shape.bench
    );

    // 3. Load the merged player pool
    let players =
        pool::load_player_pool(Path::new(&players_path)).context("failed to load player pool")?;
    info!("loaded {} players", players.len());

    // 4. Compute baselines and per-player valuations
    let baselines = valuation::compute_baselines(&players, &shape, variant);
    let enriched = valuation::compute_valuations(&players, &shape, variant);

    // 5. Print the board
    println!("Position baselines ({}):", variant.display_str());
    for &pos in ALL_POSITIONS {
        if let Some(baseline) = baselines.get(&pos) {
            println!(
                "  {:>3}  starters={:<3} baseline={:>7.1}",
                pos.display_str(),
                baseline.starter_count,
                baseline.baseline_points,
            );
        }
    }

    let mut board: Vec<_> = enriched.iter().collect();
    board.sort_by_key(|p| (p.overall_rank.is_none(), p.overall_rank));

    println!();
    println!(
        "{:>4}  {:<24} {:>3} {:>4}  {:>7} {:>6} {:>5} {:>6}",
        "RANK", "PLAYER", "POS", "TEAM", "POINTS", "VOB", "GAP", "DELTA"
    );
    for player in board.iter().take(50) {
        println!(
            "{:>4}  {:<24} {:>3} {:>4}  {:>7} {:>6} {:>5} {:>6}",
            fmt_opt(player.overall_rank),
            player.name,
            player.position.display_str(),
            player.team,
            fmt_opt_f64(player.points),
            fmt_opt(player.value_over_baseline),
            fmt_opt_f64(player.local_scarcity_gap),
            fmt_opt(player.market_delta),
        );
    }

    Ok(())
}

fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

fn fmt_opt_f64(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "-".to_string(),
    }
}

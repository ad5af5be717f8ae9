use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use arena_app::host;
use arena_app::state::AppState;
use arena_app::telemetry::{self, TracingObserver};
use arena_core::config::ArenaConfig;
use arena_sim::events::EventObserver;

const USAGE: &str = "usage: arena-app [config.json] [seconds]";
const DEFAULT_SECONDS: f64 = 10.0;

/// Run length in seconds; rejects negatives, NaN, and values too large for a
/// `Duration`.
fn parse_run_length(raw: &str) -> Result<Duration> {
    let seconds: f64 = raw
        .parse()
        .with_context(|| format!("invalid run length {raw:?}; {USAGE}"))?;
    Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("run length {raw:?} out of range; {USAGE}"))
}

fn main() -> Result<()> {
    telemetry::init_tracing()?;

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(flag) if flag == "-h" || flag == "--help" => {
            println!("{USAGE}");
            return Ok(());
        }
        Some(path) => ArenaConfig::load(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => ArenaConfig::default(),
    };
    let run_for = match args.next() {
        Some(raw) => parse_run_length(&raw)?,
        None => Duration::from_secs_f64(DEFAULT_SECONDS),
    };

    info!("Arena starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!(
        seed = config.seed,
        mob_types = config.mobs.len(),
        target = config.target_population,
        seconds = run_for.as_secs_f64(),
        "configuration loaded"
    );

    let state = AppState::new();
    let observers: Vec<Box<dyn EventObserver + Send>> = vec![Box::new(TracingObserver)];
    host::start_with_observers(&state, config, observers)?;

    std::thread::sleep(run_for);

    let snapshot = host::get_snapshot(&state)?;
    host::shutdown(&state)?;

    if let Some(snapshot) = snapshot {
        let stats = &snapshot.stats;
        info!(
            ticks = snapshot.time.tick,
            now_ms = snapshot.time.now_ms,
            kills = stats.kills,
            reward = stats.total_reward,
            bonus = stats.total_bonus,
            peak_combo = snapshot.combo.peak,
            damage_taken = stats.damage_taken,
            projectiles = stats.projectiles_fired,
            live_mobs = snapshot.mobs.len(),
            player_alive = snapshot.player.alive,
            "session summary"
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    info!("Arena shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_length_parsing() {
        assert_eq!(parse_run_length("2.5").unwrap(), Duration::from_millis(2500));
        assert_eq!(parse_run_length("0").unwrap(), Duration::ZERO);
        assert!(parse_run_length("ten").is_err());
        assert!(parse_run_length("-1").is_err());
        assert!(parse_run_length("NaN").is_err());
        assert!(parse_run_length("inf").is_err());
        assert!(parse_run_length("1e30").is_err());
    }
}

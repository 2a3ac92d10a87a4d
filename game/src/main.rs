use anyhow::Context;

use game::{replay, FiremanGame, GameConfig, ScriptedSkeleton};

fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (for development)
    if dotenvy::dotenv().is_err() {
        dotenvy::from_filename("game/.env").ok();
    }

    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting Super Fireman...");
    log::info!("Pose engine version: {}", pose::pose_version());

    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "game/config/game.toml".to_string());
    let config = GameConfig::load_from_file(&config_path)
        .with_context(|| format!("failed to load game configuration from '{}'", config_path))?;
    log::info!(
        "Loaded configuration: {} player(s), {} ms per tick",
        config.rules.max_players,
        config.rules.tick_ms
    );

    let script_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SCRIPT_PATH").ok())
        .unwrap_or_else(|| "game/config/scripts/demo.toml".to_string());
    let mut script = ScriptedSkeleton::load_from_file(&script_path)
        .with_context(|| format!("failed to load script from '{}'", script_path))?;
    log::info!(
        "Replaying script '{}' ({} ticks)",
        script.name(),
        script.total_ticks()
    );

    let mut game = FiremanGame::new(config).context("invalid game configuration")?;
    let summary = replay::run(&mut game, &mut script);

    println!(
        "game {} after {} ticks, {} level(s) cleared",
        summary.status.name(),
        summary.ticks,
        summary.levels_cleared
    );
    for (user, score) in &summary.scores {
        println!("  {}: {} points", user, score);
    }
    println!("  total: {} points", summary.total_score());

    Ok(())
}

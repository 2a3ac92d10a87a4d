//! Prints which poses of the table hold on one frame of a script.
//!
//! Usage: `pose-probe <script.toml> [tick]`. Without a tick every keyframe is
//! probed.

use anyhow::{bail, Context};

use game::{GameConfig, ScriptedSkeleton};
use pose::{poses, PoseTolerances, SkeletonFrame, SkeletonProvider};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let mut args = std::env::args().skip(1);
    let Some(script_path) = args.next() else {
        bail!("usage: pose-probe <script.toml> [tick]");
    };
    let tick = match args.next() {
        Some(raw) => Some(
            raw.parse::<u64>()
                .with_context(|| format!("invalid tick '{}'", raw))?,
        ),
        None => None,
    };

    let tolerances = match std::env::var("CONFIG_PATH") {
        Ok(path) => {
            let config = GameConfig::load_from_file(&path)
                .with_context(|| format!("failed to load game configuration from '{}'", path))?;
            PoseTolerances::from(&config.pose)
        }
        Err(_) => PoseTolerances::default(),
    };

    let script = ScriptedSkeleton::load_from_file(&script_path)
        .with_context(|| format!("failed to load script from '{}'", script_path))?;

    let ticks = match tick {
        Some(tick) => vec![tick],
        None => script.keyframe_starts(),
    };
    for tick in ticks {
        let Some(frame) = script.frame_at(tick) else {
            bail!(
                "tick {} is past the end of the script ({} ticks)",
                tick,
                script.total_ticks()
            );
        };
        probe(tick, frame, &tolerances);
    }

    Ok(())
}

fn probe(tick: u64, frame: &SkeletonFrame, tolerances: &PoseTolerances) {
    println!("tick {}", tick);
    let users = frame.tracked_users();
    if users.is_empty() {
        println!("  no users");
    }
    for user in users {
        let holding: Vec<&str> = poses::all()
            .iter()
            .filter(|spec| spec.evaluate(frame, user, tolerances))
            .map(|spec| spec.name)
            .collect();
        if holding.is_empty() {
            println!("  {}: -", user);
        } else {
            println!("  {}: {}", user, holding.join(", "));
        }
    }
}

use std::collections::BTreeMap;

use log::{debug, info};
use pose::UserId;

use crate::runtime::{FiremanGame, GameStatus};
use crate::script::ScriptedSkeleton;

/// Outcome of a scripted run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub status: GameStatus,
    pub ticks: u64,
    pub levels_cleared: u32,
    pub scores: BTreeMap<UserId, u32>,
}

impl ReplaySummary {
    pub fn total_score(&self) -> u32 {
        self.scores.values().sum()
    }
}

/// Feeds a script into a game until the game ends, the script runs out or
/// `rules.max_ticks` is reached.
pub fn run(game: &mut FiremanGame, script: &mut ScriptedSkeleton) -> ReplaySummary {
    let max_ticks = game.config().rules.max_ticks;
    let mut status = game.status();

    while !game.is_over() && game.ticks() < max_ticks {
        let Some(events) = script.step() else {
            info!("script '{}' finished after {} ticks", script.name(), script.tick());
            break;
        };
        for event in events {
            game.handle_event(event);
        }

        let report = game.tick(&*script);
        for event in &report.pose_events {
            debug!("tick {}: {}", game.ticks(), event);
        }
        if let Some(level) = report.level_cleared {
            info!(
                "tick {}: level {} cleared, total score {}",
                game.ticks(),
                level,
                game.total_score()
            );
        }
        if game.status() != status {
            status = game.status();
            info!("tick {}: game {}", game.ticks(), status.name());
        }
    }

    ReplaySummary {
        status: game.status(),
        ticks: game.ticks(),
        levels_cleared: game.levels_cleared(),
        scores: game.scores().clone(),
    }
}

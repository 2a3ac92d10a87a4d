use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use pose::PoseConfig;

use crate::error::{GameError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub pose: PoseConfig,
    pub rules: RulesConfig,
    pub waves: WaveConfig,
    pub arena: ArenaConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Transformed players needed to start the game.
    pub max_players: u32,
    /// A flame past this depth loses the game.
    pub fire_limit_z: f32,
    pub spawn_z: f32,
    pub points_per_hit: u32,
    pub tick_ms: u64,
    /// Headless runs stop after this many ticks.
    pub max_ticks: u64,
    pub seed: u64,
    pub levels_to_win: u32,
}

/// Wave tuning for a full game. Values are scaled by the share of
/// `max_players` actually playing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub flames_first_level: u32,
    pub spawn_every_ticks_first_level: u32,
    pub speed_first_level: f32,
    pub rise_flames: u32,
    pub rise_spawn_every: u32,
    pub rise_speed: f32,
}

/// Area flames spawn in, in projected coordinates.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: u32,
    pub height: u32,
    pub floor_level: f32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_players: 1,
            fire_limit_z: 3500.0,
            spawn_z: -3500.0,
            points_per_hit: 100,
            tick_ms: 25,
            max_ticks: 20_000,
            seed: 2011,
            levels_to_win: 3,
        }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            flames_first_level: 10,
            spawn_every_ticks_first_level: 60,
            speed_first_level: 3.0,
            rise_flames: 20,
            rise_spawn_every: 30,
            rise_speed: 10.0,
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            floor_level: 0.0,
        }
    }
}

impl GameConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.pose.validate()?;

        if self.rules.max_players == 0 {
            return Err(GameError::Config(
                "rules.max_players must be at least 1".to_string(),
            ));
        }
        if self.rules.tick_ms == 0 {
            return Err(GameError::Config("rules.tick_ms must be positive".to_string()));
        }
        if self.rules.levels_to_win == 0 {
            return Err(GameError::Config(
                "rules.levels_to_win must be at least 1".to_string(),
            ));
        }
        if self.rules.spawn_z >= self.rules.fire_limit_z {
            return Err(GameError::Config(format!(
                "rules.spawn_z ({}) must be below rules.fire_limit_z ({})",
                self.rules.spawn_z, self.rules.fire_limit_z
            )));
        }
        if self.arena.width == 0 || self.arena.height == 0 {
            return Err(GameError::Config(
                "arena width and height must be positive".to_string(),
            ));
        }
        if self.waves.flames_first_level == 0 || self.waves.spawn_every_ticks_first_level == 0 {
            return Err(GameError::Config(
                "waves must spawn at least one flame at a positive interval".to_string(),
            ));
        }
        if !(self.waves.speed_first_level > 0.0) || self.waves.rise_speed < 0.0 {
            return Err(GameError::Config(
                "waves.speed_first_level must be positive and rise_speed non-negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.rules.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config.rules.max_players, 1);
        assert_eq!(config.rules.points_per_hit, 100);
        assert_eq!(config.waves.flames_first_level, 10);
        assert_eq!(config.arena.width, 800);
        assert_eq!(config.pose.min_confidence, 0.5);
        assert_eq!(config.tick(), Duration::from_millis(25));
    }

    #[test]
    fn test_parse_sections() {
        let toml_content = r#"
[rules]
max_players = 2
seed = 7

[pose]
axis_tolerance_deg = 25.0

[pose.cannon]
shot_delay_ticks = 4

[waves]
speed_first_level = 6.0

[arena]
floor_level = 120.0
        "#;

        let config = GameConfig::from_toml(toml_content).unwrap();
        assert_eq!(config.rules.max_players, 2);
        assert_eq!(config.rules.seed, 7);
        assert_eq!(config.pose.axis_tolerance_deg, 25.0);
        assert_eq!(config.pose.cannon.shot_delay_ticks, 4);
        assert_eq!(config.waves.speed_first_level, 6.0);
        assert_eq!(config.arena.floor_level, 120.0);
    }

    #[test]
    fn test_rejects_zero_players() {
        let err = GameConfig::from_toml("[rules]\nmax_players = 0\n").unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_invalid_pose_section_is_a_pose_error() {
        let err = GameConfig::from_toml("[pose]\nmin_confidence = 2.0\n").unwrap_err();
        assert!(matches!(err, GameError::Pose(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = GameConfig::from_toml("[rules\nmax_players = 1").unwrap_err();
        assert!(matches!(err, GameError::Toml(_)));
    }
}

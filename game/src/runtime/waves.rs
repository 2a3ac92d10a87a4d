use common::Vector3;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::flame::Flame;
use crate::config::{ArenaConfig, WaveConfig};

/// Wave tuning for the current number of players.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    pub flames_in_level: u32,
    pub spawn_every: u32,
    pub speed: f32,
    pub rise_flames: u32,
    pub rise_spawn_every: u32,
    pub rise_speed: f32,
}

impl WaveParams {
    /// Scales the full-game tuning by `players / max_players`. Counts never
    /// drop below one.
    pub fn scaled(config: &WaveConfig, players: usize, max_players: u32) -> Self {
        let share = players as f32 / max_players.max(1) as f32;
        let count = |value: u32| ((value as f32 * share).round() as u32).max(1);

        Self {
            flames_in_level: count(config.flames_first_level),
            spawn_every: count(config.spawn_every_ticks_first_level),
            speed: config.speed_first_level * share,
            rise_flames: count(config.rise_flames),
            rise_spawn_every: (config.rise_spawn_every as f32 * share).round() as u32,
            rise_speed: config.rise_speed * share,
        }
    }
}

/// Spawns the flames of one level at a fixed interval and ramps up the next.
#[derive(Debug, Clone)]
pub struct WaveSpawner {
    params: WaveParams,
    arena: ArenaConfig,
    spawn_z: f32,
    level: u32,
    spawned: u32,
    counter: u32,
    rng: StdRng,
}

impl WaveSpawner {
    pub fn new(params: WaveParams, arena: ArenaConfig, spawn_z: f32, seed: u64) -> Self {
        Self {
            params,
            arena,
            spawn_z,
            level: 0,
            spawned: 0,
            counter: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    pub fn speed(&self) -> f32 {
        self.params.speed
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Counts one tick; returns a new flame when the interval is up and the
    /// level still has flames to send.
    pub fn tick(&mut self) -> Option<Flame> {
        if self.counter >= self.params.spawn_every && self.spawned < self.params.flames_in_level {
            self.counter = 0;
            self.spawned += 1;
            Some(self.spawn())
        } else {
            self.counter += 1;
            None
        }
    }

    fn spawn(&mut self) -> Flame {
        let x = self.rng.gen_range(0.0..self.arena.width as f32);
        let y = self.rng.gen_range(0.0..self.arena.height as f32) - self.arena.floor_level;
        let hp = self.rng.gen_range(1..=3);
        Flame::new(Vector3::new(x, y, self.spawn_z), hp)
    }

    /// Every flame of the level was sent and none is left burning.
    pub fn level_cleared(&self, burning: usize) -> bool {
        self.spawned >= self.params.flames_in_level && burning == 0
    }

    /// More flames, sent faster, moving faster.
    pub fn next_level(&mut self) {
        self.level += 1;
        self.spawned = 0;
        self.counter = 0;
        self.params.flames_in_level += self.params.rise_flames;
        self.params.spawn_every = self
            .params
            .spawn_every
            .saturating_sub(self.params.rise_spawn_every)
            .max(1);
        self.params.speed += self.params.rise_speed;
        info!(
            "level {} start: {} flames every {} ticks at speed {}",
            self.level, self.params.flames_in_level, self.params.spawn_every, self.params.speed
        );
    }
}

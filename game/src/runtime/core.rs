use std::collections::BTreeMap;

use common::Joint;
use log::{debug, info, warn};
use pose::{
    Character, PoseEngine, PoseEvent, SkeletonProvider, TickClock, UserEvent, UserId,
};

use super::flame::Flame;
use super::waves::{WaveParams, WaveSpawner};
use crate::config::GameConfig;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Waiting for enough players to transform.
    NotStarted,
    Started,
    /// Every player left.
    NoPlayers,
    /// A flame crossed the fire limit.
    Lost,
    Won,
}

impl GameStatus {
    pub fn name(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "not started",
            GameStatus::Started => "started",
            GameStatus::NoPlayers => "no players",
            GameStatus::Lost => "lost",
            GameStatus::Won => "won",
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(
            self,
            GameStatus::NoPlayers | GameStatus::Lost | GameStatus::Won
        )
    }
}

/// What happened during one game tick.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub pose_events: Vec<PoseEvent>,
    pub hits: u32,
    pub stomps: u32,
    pub spawned: u32,
    /// Set when this tick finished a level.
    pub level_cleared: Option<u32>,
}

/// Headless "Super Fireman" session: pose detection plus flames and scoring.
#[derive(Debug)]
pub struct FiremanGame {
    config: GameConfig,
    engine: PoseEngine,
    status: GameStatus,
    scores: BTreeMap<UserId, u32>,
    flames: Vec<Flame>,
    waves: Option<WaveSpawner>,
    levels_cleared: u32,
    ticks: u64,
}

impl FiremanGame {
    /// Builds a game whose pose clock advances by `rules.tick_ms` each tick.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let engine = PoseEngine::with_clock(&config.pose, TickClock::fixed(config.tick()))?;
        Ok(Self::with_engine(config, engine))
    }

    pub fn with_engine(config: GameConfig, engine: PoseEngine) -> Self {
        Self {
            config,
            engine,
            status: GameStatus::NotStarted,
            scores: BTreeMap::new(),
            flames: Vec::new(),
            waves: None,
            levels_cleared: 0,
            ticks: 0,
        }
    }

    pub fn handle_event(&mut self, event: UserEvent) {
        self.engine.handle_event(event);
    }

    pub fn tick<P>(&mut self, provider: &P) -> TickReport
    where
        P: SkeletonProvider + ?Sized,
    {
        let mut report = TickReport::default();
        if self.status.is_over() {
            return report;
        }
        self.ticks += 1;

        report.pose_events = self.engine.tick(provider);
        self.check_players();

        if self.status == GameStatus::Started {
            self.next_frame(provider, &mut report);
        }
        self.engine.advance_projectiles();

        report
    }

    /// Syncs the score table with the transformed players and starts the
    /// game once enough of them are in.
    fn check_players(&mut self) {
        let players = self.engine.players();

        match self.status {
            GameStatus::NotStarted => {
                self.scores.retain(|user, _| players.contains(user));
                for user in &players {
                    self.scores.entry(*user).or_insert(0);
                }
                if players.len() >= self.config.rules.max_players as usize {
                    self.start(players.len());
                }
            }
            GameStatus::Started => {
                let left: Vec<UserId> = self
                    .scores
                    .keys()
                    .filter(|user| !players.contains(user))
                    .copied()
                    .collect();
                for user in left {
                    info!("{} has left the game", user);
                    self.scores.remove(&user);
                }
                if self.scores.is_empty() {
                    info!("players left the game");
                    self.status = GameStatus::NoPlayers;
                }
            }
            _ => {}
        }
    }

    fn start(&mut self, players: usize) {
        let params = WaveParams::scaled(&self.config.waves, players, self.config.rules.max_players);
        self.waves = Some(WaveSpawner::new(
            params,
            self.config.arena,
            self.config.rules.spawn_z,
            self.config.rules.seed,
        ));
        self.engine.lock();
        self.status = GameStatus::Started;
        info!(
            "game started with {} player(s): {} flames every {} ticks",
            players, params.flames_in_level, params.spawn_every
        );
    }

    fn next_frame<P>(&mut self, provider: &P, report: &mut TickReport)
    where
        P: SkeletonProvider + ?Sized,
    {
        let Some(speed) = self.waves.as_ref().map(WaveSpawner::speed) else {
            return;
        };
        let points = self.config.rules.points_per_hit;
        let min_confidence = self.engine.tolerances().min_confidence;

        for flame in &mut self.flames {
            for character in Character::ALL {
                let Some(roster) = self.engine.projectiles_mut(character) else {
                    continue;
                };
                let mut remaining = flame.hp();
                let hits = roster.take_where(|shot| {
                    if remaining > 0 && flame.is_in_bounding_box(&shot.position) {
                        remaining -= 1;
                        true
                    } else {
                        false
                    }
                });
                for shot in hits {
                    flame.extinguish();
                    report.hits += 1;
                    if let Some(score) = self.scores.get_mut(&shot.owner) {
                        *score += points;
                    }
                }
            }

            for (user, score) in self.scores.iter_mut() {
                if !flame.is_alive() || provider.confidence(*user, Joint::RightFoot) < min_confidence
                {
                    continue;
                }
                let foot = provider.to_projective(provider.position(*user, Joint::RightFoot));
                if flame.is_in_bounding_box(&foot) {
                    flame.extinguish();
                    report.stomps += 1;
                    *score += points;
                    debug!("{} stomped a flame", user);
                }
            }

            if flame.is_alive() {
                if flame.position.z > self.config.rules.fire_limit_z {
                    warn!("a flame crossed the fire limit");
                    self.status = GameStatus::Lost;
                    return;
                }
                flame.advance(speed);
            }
        }
        self.flames.retain(Flame::is_alive);

        let Some(waves) = self.waves.as_mut() else {
            return;
        };
        if let Some(flame) = waves.tick() {
            debug!("flame spawned at {:?} with {} hp", flame.position, flame.hp());
            self.flames.push(flame);
            report.spawned += 1;
        }

        if waves.level_cleared(self.flames.len()) {
            self.levels_cleared += 1;
            report.level_cleared = Some(waves.level());
            info!("level {} cleared", waves.level());
            if self.levels_cleared >= self.config.rules.levels_to_win {
                info!("all levels cleared, the players won");
                self.status = GameStatus::Won;
            } else {
                waves.next_level();
            }
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn score(&self, user: UserId) -> Option<u32> {
        self.scores.get(&user).copied()
    }

    pub fn scores(&self) -> &BTreeMap<UserId, u32> {
        &self.scores
    }

    pub fn total_score(&self) -> u32 {
        self.scores.values().sum()
    }

    /// Current level, starting at 0.
    pub fn level(&self) -> u32 {
        self.waves.as_ref().map_or(0, WaveSpawner::level)
    }

    pub fn levels_cleared(&self) -> u32 {
        self.levels_cleared
    }

    pub fn flames(&self) -> &[Flame] {
        &self.flames
    }

    pub fn engine(&self) -> &PoseEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PoseEngine {
        &mut self.engine
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Places a flame directly, bypassing the spawner.
    pub fn push_flame(&mut self, flame: Flame) {
        self.flames.push(flame);
    }
}

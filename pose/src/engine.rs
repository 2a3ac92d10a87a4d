//! The detector facade the game loop talks to.
//!
//! One [`PoseEngine`] owns the user registry plus a transformation machine and
//! an action detector per character. Every tick it measures the elapsed time
//! once and runs all tracked users through the detectors.

use log::{debug, info, warn};

use crate::action::ActionDetector;
use crate::clock::TickClock;
use crate::config::PoseConfig;
use crate::error::Result;
use crate::event::PoseEvent;
use crate::poses::PoseTolerances;
use crate::projectile::ProjectileRoster;
use crate::registry::{AbilityState, Character, Stage, UserRegistry, UserState};
use crate::skeleton::{SkeletonProvider, UserEvent, UserId};
use crate::transform::TransformationMachine;

/// Transformation and weapon handling for one character.
#[derive(Debug, Clone)]
struct CharacterDetector {
    transform: TransformationMachine,
    action: ActionDetector,
}

#[derive(Debug, Clone)]
pub struct PoseEngine {
    tolerances: PoseTolerances,
    registry: UserRegistry,
    /// In evaluation order: the timed cannon hold goes first.
    detectors: Vec<CharacterDetector>,
    clock: TickClock,
    locked: bool,
}

impl PoseEngine {
    /// Builds an engine on the wall clock. Fails if `config` does not validate.
    pub fn new(config: &PoseConfig) -> Result<Self> {
        Self::with_clock(config, TickClock::monotonic())
    }

    pub fn with_clock(config: &PoseConfig, clock: TickClock) -> Result<Self> {
        config.validate()?;

        let detectors = Character::ALL
            .iter()
            .map(|character| match character {
                Character::Cannon => CharacterDetector {
                    transform: TransformationMachine::cannon(&config.cannon),
                    action: ActionDetector::cannon(&config.cannon),
                },
                Character::Ice => CharacterDetector {
                    transform: TransformationMachine::ice(&config.ice),
                    action: ActionDetector::ice(&config.ice),
                },
            })
            .collect();

        Ok(Self {
            tolerances: PoseTolerances::from(config),
            registry: UserRegistry::new(),
            detectors,
            clock,
            locked: false,
        })
    }

    // ==================== Lifecycle ====================

    pub fn handle_event(&mut self, event: UserEvent) {
        match event {
            UserEvent::NewUser(user) => self.on_new_user(user),
            UserEvent::Lost(user) => self.on_user_lost(user),
            UserEvent::Calibrated { user, success } => {
                self.on_calibrated(user, success);
            }
        }
    }

    pub fn on_new_user(&mut self, user: UserId) {
        info!("new {}, waiting for calibration", user);
    }

    /// Starts tracking a calibrated user. Returns whether the user was added.
    pub fn on_calibrated(&mut self, user: UserId, success: bool) -> bool {
        if !success {
            warn!("calibration failed for {}", user);
            return false;
        }
        if self.locked {
            warn!("{} calibrated after the game started, ignoring", user);
            return false;
        }
        let added = self.registry.insert(user);
        if added {
            info!("{} calibrated", user);
        } else {
            debug!("{} calibrated again", user);
        }
        added
    }

    /// Forgets everything about `user`. Projectiles in flight stay alive.
    pub fn on_user_lost(&mut self, user: UserId) {
        let previous = self.registry.remove(user);
        for detector in &mut self.detectors {
            detector.transform.forget(user);
            detector.action.forget(user);
        }
        match previous {
            Some(state) => info!("lost {} ({:?})", user, state),
            None => debug!("lost untracked {}", user),
        }
    }

    /// Stops accepting calibrations and transformations; transformed users
    /// keep using their abilities.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // ==================== Detection ====================

    /// Runs every tracked user through the detectors. Time is measured once
    /// for the whole tick.
    pub fn tick<P>(&mut self, provider: &P) -> Vec<PoseEvent>
    where
        P: SkeletonProvider + ?Sized,
    {
        let delta = self.clock.take();
        let mut events = Vec::new();
        for user in provider.tracked_users() {
            events.extend(self.detect_pose(provider, user, delta));
        }
        events
    }

    /// Advances all detectors for one user by one tick of `delta` seconds.
    pub fn detect_pose<P>(&mut self, provider: &P, user: UserId, delta: f64) -> Vec<PoseEvent>
    where
        P: SkeletonProvider + ?Sized,
    {
        let mut events = Vec::new();
        let Some(state) = self.registry.get(user).copied() else {
            return events;
        };

        match state {
            UserState::Transformed(character, _) => {
                let detector = self
                    .detectors
                    .iter_mut()
                    .find(|detector| detector.action.character() == character);
                if let Some(detector) = detector {
                    detector.action.detect_pose(
                        provider,
                        user,
                        &mut self.registry,
                        &self.tolerances,
                        delta,
                        &mut events,
                    );
                }
            }
            UserState::Untracked | UserState::Transforming(..) if !self.locked => {
                for detector in &mut self.detectors {
                    detector.transform.detect_pose(
                        provider,
                        user,
                        &mut self.registry,
                        &self.tolerances,
                        delta,
                        &mut events,
                    );
                }
            }
            _ => {}
        }

        events
    }

    /// Moves every projectile one step and drops those out of range.
    pub fn advance_projectiles(&mut self) -> usize {
        self.detectors
            .iter_mut()
            .map(|detector| detector.action.projectiles_mut().advance())
            .sum()
    }

    // ==================== Queries ====================

    pub fn current_stage(&self, user: UserId, character: Character) -> Stage {
        self.registry.stage(user, character)
    }

    pub fn is_registered(&self, user: UserId, character: Character) -> bool {
        self.registry.is_registered(user, character)
    }

    pub fn ability(&self, user: UserId, character: Character) -> Option<AbilityState> {
        self.registry.ability(user, character)
    }

    pub fn user_state(&self, user: UserId) -> Option<UserState> {
        self.registry.get(user).copied()
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    pub fn roster(&self, character: Character) -> Vec<UserId> {
        self.registry.roster(character)
    }

    pub fn players(&self) -> Vec<UserId> {
        self.registry.players()
    }

    pub fn projectiles(&self, character: Character) -> Option<&ProjectileRoster> {
        self.detector(character)
            .map(|detector| detector.action.projectiles())
    }

    pub fn projectiles_mut(&mut self, character: Character) -> Option<&mut ProjectileRoster> {
        self.detector_mut(character)
            .map(|detector| detector.action.projectiles_mut())
    }

    pub fn tolerances(&self) -> &PoseTolerances {
        &self.tolerances
    }

    fn detector(&self, character: Character) -> Option<&CharacterDetector> {
        self.detectors
            .iter()
            .find(|detector| detector.transform.character() == character)
    }

    fn detector_mut(&mut self, character: Character) -> Option<&mut CharacterDetector> {
        self.detectors
            .iter_mut()
            .find(|detector| detector.transform.character() == character)
    }
}

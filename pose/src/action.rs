//! Weapon handling for transformed users: ability toggles and firing.

use common::Vector3;
use log::{debug, info};

use crate::config::{CannonConfig, IceConfig, ProjectileConfig};
use crate::event::PoseEvent;
use crate::poses::{
    PoseSpec, PoseTolerances, WEAPON_ARM, CANNON_ACTIVATE, CANNON_DEACTIVATE, CANNON_FIRE,
    ICE_FIRE, ICE_ROD_LOWER, ICE_ROD_RAISE,
};
use crate::projectile::{Projectile, ProjectileRoster};
use crate::registry::{AbilityState, AbilityStatus, Character, UserRegistry, UserState};
use crate::skeleton::{SkeletonProvider, UserId};
use crate::timer::PoseTimer;

/// What stops a held firing pose from shooting every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireGate {
    /// A shot is accepted once more than `ticks` firing ticks went by since
    /// the previous one.
    Cooldown { ticks: u32 },
    /// One shot per activation; the ability must be lowered and raised again.
    Charge,
}

#[derive(Debug, Clone)]
pub struct ActionDetector {
    character: Character,
    activate: PoseSpec,
    deactivate: PoseSpec,
    fire: PoseSpec,
    gate: FireGate,
    fire_timer: PoseTimer,
    volley: Vec<Vector3>,
    projectile: ProjectileConfig,
    projectiles: ProjectileRoster,
}

impl ActionDetector {
    pub fn cannon(config: &CannonConfig) -> Self {
        Self {
            character: Character::Cannon,
            activate: CANNON_ACTIVATE,
            deactivate: CANNON_DEACTIVATE,
            fire: CANNON_FIRE,
            gate: FireGate::Cooldown {
                ticks: config.shot_delay_ticks,
            },
            fire_timer: PoseTimer::new(config.ability_hold_secs),
            volley: vec![Vector3::ZERO],
            projectile: config.projectile,
            projectiles: ProjectileRoster::new(),
        }
    }

    pub fn ice(config: &IceConfig) -> Self {
        Self {
            character: Character::Ice,
            activate: ICE_ROD_RAISE,
            deactivate: ICE_ROD_LOWER,
            fire: ICE_FIRE,
            gate: FireGate::Charge,
            fire_timer: PoseTimer::new(config.ability_hold_secs),
            volley: config
                .volley_offsets
                .iter()
                .copied()
                .map(Vector3::from)
                .collect(),
            projectile: config.projectile,
            projectiles: ProjectileRoster::new(),
        }
    }

    pub fn character(&self) -> Character {
        self.character
    }

    pub fn gate(&self) -> FireGate {
        self.gate
    }

    pub fn projectiles(&self) -> &ProjectileRoster {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut ProjectileRoster {
        &mut self.projectiles
    }

    /// Runs toggles and firing for `user` if it is transformed into this
    /// detector's character.
    pub fn detect_pose<P>(
        &mut self,
        provider: &P,
        user: UserId,
        registry: &mut UserRegistry,
        tolerances: &PoseTolerances,
        delta: f64,
        events: &mut Vec<PoseEvent>,
    ) where
        P: SkeletonProvider + ?Sized,
    {
        let character = self.character;
        let ability = match registry.get_mut(user) {
            Some(UserState::Transformed(owner, ability)) if *owner == character => ability,
            _ => return,
        };

        // Only the transition away from the current status is tested, so at
        // most one toggle happens per tick.
        let toggled = match ability.status {
            AbilityStatus::Deactivated if self.activate.evaluate(provider, user, tolerances) => {
                Some(AbilityStatus::Activated)
            }
            AbilityStatus::Activated if self.deactivate.evaluate(provider, user, tolerances) => {
                Some(AbilityStatus::Deactivated)
            }
            _ => None,
        };
        if let Some(status) = toggled {
            ability.status = status;
            info!("{} {} ability {:?}", user, character, status);
            events.push(PoseEvent::AbilityChanged {
                user,
                character,
                status,
            });
        }

        if ability.status == AbilityStatus::Deactivated {
            ability.charged = true;
        }

        let firing = ability.status == AbilityStatus::Activated
            && self.fire.evaluate(provider, user, tolerances);
        if !self.fire_timer.tick(user, firing, delta).is_active() {
            return;
        }
        if !accept_shot(self.gate, ability) {
            return;
        }

        let count = self.spawn(provider, user);
        debug!("{} {} fired {} projectile(s)", user, character, count);
        events.push(PoseEvent::ProjectilesSpawned {
            user,
            character,
            count,
        });
    }

    /// Launches one projectile per volley offset from the weapon hand, along
    /// the forearm.
    fn spawn<P>(&mut self, provider: &P, user: UserId) -> usize
    where
        P: SkeletonProvider + ?Sized,
    {
        let elbow = provider.to_projective(provider.position(user, WEAPON_ARM.elbow()));
        let hand = provider.to_projective(provider.position(user, WEAPON_ARM.hand()));
        let forearm = hand - elbow;

        for offset in &self.volley {
            self.projectiles.push(Projectile::new(
                hand,
                forearm + *offset,
                user,
                self.character,
                &self.projectile,
            ));
        }
        self.volley.len()
    }

    /// Drops timer state for a user that left. Projectiles already in flight
    /// are kept.
    pub fn forget(&mut self, user: UserId) {
        self.fire_timer.forget(user);
    }
}

/// Applies the fire gate to one active firing tick. Returns whether the shot
/// goes out.
pub fn accept_shot(gate: FireGate, ability: &mut AbilityState) -> bool {
    match gate {
        FireGate::Cooldown { ticks } => {
            if ability.shot_cooldown > ticks {
                ability.shot_cooldown = 0;
                true
            } else {
                ability.shot_cooldown += 1;
                false
            }
        }
        FireGate::Charge => {
            if ability.charged {
                ability.charged = false;
                true
            } else {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::SkeletonFrame;
    use common::Joint;

    const USER: UserId = UserId(2);

    fn frame(joints: &[(Joint, [f32; 3])]) -> SkeletonFrame {
        let mut frame = SkeletonFrame::new();
        for (joint, position) in joints {
            frame.set_joint(USER, *joint, (*position).into(), 0.9);
        }
        frame
    }

    fn rod_raised() -> SkeletonFrame {
        frame(&[
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-200.0, 400.0, 1700.0]),
            (Joint::LeftHand, [-200.0, 400.0, 1400.0]),
        ])
    }

    fn rod_lowered() -> SkeletonFrame {
        frame(&[
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-200.0, 100.0, 2000.0]),
            (Joint::LeftHand, [-200.0, 200.0, 1700.0]),
        ])
    }

    fn transformed(character: Character) -> UserRegistry {
        let mut registry = UserRegistry::new();
        registry.insert(USER);
        *registry.get_mut(USER).unwrap() =
            UserState::Transformed(character, AbilityState::default());
        registry
    }

    #[test]
    fn cooldown_accepts_after_delay() {
        let gate = FireGate::Cooldown { ticks: 2 };
        let mut ability = AbilityState::default();
        let accepted: Vec<bool> = (0..8).map(|_| accept_shot(gate, &mut ability)).collect();
        assert_eq!(
            accepted,
            vec![false, false, false, true, false, false, false, true]
        );
    }

    #[test]
    fn charge_allows_one_shot() {
        let mut ability = AbilityState::default();
        assert!(accept_shot(FireGate::Charge, &mut ability));
        assert!(!accept_shot(FireGate::Charge, &mut ability));
        ability.charged = true;
        assert!(accept_shot(FireGate::Charge, &mut ability));
    }

    #[test]
    fn raising_the_rod_fires_one_volley_until_lowered() {
        let mut detector = ActionDetector::ice(&IceConfig::default());
        let mut registry = transformed(Character::Ice);
        let tol = PoseTolerances::default();
        let mut events = Vec::new();

        detector.detect_pose(&rod_raised(), USER, &mut registry, &tol, 0.0, &mut events);
        assert_eq!(detector.projectiles().len(), 3);
        assert_eq!(
            registry.ability(USER, Character::Ice).map(|a| a.status),
            Some(AbilityStatus::Activated)
        );

        for _ in 0..5 {
            detector.detect_pose(&rod_raised(), USER, &mut registry, &tol, 0.025, &mut events);
        }
        assert_eq!(detector.projectiles().len(), 3);

        detector.detect_pose(&rod_lowered(), USER, &mut registry, &tol, 0.025, &mut events);
        assert_eq!(
            registry.ability(USER, Character::Ice).map(|a| a.status),
            Some(AbilityStatus::Deactivated)
        );
        detector.detect_pose(&rod_raised(), USER, &mut registry, &tol, 0.025, &mut events);
        assert_eq!(detector.projectiles().len(), 6);
    }

    #[test]
    fn volley_fans_out_from_the_hand() {
        let mut detector = ActionDetector::ice(&IceConfig::default());
        let mut registry = transformed(Character::Ice);
        let mut events = Vec::new();

        detector.detect_pose(
            &rod_raised(),
            USER,
            &mut registry,
            &PoseTolerances::default(),
            0.0,
            &mut events,
        );

        let shots = detector.projectiles().as_slice();
        let hand = Vector3::new(-200.0, 400.0, 1400.0);
        assert!(shots.iter().all(|shot| shot.origin == hand && shot.owner == USER));
        assert_eq!(shots[0].direction, Vector3::new(0.0, 0.0, -300.0));
        assert_eq!(shots[1].direction, Vector3::new(8.0, 8.0, -300.0));
        assert_eq!(shots[2].direction, Vector3::new(-8.0, 8.0, -300.0));
        assert_eq!(
            events.last(),
            Some(&PoseEvent::ProjectilesSpawned {
                user: USER,
                character: Character::Ice,
                count: 3
            })
        );
    }

    #[test]
    fn cannon_needs_activation_before_firing() {
        let mut detector = ActionDetector::cannon(&CannonConfig::default());
        let mut registry = transformed(Character::Cannon);
        let tol = PoseTolerances::default();
        let mut events = Vec::new();

        // Straight weapon arm alone is the firing pose, but the cannon is off.
        let straight = frame(&[
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-200.0, 400.0, 1700.0]),
            (Joint::LeftHand, [-200.0, 400.0, 1400.0]),
        ]);
        for _ in 0..10 {
            detector.detect_pose(&straight, USER, &mut registry, &tol, 0.025, &mut events);
        }
        assert!(detector.projectiles().is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn other_characters_users_are_ignored() {
        let mut detector = ActionDetector::ice(&IceConfig::default());
        let mut registry = transformed(Character::Cannon);
        let mut events = Vec::new();

        detector.detect_pose(
            &rod_raised(),
            USER,
            &mut registry,
            &PoseTolerances::default(),
            0.0,
            &mut events,
        );
        assert!(detector.projectiles().is_empty());
        assert_eq!(
            registry.ability(USER, Character::Cannon),
            Some(AbilityState::default())
        );
    }
}

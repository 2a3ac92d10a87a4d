//! The single authoritative record of what every calibrated user is doing.
//!
//! Transformation machines and action detectors keep no stage or status of
//! their own; they read and write the user's [`UserState`] here.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::PoseError;
use crate::skeleton::UserId;

/// Playable characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Character {
    /// Arm cannon; transforms by holding one pose.
    Cannon,
    /// Ice rod; transforms through three poses in sequence.
    Ice,
}

impl Character {
    pub const ALL: [Character; 2] = [Character::Cannon, Character::Ice];

    pub fn name(&self) -> &'static str {
        match self {
            Character::Cannon => "cannon",
            Character::Ice => "ice",
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Character {
    type Err = PoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Character::ALL
            .iter()
            .copied()
            .find(|character| character.name() == s)
            .ok_or_else(|| PoseError::UnknownCharacter(s.to_string()))
    }
}

/// Progress through a transformation, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Untracked,
    Stage1,
    Stage2,
    Stage3,
    Transformed,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Untracked => "untracked",
            Stage::Stage1 => "stage 1",
            Stage::Stage2 => "stage 2",
            Stage::Stage3 => "stage 3",
            Stage::Transformed => "transformed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityStatus {
    Deactivated,
    Activated,
}

/// Weapon state of a transformed user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityState {
    pub status: AbilityStatus,
    /// Ready to fire. Restored each time the ability is seen deactivated.
    pub charged: bool,
    /// Firing ticks seen since the last accepted shot.
    pub shot_cooldown: u32,
}

impl Default for AbilityState {
    fn default() -> Self {
        Self {
            status: AbilityStatus::Deactivated,
            charged: true,
            shot_cooldown: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserState {
    /// Calibrated, not yet claimed by any character.
    Untracked,
    Transforming(Character, Stage),
    Transformed(Character, AbilityState),
}

impl UserState {
    pub fn character(&self) -> Option<Character> {
        match self {
            UserState::Untracked => None,
            UserState::Transforming(character, _) | UserState::Transformed(character, _) => {
                Some(*character)
            }
        }
    }

    /// Stage as seen by `character`; other characters' users read as untracked.
    pub fn stage_for(&self, character: Character) -> Stage {
        match self {
            UserState::Transforming(owner, stage) if *owner == character => *stage,
            UserState::Transformed(owner, _) if *owner == character => Stage::Transformed,
            _ => Stage::Untracked,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    users: BTreeMap<UserId, UserState>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a freshly calibrated user. Returns false if the user was already known.
    pub fn insert(&mut self, user: UserId) -> bool {
        if self.users.contains_key(&user) {
            return false;
        }
        self.users.insert(user, UserState::Untracked);
        true
    }

    pub fn remove(&mut self, user: UserId) -> Option<UserState> {
        self.users.remove(&user)
    }

    pub fn get(&self, user: UserId) -> Option<&UserState> {
        self.users.get(&user)
    }

    pub fn get_mut(&mut self, user: UserId) -> Option<&mut UserState> {
        self.users.get_mut(&user)
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.users.contains_key(&user)
    }

    pub fn stage(&self, user: UserId, character: Character) -> Stage {
        self.users
            .get(&user)
            .map_or(Stage::Untracked, |state| state.stage_for(character))
    }

    pub fn is_registered(&self, user: UserId, character: Character) -> bool {
        matches!(
            self.users.get(&user),
            Some(UserState::Transformed(owner, _)) if *owner == character
        )
    }

    pub fn ability(&self, user: UserId, character: Character) -> Option<AbilityState> {
        match self.users.get(&user) {
            Some(UserState::Transformed(owner, ability)) if *owner == character => Some(*ability),
            _ => None,
        }
    }

    /// Users transformed into `character`, in id order.
    pub fn roster(&self, character: Character) -> Vec<UserId> {
        self.users
            .iter()
            .filter(|(_, state)| matches!(state, UserState::Transformed(owner, _) if *owner == character))
            .map(|(user, _)| *user)
            .collect()
    }

    /// Users transformed into any character.
    pub fn players(&self) -> Vec<UserId> {
        self.users
            .iter()
            .filter(|(_, state)| matches!(state, UserState::Transformed(..)))
            .map(|(user, _)| *user)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_users_read_as_untracked() {
        let registry = UserRegistry::new();
        assert_eq!(registry.stage(UserId(9), Character::Ice), Stage::Untracked);
        assert!(!registry.is_registered(UserId(9), Character::Ice));
        assert_eq!(registry.ability(UserId(9), Character::Cannon), None);
    }

    #[test]
    fn stage_is_scoped_to_the_owning_character() {
        let mut registry = UserRegistry::new();
        registry.insert(UserId(1));
        *registry.get_mut(UserId(1)).unwrap() =
            UserState::Transforming(Character::Cannon, Stage::Stage2);

        assert_eq!(registry.stage(UserId(1), Character::Cannon), Stage::Stage2);
        assert_eq!(registry.stage(UserId(1), Character::Ice), Stage::Untracked);
    }

    #[test]
    fn roster_lists_transformed_users_only() {
        let mut registry = UserRegistry::new();
        for id in 1..=3 {
            registry.insert(UserId(id));
        }
        *registry.get_mut(UserId(1)).unwrap() =
            UserState::Transformed(Character::Ice, AbilityState::default());
        *registry.get_mut(UserId(3)).unwrap() =
            UserState::Transformed(Character::Cannon, AbilityState::default());

        assert_eq!(registry.roster(Character::Ice), vec![UserId(1)]);
        assert_eq!(registry.roster(Character::Cannon), vec![UserId(3)]);
        assert_eq!(registry.players(), vec![UserId(1), UserId(3)]);
        assert!(registry.is_registered(UserId(1), Character::Ice));
        assert!(!registry.is_registered(UserId(1), Character::Cannon));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut registry = UserRegistry::new();
        assert!(registry.insert(UserId(1)));
        *registry.get_mut(UserId(1)).unwrap() =
            UserState::Transforming(Character::Ice, Stage::Stage1);
        assert!(!registry.insert(UserId(1)));
        assert_eq!(registry.stage(UserId(1), Character::Ice), Stage::Stage1);
    }

    #[test]
    fn stages_are_ordered() {
        assert!(Stage::Untracked < Stage::Stage1);
        assert!(Stage::Stage3 < Stage::Transformed);
        assert_eq!("ice".parse::<Character>().unwrap(), Character::Ice);
        assert!("wizard".parse::<Character>().is_err());
    }
}

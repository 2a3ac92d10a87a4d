use std::fmt;

use crate::registry::{AbilityStatus, Character, Stage};
use crate::skeleton::UserId;

/// Something that changed for a user during one detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseEvent {
    StageChanged {
        user: UserId,
        character: Character,
        from: Stage,
        to: Stage,
    },
    /// A timed transformation was abandoned and the user is free again.
    Released { user: UserId, character: Character },
    Transformed { user: UserId, character: Character },
    AbilityChanged {
        user: UserId,
        character: Character,
        status: AbilityStatus,
    },
    ProjectilesSpawned {
        user: UserId,
        character: Character,
        count: usize,
    },
}

impl PoseEvent {
    pub fn user(&self) -> UserId {
        match self {
            PoseEvent::StageChanged { user, .. }
            | PoseEvent::Released { user, .. }
            | PoseEvent::Transformed { user, .. }
            | PoseEvent::AbilityChanged { user, .. }
            | PoseEvent::ProjectilesSpawned { user, .. } => *user,
        }
    }

    pub fn character(&self) -> Character {
        match self {
            PoseEvent::StageChanged { character, .. }
            | PoseEvent::Released { character, .. }
            | PoseEvent::Transformed { character, .. }
            | PoseEvent::AbilityChanged { character, .. }
            | PoseEvent::ProjectilesSpawned { character, .. } => *character,
        }
    }
}

impl fmt::Display for PoseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoseEvent::StageChanged {
                user,
                character,
                from,
                to,
            } => write!(f, "{} {}: {} -> {}", user, character, from.name(), to.name()),
            PoseEvent::Released { user, character } => {
                write!(f, "{} released from {}", user, character)
            }
            PoseEvent::Transformed { user, character } => {
                write!(f, "{} transformed into {}", user, character)
            }
            PoseEvent::AbilityChanged {
                user,
                character,
                status,
            } => write!(f, "{} {} ability {:?}", user, character, status),
            PoseEvent::ProjectilesSpawned {
                user,
                character,
                count,
            } => write!(f, "{} {} fired {} projectile(s)", user, character, count),
        }
    }
}

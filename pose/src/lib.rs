//! Pose recognition and character transformation.
//!
//! Skeleton data comes in through [`SkeletonProvider`]; [`PoseEngine`] turns
//! it into stage changes, ability toggles and projectiles every tick.

pub mod action;
pub mod classify;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod poses;
pub mod projectile;
pub mod registry;
pub mod skeleton;
pub mod timer;
pub mod transform;

pub use action::{ActionDetector, FireGate};
pub use clock::TickClock;
pub use config::{CannonConfig, IceConfig, PoseConfig, ProjectileConfig};
pub use engine::PoseEngine;
pub use error::{PoseError, Result};
pub use event::PoseEvent;
pub use poses::{PoseSpec, PoseTolerances};
pub use projectile::{Projectile, ProjectileRoster};
pub use registry::{AbilityState, AbilityStatus, Character, Stage, UserRegistry, UserState};
pub use skeleton::{JointReading, SkeletonFrame, SkeletonProvider, UserEvent, UserId};
pub use timer::{PoseResult, PoseTimer};
pub use transform::{TransformPlan, TransformationMachine};

/// Returns the pose crate version string.
pub fn pose_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

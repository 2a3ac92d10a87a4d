//! Boundary with the skeleton source.
//!
//! The detectors only ever read joints through [`SkeletonProvider`], once per
//! tick, and never write back. [`SkeletonFrame`] is an in-memory provider used
//! for replays and tests.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use common::{Joint, Vector3};

/// Identifier of a tracked skeleton, stable while the sensor keeps the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user#{}", self.0)
    }
}

/// Position and sensor confidence of one joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointReading {
    pub position: Vector3,
    pub confidence: f32,
}

impl JointReading {
    pub fn new(position: Vector3, confidence: f32) -> Self {
        Self {
            position,
            confidence,
        }
    }
}

/// User lifecycle notifications emitted by the skeleton source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    NewUser(UserId),
    Lost(UserId),
    Calibrated { user: UserId, success: bool },
}

/// Source of per-tick joint data.
pub trait SkeletonProvider {
    /// Confidence in `[0, 1]`; `0.0` for unknown users or joints.
    fn confidence(&self, user: UserId, joint: Joint) -> f32;

    /// Sensor-space position; the origin for unknown users or joints.
    fn position(&self, user: UserId, joint: Joint) -> Vector3;

    /// Users whose skeletons are being tracked this tick.
    fn tracked_users(&self) -> Vec<UserId>;

    /// Maps a sensor-space point into the space projectiles live in.
    fn to_projective(&self, point: Vector3) -> Vector3 {
        point
    }

    fn reading(&self, user: UserId, joint: Joint) -> JointReading {
        JointReading::new(self.position(user, joint), self.confidence(user, joint))
    }
}

/// A single captured tick of skeleton data.
#[derive(Debug, Clone, Default)]
pub struct SkeletonFrame {
    users: BTreeMap<UserId, HashMap<Joint, JointReading>>,
}

impl SkeletonFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_joint(&mut self, user: UserId, joint: Joint, position: Vector3, confidence: f32) {
        self.users
            .entry(user)
            .or_default()
            .insert(joint, JointReading::new(position, confidence));
    }

    pub fn with_joint(mut self, user: UserId, joint: Joint, position: Vector3, confidence: f32) -> Self {
        self.set_joint(user, joint, position, confidence);
        self
    }

    /// Registers a tracked user with no joints yet.
    pub fn add_user(&mut self, user: UserId) {
        self.users.entry(user).or_default();
    }

    pub fn remove_user(&mut self, user: UserId) {
        self.users.remove(&user);
    }

    pub fn joint(&self, user: UserId, joint: Joint) -> Option<&JointReading> {
        self.users.get(&user).and_then(|joints| joints.get(&joint))
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl SkeletonProvider for SkeletonFrame {
    fn confidence(&self, user: UserId, joint: Joint) -> f32 {
        self.joint(user, joint).map_or(0.0, |reading| reading.confidence)
    }

    fn position(&self, user: UserId, joint: Joint) -> Vector3 {
        self.joint(user, joint)
            .map_or(Vector3::ZERO, |reading| reading.position)
    }

    fn tracked_users(&self) -> Vec<UserId> {
        self.users.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_joints_read_as_zero_confidence() {
        let frame = SkeletonFrame::new().with_joint(
            UserId(1),
            Joint::Head,
            Vector3::new(0.0, 500.0, 2000.0),
            0.9,
        );

        assert_eq!(frame.confidence(UserId(1), Joint::Head), 0.9);
        assert_eq!(frame.confidence(UserId(1), Joint::LeftHand), 0.0);
        assert_eq!(frame.confidence(UserId(2), Joint::Head), 0.0);
        assert_eq!(frame.position(UserId(2), Joint::Head), Vector3::ZERO);
    }

    #[test]
    fn tracked_users_are_sorted() {
        let mut frame = SkeletonFrame::new();
        frame.add_user(UserId(3));
        frame.add_user(UserId(1));
        frame.add_user(UserId(2));
        frame.remove_user(UserId(2));

        assert_eq!(frame.tracked_users(), vec![UserId(1), UserId(3)]);
    }
}

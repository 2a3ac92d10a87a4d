//! Geometric predicates over joint positions.
//!
//! Every predicate answers "no" when the geometry is undefined (a zero-length
//! limb), so classification stays total no matter what the sensor reports.

use common::{angle_between, Joint, Side, Vector3};

use crate::skeleton::{SkeletonProvider, UserId};

/// Joint positions of one user for one tick, captured only if every requested
/// joint passed the confidence gate.
#[derive(Debug, Clone)]
pub struct JointFrame {
    positions: Vec<(Joint, Vector3)>,
}

impl JointFrame {
    /// Reads `joints` for `user`. Returns `None` as soon as one joint is below
    /// `min_confidence`.
    pub fn capture<P>(provider: &P, user: UserId, joints: &[Joint], min_confidence: f32) -> Option<Self>
    where
        P: SkeletonProvider + ?Sized,
    {
        let mut positions = Vec::with_capacity(joints.len());
        for &joint in joints {
            let reading = provider.reading(user, joint);
            if !(reading.confidence >= min_confidence) || !reading.position.is_finite() {
                return None;
            }
            positions.push((joint, reading.position));
        }
        Some(Self { positions })
    }

    pub fn position(&self, joint: Joint) -> Option<Vector3> {
        self.positions
            .iter()
            .find(|(captured, _)| *captured == joint)
            .map(|(_, position)| *position)
    }

    /// Vector from `from` to `to`.
    pub fn limb(&self, from: Joint, to: Joint) -> Option<Vector3> {
        Some(self.position(to)? - self.position(from)?)
    }

    pub fn arm(&self, side: Side) -> Option<ArmVectors> {
        Some(ArmVectors {
            shoulder: self.position(side.shoulder())?,
            elbow: self.position(side.elbow())?,
            hand: self.position(side.hand())?,
        })
    }
}

/// Shoulder, elbow and hand of one arm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmVectors {
    pub shoulder: Vector3,
    pub elbow: Vector3,
    pub hand: Vector3,
}

impl ArmVectors {
    /// Shoulder to elbow.
    pub fn upper(&self) -> Vector3 {
        self.elbow - self.shoulder
    }

    /// Elbow to hand.
    pub fn fore(&self) -> Vector3 {
        self.hand - self.elbow
    }

    /// Bend at the elbow: 0 for a fully straight arm.
    pub fn bend(&self) -> Option<f32> {
        angle_between(&self.upper(), &self.fore())
    }
}

/// Arm is straight when the elbow bends no more than `tolerance` degrees.
pub fn is_straight(arm: &ArmVectors, tolerance: f32) -> bool {
    arm.bend().is_some_and(|bend| bend <= tolerance)
}

/// Arm is bent when the elbow bends at least `min_bend` degrees.
pub fn is_bent(arm: &ArmVectors, min_bend: f32) -> bool {
    arm.bend().is_some_and(|bend| bend >= min_bend)
}

/// `limb` points along `axis` within `tolerance` degrees.
pub fn is_aligned(limb: &Vector3, axis: &Vector3, tolerance: f32) -> bool {
    angle_between(limb, axis).is_some_and(|angle| angle <= tolerance)
}

/// Two limbs cross when the angle between them falls inside `[low, high]`.
pub fn is_crossed(a: &Vector3, b: &Vector3, band: [f32; 2]) -> bool {
    let [low, high] = band;
    angle_between(a, b).is_some_and(|angle| angle >= low && angle <= high)
}

/// `point` sits within `margin` of `reference` on the vertical axis.
pub fn within_height(point: &Vector3, reference: &Vector3, margin: f32) -> bool {
    point.y >= reference.y - margin && point.y <= reference.y + margin
}

/// `point` is level with or higher than `reference`.
pub fn is_above(point: &Vector3, reference: &Vector3) -> bool {
    point.y >= reference.y
}

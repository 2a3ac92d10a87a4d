//! The pose table: every pose the game recognises, as joint lists plus a
//! geometric test.
//!
//! Joint sides are the sensor's, which mirror the player. The weapon arm is
//! the sensor's left arm, i.e. the player's right arm.

use std::f32::consts::FRAC_1_SQRT_2;

use common::{Joint, Side, Vector3, AXIS_NEG_X, AXIS_NEG_Z, AXIS_X, AXIS_Y};

use crate::classify::{
    is_above, is_aligned, is_bent, is_crossed, is_straight, within_height, JointFrame,
};
use crate::config::PoseConfig;
use crate::skeleton::{SkeletonProvider, UserId};

/// Arm that holds the cannon or the ice rod.
pub const WEAPON_ARM: Side = Side::Left;
/// The other arm.
pub const OFF_ARM: Side = Side::Right;

/// Up and towards +X, 45 degrees.
pub const DIAGONAL_UP_X: Vector3 = Vector3::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0);
/// Up and towards -X, 45 degrees.
pub const DIAGONAL_UP_NEG_X: Vector3 = Vector3::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0);

const BOTH_ARMS: &[Joint] = &[
    Joint::LeftShoulder,
    Joint::LeftElbow,
    Joint::LeftHand,
    Joint::RightShoulder,
    Joint::RightElbow,
    Joint::RightHand,
];

const BOTH_ARMS_AND_HEAD: &[Joint] = &[
    Joint::LeftShoulder,
    Joint::LeftElbow,
    Joint::LeftHand,
    Joint::RightShoulder,
    Joint::RightElbow,
    Joint::RightHand,
    Joint::Head,
];

const LEFT_ARM: &[Joint] = &[Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftHand];
const RIGHT_ARM: &[Joint] = &[Joint::RightShoulder, Joint::RightElbow, Joint::RightHand];

/// Thresholds the pose tests read, fixed when the engine is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseTolerances {
    pub min_confidence: f32,
    pub straight_range: f32,
    pub axis_tolerance: f32,
    pub fire_straight: f32,
    pub rod_bent: f32,
    pub crossed_band: [f32; 2],
    pub hand_height_margin: f32,
}

impl From<&PoseConfig> for PoseTolerances {
    fn from(config: &PoseConfig) -> Self {
        Self {
            min_confidence: config.min_confidence,
            straight_range: config.straight_range_deg,
            axis_tolerance: config.axis_tolerance_deg,
            fire_straight: config.fire_straight_deg,
            rod_bent: config.rod_bent_deg,
            crossed_band: config.crossed_band_deg,
            hand_height_margin: config.hand_height_margin,
        }
    }
}

impl Default for PoseTolerances {
    fn default() -> Self {
        Self::from(&PoseConfig::default())
    }
}

/// A named pose: the joints it needs and the test over them.
#[derive(Clone, Copy)]
pub struct PoseSpec {
    pub name: &'static str,
    pub joints: &'static [Joint],
    pub test: fn(&JointFrame, &PoseTolerances) -> bool,
}

impl PoseSpec {
    /// Runs the confidence gate and then the test. Any unusable joint means
    /// the pose is not detected.
    pub fn evaluate<P>(&self, provider: &P, user: UserId, tolerances: &PoseTolerances) -> bool
    where
        P: SkeletonProvider + ?Sized,
    {
        JointFrame::capture(provider, user, self.joints, tolerances.min_confidence)
            .is_some_and(|frame| (self.test)(&frame, tolerances))
    }
}

impl std::fmt::Debug for PoseSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoseSpec")
            .field("name", &self.name)
            .field("joints", &self.joints)
            .finish()
    }
}

// ==================== Cannon ====================

/// Weapon upper arm forward with the forearm raised, off arm stretched forward.
pub const CANNON_TRANSFORM: PoseSpec = PoseSpec {
    name: "cannon_transform",
    joints: BOTH_ARMS,
    test: cannon_transform,
};

/// Weapon arm stretched forward, off forearm crossed over it.
pub const CANNON_ACTIVATE: PoseSpec = PoseSpec {
    name: "cannon_activate",
    joints: BOTH_ARMS,
    test: cannon_activate,
};

/// Mirror of [`CANNON_ACTIVATE`]: off arm stretched, weapon forearm crossed.
pub const CANNON_DEACTIVATE: PoseSpec = PoseSpec {
    name: "cannon_deactivate",
    joints: BOTH_ARMS,
    test: cannon_deactivate,
};

/// Weapon arm straight.
pub const CANNON_FIRE: PoseSpec = PoseSpec {
    name: "cannon_fire",
    joints: LEFT_ARM,
    test: weapon_arm_fire_straight,
};

fn cannon_transform(frame: &JointFrame, tol: &PoseTolerances) -> bool {
    let (Some(weapon), Some(off)) = (frame.arm(WEAPON_ARM), frame.arm(OFF_ARM)) else {
        return false;
    };

    is_straight(&off, tol.straight_range)
        && is_aligned(&off.upper(), &AXIS_NEG_Z, tol.axis_tolerance)
        && is_aligned(&weapon.upper(), &AXIS_NEG_Z, tol.axis_tolerance)
        && is_aligned(&weapon.fore(), &AXIS_Y, tol.axis_tolerance)
}

fn cannon_activate(frame: &JointFrame, tol: &PoseTolerances) -> bool {
    let (Some(weapon), Some(off)) = (frame.arm(WEAPON_ARM), frame.arm(OFF_ARM)) else {
        return false;
    };

    is_straight(&weapon, tol.straight_range)
        && is_aligned(&weapon.upper(), &AXIS_NEG_Z, tol.axis_tolerance)
        && is_aligned(&off.upper(), &AXIS_NEG_Z, tol.axis_tolerance)
        && is_crossed(&off.fore(), &weapon.fore(), tol.crossed_band)
}

fn cannon_deactivate(frame: &JointFrame, tol: &PoseTolerances) -> bool {
    let (Some(weapon), Some(off)) = (frame.arm(WEAPON_ARM), frame.arm(OFF_ARM)) else {
        return false;
    };

    is_straight(&off, tol.straight_range)
        && is_aligned(&off.upper(), &AXIS_NEG_Z, tol.axis_tolerance)
        && is_aligned(&weapon.upper(), &AXIS_NEG_Z, tol.axis_tolerance)
        && is_crossed(&weapon.fore(), &off.fore(), tol.crossed_band)
}

fn weapon_arm_fire_straight(frame: &JointFrame, tol: &PoseTolerances) -> bool {
    frame
        .arm(WEAPON_ARM)
        .is_some_and(|arm| is_straight(&arm, tol.fire_straight))
}

// ==================== Ice ====================

/// Weapon arm stretched out sideways at shoulder height.
pub const ICE_STAGE_1: PoseSpec = PoseSpec {
    name: "ice_stage_1",
    joints: LEFT_ARM,
    test: ice_stage_1,
};

/// Off arm stretched out sideways at shoulder height.
pub const ICE_STAGE_2: PoseSpec = PoseSpec {
    name: "ice_stage_2",
    joints: RIGHT_ARM,
    test: ice_stage_2,
};

/// Upper arms raised diagonally, forearms crossed above the head.
pub const ICE_STAGE_3: PoseSpec = PoseSpec {
    name: "ice_stage_3",
    joints: BOTH_ARMS_AND_HEAD,
    test: ice_stage_3,
};

/// Weapon arm straight: the rod is raised.
pub const ICE_ROD_RAISE: PoseSpec = PoseSpec {
    name: "ice_rod_raise",
    joints: LEFT_ARM,
    test: weapon_arm_fire_straight,
};

/// Weapon arm bent: the rod is lowered.
pub const ICE_ROD_LOWER: PoseSpec = PoseSpec {
    name: "ice_rod_lower",
    joints: LEFT_ARM,
    test: ice_rod_lower,
};

/// Weapon arm straight while the rod is up.
pub const ICE_FIRE: PoseSpec = PoseSpec {
    name: "ice_fire",
    joints: LEFT_ARM,
    test: weapon_arm_fire_straight,
};

fn ice_stage_1(frame: &JointFrame, tol: &PoseTolerances) -> bool {
    frame.arm(WEAPON_ARM).is_some_and(|arm| {
        is_straight(&arm, tol.straight_range)
            && is_aligned(&arm.upper(), &AXIS_NEG_X, tol.axis_tolerance)
            && within_height(&arm.hand, &arm.shoulder, tol.hand_height_margin)
    })
}

fn ice_stage_2(frame: &JointFrame, tol: &PoseTolerances) -> bool {
    frame.arm(OFF_ARM).is_some_and(|arm| {
        is_straight(&arm, tol.straight_range)
            && is_aligned(&arm.upper(), &AXIS_X, tol.axis_tolerance)
            && within_height(&arm.hand, &arm.shoulder, tol.hand_height_margin)
    })
}

fn ice_stage_3(frame: &JointFrame, tol: &PoseTolerances) -> bool {
    let (Some(weapon), Some(off), Some(head)) = (
        frame.arm(WEAPON_ARM),
        frame.arm(OFF_ARM),
        frame.position(Joint::Head),
    ) else {
        return false;
    };

    is_aligned(&off.upper(), &DIAGONAL_UP_X, tol.axis_tolerance)
        && is_aligned(&weapon.fore(), &DIAGONAL_UP_X, tol.axis_tolerance)
        && is_aligned(&weapon.upper(), &DIAGONAL_UP_NEG_X, tol.axis_tolerance)
        && is_aligned(&off.fore(), &DIAGONAL_UP_NEG_X, tol.axis_tolerance)
        && is_above(&weapon.hand, &head)
        && is_above(&off.hand, &head)
}

fn ice_rod_lower(frame: &JointFrame, tol: &PoseTolerances) -> bool {
    frame
        .arm(WEAPON_ARM)
        .is_some_and(|arm| is_bent(&arm, tol.rod_bent))
}

/// Every pose in the table, for diagnostics.
pub fn all() -> [&'static PoseSpec; 10] {
    [
        &CANNON_TRANSFORM,
        &CANNON_ACTIVATE,
        &CANNON_DEACTIVATE,
        &CANNON_FIRE,
        &ICE_STAGE_1,
        &ICE_STAGE_2,
        &ICE_STAGE_3,
        &ICE_ROD_RAISE,
        &ICE_ROD_LOWER,
        &ICE_FIRE,
    ]
}

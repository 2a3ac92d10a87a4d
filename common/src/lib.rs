//! Skeleton definitions and vector math shared by the pose and game crates.
//!
//! The joint set mirrors the fifteen joints reported by the depth sensor's
//! full skeleton profile. Discriminant values match the sensor's joint ids so
//! recorded frames can be keyed either by id or by name.

pub mod vector;

pub use vector::{
    angle_between, Vector3, AXIS_NEG_X, AXIS_NEG_Y, AXIS_NEG_Z, AXIS_X, AXIS_Y, AXIS_Z,
    DEGENERATE_EPSILON,
};

/// Skeletal joints tracked per user.
///
/// Left and right are named from the sensor's point of view, which is the
/// mirror image of the player's own left and right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Joint {
    Head = 1,
    Neck = 2,
    Torso = 3,

    // ==================== Left Arm ====================
    LeftShoulder = 6,
    LeftElbow = 7,
    LeftHand = 9,

    // ==================== Right Arm ====================
    RightShoulder = 12,
    RightElbow = 13,
    RightHand = 15,

    // ==================== Left Leg ====================
    LeftHip = 17,
    LeftKnee = 18,
    LeftFoot = 20,

    // ==================== Right Leg ====================
    RightHip = 21,
    RightKnee = 22,
    RightFoot = 24,
}

impl Joint {
    pub const ALL: [Joint; 15] = [
        Joint::Head,
        Joint::Neck,
        Joint::Torso,
        Joint::LeftShoulder,
        Joint::LeftElbow,
        Joint::LeftHand,
        Joint::RightShoulder,
        Joint::RightElbow,
        Joint::RightHand,
        Joint::LeftHip,
        Joint::LeftKnee,
        Joint::LeftFoot,
        Joint::RightHip,
        Joint::RightKnee,
        Joint::RightFoot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Joint::Head => "head",
            Joint::Neck => "neck",
            Joint::Torso => "torso",
            Joint::LeftShoulder => "left_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::LeftHand => "left_hand",
            Joint::RightShoulder => "right_shoulder",
            Joint::RightElbow => "right_elbow",
            Joint::RightHand => "right_hand",
            Joint::LeftHip => "left_hip",
            Joint::LeftKnee => "left_knee",
            Joint::LeftFoot => "left_foot",
            Joint::RightHip => "right_hip",
            Joint::RightKnee => "right_knee",
            Joint::RightFoot => "right_foot",
        }
    }

    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|joint| joint.id() == id)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|joint| joint.name() == name)
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Joint::LeftShoulder
            | Joint::LeftElbow
            | Joint::LeftHand
            | Joint::LeftHip
            | Joint::LeftKnee
            | Joint::LeftFoot => Some(Side::Left),
            Joint::RightShoulder
            | Joint::RightElbow
            | Joint::RightHand
            | Joint::RightHip
            | Joint::RightKnee
            | Joint::RightFoot => Some(Side::Right),
            Joint::Head | Joint::Neck | Joint::Torso => None,
        }
    }
}

impl std::fmt::Display for Joint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Joint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Joint::from_name(s).ok_or_else(|| format!("unknown joint '{}'", s))
    }
}

/// Body side, as reported by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn shoulder(&self) -> Joint {
        match self {
            Side::Left => Joint::LeftShoulder,
            Side::Right => Joint::RightShoulder,
        }
    }

    pub fn elbow(&self) -> Joint {
        match self {
            Side::Left => Joint::LeftElbow,
            Side::Right => Joint::RightElbow,
        }
    }

    pub fn hand(&self) -> Joint {
        match self {
            Side::Left => Joint::LeftHand,
            Side::Right => Joint::RightHand,
        }
    }

    pub fn foot(&self) -> Joint {
        match self {
            Side::Left => Joint::LeftFoot,
            Side::Right => Joint::RightFoot,
        }
    }

    /// Shoulder, elbow and hand of this side, in that order.
    pub fn arm(&self) -> [Joint; 3] {
        [self.shoulder(), self.elbow(), self.hand()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_ids_round_trip() {
        for joint in Joint::ALL {
            assert_eq!(Joint::from_id(joint.id()), Some(joint));
            assert_eq!(Joint::from_name(joint.name()), Some(joint));
        }
        assert_eq!(Joint::from_id(4), None);
        assert_eq!(Joint::from_name("left_wrist"), None);
    }

    #[test]
    fn joint_parses_from_str() {
        let joint: Joint = "right_elbow".parse().unwrap();
        assert_eq!(joint, Joint::RightElbow);
        assert!("elbow".parse::<Joint>().is_err());
    }

    #[test]
    fn side_arm_joints() {
        assert_eq!(
            Side::Left.arm(),
            [Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftHand]
        );
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Joint::RightFoot.side(), Some(Side::Right));
        assert_eq!(Joint::Head.side(), None);
    }
}

#![allow(dead_code)]

use std::time::Duration;

use common::{Joint, Vector3};
use pose::{PoseConfig, PoseEngine, SkeletonFrame, TickClock, UserId};

pub const STEP: Duration = Duration::from_millis(500);

pub fn engine() -> PoseEngine {
    PoseEngine::with_clock(&PoseConfig::default(), TickClock::fixed(STEP)).expect("engine")
}

pub fn frame(user: UserId, joints: &[(Joint, [f32; 3])]) -> SkeletonFrame {
    let mut frame = SkeletonFrame::new();
    frame.add_user(user);
    for (joint, position) in joints {
        frame.set_joint(user, *joint, Vector3::from(*position), 0.9);
    }
    frame
}

pub fn cannon_transform(user: UserId) -> SkeletonFrame {
    frame(
        user,
        &[
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-200.0, 400.0, 1700.0]),
            (Joint::LeftHand, [-200.0, 700.0, 1700.0]),
            (Joint::RightShoulder, [200.0, 400.0, 2000.0]),
            (Joint::RightElbow, [200.0, 400.0, 1700.0]),
            (Joint::RightHand, [200.0, 400.0, 1400.0]),
        ],
    )
}

pub fn cannon_activate(user: UserId) -> SkeletonFrame {
    frame(
        user,
        &[
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-200.0, 400.0, 1700.0]),
            (Joint::LeftHand, [-200.0, 400.0, 1400.0]),
            (Joint::RightShoulder, [200.0, 400.0, 2000.0]),
            (Joint::RightElbow, [200.0, 400.0, 1700.0]),
            (Joint::RightHand, [-100.0, 400.0, 1700.0]),
        ],
    )
}

pub fn cannon_deactivate(user: UserId) -> SkeletonFrame {
    frame(
        user,
        &[
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-200.0, 400.0, 1700.0]),
            (Joint::LeftHand, [100.0, 400.0, 1700.0]),
            (Joint::RightShoulder, [200.0, 400.0, 2000.0]),
            (Joint::RightElbow, [200.0, 400.0, 1700.0]),
            (Joint::RightHand, [200.0, 400.0, 1400.0]),
        ],
    )
}

/// Weapon arm straight forward, other arm hanging down.
pub fn cannon_fire(user: UserId) -> SkeletonFrame {
    frame(
        user,
        &[
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-200.0, 400.0, 1700.0]),
            (Joint::LeftHand, [-200.0, 400.0, 1400.0]),
            (Joint::RightShoulder, [200.0, 400.0, 2000.0]),
            (Joint::RightElbow, [200.0, 100.0, 2000.0]),
            (Joint::RightHand, [200.0, -200.0, 2000.0]),
        ],
    )
}

pub fn ice_stage_1(user: UserId) -> SkeletonFrame {
    frame(
        user,
        &[
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-500.0, 400.0, 2000.0]),
            (Joint::LeftHand, [-800.0, 450.0, 2000.0]),
        ],
    )
}

pub fn ice_stage_2(user: UserId) -> SkeletonFrame {
    frame(
        user,
        &[
            (Joint::RightShoulder, [200.0, 400.0, 2000.0]),
            (Joint::RightElbow, [500.0, 400.0, 2000.0]),
            (Joint::RightHand, [800.0, 350.0, 2000.0]),
        ],
    )
}

pub fn ice_stage_3(user: UserId) -> SkeletonFrame {
    frame(
        user,
        &[
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-400.0, 600.0, 2000.0]),
            (Joint::LeftHand, [-200.0, 800.0, 2000.0]),
            (Joint::RightShoulder, [200.0, 400.0, 2000.0]),
            (Joint::RightElbow, [400.0, 600.0, 2000.0]),
            (Joint::RightHand, [200.0, 800.0, 2000.0]),
            (Joint::Head, [0.0, 650.0, 2000.0]),
        ],
    )
}

pub fn rod_raised(user: UserId) -> SkeletonFrame {
    frame(
        user,
        &[
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-200.0, 400.0, 1700.0]),
            (Joint::LeftHand, [-200.0, 400.0, 1400.0]),
        ],
    )
}

pub fn rod_lowered(user: UserId) -> SkeletonFrame {
    frame(
        user,
        &[
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-200.0, 100.0, 2000.0]),
            (Joint::LeftHand, [-200.0, 200.0, 1700.0]),
        ],
    )
}

/// A user standing still with arms down.
pub fn idle(user: UserId) -> SkeletonFrame {
    frame(
        user,
        &[
            (Joint::Head, [0.0, 650.0, 2000.0]),
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-220.0, 100.0, 2000.0]),
            (Joint::LeftHand, [-230.0, -200.0, 2000.0]),
            (Joint::RightShoulder, [200.0, 400.0, 2000.0]),
            (Joint::RightElbow, [220.0, 100.0, 2000.0]),
            (Joint::RightHand, [230.0, -200.0, 2000.0]),
        ],
    )
}

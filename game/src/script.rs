//! Replays authored skeleton data from a TOML script.
//!
//! A script names reusable poses (joint name to position), lists lifecycle
//! events by tick, and strings keyframes together. Each keyframe assigns a
//! pose to every visible user and is held for a number of ticks.
//!
//! ```toml
//! [poses.idle]
//! joints = { head = [0.0, 650.0, 2000.0], right_foot = [200.0, -800.0, 2000.0] }
//!
//! [[events]]
//! tick = 0
//! user = 1
//! kind = "calibrated"
//!
//! [[keyframes]]
//! hold = 40
//! users = [{ user = 1, pose = "idle" }]
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use common::{Joint, Vector3};
use pose::{SkeletonFrame, SkeletonProvider, UserEvent, UserId};

use crate::error::{GameError, Result};

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    poses: BTreeMap<String, PoseDef>,
    #[serde(default)]
    events: Vec<EventDef>,
    #[serde(default)]
    keyframes: Vec<KeyframeDef>,
}

#[derive(Debug, Deserialize)]
struct PoseDef {
    #[serde(default = "default_confidence")]
    confidence: f32,
    joints: BTreeMap<String, [f32; 3]>,
}

#[derive(Debug, Deserialize)]
struct EventDef {
    tick: u64,
    user: u32,
    kind: EventKind,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum EventKind {
    NewUser,
    Calibrated,
    CalibrationFailed,
    Lost,
}

#[derive(Debug, Deserialize)]
struct KeyframeDef {
    hold: u64,
    #[serde(default)]
    users: Vec<UserPoseDef>,
}

#[derive(Debug, Deserialize)]
struct UserPoseDef {
    user: u32,
    pose: String,
    /// Shifts every joint, so several users can share one pose.
    #[serde(default)]
    offset: [f32; 3],
    confidence: Option<f32>,
}

fn default_confidence() -> f32 {
    1.0
}

#[derive(Debug, Clone)]
struct Keyframe {
    end_tick: u64,
    frame: SkeletonFrame,
}

/// A skeleton provider that plays back a script one tick at a time.
#[derive(Debug, Clone)]
pub struct ScriptedSkeleton {
    name: String,
    keyframes: Vec<Keyframe>,
    events: Vec<(u64, UserEvent)>,
    tick: u64,
    current: usize,
}

impl ScriptedSkeleton {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ScriptFile = toml::from_str(content)?;
        Self::build(file)
    }

    fn build(file: ScriptFile) -> Result<Self> {
        let mut poses = BTreeMap::new();
        for (name, def) in &file.poses {
            check_confidence(def.confidence, name)?;
            let mut joints = Vec::with_capacity(def.joints.len());
            for (joint_name, position) in &def.joints {
                let joint = Joint::from_name(joint_name).ok_or_else(|| {
                    GameError::Script(format!(
                        "pose '{}' names unknown joint '{}'",
                        name, joint_name
                    ))
                })?;
                joints.push((joint, Vector3::from(*position)));
            }
            poses.insert(name.as_str(), (def.confidence, joints));
        }

        if file.keyframes.is_empty() {
            return Err(GameError::Script("script has no keyframes".to_string()));
        }

        let mut keyframes = Vec::with_capacity(file.keyframes.len());
        let mut end_tick = 0;
        for (index, def) in file.keyframes.iter().enumerate() {
            if def.hold == 0 {
                return Err(GameError::Script(format!(
                    "keyframe {} must be held for at least one tick",
                    index
                )));
            }
            let mut frame = SkeletonFrame::new();
            for entry in &def.users {
                let (pose_confidence, joints) = poses.get(entry.pose.as_str()).ok_or_else(|| {
                    GameError::Script(format!(
                        "keyframe {} uses unknown pose '{}'",
                        index, entry.pose
                    ))
                })?;
                let confidence = entry.confidence.unwrap_or(*pose_confidence);
                check_confidence(confidence, &entry.pose)?;

                let user = UserId(entry.user);
                let offset = Vector3::from(entry.offset);
                frame.add_user(user);
                for (joint, position) in joints {
                    frame.set_joint(user, *joint, *position + offset, confidence);
                }
            }
            end_tick += def.hold;
            keyframes.push(Keyframe { end_tick, frame });
        }

        let mut events = Vec::with_capacity(file.events.len());
        for def in &file.events {
            if def.tick >= end_tick {
                return Err(GameError::Script(format!(
                    "event at tick {} is past the end of the script ({} ticks)",
                    def.tick, end_tick
                )));
            }
            let user = UserId(def.user);
            let event = match def.kind {
                EventKind::NewUser => UserEvent::NewUser(user),
                EventKind::Calibrated => UserEvent::Calibrated {
                    user,
                    success: true,
                },
                EventKind::CalibrationFailed => UserEvent::Calibrated {
                    user,
                    success: false,
                },
                EventKind::Lost => UserEvent::Lost(user),
            };
            events.push((def.tick, event));
        }
        events.sort_by_key(|(tick, _)| *tick);

        Ok(Self {
            name: file.name,
            keyframes,
            events,
            tick: 0,
            current: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length of the script in ticks.
    pub fn total_ticks(&self) -> u64 {
        self.keyframes.last().map_or(0, |keyframe| keyframe.end_tick)
    }

    /// Ticks played so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn is_finished(&self) -> bool {
        self.tick >= self.total_ticks()
    }

    /// Moves to the next tick and returns its lifecycle events, or `None` once
    /// the script is over.
    pub fn step(&mut self) -> Option<Vec<UserEvent>> {
        if self.is_finished() {
            return None;
        }
        let tick = self.tick;
        while self.keyframes[self.current].end_tick <= tick {
            self.current += 1;
        }
        let events = self
            .events
            .iter()
            .filter(|(at, _)| *at == tick)
            .map(|(_, event)| *event)
            .collect();
        self.tick += 1;
        Some(events)
    }

    /// Skeleton data of the tick last stepped into.
    pub fn frame(&self) -> &SkeletonFrame {
        &self.keyframes[self.current].frame
    }

    /// Skeleton data shown at `tick`, if the script is that long.
    pub fn frame_at(&self, tick: u64) -> Option<&SkeletonFrame> {
        self.keyframes
            .iter()
            .find(|keyframe| tick < keyframe.end_tick)
            .map(|keyframe| &keyframe.frame)
    }

    /// First tick of every keyframe.
    pub fn keyframe_starts(&self) -> Vec<u64> {
        let mut start = 0;
        self.keyframes
            .iter()
            .map(|keyframe| {
                let tick = start;
                start = keyframe.end_tick;
                tick
            })
            .collect()
    }

    /// Lifecycle events scheduled up to and including `tick`.
    pub fn events_through(&self, tick: u64) -> impl Iterator<Item = UserEvent> + '_ {
        self.events
            .iter()
            .filter(move |(at, _)| *at <= tick)
            .map(|(_, event)| *event)
    }
}

fn check_confidence(confidence: f32, pose: &str) -> Result<()> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(())
    } else {
        Err(GameError::Script(format!(
            "confidence {} for pose '{}' is outside [0, 1]",
            confidence, pose
        )))
    }
}

impl SkeletonProvider for ScriptedSkeleton {
    fn confidence(&self, user: UserId, joint: Joint) -> f32 {
        self.frame().confidence(user, joint)
    }

    fn position(&self, user: UserId, joint: Joint) -> Vector3 {
        self.frame().position(user, joint)
    }

    fn tracked_users(&self) -> Vec<UserId> {
        self.frame().tracked_users()
    }
}

//! Transformation machines.
//!
//! One generic machine drives both characters; what differs is the plan it
//! follows. A timed-hold plan maps the progress of a single held pose onto
//! stages, a sequential plan walks through distinct poses one stage at a time.
//! Stage state lives in the [`UserRegistry`], the machine only owns timers.

use log::{debug, info};

use crate::config::{CannonConfig, IceConfig};
use crate::event::PoseEvent;
use crate::poses::{
    PoseSpec, PoseTolerances, CANNON_TRANSFORM, ICE_STAGE_1, ICE_STAGE_2, ICE_STAGE_3,
};
use crate::registry::{AbilityState, Character, Stage, UserRegistry, UserState};
use crate::skeleton::{SkeletonProvider, UserId};
use crate::timer::{PoseResult, PoseTimer};

#[derive(Debug, Clone)]
pub enum TransformPlan {
    /// Hold `pose`; the timer's progress picks the stage, `bands_pct` are the
    /// percentages where stage 2 and stage 3 begin.
    TimedHold { pose: PoseSpec, bands_pct: [u32; 2] },
    /// Perform each pose in order, one stage per pose.
    Sequential { stages: [PoseSpec; 3] },
}

#[derive(Debug, Clone)]
pub struct TransformationMachine {
    character: Character,
    plan: TransformPlan,
    /// Hold timer for a timed plan, finishing timer for a sequential one.
    timer: PoseTimer,
}

impl TransformationMachine {
    pub fn new(character: Character, plan: TransformPlan, required_secs: f64) -> Self {
        Self {
            character,
            plan,
            timer: PoseTimer::new(required_secs),
        }
    }

    pub fn cannon(config: &CannonConfig) -> Self {
        Self::new(
            Character::Cannon,
            TransformPlan::TimedHold {
                pose: CANNON_TRANSFORM,
                bands_pct: config.stage_bands_pct,
            },
            config.hold_secs,
        )
    }

    pub fn ice(config: &IceConfig) -> Self {
        Self::new(
            Character::Ice,
            TransformPlan::Sequential {
                stages: [ICE_STAGE_1, ICE_STAGE_2, ICE_STAGE_3],
            },
            config.finish_hold_secs,
        )
    }

    pub fn character(&self) -> Character {
        self.character
    }

    pub fn plan(&self) -> &TransformPlan {
        &self.plan
    }

    /// Advances `user` one tick. Users that are unknown, transformed, or
    /// transforming into another character are left alone.
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
        let stage = match registry.get(user) {
            Some(UserState::Untracked) => Stage::Untracked,
            Some(UserState::Transforming(owner, stage)) if *owner == self.character => *stage,
            _ => return,
        };

        let next = match &self.plan {
            TransformPlan::TimedHold { pose, bands_pct } => {
                let detected = pose.evaluate(provider, user, tolerances);
                match self.timer.tick(user, detected, delta) {
                    PoseResult::NotPosing => Stage::Untracked,
                    PoseResult::Accumulating { elapsed } => {
                        stage_for_progress(elapsed, self.timer.required(), *bands_pct)
                    }
                    PoseResult::Confirmed | PoseResult::Held => Stage::Transformed,
                }
            }
            TransformPlan::Sequential { stages } => match stage {
                Stage::Untracked if stages[0].evaluate(provider, user, tolerances) => Stage::Stage1,
                Stage::Stage1 if stages[1].evaluate(provider, user, tolerances) => Stage::Stage2,
                Stage::Stage2 if stages[2].evaluate(provider, user, tolerances) => Stage::Stage3,
                Stage::Stage3 if self.timer.tick(user, true, delta).is_active() => {
                    Stage::Transformed
                }
                other => other,
            },
        };

        self.apply(user, stage, next, registry, events);
    }

    fn apply(
        &mut self,
        user: UserId,
        from: Stage,
        to: Stage,
        registry: &mut UserRegistry,
        events: &mut Vec<PoseEvent>,
    ) {
        if from == to {
            return;
        }
        let Some(state) = registry.get_mut(user) else {
            return;
        };
        let character = self.character;

        match to {
            Stage::Transformed => {
                *state = UserState::Transformed(character, AbilityState::default());
                self.timer.forget(user);
                info!("{} transformed into {}", user, character);
                events.push(PoseEvent::Transformed { user, character });
            }
            Stage::Untracked => {
                *state = UserState::Untracked;
                self.timer.forget(user);
                debug!("{} dropped the {} pose at {}", user, character, from.name());
                events.push(PoseEvent::Released { user, character });
            }
            stage => {
                *state = UserState::Transforming(character, stage);
                debug!("{} {}: {} -> {}", user, character, from.name(), stage.name());
                events.push(PoseEvent::StageChanged {
                    user,
                    character,
                    from,
                    to: stage,
                });
            }
        }
    }

    /// Drops timer state for a user that left.
    pub fn forget(&mut self, user: UserId) {
        self.timer.forget(user);
    }
}

/// Stage reached after holding for `elapsed` out of `required` seconds.
pub fn stage_for_progress(elapsed: f64, required: f64, bands_pct: [u32; 2]) -> Stage {
    if required <= 0.0 {
        return Stage::Stage3;
    }
    let percent = elapsed / required * 100.0;
    let [stage_two, stage_three] = bands_pct;
    if percent < f64::from(stage_two) {
        Stage::Stage1
    } else if percent < f64::from(stage_three) {
        Stage::Stage2
    } else {
        Stage::Stage3
    }
}

//! Per-user hold timers.
//!
//! A pose counts only once it has been held continuously for the required
//! duration. Any tick where the pose is not detected throws away the
//! accumulated time.

use std::collections::HashMap;

use crate::skeleton::UserId;

/// Outcome of feeding one tick into a [`PoseTimer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseResult {
    /// The pose is not held this tick; accumulated time was reset.
    NotPosing,
    /// The pose is held but not yet for long enough.
    Accumulating { elapsed: f64 },
    /// The hold just reached the required duration. Reported once per hold.
    Confirmed,
    /// The hold was confirmed on an earlier tick and is still going.
    Held,
}

impl PoseResult {
    /// True while a confirmed hold is in progress, including the confirming tick.
    pub fn is_active(&self) -> bool {
        matches!(self, PoseResult::Confirmed | PoseResult::Held)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Hold {
    elapsed: f64,
    confirmed: bool,
}

#[derive(Debug, Clone)]
pub struct PoseTimer {
    required: f64,
    holds: HashMap<UserId, Hold>,
}

impl PoseTimer {
    /// `required` is in seconds; zero confirms on the first detected tick.
    pub fn new(required: f64) -> Self {
        Self {
            required: required.max(0.0),
            holds: HashMap::new(),
        }
    }

    pub fn required(&self) -> f64 {
        self.required
    }

    pub fn tick(&mut self, user: UserId, detected: bool, delta: f64) -> PoseResult {
        if !detected {
            self.holds.remove(&user);
            return PoseResult::NotPosing;
        }

        let hold = self.holds.entry(user).or_default();
        hold.elapsed += delta.max(0.0);

        if hold.confirmed {
            PoseResult::Held
        } else if hold.elapsed >= self.required {
            hold.confirmed = true;
            PoseResult::Confirmed
        } else {
            PoseResult::Accumulating {
                elapsed: hold.elapsed,
            }
        }
    }

    /// Seconds the current hold has lasted; zero when the user is not posing.
    pub fn elapsed(&self, user: UserId) -> f64 {
        self.holds.get(&user).map_or(0.0, |hold| hold.elapsed)
    }

    /// Drops all state for a user that left the scene.
    pub fn forget(&mut self, user: UserId) {
        self.holds.remove(&user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: UserId = UserId(1);

    #[test]
    fn confirms_once_when_threshold_is_crossed() {
        let mut timer = PoseTimer::new(1.0);

        assert_eq!(
            timer.tick(USER, true, 0.0),
            PoseResult::Accumulating { elapsed: 0.0 }
        );
        assert_eq!(
            timer.tick(USER, true, 0.4),
            PoseResult::Accumulating { elapsed: 0.4 }
        );
        assert!(matches!(
            timer.tick(USER, true, 0.4),
            PoseResult::Accumulating { .. }
        ));
        assert_eq!(timer.tick(USER, true, 0.4), PoseResult::Confirmed);
        assert_eq!(timer.tick(USER, true, 0.4), PoseResult::Held);
        assert_eq!(timer.tick(USER, true, 0.4), PoseResult::Held);
    }

    #[test]
    fn negative_reading_resets_accumulation() {
        let mut timer = PoseTimer::new(1.0);

        timer.tick(USER, true, 0.9);
        assert_eq!(timer.tick(USER, false, 0.1), PoseResult::NotPosing);
        assert_eq!(timer.elapsed(USER), 0.0);

        assert!(matches!(
            timer.tick(USER, true, 0.5),
            PoseResult::Accumulating { .. }
        ));
        assert_eq!(timer.tick(USER, true, 0.5), PoseResult::Confirmed);
    }

    #[test]
    fn zero_duration_confirms_immediately_and_again_after_release() {
        let mut timer = PoseTimer::new(0.0);

        assert_eq!(timer.tick(USER, true, 0.0), PoseResult::Confirmed);
        assert_eq!(timer.tick(USER, true, 0.03), PoseResult::Held);
        assert_eq!(timer.tick(USER, false, 0.03), PoseResult::NotPosing);
        assert_eq!(timer.tick(USER, true, 0.03), PoseResult::Confirmed);
    }

    #[test]
    fn users_accumulate_independently() {
        let mut timer = PoseTimer::new(1.0);
        let other = UserId(2);

        timer.tick(USER, true, 0.6);
        timer.tick(other, true, 0.2);
        timer.tick(other, false, 0.2);

        assert_eq!(timer.elapsed(USER), 0.6);
        assert_eq!(timer.elapsed(other), 0.0);

        timer.forget(USER);
        assert_eq!(timer.elapsed(USER), 0.0);
    }

    #[test]
    fn active_covers_confirmed_and_held() {
        assert!(PoseResult::Confirmed.is_active());
        assert!(PoseResult::Held.is_active());
        assert!(!PoseResult::NotPosing.is_active());
        assert!(!PoseResult::Accumulating { elapsed: 1.0 }.is_active());
    }
}

use std::time::{Duration, Instant};

/// Measures the time elapsed between consecutive ticks.
///
/// The first reading after construction is always zero, so an engine that
/// starts late never sees a spurious large delta.
#[derive(Debug, Clone)]
pub struct TickClock {
    source: ClockSource,
}

#[derive(Debug, Clone)]
enum ClockSource {
    Monotonic { last: Option<Instant> },
    Fixed { step: Duration, started: bool },
}

impl TickClock {
    /// Wall-clock deltas from [`Instant`].
    pub fn monotonic() -> Self {
        Self {
            source: ClockSource::Monotonic { last: None },
        }
    }

    /// Every tick after the first advances by `step`, for replays and tests.
    pub fn fixed(step: Duration) -> Self {
        Self {
            source: ClockSource::Fixed {
                step,
                started: false,
            },
        }
    }

    /// Seconds since the previous call.
    pub fn take(&mut self) -> f64 {
        match &mut self.source {
            ClockSource::Monotonic { last } => {
                let now = Instant::now();
                let delta = last.map_or(Duration::ZERO, |previous| now - previous);
                *last = Some(now);
                delta.as_secs_f64()
            }
            ClockSource::Fixed { step, started } => {
                if *started {
                    step.as_secs_f64()
                } else {
                    *started = true;
                    0.0
                }
            }
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::monotonic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_reading_is_zero() {
        let mut clock = TickClock::monotonic();
        assert_eq!(clock.take(), 0.0);
        assert!(clock.take() >= 0.0);

        let mut fixed = TickClock::fixed(Duration::from_millis(25));
        assert_eq!(fixed.take(), 0.0);
    }

    #[test]
    fn fixed_clock_repeats_step() {
        let mut clock = TickClock::fixed(Duration::from_millis(500));
        clock.take();
        assert_eq!(clock.take(), 0.5);
        assert_eq!(clock.take(), 0.5);
    }
}

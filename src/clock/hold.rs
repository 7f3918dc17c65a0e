//! Press-and-hold adjustment sessions.
//!
//! A short press applies one step on release. Holding past the
//! threshold switches to auto-repeat, accelerating the step size the
//! longer the button stays down.

use std::time::{Duration, Instant};

use super::time::Unit;

/// Hold duration before auto-repeat engages.
pub const HOLD_THRESHOLD: Duration = Duration::from_millis(500);

/// Interval between repeated steps while held.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(100);

/// Hold duration at which the step multiplier becomes x2.
const ACCEL_X2_AFTER: Duration = Duration::from_secs(2);

/// Hold duration at which the step multiplier becomes x5.
const ACCEL_X5_AFTER: Duration = Duration::from_secs(4);

/// One press-and-hold interaction on a single unit.
#[derive(Debug, Clone)]
pub struct HoldSession {
    unit: Unit,
    base_step: i64,
    pressed_at: Instant,
    repeating: bool,
}

impl HoldSession {
    /// Begin a session at the moment the button went down.
    pub const fn new(unit: Unit, base_step: i64, pressed_at: Instant) -> Self {
        Self {
            unit,
            base_step,
            pressed_at,
            repeating: false,
        }
    }

    /// The unit this session adjusts.
    #[inline]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Mark the threshold as crossed; later steps come from repeats.
    pub fn begin_repeat(&mut self) {
        self.repeating = true;
    }

    /// Whether auto-repeat has engaged.
    #[inline]
    pub const fn is_repeating(&self) -> bool {
        self.repeating
    }

    /// Step size for a repeat firing at `now`: the base step scaled by
    /// the acceleration tier for the elapsed hold duration.
    pub fn step(&self, now: Instant) -> i64 {
        let held = now.saturating_duration_since(self.pressed_at);
        let multiplier = if held >= ACCEL_X5_AFTER {
            5
        } else if held >= ACCEL_X2_AFTER {
            2
        } else {
            1
        };
        self.base_step * multiplier
    }

    /// Step to apply when the button is released at `now`, if any.
    ///
    /// A release before the threshold yields one base step. Once
    /// repeating, the repeats already applied everything and release
    /// applies nothing.
    pub fn release_step(&self, now: Instant) -> Option<i64> {
        if self.repeating || now.saturating_duration_since(self.pressed_at) >= HOLD_THRESHOLD {
            None
        } else {
            Some(self.base_step)
        }
    }
}

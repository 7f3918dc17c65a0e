//! `ClockEngine`: the mode state machine driving tick direction,
//! resets, adjustments, and the blink-on-zero sequence.

use super::time::{TimeValue, Unit};

/// Number of blank/restore cycles after a countdown reaches zero.
pub const BLINK_CYCLES: u8 = 5;

/// What the clock is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Stopped; the display holds the current time.
    Idle,
    /// Counting up once a second.
    StopwatchRunning,
    /// Counting down once a second.
    CountdownRunning,
    /// A countdown hit zero; the display is flashing.
    Blinking,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The time advanced by one second.
    Advanced,
    /// A countdown just hit zero; the blink sequence should start.
    ReachedZero,
    /// The engine was not running; nothing changed.
    Ignored,
}

/// Mode state machine over a [`TimeValue`].
///
/// The engine owns no timers. A host drives it by calling [`tick`]
/// once a second while running and [`blink_step`] at each blink cycle
/// boundary, typically off a scheduler.
///
/// [`tick`]: ClockEngine::tick
/// [`blink_step`]: ClockEngine::blink_step
#[derive(Debug, Clone)]
pub struct ClockEngine {
    time: TimeValue,
    mode: Mode,
    compact: bool,
    blink_left: u8,
}

impl ClockEngine {
    /// Create an idle engine at zero time in normal mode.
    pub const fn new() -> Self {
        Self {
            time: TimeValue::ZERO,
            mode: Mode::Idle,
            compact: false,
            blink_left: 0,
        }
    }

    /// Current time reading.
    #[inline]
    pub const fn time(&self) -> TimeValue {
        self.time
    }

    /// Current mode.
    #[inline]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether compact display mode is active.
    #[inline]
    pub const fn compact(&self) -> bool {
        self.compact
    }

    /// Start or stop the stopwatch. Returns `true` if now running.
    ///
    /// Starting from `Blinking` cancels the blink sequence first.
    pub fn toggle_stopwatch(&mut self) -> bool {
        match self.mode {
            Mode::StopwatchRunning => {
                self.mode = Mode::Idle;
                false
            }
            _ => {
                self.blink_left = 0;
                self.mode = Mode::StopwatchRunning;
                true
            }
        }
    }

    /// Start or stop the countdown. Returns `true` if now running.
    ///
    /// Toggling while `Blinking` stops the blink and settles idle
    /// rather than starting another countdown from zero.
    pub fn toggle_countdown(&mut self) -> bool {
        match self.mode {
            Mode::CountdownRunning | Mode::Blinking => {
                self.blink_left = 0;
                self.mode = Mode::Idle;
                false
            }
            _ => {
                self.mode = Mode::CountdownRunning;
                true
            }
        }
    }

    /// Advance one second in the direction of the current mode.
    pub fn tick(&mut self) -> TickOutcome {
        match self.mode {
            Mode::StopwatchRunning => {
                self.time = self.time.ticked_up(self.compact);
                TickOutcome::Advanced
            }
            Mode::CountdownRunning => {
                // Zero is checked at tick entry: the display settles on
                // the zero frame for one full tick before the blink
                // sequence starts
                if self.time.is_zero() {
                    self.mode = Mode::Blinking;
                    self.blink_left = BLINK_CYCLES;
                    TickOutcome::ReachedZero
                } else {
                    self.time = self.time.ticked_down(self.compact);
                    TickOutcome::Advanced
                }
            }
            Mode::Idle | Mode::Blinking => TickOutcome::Ignored,
        }
    }

    /// Stop whatever is running and return to idle, keeping the time.
    pub fn stop(&mut self) {
        self.blink_left = 0;
        self.mode = Mode::Idle;
    }

    /// Zero the time and return to idle.
    pub fn reset(&mut self) {
        self.time = TimeValue::ZERO;
        self.blink_left = 0;
        self.mode = Mode::Idle;
    }

    /// Manually adjust one unit by a signed amount.
    ///
    /// Permitted in any mode; a running clock keeps running through
    /// the adjusted value.
    pub fn adjust(&mut self, unit: Unit, amount: i64) {
        self.time = self.time.adjusted(unit, amount, self.compact);
    }

    /// Switch compact mode on or off.
    ///
    /// A no-op when the flag already matches. Changing it zeroes the
    /// hours field on enable and resets the clock either way, since
    /// the stored reading is not meaningful across regimes.
    pub fn set_compact(&mut self, enabled: bool) {
        if self.compact == enabled {
            return;
        }
        self.compact = enabled;
        if enabled {
            self.time.hours = 0;
        }
        self.reset();
    }

    /// Consume one blink cycle. Returns `true` while more cycles
    /// remain; on the last cycle the engine settles to `Idle` and
    /// this returns `false`.
    pub fn blink_step(&mut self) -> bool {
        if self.mode != Mode::Blinking {
            return false;
        }
        self.blink_left = self.blink_left.saturating_sub(1);
        if self.blink_left == 0 {
            self.mode = Mode::Idle;
            return false;
        }
        true
    }
}

impl Default for ClockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_toggle_and_tick() {
        let mut engine = ClockEngine::new();
        assert!(engine.toggle_stopwatch());
        assert_eq!(engine.mode(), Mode::StopwatchRunning);

        for _ in 0..3 {
            assert_eq!(engine.tick(), TickOutcome::Advanced);
        }
        assert_eq!(engine.time(), TimeValue::new(0, 0, 3));

        assert!(!engine.toggle_stopwatch());
        assert_eq!(engine.mode(), Mode::Idle);
        assert_eq!(engine.tick(), TickOutcome::Ignored);
        assert_eq!(engine.time(), TimeValue::new(0, 0, 3));
    }

    #[test]
    fn test_countdown_reaches_zero_once() {
        let mut engine = ClockEngine::new();
        engine.adjust(Unit::Seconds, 5);
        assert!(engine.toggle_countdown());

        let mut zero_signals = 0;
        for _ in 0..10 {
            match engine.tick() {
                TickOutcome::ReachedZero => zero_signals += 1,
                TickOutcome::Advanced | TickOutcome::Ignored => {}
            }
        }
        assert_eq!(zero_signals, 1);
        assert_eq!(engine.mode(), Mode::Blinking);
        assert!(engine.time().is_zero());
    }

    #[test]
    fn test_countdown_settles_on_zero_before_signal() {
        let mut engine = ClockEngine::new();
        engine.adjust(Unit::Seconds, 1);
        engine.toggle_countdown();

        // The tick that lands on zero only advances; the signal fires
        // on the following tick
        assert_eq!(engine.tick(), TickOutcome::Advanced);
        assert!(engine.time().is_zero());
        assert_eq!(engine.mode(), Mode::CountdownRunning);

        assert_eq!(engine.tick(), TickOutcome::ReachedZero);
        assert_eq!(engine.mode(), Mode::Blinking);
    }

    #[test]
    fn test_countdown_from_zero_signals_on_first_tick() {
        let mut engine = ClockEngine::new();
        assert!(engine.toggle_countdown());
        assert_eq!(engine.tick(), TickOutcome::ReachedZero);
        assert_eq!(engine.mode(), Mode::Blinking);
    }

    #[test]
    fn test_countdown_toggle_during_blink_settles_idle() {
        let mut engine = ClockEngine::new();
        engine.adjust(Unit::Seconds, 1);
        engine.toggle_countdown();
        assert_eq!(engine.tick(), TickOutcome::Advanced);
        assert_eq!(engine.tick(), TickOutcome::ReachedZero);
        assert_eq!(engine.mode(), Mode::Blinking);

        assert!(!engine.toggle_countdown());
        assert_eq!(engine.mode(), Mode::Idle);
    }

    #[test]
    fn test_stopwatch_start_cancels_blink() {
        let mut engine = ClockEngine::new();
        engine.adjust(Unit::Seconds, 1);
        engine.toggle_countdown();
        engine.tick();
        engine.tick();
        assert_eq!(engine.mode(), Mode::Blinking);

        assert!(engine.toggle_stopwatch());
        assert_eq!(engine.mode(), Mode::StopwatchRunning);
        assert!(!engine.blink_step());
    }

    #[test]
    fn test_blink_sequence_runs_five_cycles() {
        let mut engine = ClockEngine::new();
        engine.adjust(Unit::Seconds, 1);
        engine.toggle_countdown();
        engine.tick();
        engine.tick();

        let mut cycles = 1;
        while engine.blink_step() {
            cycles += 1;
        }
        assert_eq!(cycles, usize::from(BLINK_CYCLES));
        assert_eq!(engine.mode(), Mode::Idle);
    }

    #[test]
    fn test_set_compact_resets_and_zeroes_hours() {
        let mut engine = ClockEngine::new();
        engine.adjust(Unit::Hours, 2);
        engine.adjust(Unit::Minutes, 30);
        engine.toggle_stopwatch();

        engine.set_compact(true);
        assert!(engine.compact());
        assert_eq!(engine.mode(), Mode::Idle);
        assert!(engine.time().is_zero());

        // Same flag again is a no-op, not another reset
        engine.adjust(Unit::Minutes, 10);
        engine.set_compact(true);
        assert_eq!(engine.time(), TimeValue::new(0, 10, 0));

        engine.set_compact(false);
        assert!(engine.time().is_zero());
    }

    #[test]
    fn test_reset_keeps_compact_flag() {
        let mut engine = ClockEngine::new();
        engine.set_compact(true);
        engine.adjust(Unit::Minutes, 5);
        engine.reset();
        assert!(engine.compact());
        assert!(engine.time().is_zero());
    }
}

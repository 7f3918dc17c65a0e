//! `TimeValue`: H:M:S arithmetic with carry, borrow, and clamping.
//!
//! Two normalization regimes exist. In normal mode minutes and seconds
//! stay in `[0, 59]` and hours absorbs overflow. In compact mode there
//! is no hours field: hours is pinned at 0 and minutes is unbounded
//! non-negative, holding total elapsed minutes.

/// The time unit a manual adjustment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Hours field (inert in compact mode).
    Hours,
    /// Minutes field.
    Minutes,
    /// Seconds field.
    Seconds,
}

/// A clock reading.
///
/// Invariant: `minutes` and `seconds` are in `[0, 59]`, except that
/// compact-mode operations leave `minutes` unbounded (and `hours` 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeValue {
    /// Hours, unbounded non-negative.
    pub hours: u32,
    /// Minutes.
    pub minutes: u32,
    /// Seconds.
    pub seconds: u32,
}

impl TimeValue {
    /// Zero time.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Create a time value from components.
    #[inline]
    pub const fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self { hours, minutes, seconds }
    }

    /// Check for exactly zero time.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Total minutes, the compact-mode display quantity.
    #[inline]
    pub const fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }

    /// Advance one tick in the stopwatch direction.
    ///
    /// Seconds roll over into minutes at 60; minutes roll over into
    /// hours only in normal mode. Compact mode never carries into an
    /// hours field, so minutes grows without bound.
    #[must_use]
    pub const fn ticked_up(mut self, compact: bool) -> Self {
        self.seconds += 1;
        if self.seconds >= 60 {
            self.seconds = 0;
            self.minutes += 1;
            if self.minutes >= 60 && !compact {
                self.minutes = 0;
                self.hours += 1;
            }
        }
        self
    }

    /// Advance one tick in the countdown direction.
    ///
    /// Zero stays zero; the caller handles the zero-reached signal.
    /// The hours borrow is skipped in compact mode (the field is
    /// inert there), so minutes clamps at 0 and the countdown ends.
    #[must_use]
    pub const fn ticked_down(mut self, compact: bool) -> Self {
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        } else if self.hours > 0 && !compact {
            self.hours -= 1;
            self.minutes = 59;
            self.seconds = 59;
        }
        self
    }

    /// Apply a signed manual adjustment to one unit.
    ///
    /// - `Hours`: no-op in compact mode; clamps at 0 otherwise.
    /// - `Minutes`: compact mode adds freely with a floor of 0 and no
    ///   hours interaction. Normal mode carries into hours on
    ///   overflow; borrowing below hour 0 clamps to 0 minutes and
    ///   discards the excess.
    /// - `Seconds`: carries/borrows into minutes by recursive
    ///   application of the minutes rule; underflow below zero total
    ///   time clamps to `00:00:00`.
    #[must_use]
    pub fn adjusted(mut self, unit: Unit, amount: i64, compact: bool) -> Self {
        match unit {
            Unit::Hours => {
                if !compact {
                    self.hours = clamped(i64::from(self.hours) + amount);
                }
            }
            Unit::Minutes => {
                if compact {
                    self.minutes = clamped(i64::from(self.minutes) + amount);
                } else {
                    let mut minutes = i64::from(self.minutes) + amount;
                    while minutes >= 60 {
                        minutes -= 60;
                        self.hours += 1;
                    }
                    while minutes < 0 {
                        if self.hours > 0 {
                            minutes += 60;
                            self.hours -= 1;
                        } else {
                            minutes = 0;
                        }
                    }
                    self.minutes = minutes as u32;
                }
            }
            Unit::Seconds => {
                let mut seconds = i64::from(self.seconds) + amount;
                while seconds >= 60 {
                    seconds -= 60;
                    self = self.adjusted(Unit::Minutes, 1, compact);
                }
                while seconds < 0 {
                    if self.minutes > 0 || (!compact && self.hours > 0) {
                        seconds += 60;
                        self = self.adjusted(Unit::Minutes, -1, compact);
                    } else {
                        seconds = 0;
                    }
                }
                self.seconds = seconds as u32;
            }
        }
        self
    }

    /// Format for display: `HH:MM:SS`, or `MM:SS` in compact mode
    /// where `MM` is total minutes. Fields are zero-padded to two
    /// digits and grow naturally past their padding.
    pub fn format(&self, compact: bool) -> String {
        if compact {
            format!("{:02}:{:02}", self.total_minutes(), self.seconds)
        } else {
            format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
        }
    }
}

/// Clamp a signed value to a non-negative u32.
#[inline]
fn clamped(value: i64) -> u32 {
    value.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_up_carries() {
        let t = TimeValue::new(0, 0, 59).ticked_up(false);
        assert_eq!(t, TimeValue::new(0, 1, 0));

        let t = TimeValue::new(0, 59, 59).ticked_up(false);
        assert_eq!(t, TimeValue::new(1, 0, 0));
    }

    #[test]
    fn test_tick_up_compact_minutes_unbounded() {
        let t = TimeValue::new(0, 59, 59).ticked_up(true);
        assert_eq!(t, TimeValue::new(0, 60, 0));

        let t = TimeValue::new(0, 120, 59).ticked_up(true);
        assert_eq!(t, TimeValue::new(0, 121, 0));
    }

    #[test]
    fn test_tick_up_normalized_ranges() {
        let mut t = TimeValue::ZERO;
        for _ in 0..10_000 {
            t = t.ticked_up(false);
            assert!(t.minutes < 60);
            assert!(t.seconds < 60);
        }
        assert_eq!(t, TimeValue::new(2, 46, 40));
    }

    #[test]
    fn test_tick_down_borrows() {
        let t = TimeValue::new(0, 1, 0).ticked_down(false);
        assert_eq!(t, TimeValue::new(0, 0, 59));

        let t = TimeValue::new(1, 0, 0).ticked_down(false);
        assert_eq!(t, TimeValue::new(0, 59, 59));
    }

    #[test]
    fn test_tick_down_zero_stays_zero() {
        assert_eq!(TimeValue::ZERO.ticked_down(false), TimeValue::ZERO);
        assert_eq!(TimeValue::ZERO.ticked_down(true), TimeValue::ZERO);
    }

    #[test]
    fn test_tick_down_compact_skips_hours_borrow() {
        // Hours is inert in compact mode; a nonzero hours component is
        // never consulted
        let t = TimeValue::new(1, 0, 0).ticked_down(true);
        assert_eq!(t, TimeValue::new(1, 0, 0));
    }

    #[test]
    fn test_adjust_hours() {
        let t = TimeValue::new(2, 0, 0).adjusted(Unit::Hours, -5, false);
        assert_eq!(t.hours, 0);

        let t = TimeValue::new(2, 0, 0).adjusted(Unit::Hours, 3, false);
        assert_eq!(t.hours, 5);

        // Compact mode: no-op
        let t = TimeValue::new(0, 10, 0).adjusted(Unit::Hours, 3, true);
        assert_eq!(t, TimeValue::new(0, 10, 0));
    }

    #[test]
    fn test_adjust_minutes_carry_into_hours() {
        let t = TimeValue::new(1, 10, 0).adjusted(Unit::Minutes, 65, false);
        assert_eq!(t, TimeValue::new(2, 15, 0));
    }

    #[test]
    fn test_adjust_minutes_compact_pins_hours() {
        let t = TimeValue::new(0, 10, 0).adjusted(Unit::Minutes, 65, true);
        assert_eq!(t, TimeValue::new(0, 75, 0));
    }

    #[test]
    fn test_adjust_minutes_borrow_clamps_at_hour_zero() {
        let t = TimeValue::new(1, 10, 0).adjusted(Unit::Minutes, -30, false);
        assert_eq!(t, TimeValue::new(0, 40, 0));

        // Borrow below hour 0 discards the excess
        let t = TimeValue::new(0, 10, 0).adjusted(Unit::Minutes, -30, false);
        assert_eq!(t, TimeValue::new(0, 0, 0));
    }

    #[test]
    fn test_adjust_seconds_recursive_carry() {
        let t = TimeValue::new(0, 0, 55).adjusted(Unit::Seconds, 10, false);
        assert_eq!(t, TimeValue::new(0, 1, 5));

        let t = TimeValue::new(0, 59, 55).adjusted(Unit::Seconds, 10, false);
        assert_eq!(t, TimeValue::new(1, 0, 5));
    }

    #[test]
    fn test_adjust_seconds_clamps_at_zero() {
        let t = TimeValue::ZERO.adjusted(Unit::Seconds, -1, false);
        assert_eq!(t, TimeValue::ZERO);

        let t = TimeValue::new(0, 1, 0).adjusted(Unit::Seconds, -61, false);
        assert_eq!(t, TimeValue::ZERO);
    }

    #[test]
    fn test_adjust_seconds_borrows_through_minutes() {
        let t = TimeValue::new(0, 1, 0).adjusted(Unit::Seconds, -1, false);
        assert_eq!(t, TimeValue::new(0, 0, 59));

        let t = TimeValue::new(1, 0, 0).adjusted(Unit::Seconds, -1, false);
        assert_eq!(t, TimeValue::new(0, 59, 59));
    }

    #[test]
    fn test_adjust_seconds_compact_ignores_hours() {
        // Compact: hours never participates in the borrow
        let t = TimeValue::new(0, 0, 0).adjusted(Unit::Seconds, -5, true);
        assert_eq!(t, TimeValue::ZERO);

        let t = TimeValue::new(0, 75, 0).adjusted(Unit::Seconds, -1, true);
        assert_eq!(t, TimeValue::new(0, 74, 59));
    }

    #[test]
    fn test_format_normal() {
        assert_eq!(TimeValue::new(1, 2, 3).format(false), "01:02:03");
        assert_eq!(TimeValue::new(100, 0, 0).format(false), "100:00:00");
    }

    #[test]
    fn test_format_compact_grows() {
        assert_eq!(TimeValue::new(0, 5, 3).format(true), "05:03");
        // Total minutes past 99 grows to three digits, never truncates
        assert_eq!(TimeValue::new(1, 45, 30).format(true), "105:30");
    }
}

//! Clock state: time arithmetic, the mode state machine, and
//! press-and-hold adjustment sessions.

mod engine;
mod hold;
mod time;

pub use engine::{ClockEngine, Mode, TickOutcome, BLINK_CYCLES};
pub use hold::{HoldSession, HOLD_THRESHOLD, REPEAT_INTERVAL};
pub use time::{TimeValue, Unit};

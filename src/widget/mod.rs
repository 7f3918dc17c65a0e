//! The clock widget: command surface and event channel over the
//! engine, renderer, and scheduler.

mod clock;

pub use clock::{ClockEvent, ClockWidget};

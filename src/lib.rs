//! # Tickframe
//!
//! A zero-flicker stopwatch and countdown clock core with
//! double-buffered glyph rendering.
//!
//! Tickframe draws a digit clock as a cell grid, pre-renders the frame
//! for the next tick while the current one is on screen, and promotes
//! it with a buffer move when the tick lands. Hosts present frames
//! however they like; a minimal ANSI diff path is included.
//!
//! ## Core Concepts
//!
//! - **Double-buffered rendering**: Current and prefetched frames with minimal diff
//! - **Caller-clocked scheduling**: One pending deadline per task kind, no threads
//! - **Mode state machine**: Idle, stopwatch, countdown, and blink-on-zero
//! - **Press-and-hold adjustment**: Threshold, repeat, and accelerating step sizes
//!
//! ## Example
//!
//! ```rust,ignore
//! use tickframe::{ClockWidget, Unit};
//! use std::time::Instant;
//!
//! let (mut clock, events) = ClockWidget::new();
//!
//! // Give the countdown 90 seconds and start it
//! clock.adjust(Unit::Minutes, 1);
//! clock.adjust(Unit::Seconds, 30);
//! clock.toggle_countdown(Instant::now());
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod clock;
pub mod glyph;
pub mod layout;
pub mod render;
pub mod sched;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use buffer::{Cell, CellFlags, Frame, Rgb};
pub use clock::{ClockEngine, Mode, TickOutcome, TimeValue, Unit};
pub use layout::Rect;
pub use render::{FrameFlags, FrameRenderer, RenderedFrame, Style, StyleError, StylePatch};
pub use sched::{Scheduler, TaskId, TaskKind};
pub use widget::{ClockEvent, ClockWidget};

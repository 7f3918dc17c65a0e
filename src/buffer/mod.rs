//! Buffer module: Core data structures for the double-buffer rendering system.
//!
//! This module contains:
//! - [`Cell`]: The atomic unit of a rendered frame
//! - [`Frame`]: A grid of cells holding one rendered clock image
//! - [`Rgb`]: True-color representation
//! - [`ansi`]: ANSI emission for presenting frames on a terminal

mod cell;
mod frame;
pub mod ansi;

pub use cell::{Cell, CellFlags, Rgb};
pub use frame::Frame;

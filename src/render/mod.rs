//! Render module: Style descriptors and the double-buffered renderer.
//!
//! This module contains:
//! - [`Style`] / [`StylePatch`]: the host-owned visual descriptor
//! - [`FrameRenderer`]: pure rendering plus the current/prefetched
//!   frame pair that keeps render cost off the tick path

mod style;
mod renderer;

pub use style::{Style, StylePatch, StyleError, MAX_OUTLINE_PX};
pub use renderer::{FrameRenderer, RenderedFrame, FrameFlags, FRAME_MARGIN, PIXEL_CHAR};

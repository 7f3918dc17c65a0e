//! Layout module: Frame geometry primitives.
//!
//! The clock draws one centered glyph run per frame, so layout here is
//! a single rectangle type with a centering helper.

mod rect;

pub use rect::Rect;

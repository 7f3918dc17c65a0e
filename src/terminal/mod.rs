//! Terminal presentation: buffered ANSI output.

mod output;

pub use output::OutputBuffer;

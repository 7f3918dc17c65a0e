//! ANSI emission: Turn frames into terminal escape sequences.
//!
//! Two paths:
//! 1. [`emit_full`] - redraw an entire frame (initial display, unknown
//!    terminal state).
//! 2. [`emit_diff`] - compare the previously presented frame against
//!    the next one and emit sequences for changed cells only. On a
//!    tick, current and prefetched frames differ in a handful of digit
//!    cells, so the diff path is what keeps the display flicker-free.
//!
//! All output is accumulated in a byte buffer and flushed by the
//! caller in one syscall.

use super::{Frame, Rgb};
use std::io::Write;

/// State tracker for the diffing algorithm.
///
/// Tracks the terminal's cursor position and last emitted colors to
/// minimize the number of escape sequences.
#[derive(Debug, Clone)]
pub struct AnsiState {
    /// Last known cursor X position (0-indexed).
    cursor_x: u16,
    /// Last known cursor Y position (0-indexed).
    cursor_y: u16,
    /// Last emitted foreground color.
    fg: Option<Rgb>,
    /// Last emitted background color.
    bg: Option<Rgb>,
}

impl Default for AnsiState {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsiState {
    /// Create a new state with unknown terminal state.
    pub const fn new() -> Self {
        Self {
            cursor_x: u16::MAX,
            cursor_y: u16::MAX,
            fg: None,
            bg: None,
        }
    }

    /// Reset the state (e.g., after a full screen clear).
    pub const fn reset(&mut self) {
        self.fg = None;
        self.bg = None;
        // Force cursor move on next write
        self.cursor_x = u16::MAX;
        self.cursor_y = u16::MAX;
    }
}

/// Statistics from a diff operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffStats {
    /// Number of cells that were different.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of color change sequences emitted.
    pub color_changes: usize,
}

/// Emit the difference between two frames of equal dimensions.
///
/// Compares `current` (what the terminal shows) and `next` (what it
/// should show), writing minimal escape sequences into `output`.
/// Cursor moves are skipped for horizontally adjacent cells and color
/// changes are only emitted when the tracked state differs.
pub fn emit_diff(
    current: &Frame,
    next: &Frame,
    output: &mut Vec<u8>,
    state: &mut AnsiState,
) -> DiffStats {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut stats = DiffStats::default();
    let width = current.width();

    for (idx, (old, new)) in current.cells().iter().zip(next.cells()).enumerate() {
        if old == new {
            continue;
        }
        stats.cells_changed += 1;

        let x = (idx % (width as usize)) as u16;
        let y = (idx / (width as usize)) as u16;

        if state.cursor_y != y || state.cursor_x != x {
            emit_cursor_move(output, x, y);
            state.cursor_x = x;
            state.cursor_y = y;
            stats.cursor_moves += 1;
        }

        if state.fg != Some(new.fg()) {
            emit_fg_color(output, new.fg());
            state.fg = Some(new.fg());
            stats.color_changes += 1;
        }
        if state.bg != Some(new.bg()) {
            emit_bg_color(output, new.bg());
            state.bg = Some(new.bg());
            stats.color_changes += 1;
        }

        let mut utf8 = [0u8; 4];
        output.extend_from_slice(new.ch().encode_utf8(&mut utf8).as_bytes());
        state.cursor_x += 1;
    }

    stats
}

/// Emit a full frame redraw (no diffing).
///
/// Used for the initial render or when the terminal state is unknown.
/// The cursor is hidden during the redraw to avoid visible sweeps.
pub fn emit_full(frame: &Frame, output: &mut Vec<u8>) {
    output.extend_from_slice(b"\x1b[?25l");
    output.extend_from_slice(b"\x1b[H");

    let mut last_fg: Option<Rgb> = None;
    let mut last_bg: Option<Rgb> = None;

    for (y, row) in frame.rows().enumerate() {
        if y > 0 {
            output.extend_from_slice(b"\r\n");
        }
        for cell in row {
            if last_fg != Some(cell.fg()) {
                emit_fg_color(output, cell.fg());
                last_fg = Some(cell.fg());
            }
            if last_bg != Some(cell.bg()) {
                emit_bg_color(output, cell.bg());
                last_bg = Some(cell.bg());
            }
            let mut utf8 = [0u8; 4];
            output.extend_from_slice(cell.ch().encode_utf8(&mut utf8).as_bytes());
        }
    }

    output.extend_from_slice(b"\x1b[0m\x1b[?25h");
}

/// Emit a cursor move sequence.
///
/// Uses the most compact representation:
/// - `\x1b[H` for home (1,1)
/// - `\x1b[{row}H` for column 1 of a row
/// - `\x1b[{row};{col}H` otherwise
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    // ANSI uses 1-indexed positions
    let row = y + 1;
    let col = x + 1;

    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

/// Emit a foreground color sequence (true color).
#[inline]
fn emit_fg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
}

/// Emit a background color sequence (true color).
#[inline]
fn emit_bg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Cell;

    #[test]
    fn test_diff_identical_frames() {
        let a = Frame::filled(10, 5, Rgb::BLACK);
        let b = Frame::filled(10, 5, Rgb::BLACK);
        let mut output = Vec::new();
        let mut state = AnsiState::new();

        let stats = emit_diff(&a, &b, &mut output, &mut state);

        assert_eq!(stats.cells_changed, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_diff_single_cell_change() {
        let a = Frame::filled(10, 5, Rgb::BLACK);
        let mut b = Frame::filled(10, 5, Rgb::BLACK);
        b.set(5, 2, Cell::new('X', Rgb::WHITE, Rgb::BLACK));

        let mut output = Vec::new();
        let mut state = AnsiState::new();

        let stats = emit_diff(&a, &b, &mut output, &mut state);

        assert_eq!(stats.cells_changed, 1);
        let output_str = String::from_utf8_lossy(&output);
        assert!(output_str.contains('X'));
        assert!(output_str.contains("\x1b[3;6H")); // Row 3, col 6 (1-indexed)
    }

    #[test]
    fn test_diff_adjacent_cells_no_cursor_move() {
        let a = Frame::filled(10, 5, Rgb::BLACK);
        let mut b = Frame::filled(10, 5, Rgb::BLACK);

        b.set(0, 0, Cell::new('A', Rgb::WHITE, Rgb::BLACK));
        b.set(1, 0, Cell::new('B', Rgb::WHITE, Rgb::BLACK));
        b.set(2, 0, Cell::new('C', Rgb::WHITE, Rgb::BLACK));

        let mut output = Vec::new();
        let mut state = AnsiState::new();

        let stats = emit_diff(&a, &b, &mut output, &mut state);

        assert_eq!(stats.cells_changed, 3);
        // Cursor state starts unknown, so one initial move, then adjacency
        assert_eq!(stats.cursor_moves, 1);
    }

    #[test]
    fn test_diff_color_tracking() {
        let a = Frame::filled(10, 5, Rgb::BLACK);
        let mut b = Frame::filled(10, 5, Rgb::BLACK);

        let red = Rgb::new(255, 0, 0);
        b.set(0, 0, Cell::new('A', red, Rgb::BLACK));
        b.set(1, 0, Cell::new('B', red, Rgb::BLACK)); // Same colors

        let mut output = Vec::new();
        let mut state = AnsiState::new();

        let stats = emit_diff(&a, &b, &mut output, &mut state);

        // fg and bg each emitted once for the first cell, nothing for the second
        assert_eq!(stats.color_changes, 2);
    }

    #[test]
    fn test_emit_full() {
        let mut frame = Frame::filled(3, 2, Rgb::BLACK);
        frame.set(0, 0, Cell::new('A', Rgb::WHITE, Rgb::BLACK));
        frame.set(1, 0, Cell::new('B', Rgb::WHITE, Rgb::BLACK));

        let mut output = Vec::new();
        emit_full(&frame, &mut output);

        let output_str = String::from_utf8_lossy(&output);
        assert!(output_str.starts_with("\x1b[?25l\x1b[H"));
        assert!(output_str.contains('A'));
        assert!(output_str.contains('B'));
        assert!(output_str.ends_with("\x1b[0m\x1b[?25h"));
    }

    #[test]
    fn test_state_reset_forces_cursor_move() {
        let a = Frame::filled(4, 1, Rgb::BLACK);
        let mut b = Frame::filled(4, 1, Rgb::BLACK);
        b.set(0, 0, Cell::new('A', Rgb::WHITE, Rgb::BLACK));

        let mut output = Vec::new();
        let mut state = AnsiState::new();
        emit_diff(&a, &b, &mut output, &mut state);

        state.reset();
        let mut c = b.clone();
        c.set(1, 0, Cell::new('B', Rgb::WHITE, Rgb::BLACK));
        let mut output2 = Vec::new();
        let stats = emit_diff(&b, &c, &mut output2, &mut state);
        assert_eq!(stats.cursor_moves, 1);
    }
}

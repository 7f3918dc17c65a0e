//! Frame: A grid of cells holding one rendered clock image.
//!
//! Cells are stored in a contiguous `Vec` in row-major order, so a
//! whole-frame comparison or diff is a linear scan.

use super::cell::{Cell, Rgb};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A grid of cells holding one rendered clock image.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Frame width in columns.
    width: u16,
    /// Frame height in rows.
    height: u16,
}

impl Frame {
    /// Create a new frame filled with background-only cells.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn filled(width: u16, height: u16, bg: Rgb) -> Self {
        assert!(width > 0 && height > 0, "Frame dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::blank(bg); size],
            width,
            height,
        }
    }

    /// Get the frame width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the frame height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the frame is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to a cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index_of(x, y).map(|i| &mut self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Fill the entire frame with background-only cells.
    pub fn fill(&mut self, bg: Rgb) {
        self.cells.fill(Cell::blank(bg));
    }

    /// Copy another frame's cells into this one at an offset.
    ///
    /// Cells falling outside this frame are clipped. Used to place
    /// the clock grid inside a larger host frame (e.g. with an
    /// overlay row).
    pub fn blit(&mut self, src: &Self, x: u16, y: u16) {
        for (src_y, row) in src.rows().enumerate() {
            for (src_x, cell) in row.iter().enumerate() {
                self.set(x + src_x as u16, y + src_y as u16, *cell);
            }
        }
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Draw small text at a position, grapheme by grapheme.
    ///
    /// This is for host overlays (hints, labels), not for the clock
    /// digits themselves. Wide graphemes advance by their display
    /// width; drawing stops at the right edge.
    ///
    /// Returns the number of columns used.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgb, bg: Rgb) -> u16 {
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let width = UnicodeWidthStr::width(grapheme) as u16;
            if col + width > self.width || y >= self.height {
                break;
            }
            let ch = grapheme.chars().next().unwrap_or(' ');
            self.set(col, y, Cell::new(ch, fg, bg));
            // Clear the shadowed column of a wide grapheme
            if width == 2 {
                self.set(col + 1, y, Cell::blank(bg));
            }
            col += width.max(1);
        }
        col - x
    }

    /// Get memory usage in bytes (approximate).
    pub fn memory_usage(&self) -> usize {
        self.cells.len() * std::mem::size_of::<Cell>() + std::mem::size_of::<Self>()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("memory_bytes", &self.memory_usage())
            .finish()
    }
}

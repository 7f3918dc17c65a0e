//! Cell: The atomic unit of a rendered clock frame.
//!
//! A frame is a grid of cells. Each cell carries one character, a
//! foreground and background color, and flags recording which render
//! pass painted it (outline pass vs. glyph pass). The flags make the
//! outline spread observable to tests and diff consumers.

use bitflags::bitflags;

/// True-color RGB representation.
///
/// Uses 3 bytes for 24-bit color depth. Style colors arrive from the
/// host as hex strings and are parsed into this type.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xA9A9A9).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xA9A9A9)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Cell-level flags recording which render pass produced the cell.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Painted by the outline pass (offset glyph runs).
        const OUTLINE = 0b0000_0001;
        /// Painted by the foreground glyph pass.
        const GLYPH = 0b0000_0010;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single frame cell.
///
/// The struct is laid out to be exactly 12 bytes so a row of cells
/// stays contiguous and cache-friendly during diffing.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Character to display.
    ch: char,
    /// Foreground color.
    fg: Rgb,
    /// Background color.
    bg: Rgb,
    /// Render-pass flags.
    flags: CellFlags,
    /// Padding to a 12-byte size.
    _padding: [u8; 1],
}

// Compile-time assertion: Cell must be exactly 12 bytes
const _: () = assert!(
    std::mem::size_of::<Cell>() == 12,
    "Cell must be exactly 12 bytes"
);

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Rgb::BLACK)
    }
}

impl Cell {
    /// Create a background-only cell (space on the given background).
    #[inline]
    pub const fn blank(bg: Rgb) -> Self {
        Self {
            ch: ' ',
            fg: bg,
            bg,
            flags: CellFlags::empty(),
            _padding: [0],
        }
    }

    /// Create a cell with a character and colors.
    #[inline]
    pub const fn new(ch: char, fg: Rgb, bg: Rgb) -> Self {
        Self {
            ch,
            fg,
            bg,
            flags: CellFlags::empty(),
            _padding: [0],
        }
    }

    /// Get the character.
    #[inline]
    pub const fn ch(&self) -> char {
        self.ch
    }

    /// Get the foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Get the background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Get the render-pass flags.
    #[inline]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    /// Paint this cell in place, preserving its background.
    ///
    /// Used by glyph passes: a later pass overwrites the character and
    /// foreground of an earlier pass while the frame background shows
    /// through untouched cells.
    #[inline]
    pub fn paint(&mut self, ch: char, fg: Rgb, flag: CellFlags) {
        self.ch = ch;
        self.fg = fg;
        self.flags.insert(flag);
    }

    /// Set the render-pass flags (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_flags(mut self, flags: CellFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Reset the cell to a background-only cell.
    #[inline]
    pub fn reset(&mut self, bg: Rgb) {
        *self = Self::blank(bg);
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("ch", &self.ch)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size() {
        assert_eq!(std::mem::size_of::<Cell>(), 12);
    }

    #[test]
    fn test_rgb_from_hex() {
        let rgb: Rgb = 0xFF8000.into();
        assert_eq!(rgb.r, 255);
        assert_eq!(rgb.g, 128);
        assert_eq!(rgb.b, 0);
    }

    #[test]
    fn test_blank_cell() {
        let bg = Rgb::from_u32(0xA9A9A9);
        let cell = Cell::blank(bg);
        assert_eq!(cell.ch(), ' ');
        assert_eq!(cell.bg(), bg);
        assert!(cell.flags().is_empty());
    }

    #[test]
    fn test_paint_preserves_background() {
        let bg = Rgb::from_u32(0xA9A9A9);
        let mut cell = Cell::blank(bg);

        cell.paint('█', Rgb::WHITE, CellFlags::OUTLINE);
        assert_eq!(cell.ch(), '█');
        assert_eq!(cell.fg(), Rgb::WHITE);
        assert_eq!(cell.bg(), bg);
        assert!(cell.flags().contains(CellFlags::OUTLINE));

        // Foreground pass lands on top of the outline pass
        cell.paint('█', Rgb::BLACK, CellFlags::GLYPH);
        assert_eq!(cell.fg(), Rgb::BLACK);
        assert!(cell.flags().contains(CellFlags::OUTLINE | CellFlags::GLYPH));
    }

    #[test]
    fn test_cell_equality() {
        let a = Cell::new('X', Rgb::WHITE, Rgb::BLACK);
        let b = Cell::new('X', Rgb::WHITE, Rgb::BLACK);
        let c = Cell::new('X', Rgb::BLACK, Rgb::BLACK);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cell_reset() {
        let mut cell = Cell::new('X', Rgb::WHITE, Rgb::BLACK);
        cell.reset(Rgb::BLACK);
        assert_eq!(cell, Cell::blank(Rgb::BLACK));
    }
}

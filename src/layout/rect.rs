//! Rect: A rectangle primitive for frame layout.

/// A rectangle defined by position and size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: u16,
    /// Y coordinate (row) of the top-left corner.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a size (origin at 0,0).
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Get the area (number of cells).
    #[inline]
    pub const fn area(&self) -> u32 {
        (self.width as u32) * (self.height as u32)
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Center an inner box of the given size within this rectangle.
    ///
    /// The glyph run is placed with this: measure the run, then center
    /// it in the frame. An inner box larger than the rectangle is
    /// pinned to the top-left corner.
    #[inline]
    #[must_use]
    pub const fn centered(&self, inner_width: u16, inner_height: u16) -> Self {
        let dx = self.width.saturating_sub(inner_width) / 2;
        let dy = self.height.saturating_sub(inner_height) / 2;
        Self::new(self.x + dx, self.y + dy, inner_width, inner_height)
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_basics() {
        let rect = Rect::new(2, 3, 10, 4);
        assert_eq!(rect.area(), 40);
        assert_eq!(rect.right(), 12);
        assert_eq!(rect.bottom(), 7);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(11, 6));
        assert!(!rect.contains(12, 6));
    }

    #[test]
    fn test_rect_centered() {
        let outer = Rect::from_size(51, 11);
        let inner = outer.centered(47, 7);
        assert_eq!(inner, Rect::new(2, 2, 47, 7));
    }

    #[test]
    fn test_rect_centered_oversized_pins_origin() {
        let outer = Rect::from_size(10, 5);
        let inner = outer.centered(20, 9);
        assert_eq!(inner.x, 0);
        assert_eq!(inner.y, 0);
    }
}

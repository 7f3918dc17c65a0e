//! Glyph module: Built-in dot-matrix fonts for the clock digits.
//!
//! Time text is drawn with 5x7 bitmap glyphs scaled by an integer
//! factor derived from the style's point size. The font table is
//! closed over the characters a time run can contain (`0-9`, `:`,
//! space); host-facing family names select between built-in looks, and
//! an unknown family falls back to the default at render time.

/// Glyph width in dots.
pub const GLYPH_WIDTH: u16 = 5;
/// Glyph height in dots.
pub const GLYPH_HEIGHT: u16 = 7;
/// Gap between adjacent glyphs, in dots.
pub const GLYPH_GAP: u16 = 1;

/// Point size that maps to scale factor 1.
///
/// The default 48 pt style lands on a 2x scale.
pub const BASE_SIZE_PT: u16 = 24;

/// One glyph as bitmap rows; bit 4 is the leftmost column.
pub type GlyphRows = [u8; GLYPH_HEIGHT as usize];

const BLANK_GLYPH: GlyphRows = [0; GLYPH_HEIGHT as usize];

/// A built-in dot-matrix font.
pub struct GlyphFont {
    /// Family name as the host refers to it.
    pub name: &'static str,
    /// Bitmaps for digits 0-9.
    digits: [GlyphRows; 10],
    /// Bitmap for the colon separator.
    colon: GlyphRows,
}

/// Classic full-stroke 5x7 digits. This is the default family.
static BLOCK: GlyphFont = GlyphFont {
    name: "block",
    digits: [
        [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // 0
        [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // 1
        [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // 2
        [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // 3
        [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // 4
        [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // 5
        [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // 6
        [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // 7
        [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // 8
        [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // 9
    ],
    colon: [0x00, 0x00, 0x04, 0x00, 0x04, 0x00, 0x00],
};

/// Narrow-stroke variant, three dots wide.
static SLIM: GlyphFont = GlyphFont {
    name: "slim",
    digits: [
        [0x0E, 0x0A, 0x0A, 0x0A, 0x0A, 0x0A, 0x0E], // 0
        [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // 1
        [0x0E, 0x02, 0x02, 0x0E, 0x08, 0x08, 0x0E], // 2
        [0x0E, 0x02, 0x02, 0x0E, 0x02, 0x02, 0x0E], // 3
        [0x0A, 0x0A, 0x0A, 0x0E, 0x02, 0x02, 0x02], // 4
        [0x0E, 0x08, 0x08, 0x0E, 0x02, 0x02, 0x0E], // 5
        [0x0E, 0x08, 0x08, 0x0E, 0x0A, 0x0A, 0x0E], // 6
        [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x02], // 7
        [0x0E, 0x0A, 0x0A, 0x0E, 0x0A, 0x0A, 0x0E], // 8
        [0x0E, 0x0A, 0x0A, 0x0E, 0x02, 0x02, 0x0E], // 9
    ],
    colon: [0x00, 0x00, 0x04, 0x00, 0x04, 0x00, 0x00],
};

/// All built-in fonts, in lookup order.
pub static BUILT_IN: &[&GlyphFont] = &[&BLOCK, &SLIM];

impl GlyphFont {
    /// The fallback font used when a requested family is unavailable.
    pub fn default_font() -> &'static Self {
        &BLOCK
    }

    /// Look up a built-in font by family name (case-insensitive).
    ///
    /// Returns `None` for unknown families; the renderer then falls
    /// back to [`Self::default_font`] and reports the failure.
    pub fn lookup(family: &str) -> Option<&'static Self> {
        BUILT_IN
            .iter()
            .copied()
            .find(|font| font.name.eq_ignore_ascii_case(family))
    }

    /// Get the bitmap rows for a character.
    ///
    /// Returns `None` for characters outside the time alphabet; space
    /// yields an all-off glyph so runs can contain padding.
    pub fn glyph(&self, ch: char) -> Option<GlyphRows> {
        match ch {
            '0'..='9' => {
                let digit = (ch as usize) - ('0' as usize);
                Some(self.digits[digit])
            }
            ':' => Some(self.colon),
            ' ' => Some(BLANK_GLYPH),
            _ => None,
        }
    }

    /// Measure a glyph run in cells at the given scale.
    ///
    /// Every character in the time alphabet occupies one glyph slot,
    /// so the width is purely length-determined: formatting that grows
    /// (compact minutes past 99) widens the run, never truncates it.
    pub fn measure(text: &str, scale: u16) -> (u16, u16) {
        let chars = text.chars().count() as u16;
        if chars == 0 {
            return (0, GLYPH_HEIGHT * scale);
        }
        let width = chars * GLYPH_WIDTH * scale + (chars - 1) * GLYPH_GAP * scale;
        (width, GLYPH_HEIGHT * scale)
    }
}

impl std::fmt::Debug for GlyphFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFont").field("name", &self.name).finish()
    }
}

/// Integer scale factor for a point size.
///
/// Sub-base sizes clamp to 1; the glyph grid never shrinks below one
/// cell per dot.
#[inline]
pub const fn scale_for_pt(size_pt: u16) -> u16 {
    let scale = size_pt / BASE_SIZE_PT;
    if scale == 0 { 1 } else { scale }
}

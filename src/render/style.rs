//! Style: The visual descriptor passed into every frame request.
//!
//! Owned by the host, plain value semantics. Partial updates go
//! through [`StylePatch`] and are validated atomically: a rejected
//! patch leaves the previous style fully intact.

use crate::buffer::Rgb;
use std::str::FromStr;

/// Upper bound for outline thickness, in cells.
///
/// Past this the plus-shaped spread exceeds the glyph height and the
/// digits dissolve into the outline color.
pub const MAX_OUTLINE_PX: u16 = 8;

/// Visual style for rendered clock frames.
///
/// No identity beyond value equality; the renderer compares styles to
/// decide whether a prefetched frame is still valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Glyph font family name (see [`crate::glyph::BUILT_IN`]).
    pub font_family: String,
    /// Font size in points; maps to an integer glyph scale.
    pub font_size_pt: u16,
    /// Digit color.
    pub fg: Rgb,
    /// Outline color.
    pub outline: Rgb,
    /// Whether the outline pass runs at all.
    pub outline_enabled: bool,
    /// Outline thickness in cells.
    pub outline_px: u16,
    /// Frame background color.
    pub bg: Rgb,
    /// Compact display variant (no hours field).
    pub compact: bool,
}

impl Default for Style {
    /// Startup style: 48 pt black digits, white outline 2 cells
    /// thick, dark-gray canvas.
    fn default() -> Self {
        Self {
            font_family: "block".to_string(),
            font_size_pt: 48,
            fg: Rgb::BLACK,
            outline: Rgb::WHITE,
            outline_enabled: true,
            outline_px: 2,
            bg: Rgb::from_u32(0x00A9_A9A9),
            compact: false,
        }
    }
}

/// A partial style update.
///
/// `None` fields keep their current value. The compact flag is not
/// part of the patch: toggling it resets the clock and goes through
/// [`crate::widget::ClockWidget::set_compact`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePatch {
    /// New font family.
    pub font_family: Option<String>,
    /// New font size in points.
    pub font_size_pt: Option<u16>,
    /// New digit color.
    pub fg: Option<Rgb>,
    /// New outline color.
    pub outline: Option<Rgb>,
    /// Enable or disable the outline pass.
    pub outline_enabled: Option<bool>,
    /// New outline thickness in cells.
    pub outline_px: Option<u16>,
    /// New background color.
    pub bg: Option<Rgb>,
}

/// Errors from style validation and font resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// Font size must be positive.
    InvalidFontSize(u16),
    /// Outline thickness is out of range.
    InvalidThickness(u16),
    /// A color string did not parse as `#RRGGBB`.
    MalformedColor(String),
    /// The requested font family is not available; rendering fell
    /// back to the built-in default.
    FontUnavailable(String),
}

impl std::fmt::Display for StyleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFontSize(size) => {
                write!(f, "invalid font size: {size} pt (must be positive)")
            }
            Self::InvalidThickness(px) => {
                write!(f, "invalid outline thickness: {px} (max {MAX_OUTLINE_PX})")
            }
            Self::MalformedColor(input) => {
                write!(f, "malformed color {input:?} (expected #RRGGBB)")
            }
            Self::FontUnavailable(family) => {
                write!(f, "font family {family:?} unavailable, using default")
            }
        }
    }
}

impl std::error::Error for StyleError {}

impl Style {
    /// Apply a partial update, validating before mutating.
    ///
    /// On error the style is unchanged and the caller keeps displaying
    /// with the previous valid style. An unknown font family is *not*
    /// rejected here; availability is resolved at render time with a
    /// fallback.
    pub fn apply(&mut self, patch: &StylePatch) -> Result<(), StyleError> {
        if let Some(size) = patch.font_size_pt {
            if size == 0 {
                return Err(StyleError::InvalidFontSize(size));
            }
        }
        if let Some(px) = patch.outline_px {
            if px > MAX_OUTLINE_PX {
                return Err(StyleError::InvalidThickness(px));
            }
        }

        if let Some(ref family) = patch.font_family {
            self.font_family.clone_from(family);
        }
        if let Some(size) = patch.font_size_pt {
            self.font_size_pt = size;
        }
        if let Some(fg) = patch.fg {
            self.fg = fg;
        }
        if let Some(outline) = patch.outline {
            self.outline = outline;
        }
        if let Some(enabled) = patch.outline_enabled {
            self.outline_enabled = enabled;
        }
        if let Some(px) = patch.outline_px {
            self.outline_px = px;
        }
        if let Some(bg) = patch.bg {
            self.bg = bg;
        }
        Ok(())
    }

    /// Effective outline thickness (zero when the pass is disabled).
    #[inline]
    pub const fn effective_outline(&self) -> u16 {
        if self.outline_enabled { self.outline_px } else { 0 }
    }
}

impl FromStr for Rgb {
    type Err = StyleError;

    /// Parse a `#RRGGBB` or `RRGGBB` hex color string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(StyleError::MalformedColor(s.to_string()));
        }
        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| StyleError::MalformedColor(s.to_string()))?;
        Ok(Self::from_u32(value))
    }
}

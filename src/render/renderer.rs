//! Frame renderer: Deterministic glyph rendering with a prefetch buffer.
//!
//! `render` is a pure function of (time, style). The renderer keeps
//! two frames alive: `current` (what the display shows) and
//! `prefetched` (the frame for the time value one tick ahead). When
//! the clock actually advances to the prefetched value, promotion is a
//! buffer move; any mismatch - style changed, manual adjustment, mode
//! switch - falls back to a synchronous render and drops the prefetch.

use super::style::Style;
use crate::buffer::{CellFlags, Frame, Rgb};
use crate::clock::TimeValue;
use crate::glyph::{scale_for_pt, GlyphFont, GLYPH_GAP, GLYPH_WIDTH};
use crate::layout::Rect;
use bitflags::bitflags;

/// Clear margin between the outline extent and the frame edge.
pub const FRAME_MARGIN: u16 = 1;

/// Character used for an on-dot of the glyph grid.
pub const PIXEL_CHAR: char = '█';

bitflags! {
    /// Frame-level flags describing how a frame was produced.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FrameFlags: u8 {
        /// Background-only frame for the blink-off phase.
        const BLANK = 0b0000_0001;
        /// Produced by the prefetch path and promoted at zero cost.
        const PREFETCHED = 0b0000_0010;
        /// Requested font family was unavailable; default was used.
        const FALLBACK_FONT = 0b0000_0100;
    }
}

impl std::fmt::Debug for FrameFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A rendered frame together with the inputs it was generated from.
///
/// The time and style are carried so the double-buffer logic can
/// decide by value equality whether a stored frame is still valid.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    /// The cell grid.
    pub grid: Frame,
    /// Time value this frame displays.
    pub time: TimeValue,
    /// Style this frame was rendered with.
    pub style: Style,
    /// Production flags.
    pub flags: FrameFlags,
}

/// Double-buffered frame renderer.
#[derive(Debug, Default)]
pub struct FrameRenderer {
    /// Frame for the live time value.
    current: Option<RenderedFrame>,
    /// Pre-rendered frame for the projected next tick.
    prefetched: Option<RenderedFrame>,
}

impl FrameRenderer {
    /// Create a renderer with empty buffers.
    pub const fn new() -> Self {
        Self {
            current: None,
            prefetched: None,
        }
    }

    /// Render a frame for a time value and style.
    ///
    /// Deterministic pure function of its inputs. An unavailable font
    /// family degrades to the built-in default and the frame is
    /// flagged [`FrameFlags::FALLBACK_FONT`].
    pub fn render(time: &TimeValue, style: &Style) -> RenderedFrame {
        let (font, fallback) = GlyphFont::lookup(&style.font_family)
            .map_or((GlyphFont::default_font(), true), |font| (font, false));

        let text = time.format(style.compact);
        let scale = scale_for_pt(style.font_size_pt);
        let (width, height) = frame_size(&text, style, scale);
        let mut grid = Frame::filled(width, height, style.bg);

        let (run_w, run_h) = GlyphFont::measure(&text, scale);
        let inner = Rect::from_size(width, height).centered(run_w, run_h);
        let (x0, y0) = (i32::from(inner.x), i32::from(inner.y));

        // Plus-shaped outline spread: offset runs along each axis,
        // never the diagonals.
        let thickness = i32::from(style.effective_outline());
        if thickness > 0 {
            for d in -thickness..=thickness {
                draw_run(&mut grid, font, &text, scale, x0 + d, y0, style.outline, CellFlags::OUTLINE);
                draw_run(&mut grid, font, &text, scale, x0, y0 + d, style.outline, CellFlags::OUTLINE);
            }
        }
        draw_run(&mut grid, font, &text, scale, x0, y0, style.fg, CellFlags::GLYPH);

        let flags = if fallback {
            FrameFlags::FALLBACK_FONT
        } else {
            FrameFlags::empty()
        };
        RenderedFrame {
            grid,
            time: *time,
            style: style.clone(),
            flags,
        }
    }

    /// Render a background-only frame sized like a rendered frame for
    /// the same inputs. Used for the blink-off phase.
    pub fn blank(time: &TimeValue, style: &Style) -> RenderedFrame {
        let text = time.format(style.compact);
        let scale = scale_for_pt(style.font_size_pt);
        let (width, height) = frame_size(&text, style, scale);
        RenderedFrame {
            grid: Frame::filled(width, height, style.bg),
            time: *time,
            style: style.clone(),
            flags: FrameFlags::BLANK,
        }
    }

    /// Get the frame for the live time value.
    ///
    /// Serves the prefetched buffer when it matches exactly (zero
    /// render cost); otherwise re-renders synchronously and drops the
    /// now-stale prefetch.
    pub fn current_frame(&mut self, time: &TimeValue, style: &Style) -> &RenderedFrame {
        if self.prefetched.as_ref().is_some_and(|f| matches(f, time, style)) {
            self.current = self.prefetched.take();
        } else if !self.current.as_ref().is_some_and(|f| matches(f, time, style)) {
            // Non-sequential advance or style change: pay the render now
            self.prefetched = None;
            self.current = Some(Self::render(time, style));
        }
        self.current.get_or_insert_with(|| Self::render(time, style))
    }

    /// Pre-render the frame for the projected next time value.
    pub fn prefetch(&mut self, time: &TimeValue, style: &Style) {
        let mut frame = Self::render(time, style);
        frame.flags.insert(FrameFlags::PREFETCHED);
        self.prefetched = Some(frame);
    }

    /// Whether a prefetched frame is currently held.
    pub const fn has_prefetch(&self) -> bool {
        self.prefetched.is_some()
    }

    /// Peek at the prefetched frame, if any.
    pub const fn prefetched(&self) -> Option<&RenderedFrame> {
        self.prefetched.as_ref()
    }

    /// Discard both buffers.
    ///
    /// Called on reset to Idle; the next request renders a fresh
    /// zero-time frame.
    pub fn invalidate(&mut self) {
        self.current = None;
        self.prefetched = None;
    }
}

/// Value-equality check for buffer reuse.
fn matches(frame: &RenderedFrame, time: &TimeValue, style: &Style) -> bool {
    frame.time == *time && frame.style == *style && !frame.flags.contains(FrameFlags::BLANK)
}

/// Frame dimensions for a text run: run extent plus outline reach plus
/// a clear margin on every side.
fn frame_size(text: &str, style: &Style, scale: u16) -> (u16, u16) {
    let (run_w, run_h) = GlyphFont::measure(text, scale);
    let margin = style.effective_outline() + FRAME_MARGIN;
    (run_w + margin * 2, run_h + margin * 2)
}

/// Draw one glyph run at a (possibly negative) origin.
///
/// Each on-dot becomes a `scale`x`scale` block of cells painted in
/// `color`; cells outside the frame are clipped.
fn draw_run(
    grid: &mut Frame,
    font: &GlyphFont,
    text: &str,
    scale: u16,
    origin_x: i32,
    origin_y: i32,
    color: Rgb,
    flag: CellFlags,
) {
    let advance = i32::from((GLYPH_WIDTH + GLYPH_GAP) * scale);
    let mut pen_x = origin_x;

    for ch in text.chars() {
        let Some(rows) = font.glyph(ch) else {
            pen_x += advance;
            continue;
        };
        for (row_idx, row) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if (row >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let x = pen_x + i32::from(col * scale + dx);
                        let y = origin_y + i32::from(row_idx as u16 * scale + dy);
                        if x < 0 || y < 0 {
                            continue;
                        }
                        if let Some(cell) = grid.get_mut(x as u16, y as u16) {
                            cell.paint(PIXEL_CHAR, color, flag);
                        }
                    }
                }
            }
        }
        pen_x += advance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scale 1, thickness 1 style for coordinate-level assertions.
    fn small_style() -> Style {
        Style {
            font_size_pt: 12,
            outline_px: 1,
            ..Style::default()
        }
    }

    #[test]
    fn test_render_deterministic() {
        let time = TimeValue::new(0, 1, 30);
        let style = Style::default();
        let a = FrameRenderer::render(&time, &style);
        let b = FrameRenderer::render(&time, &style);
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_frame_dimensions() {
        // 48 pt -> scale 2; "00:00:00" run is 94x14; margin 2+1 per side
        let frame = FrameRenderer::render(&TimeValue::ZERO, &Style::default());
        assert_eq!(frame.grid.width(), 94 + 6);
        assert_eq!(frame.grid.height(), 14 + 6);
    }

    #[test]
    fn test_outline_spread_is_plus_shaped() {
        // Scale 1, thickness 1: run starts at (2, 2). The first '0'
        // has a dot at glyph (1, 0), i.e. cell (3, 2).
        let frame = FrameRenderer::render(&TimeValue::ZERO, &small_style());
        let style = small_style();

        let dot = frame.grid.get(3, 2).unwrap();
        assert!(dot.flags().contains(CellFlags::GLYPH));
        assert_eq!(dot.fg(), style.fg);

        // Vertical arm above the dot
        let above = frame.grid.get(3, 1).unwrap();
        assert!(above.flags().contains(CellFlags::OUTLINE));
        assert_eq!(above.fg(), style.outline);

        // Horizontal arm left of the dot
        let left = frame.grid.get(2, 2).unwrap();
        assert!(left.flags().contains(CellFlags::OUTLINE));

        // Diagonal corner is NOT covered - the spread is axis-aligned
        let diagonal = frame.grid.get(2, 1).unwrap();
        assert!(diagonal.flags().is_empty());
        assert_eq!(diagonal.ch(), ' ');
    }

    #[test]
    fn test_outline_disabled_paints_no_outline_cells() {
        let style = Style {
            outline_enabled: false,
            ..small_style()
        };
        let frame = FrameRenderer::render(&TimeValue::ZERO, &style);
        assert!(frame
            .grid
            .cells()
            .iter()
            .all(|cell| !cell.flags().contains(CellFlags::OUTLINE)));
    }

    #[test]
    fn test_font_fallback() {
        let style = Style {
            font_family: "papyrus".to_string(),
            ..Style::default()
        };
        let frame = FrameRenderer::render(&TimeValue::ZERO, &style);
        assert!(frame.flags.contains(FrameFlags::FALLBACK_FONT));

        // Grid pixels are identical to the default family
        let default_frame = FrameRenderer::render(&TimeValue::ZERO, &Style::default());
        assert_eq!(frame.grid, default_frame.grid);
    }

    #[test]
    fn test_prefetch_promotion() {
        let style = Style::default();
        let mut renderer = FrameRenderer::new();

        let t0 = TimeValue::new(0, 0, 5);
        let t1 = t0.ticked_up(false);

        renderer.current_frame(&t0, &style);
        renderer.prefetch(&t1, &style);

        let served = renderer.current_frame(&t1, &style);
        assert!(served.flags.contains(FrameFlags::PREFETCHED));
        assert_eq!(served.grid, FrameRenderer::render(&t1, &style).grid);
        assert!(!renderer.has_prefetch());
    }

    #[test]
    fn test_non_sequential_advance_drops_prefetch() {
        let style = Style::default();
        let mut renderer = FrameRenderer::new();

        let t0 = TimeValue::new(0, 0, 5);
        renderer.current_frame(&t0, &style);
        renderer.prefetch(&t0.ticked_up(false), &style);

        // Manual adjustment jumped by more than one tick
        let jumped = TimeValue::new(0, 5, 0);
        let served = renderer.current_frame(&jumped, &style);
        assert!(!served.flags.contains(FrameFlags::PREFETCHED));
        assert!(!renderer.has_prefetch());
    }

    #[test]
    fn test_style_change_drops_prefetch() {
        let style = Style::default();
        let mut renderer = FrameRenderer::new();

        let t0 = TimeValue::new(0, 0, 5);
        let t1 = t0.ticked_up(false);
        renderer.current_frame(&t0, &style);
        renderer.prefetch(&t1, &style);

        let restyled = Style {
            fg: Rgb::WHITE,
            ..Style::default()
        };
        let served = renderer.current_frame(&t1, &restyled);
        assert!(!served.flags.contains(FrameFlags::PREFETCHED));
        assert_eq!(served.style, restyled);
        assert!(!renderer.has_prefetch());
    }

    #[test]
    fn test_blank_frame_matches_dimensions() {
        let style = Style::default();
        let rendered = FrameRenderer::render(&TimeValue::ZERO, &style);
        let blank = FrameRenderer::blank(&TimeValue::ZERO, &style);

        assert_eq!(blank.grid.width(), rendered.grid.width());
        assert_eq!(blank.grid.height(), rendered.grid.height());
        assert!(blank.flags.contains(FrameFlags::BLANK));
        assert!(blank.grid.cells().iter().all(|c| c.flags().is_empty()));
    }

    #[test]
    fn test_invalidate_discards_buffers() {
        let style = Style::default();
        let mut renderer = FrameRenderer::new();
        renderer.current_frame(&TimeValue::ZERO, &style);
        renderer.prefetch(&TimeValue::new(0, 0, 1), &style);

        renderer.invalidate();
        assert!(!renderer.has_prefetch());

        let fresh = renderer.current_frame(&TimeValue::ZERO, &style);
        assert!(!fresh.flags.contains(FrameFlags::PREFETCHED));
    }
}

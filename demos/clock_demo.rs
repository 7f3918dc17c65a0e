//! Clock demo: the widget running in a terminal.
//!
//! Keys:
//! - `s` start/stop the stopwatch, `d` start/stop the countdown
//! - `r` reset, `f` toggle compact mode
//! - Up/Down adjust minutes, Right/Left adjust seconds by 5
//! - `1`/`2` select the block/slim font, `[`/`]` outline thickness
//! - `q` or Esc to quit

use std::io::{stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;

use tickframe::buffer::ansi::AnsiState;
use tickframe::terminal::OutputBuffer;
use tickframe::{ClockEvent, ClockWidget, Frame, Rgb, Style, StylePatch, Unit};

const KEY_HINTS: &str = "s stopwatch  d countdown  r reset  f compact  q quit";

fn main() -> std::io::Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let result = run();

    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn run() -> std::io::Result<()> {
    let (mut clock, events) = ClockWidget::new();
    let mut presented: Option<Frame> = None;
    let mut state = AnsiState::new();
    let mut out = OutputBuffer::new();
    let mut outline_px = clock.style().outline_px;

    loop {
        // Sleep until the next scheduled deadline, or idle-poll
        let timeout = clock
            .next_deadline()
            .map_or(Duration::from_millis(250), |deadline| {
                deadline.saturating_duration_since(Instant::now())
            });

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let now = Instant::now();
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('s') => clock.toggle_stopwatch(now),
                    KeyCode::Char('d') => clock.toggle_countdown(now),
                    KeyCode::Char('r') => clock.reset(),
                    KeyCode::Char('f') => {
                        let compact = clock.style().compact;
                        clock.set_compact(!compact);
                    }
                    KeyCode::Up => clock.adjust(Unit::Minutes, 1),
                    KeyCode::Down => clock.adjust(Unit::Minutes, -1),
                    KeyCode::Right => clock.adjust(Unit::Seconds, 5),
                    KeyCode::Left => clock.adjust(Unit::Seconds, -5),
                    KeyCode::Char('1') => set_font(&mut clock, "block"),
                    KeyCode::Char('2') => set_font(&mut clock, "slim"),
                    KeyCode::Char(']') => {
                        outline_px = set_outline(&mut clock, outline_px.saturating_add(1));
                    }
                    KeyCode::Char('[') => {
                        outline_px = set_outline(&mut clock, outline_px.saturating_sub(1));
                    }
                    _ => {}
                }
            }
        }

        clock.pump(Instant::now());

        for clock_event in events.try_iter() {
            match clock_event {
                ClockEvent::FrameReady(frame) => {
                    let composed = with_hints(&frame.grid, &frame.style);
                    present(&composed, &mut presented, &mut state, &mut out)?;
                }
                ClockEvent::ZeroReached => {
                    // The blink sequence is the visual signal; a real
                    // host would also ring a bell here
                }
                ClockEvent::FontFallback { family } => {
                    let mut err = std::io::stderr();
                    writeln!(err, "font {family:?} unavailable, using default\r")?;
                }
            }
        }
    }
}

/// Place the clock grid in a host frame with a key-hint row under it.
fn with_hints(grid: &Frame, style: &Style) -> Frame {
    let width = grid.width().max(KEY_HINTS.len() as u16 + 2);
    let mut framed = Frame::filled(width, grid.height() + 2, style.bg);
    framed.blit(grid, (width - grid.width()) / 2, 0);
    framed.draw_text(1, grid.height() + 1, KEY_HINTS, Rgb::WHITE, style.bg);
    framed
}

fn present(
    grid: &Frame,
    presented: &mut Option<Frame>,
    state: &mut AnsiState,
    out: &mut OutputBuffer,
) -> std::io::Result<()> {
    out.clear();
    match presented {
        // Same dimensions: minimal diff against what is on screen
        Some(last) if last.width() == grid.width() && last.height() == grid.height() => {
            out.cursor_hide();
            out.frame_diff(last, grid, state);
        }
        // Dimensions changed (style or compact toggle): full redraw
        _ => {
            out.clear_screen();
            state.reset();
            out.frame_full(grid);
        }
    }
    out.flush_to(&mut stdout())?;
    *presented = Some(grid.clone());
    Ok(())
}

fn set_font(clock: &mut ClockWidget, family: &str) {
    let patch = StylePatch {
        font_family: Some(family.to_string()),
        ..StylePatch::default()
    };
    // Unknown families fall back at render time, so this cannot fail
    let _ = clock.set_style(&patch);
}

fn set_outline(clock: &mut ClockWidget, px: u16) -> u16 {
    let patch = StylePatch {
        outline_px: Some(px),
        ..StylePatch::default()
    };
    if clock.set_style(&patch).is_ok() {
        px
    } else {
        clock.style().outline_px
    }
}

//! `ClockWidget`: ties the engine, renderer, and scheduler together
//! behind a command API and an event channel.
//!
//! The widget is caller-clocked like the scheduler underneath it. A
//! host calls command methods as input arrives, sleeps until
//! [`next_deadline`], then calls [`pump`] to dispatch due work. Every
//! visible change comes out the event channel as a
//! [`ClockEvent::FrameReady`].
//!
//! [`next_deadline`]: ClockWidget::next_deadline
//! [`pump`]: ClockWidget::pump

use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::clock::{
    ClockEngine, HoldSession, Mode, TickOutcome, Unit, HOLD_THRESHOLD, REPEAT_INTERVAL,
};
use crate::render::{FrameFlags, FrameRenderer, RenderedFrame, Style, StyleError, StylePatch};
use crate::sched::{Scheduler, TaskKind};

/// Seconds tick period.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Blink phase timings: blank now, restore at 500ms, next cycle at 1s.
const BLINK_RESTORE_AFTER: Duration = Duration::from_millis(500);
const BLINK_CYCLE_PERIOD: Duration = Duration::from_secs(1);

/// Events published by the widget.
#[derive(Debug, Clone)]
pub enum ClockEvent {
    /// A new frame should be presented.
    FrameReady(RenderedFrame),
    /// A countdown just reached zero.
    ZeroReached,
    /// A requested font family was unavailable; the default font is
    /// in use. Sent once per distinct family.
    FontFallback {
        /// The family that could not be found.
        family: String,
    },
}

/// The clock widget.
pub struct ClockWidget {
    engine: ClockEngine,
    renderer: FrameRenderer,
    sched: Scheduler,
    style: Style,
    hold: Option<HoldSession>,
    events: Sender<ClockEvent>,
    /// Last family a fallback notice was sent for.
    fallback_notified: Option<String>,
}

impl ClockWidget {
    /// Create a widget and the receiving end of its event channel.
    ///
    /// The initial idle frame is published immediately.
    pub fn new() -> (Self, Receiver<ClockEvent>) {
        let (tx, rx) = unbounded();
        let mut widget = Self {
            engine: ClockEngine::new(),
            renderer: FrameRenderer::new(),
            sched: Scheduler::new(),
            style: Style::default(),
            hold: None,
            events: tx,
            fallback_notified: None,
        };
        widget.publish();
        (widget, rx)
    }

    /// Current style.
    pub const fn style(&self) -> &Style {
        &self.style
    }

    /// Current mode.
    pub const fn mode(&self) -> Mode {
        self.engine.mode()
    }

    /// Earliest pending deadline; the host sleeps until this before
    /// calling [`pump`](Self::pump).
    pub fn next_deadline(&self) -> Option<Instant> {
        self.sched.next_deadline()
    }

    /// Start or stop the stopwatch.
    pub fn toggle_stopwatch(&mut self, now: Instant) {
        if self.engine.toggle_stopwatch() {
            self.cancel_blink();
            self.sched.schedule(TaskKind::Tick, now, TICK_PERIOD);
        } else {
            self.sched.cancel(TaskKind::Tick);
        }
        self.publish();
    }

    /// Start or stop the countdown.
    pub fn toggle_countdown(&mut self, now: Instant) {
        if self.engine.toggle_countdown() {
            self.sched.schedule(TaskKind::Tick, now, TICK_PERIOD);
        } else {
            self.cancel_blink();
            self.sched.cancel(TaskKind::Tick);
        }
        self.publish();
    }

    /// Zero the clock and return to idle.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.sched.cancel(TaskKind::Tick);
        self.cancel_blink();
        self.renderer.invalidate();
        self.publish();
    }

    /// Apply a one-shot manual adjustment.
    pub fn adjust(&mut self, unit: Unit, amount: i64) {
        self.engine.adjust(unit, amount);
        self.publish();
    }

    /// An adjustment button went down.
    ///
    /// Holding past the threshold switches to auto-repeat; see
    /// [`release`](Self::release) for the short-press path.
    pub fn press(&mut self, unit: Unit, base_step: i64, now: Instant) {
        // A new press supersedes an unreleased session; a repeat
        // deadline left over from it must not fire for this one
        self.sched.cancel(TaskKind::HoldRepeat);
        self.hold = Some(HoldSession::new(unit, base_step, now));
        self.sched.schedule(TaskKind::HoldThreshold, now, HOLD_THRESHOLD);
    }

    /// The adjustment button came back up.
    pub fn release(&mut self, now: Instant) {
        self.sched.cancel(TaskKind::HoldThreshold);
        self.sched.cancel(TaskKind::HoldRepeat);
        if let Some(session) = self.hold.take() {
            if let Some(step) = session.release_step(now) {
                self.adjust(session.unit(), step);
            }
        }
    }

    /// Apply a style patch. Validation is atomic: on error nothing
    /// changes and no frame is published.
    pub fn set_style(&mut self, patch: &StylePatch) -> Result<(), StyleError> {
        self.style.apply(patch)?;
        self.publish();
        Ok(())
    }

    /// Switch compact display mode on or off. Changing the flag
    /// resets the clock.
    pub fn set_compact(&mut self, enabled: bool) {
        if self.engine.compact() == enabled {
            return;
        }
        self.engine.set_compact(enabled);
        self.style.compact = enabled;
        self.sched.cancel(TaskKind::Tick);
        self.cancel_blink();
        self.renderer.invalidate();
        self.publish();
    }

    /// Dispatch every task due at or before `now`.
    pub fn pump(&mut self, now: Instant) {
        for kind in self.sched.pop_due(now) {
            self.dispatch(kind, now);
        }
    }

    fn dispatch(&mut self, kind: TaskKind, now: Instant) {
        match kind {
            TaskKind::Tick => match self.engine.tick() {
                TickOutcome::Advanced => {
                    self.sched.schedule(TaskKind::Tick, now, TICK_PERIOD);
                    self.publish();
                }
                TickOutcome::ReachedZero => {
                    self.events.send(ClockEvent::ZeroReached).ok();
                    self.start_blink_cycle(now);
                }
                TickOutcome::Ignored => {}
            },
            TaskKind::BlinkRestore => self.publish(),
            TaskKind::BlinkCycle => {
                if self.engine.blink_step() {
                    self.start_blink_cycle(now);
                } else {
                    // Sequence over; settle on the restored frame
                    self.publish();
                }
            }
            TaskKind::HoldThreshold => {
                if let Some(session) = self.hold.as_mut() {
                    session.begin_repeat();
                    let (unit, step) = (session.unit(), session.step(now));
                    self.adjust(unit, step);
                    self.sched.schedule(TaskKind::HoldRepeat, now, REPEAT_INTERVAL);
                }
            }
            TaskKind::HoldRepeat => {
                if let Some(session) = self.hold.as_ref() {
                    let (unit, step) = (session.unit(), session.step(now));
                    self.adjust(unit, step);
                    self.sched.schedule(TaskKind::HoldRepeat, now, REPEAT_INTERVAL);
                }
            }
        }
    }

    /// Publish a blank frame and arm the restore and next-cycle
    /// deadlines.
    fn start_blink_cycle(&mut self, now: Instant) {
        let blank = FrameRenderer::blank(&self.engine.time(), &self.style);
        self.events.send(ClockEvent::FrameReady(blank)).ok();
        self.sched.schedule(TaskKind::BlinkRestore, now, BLINK_RESTORE_AFTER);
        self.sched.schedule(TaskKind::BlinkCycle, now, BLINK_CYCLE_PERIOD);
    }

    fn cancel_blink(&mut self) {
        self.sched.cancel(TaskKind::BlinkRestore);
        self.sched.cancel(TaskKind::BlinkCycle);
    }

    /// Emit the frame for the live time and arm the prefetch for the
    /// projected next tick.
    fn publish(&mut self) {
        let time = self.engine.time();
        let frame = self.renderer.current_frame(&time, &self.style).clone();

        if frame.flags.contains(FrameFlags::FALLBACK_FONT)
            && self.fallback_notified.as_deref() != Some(self.style.font_family.as_str())
        {
            self.fallback_notified = Some(self.style.font_family.clone());
            self.events
                .send(ClockEvent::FontFallback {
                    family: self.style.font_family.clone(),
                })
                .ok();
        }
        self.events.send(ClockEvent::FrameReady(frame)).ok();

        // Prefetch the projected next frame. Pointless while blinking:
        // the time is pinned at zero until the sequence ends.
        let projected = match self.engine.mode() {
            Mode::CountdownRunning => Some(self.engine.time().ticked_down(self.engine.compact())),
            Mode::Blinking => None,
            Mode::Idle | Mode::StopwatchRunning => {
                Some(self.engine.time().ticked_up(self.engine.compact()))
            }
        };
        if let Some(next) = projected {
            self.renderer.prefetch(&next, &self.style);
        }
    }
}

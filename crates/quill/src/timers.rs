//! Session timers (auto-save, cursor blink) as plain values polled with an explicit
//! `now`. Nothing here sleeps or spawns; the host calls `Editor::tick` periodically.

use std::time::{Duration, Instant};

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// The buffer was saved by the auto-save timer (`ok == false` on failure).
    AutoSave { ok: bool },
    CursorBlink { visible: bool },
    /// A transient status message expired.
    StatusCleared,
    /// The open undo record was closed by the idle timeout.
    UndoRecordClosed,
}

/// Repeating timer. A zero interval never fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    interval: Duration,
    next_due: Option<Instant>,
    cancelled: bool,
}

impl IntervalTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
            cancelled: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled && !self.interval.is_zero()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Arm the timer relative to `now`. The first poll arms it implicitly.
    pub fn start(&mut self, now: Instant) {
        if self.is_active() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// True when the timer is due at `now`; re-arms for the next period.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.is_active() {
            return false;
        }
        let due = *self.next_due.get_or_insert(now + self.interval);
        if now >= due {
            self.next_due = Some(now + self.interval);
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.next_due = None;
    }
}

/// Auto-save decision for one tick: only a due timer with a dirty, named buffer saves.
pub fn auto_save_due(timer: &mut IntervalTimer, now: Instant, dirty: bool, has_path: bool) -> bool {
    timer.poll(now) && dirty && has_path
}

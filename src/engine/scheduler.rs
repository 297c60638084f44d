// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fixed-period tick scheduling.
//!
//! The capture and replay loops are polled from the UI update loop rather
//! than running on their own threads. An [`IntervalTimer`] only answers
//! "is a tick due now?", so the owner decides what a tick does and all
//! state stays on the UI thread.

use std::time::{Duration, Instant};

/// A periodic timer polled with the current time.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start ticking; the first tick is due one period after `now`.
    /// Starting a running timer keeps its current schedule.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.period);
        }
    }

    /// Stop ticking. Returns whether the timer was running.
    ///
    /// Once this returns, [`poll`](Self::poll) reports no tick until the
    /// timer is started again.
    pub fn stop(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// Whether a tick is due at `now`. At most one tick fires per poll:
    /// periods missed while the UI was busy are dropped, not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let mut next = due + self.period;
        if next <= now {
            let behind = now.duration_since(next).as_nanos() / self.period.as_nanos();
            next += self.period * (behind as u32 + 1);
        }
        self.next_due = Some(next);
        true
    }

    /// Time left until the next tick, used to schedule a repaint.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

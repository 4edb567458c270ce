// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplay scheduling.
//!
//! ```text
//!            start                delay elapsed
//! Stopped ──────────▶ Armed ─────────────────▶ Running ──┐ interval elapsed:
//!    ▲                  │                        ▲  │    │ advance one slide
//!    │ stop             │ touch start  touch end │  │◀───┘
//!    └───── (any) ──────┴────────▶ Paused ───────┘  │ touch start
//!                                    ▲──────────────┘
//! ```
//!
//! Pausing cancels every autoplay timer; resuming restarts a full interval.

use crate::{TimerKind, TimerTable};

/// Autoplay state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AutoplayState {
    /// Not playing.
    #[default]
    Stopped,
    /// Waiting out the initial delay.
    Armed,
    /// Advancing every interval.
    Running,
    /// Suspended while the user touches the carousel.
    Paused,
}

/// Drives [`AutoplayState`] and the autoplay entries of a [`TimerTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AutoplayScheduler {
    state: AutoplayState,
    interval_ms: u64,
    delay_ms: u64,
}

impl AutoplayScheduler {
    /// Creates a stopped scheduler. Intervals shorter than one millisecond are raised to one.
    #[must_use]
    pub const fn new(interval_ms: u64, delay_ms: u64) -> Self {
        Self {
            state: AutoplayState::Stopped,
            interval_ms: if interval_ms == 0 { 1 } else { interval_ms },
            delay_ms,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AutoplayState {
        self.state
    }

    /// Returns `true` unless stopped.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, AutoplayState::Stopped)
    }

    /// Updates timing. Pending timers keep their deadlines until they next fire.
    pub const fn set_timing(&mut self, interval_ms: u64, delay_ms: u64) {
        self.interval_ms = if interval_ms == 0 { 1 } else { interval_ms };
        self.delay_ms = delay_ms;
    }

    /// Starts playing. Does nothing while armed, running, or paused.
    pub fn start(&mut self, timers: &mut TimerTable, now_ms: u64) {
        if self.state != AutoplayState::Stopped {
            return;
        }
        if self.delay_ms == 0 {
            self.run(timers, now_ms);
        } else {
            self.state = AutoplayState::Armed;
            timers.arm(TimerKind::AutoplayDelay, now_ms, self.delay_ms);
        }
        log::debug!("carousel autoplay: start -> {:?}", self.state);
    }

    /// Stops playing from any state.
    pub fn stop(&mut self, timers: &mut TimerTable) {
        Self::cancel_timers(timers);
        if self.state != AutoplayState::Stopped {
            log::debug!("carousel autoplay: {:?} -> Stopped", self.state);
        }
        self.state = AutoplayState::Stopped;
    }

    /// Suspends an armed or running scheduler.
    pub fn pause(&mut self, timers: &mut TimerTable) {
        if matches!(self.state, AutoplayState::Armed | AutoplayState::Running) {
            Self::cancel_timers(timers);
            self.state = AutoplayState::Paused;
            log::debug!("carousel autoplay: paused");
        }
    }

    /// Resumes a paused scheduler with a fresh interval.
    pub fn resume(&mut self, timers: &mut TimerTable, now_ms: u64) {
        if self.state == AutoplayState::Paused {
            self.run(timers, now_ms);
            log::debug!("carousel autoplay: resumed");
        }
    }

    /// Handles a fired autoplay timer. Returns `true` when the carousel should advance.
    pub fn on_timer(&mut self, kind: TimerKind, timers: &mut TimerTable, now_ms: u64) -> bool {
        match (kind, self.state) {
            (TimerKind::AutoplayDelay, AutoplayState::Armed) => {
                self.run(timers, now_ms);
                false
            }
            (TimerKind::AutoplayInterval, AutoplayState::Running) => {
                timers.arm(TimerKind::AutoplayInterval, now_ms, self.interval_ms);
                true
            }
            _ => false,
        }
    }

    fn run(&mut self, timers: &mut TimerTable, now_ms: u64) {
        timers.cancel(TimerKind::AutoplayDelay);
        timers.arm(TimerKind::AutoplayInterval, now_ms, self.interval_ms);
        self.state = AutoplayState::Running;
    }

    fn cancel_timers(timers: &mut TimerTable) {
        timers.cancel(TimerKind::AutoplayDelay);
        timers.cancel(TimerKind::AutoplayInterval);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named, individually cancelable timers driven by host timestamps.
//!
//! The carousel never sleeps. Hosts pass millisecond timestamps to
//! [`Carousel::advance`](crate::Carousel::advance), which pops due timers from
//! this table in deadline order.

/// Every timer a carousel may have pending.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Initial autoplay delay.
    AutoplayDelay,
    /// Autoplay advance.
    AutoplayInterval,
    /// Deferred jump out of a clone region.
    Reposition,
    /// Settles an animated snap on hosts that do not report completion.
    SettleFallback,
    /// Releases a scroll lock that was never released by a settle.
    ScrollLock,
    /// Releases a drag whose momentum never reported its end.
    MomentumFallback,
}

impl TimerKind {
    const ALL: [Self; 6] = [
        Self::AutoplayDelay,
        Self::AutoplayInterval,
        Self::Reposition,
        Self::SettleFallback,
        Self::ScrollLock,
        Self::MomentumFallback,
    ];

    const fn slot(self) -> usize {
        match self {
            Self::AutoplayDelay => 0,
            Self::AutoplayInterval => 1,
            Self::Reposition => 2,
            Self::SettleFallback => 3,
            Self::ScrollLock => 4,
            Self::MomentumFallback => 5,
        }
    }
}

/// One deadline per [`TimerKind`].
///
/// Arming a timer that is already pending replaces its deadline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimerTable {
    deadlines: [Option<u64>; 6],
}

impl TimerTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            deadlines: [None; 6],
        }
    }

    /// Arms `kind` to fire `delay_ms` after `now_ms`.
    pub fn arm(&mut self, kind: TimerKind, now_ms: u64, delay_ms: u64) {
        self.deadlines[kind.slot()] = Some(now_ms.saturating_add(delay_ms));
    }

    /// Cancels `kind`. Returns `true` if it was pending.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.deadlines[kind.slot()].take().is_some()
    }

    /// Cancels every timer.
    pub fn clear(&mut self) {
        self.deadlines = [None; 6];
    }

    /// Deadline of `kind`, if pending.
    #[must_use]
    pub fn deadline(&self, kind: TimerKind) -> Option<u64> {
        self.deadlines[kind.slot()]
    }

    /// Returns `true` if `kind` is pending.
    #[must_use]
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.deadline(kind).is_some()
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.deadlines.iter().flatten().copied().min()
    }

    /// Removes and returns the earliest timer due at `now_ms`.
    ///
    /// Ties resolve in [`TimerKind`] declaration order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerKind, u64)> {
        let (kind, deadline) = TimerKind::ALL
            .iter()
            .filter_map(|&kind| self.deadline(kind).map(|at| (kind, at)))
            .filter(|&(_, at)| at <= now_ms)
            .min_by_key(|&(kind, at)| (at, kind.slot()))?;
        self.deadlines[kind.slot()] = None;
        Some((kind, deadline))
    }
}

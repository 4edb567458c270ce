// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap decisions and the gesture phase of a carousel.
//!
//! ## Release policy
//!
//! When a drag ends, the target is chosen from the active index at drag start,
//! the active index at release, and the drag distance:
//!
//! 1. If the active index changed during the drag, land on the new index.
//! 2. Otherwise, if the drag is longer than the swipe threshold, move one slide
//!    in the drag direction.
//! 3. Otherwise, return to the slide the drag ended on.
//!
//! Indices here are positions along the strip: a positive drag delta always
//! points at the next higher virtual index. Right-to-left mirroring lives in
//! [`VirtualIndexSpace`](crate::VirtualIndexSpace), not in offsets.

/// A snap whose scroll command has been issued but not yet observed to complete.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PendingSnap {
    /// Virtual index being snapped to.
    pub target: usize,
    /// Scroll offset of the target.
    pub offset: f64,
    /// Whether the command was animated.
    pub animated: bool,
    /// Whether settling should report [`CarouselEvent::Snapped`](crate::CarouselEvent::Snapped).
    pub fire_callback: bool,
}

/// Gesture and snap phase.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum SnapPhase {
    /// Nothing in flight.
    #[default]
    Idle,
    /// The user is dragging.
    Dragging {
        /// Offset when the drag began.
        start_offset: f64,
        /// Active virtual index when the drag began.
        start_index: usize,
    },
    /// A snap is on its way to its target.
    Settling(PendingSnap),
}

impl SnapPhase {
    /// Returns the pending snap, if settling.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingSnap> {
        match self {
            Self::Settling(pending) => Some(pending),
            _ => None,
        }
    }

    /// Returns `true` while the user is dragging.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Picks the virtual index to land on when a drag ends.
///
/// The result is not clamped; a step past the last index is returned as is and
/// moving backward from index `0` yields `None`. Callers wrap or clamp it.
#[must_use]
pub fn decide_snap_target(
    start_index: usize,
    end_index: usize,
    delta: f64,
    swipe_threshold: f64,
) -> Option<usize> {
    if start_index != end_index {
        return Some(end_index);
    }
    let threshold = swipe_threshold.max(0.0);
    let forward = if delta > threshold {
        true
    } else if delta < -threshold {
        false
    } else {
        return Some(end_index);
    };
    if forward {
        start_index.checked_add(1)
    } else {
        start_index.checked_sub(1)
    }
}

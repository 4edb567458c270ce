// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel spans of every virtual index.

use alloc::vec::Vec;

use crate::SlideAlignment;

/// Smallest half-width of the active zone, in the scroll coordinate space.
const MIN_ACTIVE_ZONE_HALF: f64 = 10.0;

/// Start and end offset of one slide along the scroll axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Span {
    /// Offset of the leading edge; also the scroll offset that activates this slide.
    pub start: f64,
    /// Offset of the trailing edge.
    pub end: f64,
}

impl Span {
    /// Returns `true` if `offset` lies within the span widened by `tolerance` on both sides.
    #[must_use]
    pub fn contains_with_tolerance(&self, offset: f64, tolerance: f64) -> bool {
        offset + tolerance >= self.start && offset - tolerance <= self.end
    }
}

/// Contiguous spans for a strip of uniformly sized slides.
///
/// `end[i] - start[i]` equals the item extent and `start[i + 1] == end[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionTable {
    spans: Vec<Span>,
    item_extent: f64,
}

impl PositionTable {
    /// Builds the table for `len` slides of `item_extent` each.
    ///
    /// Negative or non-finite extents are treated as zero.
    #[must_use]
    pub fn new(len: usize, item_extent: f64) -> Self {
        let mut table = Self::default();
        table.rebuild(len, item_extent);
        table
    }

    /// Recomputes every span. Existing storage is reused.
    pub fn rebuild(&mut self, len: usize, item_extent: f64) {
        let item_extent = if item_extent.is_finite() && item_extent > 0.0 {
            item_extent
        } else {
            0.0
        };
        self.item_extent = item_extent;
        self.spans.clear();
        self.spans.reserve(len);
        self.spans.extend((0..len).map(|i| {
            #[allow(
                clippy::cast_precision_loss,
                reason = "Slide counts stay far below 2^52"
            )]
            let start = i as f64 * item_extent;
            Span {
                start,
                end: start + item_extent,
            }
        }));
    }

    /// Number of spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if the table holds no spans.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns `true` if snapping has somewhere to go: spans exist and have a size.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.spans.is_empty() && self.item_extent > 0.0
    }

    /// Extent of one slide.
    #[must_use]
    pub const fn item_extent(&self) -> f64 {
        self.item_extent
    }

    /// Span of `virtual_index`.
    #[must_use]
    pub fn position_of(&self, virtual_index: usize) -> Option<Span> {
        self.spans.get(virtual_index).copied()
    }

    /// All spans in index order.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Total extent of the strip.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        self.spans.last().map_or(0.0, |span| span.end)
    }
}

/// Half-width of the active zone around a slide's centre.
///
/// The configured value is capped at `item_extent / 2 - 10` so the active zone of
/// every slide stays at least 20 units wide.
#[must_use]
pub fn active_slide_tolerance(item_extent: f64, configured: f64) -> f64 {
    let cap = (item_extent / 2.0 - MIN_ACTIVE_ZONE_HALF).max(0.0);
    configured.max(0.0).min(cap)
}

/// Padding the host places before and after the strip so the active slide lands
/// at `alignment` inside the viewport.
#[must_use]
pub fn content_insets(alignment: SlideAlignment, slider_extent: f64, item_extent: f64) -> (f64, f64) {
    let free = (slider_extent - item_extent).max(0.0);
    match alignment {
        SlideAlignment::Center => (free / 2.0, free / 2.0),
        SlideAlignment::Start => (0.0, free),
        SlideAlignment::End => (free, 0.0),
    }
}

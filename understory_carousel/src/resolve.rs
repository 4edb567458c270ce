// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active-item resolution from a raw scroll offset.

use crate::PositionTable;

/// Returns the virtual index that is active at scroll `offset`.
///
/// The active slide is the first one whose span, widened by `tolerance` on both
/// sides, contains the point half a slide past `offset`. Offsets at or before the
/// start resolve to `0`; offsets at or past the last slide's start resolve to the
/// last index. When tolerance bands overlap the lower index wins.
#[must_use]
pub fn resolve_active(table: &PositionTable, offset: f64, tolerance: f64) -> usize {
    let Some(last) = table.len().checked_sub(1) else {
        return 0;
    };
    if offset.is_nan() || offset <= 0.0 {
        return 0;
    }
    if table.position_of(last).is_some_and(|span| offset >= span.start) {
        return last;
    }

    let center = offset + table.item_extent() / 2.0;
    if let Some(index) = table
        .spans()
        .iter()
        .position(|span| span.contains_with_tolerance(center, tolerance))
    {
        return index;
    }

    log::warn!(
        "carousel: no slide contains offset {offset} (center {center}, {} spans); falling back to 0",
        table.len()
    );
    0
}

/// Continuous virtual position at scroll `offset`, e.g. `2.5` halfway between slides 2 and 3.
#[must_use]
pub fn scroll_position(offset: f64, item_extent: f64) -> f64 {
    if item_extent > 0.0 && offset.is_finite() {
        offset / item_extent
    } else {
        0.0
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between data indices and the virtual index space.
//!
//! When looping, the virtual space is laid out as `[cloned tail][data][cloned head]`.
//! Clones repeat the data as many times as needed, so the clone count may exceed
//! the number of items. Under RTL adaptation the whole space is mirrored.

/// Data-index ↔ virtual-index mapping for one carousel.
///
/// This is a plain value: every query is a pure function of the item count,
/// the clone count, and the looping/mirroring flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VirtualIndexSpace {
    items: usize,
    clones: usize,
    looping: bool,
    mirrored: bool,
}

impl VirtualIndexSpace {
    /// Creates the index space for `items` data items.
    ///
    /// Looping only takes effect with two or more items. `mirrored` reverses the
    /// virtual order for hosts whose horizontal scroll does not follow RTL layout.
    #[must_use]
    pub const fn new(items: usize, looping: bool, clones: usize, mirrored: bool) -> Self {
        let looping = looping && items > 1;
        Self {
            items,
            clones: if looping { clones } else { 0 },
            looping,
            mirrored,
        }
    }

    /// Number of data items.
    #[must_use]
    pub const fn data_len(&self) -> usize {
        self.items
    }

    /// Number of virtual indices, clones included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items + 2 * self.clones
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items == 0
    }

    /// Returns `true` if looping is in effect.
    #[must_use]
    pub const fn is_looping(&self) -> bool {
        self.looping
    }

    /// Returns `true` if the virtual order is mirrored.
    #[must_use]
    pub const fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Number of clones on each side.
    #[must_use]
    pub const fn clones_per_side(&self) -> usize {
        self.clones
    }

    /// Converts between layout order and virtual order. It is its own inverse.
    const fn mirror(&self, index: usize) -> usize {
        if self.mirrored {
            self.len() - 1 - index
        } else {
            index
        }
    }

    /// Virtual index of the canonical (non-clone) slot for `data_index`.
    ///
    /// Out-of-range data indices are clamped to the last item.
    #[must_use]
    pub fn to_virtual(&self, data_index: usize) -> Option<usize> {
        if self.items == 0 {
            return None;
        }
        let data_index = data_index.min(self.items - 1);
        Some(self.mirror(self.clones + data_index))
    }

    /// Data index shown at `virtual_index`, or `None` if out of range.
    #[must_use]
    pub fn to_data(&self, virtual_index: usize) -> Option<usize> {
        if virtual_index >= self.len() {
            return None;
        }
        let layout = self.mirror(virtual_index);
        if !self.looping {
            return Some(layout);
        }
        // Euclidean remainder inverts clone regions of any width.
        let shifted = layout as isize - self.clones as isize;
        Some(shifted.rem_euclid(self.items as isize) as usize)
    }

    /// Returns `true` if `virtual_index` lies in a clone region.
    #[must_use]
    pub fn is_clone(&self, virtual_index: usize) -> bool {
        if !self.looping || virtual_index >= self.len() {
            return false;
        }
        let layout = self.mirror(virtual_index);
        layout < self.clones || layout >= self.clones + self.items
    }

    /// Equivalent virtual index in the core data region.
    #[must_use]
    pub fn canonical(&self, virtual_index: usize) -> Option<usize> {
        self.to_data(virtual_index)
            .and_then(|data| self.to_virtual(data))
    }

    /// Clamps a virtual index into range.
    #[must_use]
    pub fn clamp(&self, virtual_index: usize) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(virtual_index.min(self.len() - 1))
        }
    }

    /// The virtual index one data item forward (or backward) from `virtual_index`.
    ///
    /// Without looping the step stops at the data boundaries and returns `None`.
    /// With looping it walks into the clone regions; only at the very end of the
    /// virtual space does it wrap to the canonical slot of the first (or last) item.
    #[must_use]
    pub fn step(&self, virtual_index: usize, forward: bool) -> Option<usize> {
        let current = self.clamp(virtual_index)?;
        let layout = self.mirror(current);
        let next = if forward {
            if layout + 1 < self.len() {
                Some(layout + 1)
            } else {
                None
            }
        } else {
            layout.checked_sub(1)
        };
        match next {
            Some(next) => Some(self.mirror(next)),
            None if self.looping => {
                let data = if forward { 0 } else { self.items - 1 };
                self.to_virtual(data)
            }
            None => None,
        }
    }

    /// Iterator over all virtual indices paired with the data index they show.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.len()).filter_map(|v| self.to_data(v).map(|d| (v, d)))
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary between the carousel core and the host's scrollable.

/// A request to move the host's scrollable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollCommand {
    /// Target offset along the scroll axis.
    pub offset: f64,
    /// Animate the transition. Non-animated commands are treated as complete
    /// as soon as they are issued.
    pub animated: bool,
}

/// What a carousel needs from the host's scrollable.
///
/// Hosts implement this on a small adapter around whatever scroll container their
/// UI framework provides. Only [`ScrollHost::scroll_to`] is required; the
/// capability flags default to a well-behaved native scroll view.
pub trait ScrollHost {
    /// Scroll to `command.offset`.
    ///
    /// Animated commands must eventually be acknowledged with
    /// [`Carousel::on_scroll_settled`](crate::Carousel::on_scroll_settled) or by
    /// delivering offset samples that reach the target, unless
    /// [`ScrollHost::settles_reliably`] returns `false`.
    fn scroll_to(&mut self, command: ScrollCommand);

    /// Enable or disable user scrolling.
    fn set_scroll_enabled(&mut self, _enabled: bool) {}

    /// Whether the host reports completion of programmatic animated scrolls.
    ///
    /// When `false`, the carousel settles snaps on its own after
    /// [`CarouselConfig::settle_fallback_ms`](crate::CarouselConfig::settle_fallback_ms).
    fn settles_reliably(&self) -> bool {
        true
    }

    /// Whether the host's horizontal scrollable follows right-to-left layout by itself.
    ///
    /// When `false`, RTL carousels mirror their virtual index space.
    fn mirrors_rtl_natively(&self) -> bool {
        true
    }
}

impl<H: ScrollHost + ?Sized> ScrollHost for &mut H {
    fn scroll_to(&mut self, command: ScrollCommand) {
        (**self).scroll_to(command);
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        (**self).set_scroll_enabled(enabled);
    }

    fn settles_reliably(&self) -> bool {
        (**self).settles_reliably()
    }

    fn mirrors_rtl_natively(&self) -> bool {
        (**self).mirrors_rtl_natively()
    }
}

/// Notifications produced by a carousel, drained with
/// [`Carousel::drain_events`](crate::Carousel::drain_events).
///
/// Indices are always data indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CarouselEvent {
    /// A snap to a different item has been decided and its scroll command issued.
    BeforeSnap(usize),
    /// A snap settled on a different item.
    Snapped(usize),
    /// The item under the viewport changed while scrolling.
    ActiveIndexChanged(usize),
}

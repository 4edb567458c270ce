// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Carousel: a headless carousel core.
//!
//! This crate turns a host-provided scrollable into a carousel: snapping to slides,
//! optional infinite looping, autoplay, and per-slide visual styles driven by the
//! scroll offset. It renders nothing and owns no clock. The host feeds it scroll
//! samples, gesture lifecycle notifications, and the current time, and the carousel
//! answers with [`ScrollCommand`]s and [`CarouselEvent`]s.
//!
//! The building blocks are usable on their own:
//!
//! - [`VirtualIndexSpace`]: maps the virtual strip (clones included) to data indices.
//! - [`PositionTable`]: the span of every virtual slide along the scroll axis.
//! - [`resolve_active`]: which slide a raw scroll offset makes active.
//! - [`decide_snap_target`]: where a released drag should land.
//! - [`InterpolatorSet`]: opacity, scale, translation and rotation per slide,
//!   from one of the built-in [`InterpolationProfile`]s or a custom
//!   [`SlideInterpolator`].
//! - [`AutoplayScheduler`] over a [`TimerTable`]: autoplay with an initial delay,
//!   paused while the user touches the carousel.
//!
//! [`Carousel`] ties them together behind the [`ScrollHost`] trait.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_carousel::{
//!     Axis, Carousel, CarouselConfig, CarouselEvent, ScrollCommand, ScrollHost,
//! };
//!
//! #[derive(Default)]
//! struct Host {
//!     offset: f64,
//! }
//!
//! impl ScrollHost for Host {
//!     fn scroll_to(&mut self, command: ScrollCommand) {
//!         self.offset = command.offset;
//!     }
//! }
//!
//! let config = CarouselConfig::new(
//!     Axis::Horizontal,
//!     Size::new(100.0, 60.0),
//!     Size::new(300.0, 60.0),
//! )
//! .with_first_item(2);
//! let mut carousel = Carousel::new(config, 5, Host::default(), 0);
//! assert_eq!(carousel.host().offset, 200.0);
//!
//! // A 35 pixel swipe forward moves one slide.
//! carousel.on_drag_begin(200.0, 0);
//! carousel.on_drag_end(235.0, 40);
//! assert_eq!(carousel.host().offset, 300.0);
//!
//! // The host reports that its scroll animation finished.
//! carousel.on_scroll_settled(340);
//! let events: Vec<_> = carousel.drain_events().collect();
//! assert_eq!(events.last(), Some(&CarouselEvent::Snapped(3)));
//! ```
//!
//! ## Time
//!
//! Timers (autoplay, delayed clone repositioning, settle and momentum fallbacks,
//! scroll lock) are deadlines in host milliseconds. Every input that may start a
//! timer takes the current time as `now_ms`, so deadlines are always measured from
//! the moment the carousel learned about them. Call [`Carousel::advance`] with the
//! current time whenever [`Carousel::next_deadline`] has passed.
//!
//! ## Features
//!
//! - `std` (default): enables `std` in `kurbo`.
//! - `libm`: floating point support through `libm` for `no_std` targets.
//! - `serde`: `Serialize`/`Deserialize` for the configuration types.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod autoplay;
mod carousel;
mod config;
mod host;
mod index;
mod interpolate;
mod positions;
mod resolve;
mod snap;
mod timer;

pub use autoplay::{AutoplayScheduler, AutoplayState};
pub use carousel::Carousel;
pub use config::{
    AutoplayConfig, Axis, CarouselConfig, ConfigError, InterpolationProfile, LayoutDirection,
    SlideAlignment,
};
pub use host::{CarouselEvent, ScrollCommand, ScrollHost};
pub use index::VirtualIndexSpace;
pub use interpolate::{
    InterpolationContext, InterpolatorSet, Keyframes, ProfileInterpolator, SlideInterpolator,
    SlideStyle,
};
pub use positions::{PositionTable, Span, active_slide_tolerance, content_insets};
pub use resolve::{resolve_active, scroll_position};
pub use snap::{PendingSnap, SnapPhase, decide_snap_target};
pub use timer::{TimerKind, TimerTable};

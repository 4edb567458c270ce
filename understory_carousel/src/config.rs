// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel configuration and validation.

use kurbo::Size;

/// Scroll axis of a carousel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Items are laid out left to right and scrolled along x.
    #[default]
    Horizontal,
    /// Items are laid out top to bottom and scrolled along y.
    Vertical,
}

impl Axis {
    /// Returns the component of `size` along this axis.
    #[must_use]
    pub const fn main(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Returns the component of `size` across this axis.
    #[must_use]
    pub const fn cross(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }
}

/// Where the active slide sits inside the viewport.
///
/// Alignment only changes the content insets the host applies around the
/// strip; item offsets and active-item resolution are unaffected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlideAlignment {
    /// Centre the active slide.
    #[default]
    Center,
    /// Align the active slide with the leading edge of the viewport.
    Start,
    /// Align the active slide with the trailing edge of the viewport.
    End,
}

/// Reading direction of the carousel content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// Built-in mapping from relative slide distance to slide style.
///
/// The profile is resolved once per configuration or layout change, not per frame.
/// See [`InterpolatorSet`](crate::InterpolatorSet).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationProfile {
    /// Inactive slides fade to [`CarouselConfig::inactive_slide_opacity`] and
    /// shrink to [`CarouselConfig::inactive_slide_scale`].
    #[default]
    Default,
    /// Like [`InterpolationProfile::Default`] but inactive slides are shifted
    /// along the cross axis by [`CarouselConfig::inactive_slide_shift`] instead of scaled.
    Shift,
    /// Upcoming slides are stacked behind the active one.
    Stack,
    /// Passed slides rotate and fly away; upcoming slides peek from behind.
    Tinder,
}

/// Autoplay settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoplayConfig {
    /// Start autoplay when the carousel is created.
    pub enabled: bool,
    /// Milliseconds between two advances.
    pub interval_ms: u64,
    /// Milliseconds to wait before the first advance.
    pub delay_ms: u64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 3000,
            delay_ms: 1000,
        }
    }
}

/// Configuration of a [`Carousel`](crate::Carousel).
///
/// Sizes are given as [`Size`]s; only the component along [`CarouselConfig::axis`]
/// matters for geometry, so a horizontal carousel needs widths and a vertical one
/// needs heights.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Size of one slide.
    pub item_size: Size,
    /// Size of the viewport.
    pub slider_size: Size,
    /// Scroll axis.
    pub axis: Axis,
    /// Placement of the active slide inside the viewport.
    pub alignment: SlideAlignment,
    /// Wrap around at both ends. Only effective with two or more items.
    pub looping: bool,
    /// Number of cloned items on each side of the data when looping.
    pub loop_clones_per_side: usize,
    /// Data index that is active after construction.
    pub first_item: usize,
    /// Autoplay settings.
    pub autoplay: AutoplayConfig,
    /// Snap to an item when a drag ends.
    pub snap_enabled: bool,
    /// Snap when momentum ends instead of when the drag ends.
    pub momentum_enabled: bool,
    /// Reading direction.
    pub direction: LayoutDirection,
    /// Half-width of the zone around a slide's centre that counts as active.
    pub active_slide_offset: f64,
    /// Minimum drag distance that moves to the neighboring slide.
    pub swipe_threshold: f64,
    /// Distance from the snap target at which a scroll sample settles the snap.
    pub callback_offset_margin: f64,
    /// Disable user scrolling while an animated snap is in flight.
    pub lock_scroll_while_snapping: bool,
    /// Safety release for the scroll lock.
    pub lock_scroll_timeout_ms: u64,
    /// Settle delay for hosts that do not report completion of programmatic scrolls.
    pub settle_fallback_ms: u64,
    /// Delay before jumping out of a clone region; `0` jumps as soon as a snap settles.
    pub reposition_delay_ms: u64,
    /// With momentum snapping, release a drag that sees no scroll sample for this long.
    pub momentum_fallback_ms: u64,
    /// Slide style profile.
    pub profile: InterpolationProfile,
    /// Opacity of inactive slides.
    pub inactive_slide_opacity: f64,
    /// Scale of inactive slides.
    pub inactive_slide_scale: f64,
    /// Cross-axis shift of inactive slides for [`InterpolationProfile::Shift`].
    pub inactive_slide_shift: f64,
    /// Card spacing for the stacked profiles; `None` uses the profile default.
    pub card_offset: Option<f64>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            item_size: Size::ZERO,
            slider_size: Size::ZERO,
            axis: Axis::Horizontal,
            alignment: SlideAlignment::Center,
            looping: false,
            loop_clones_per_side: 3,
            first_item: 0,
            autoplay: AutoplayConfig::default(),
            snap_enabled: true,
            momentum_enabled: false,
            direction: LayoutDirection::Ltr,
            active_slide_offset: 20.0,
            swipe_threshold: 20.0,
            callback_offset_margin: 5.0,
            lock_scroll_while_snapping: false,
            lock_scroll_timeout_ms: 1000,
            settle_fallback_ms: 250,
            reposition_delay_ms: 0,
            momentum_fallback_ms: 100,
            profile: InterpolationProfile::Default,
            inactive_slide_opacity: 0.7,
            inactive_slide_scale: 0.9,
            inactive_slide_shift: 0.0,
            card_offset: None,
        }
    }
}

impl CarouselConfig {
    /// Creates a configuration for a carousel along `axis`.
    ///
    /// Only the main-axis components of the sizes are used.
    #[must_use]
    pub fn new(axis: Axis, item_size: Size, slider_size: Size) -> Self {
        Self {
            axis,
            item_size,
            slider_size,
            ..Self::default()
        }
    }

    /// Enables looping with `clones` cloned items per side.
    #[must_use]
    pub fn with_loop(mut self, clones: usize) -> Self {
        self.looping = true;
        self.loop_clones_per_side = clones;
        self
    }

    /// Enables autoplay.
    #[must_use]
    pub fn with_autoplay(mut self, interval_ms: u64, delay_ms: u64) -> Self {
        self.autoplay = AutoplayConfig {
            enabled: true,
            interval_ms,
            delay_ms,
        };
        self
    }

    /// Sets the initially active data index.
    #[must_use]
    pub fn with_first_item(mut self, first_item: usize) -> Self {
        self.first_item = first_item;
        self
    }

    /// Sets the interpolation profile.
    #[must_use]
    pub fn with_profile(mut self, profile: InterpolationProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Slide extent along the scroll axis.
    #[must_use]
    pub fn item_extent(&self) -> f64 {
        sanitize_extent(self.axis.main(self.item_size))
    }

    /// Viewport extent along the scroll axis.
    #[must_use]
    pub fn slider_extent(&self) -> f64 {
        sanitize_extent(self.axis.main(self.slider_size))
    }

    /// Checks that the sizes required by [`CarouselConfig::axis`] are present.
    ///
    /// A [`Carousel`](crate::Carousel) never refuses a configuration; it reports the
    /// first error as a warning and keeps running with zero-sized geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let item = self.axis.main(self.item_size);
        if !item.is_finite() || item <= 0.0 {
            return Err(ConfigError::MissingItemSize {
                axis: self.axis,
                value: item,
            });
        }
        let slider = self.axis.main(self.slider_size);
        if !slider.is_finite() || slider <= 0.0 {
            return Err(ConfigError::MissingSliderSize {
                axis: self.axis,
                value: slider,
            });
        }
        if self.autoplay.enabled && self.autoplay.interval_ms == 0 {
            return Err(ConfigError::ZeroAutoplayInterval);
        }
        Ok(())
    }
}

/// Extents are finite and non-negative; anything else collapses to zero.
fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// A configuration the carousel can only run in degenerate form.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The slide has no usable extent along the scroll axis.
    #[error("carousel item size along {axis:?} must be positive and finite, got {value}")]
    MissingItemSize {
        /// Scroll axis of the configuration.
        axis: Axis,
        /// Offending extent.
        value: f64,
    },
    /// The viewport has no usable extent along the scroll axis.
    #[error("carousel slider size along {axis:?} must be positive and finite, got {value}")]
    MissingSliderSize {
        /// Scroll axis of the configuration.
        axis: Axis,
        /// Offending extent.
        value: f64,
    },
    /// Autoplay would tick continuously.
    #[error("autoplay interval must be at least one millisecond")]
    ZeroAutoplayInterval,
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::{Axis, CarouselConfig, ConfigError};

    #[test]
    fn horizontal_config_needs_widths() {
        let config = CarouselConfig::new(
            Axis::Horizontal,
            Size::new(0.0, 100.0),
            Size::new(300.0, 100.0),
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingItemSize {
                axis: Axis::Horizontal,
                ..
            })
        ));
        assert_eq!(config.item_extent(), 0.0);
        assert_eq!(config.slider_extent(), 300.0);
    }

    #[test]
    fn vertical_config_reads_heights() {
        let config = CarouselConfig::new(
            Axis::Vertical,
            Size::new(0.0, 80.0),
            Size::new(0.0, 400.0),
        );
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.item_extent(), 80.0);
        assert_eq!(config.slider_extent(), 400.0);
    }

    #[test]
    fn missing_slider_and_zero_interval_are_reported() {
        let config = CarouselConfig::new(Axis::Horizontal, Size::new(100.0, 0.0), Size::ZERO);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingSliderSize { .. })
        ));

        let config = CarouselConfig::new(
            Axis::Horizontal,
            Size::new(100.0, 0.0),
            Size::new(100.0, 0.0),
        )
        .with_autoplay(0, 0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroAutoplayInterval));
    }

    #[test]
    fn non_finite_extents_collapse_to_zero() {
        let config = CarouselConfig::new(
            Axis::Horizontal,
            Size::new(f64::NAN, 0.0),
            Size::new(f64::INFINITY, 0.0),
        );
        assert_eq!(config.item_extent(), 0.0);
        assert_eq!(config.slider_extent(), 0.0);
        assert!(config.validate().is_err());
    }
}

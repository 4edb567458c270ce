// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-slide animated styles derived from the scroll position.
//!
//! Every slide is styled from its *relative distance* to the scroll position:
//! `virtual_index - offset / item_extent`. A distance of `0.0` is the fully active
//! slide, `1.0` the next one, `-1.0` the previous one. Distances are continuous, so
//! styles are re-derived for every scroll sample, not only at rest.
//!
//! Built-in profiles are piecewise-linear [`Keyframes`] per channel and clamp at
//! the ends of their input range. Hosts can replace them with their own
//! [`SlideInterpolator`].

use alloc::boxed::Box;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Vec2};
use smallvec::SmallVec;

use crate::{Axis, CarouselConfig, InterpolationProfile, PositionTable};

const STACK_CARD_OFFSET: f64 = 18.0;
const TINDER_CARD_OFFSET: f64 = 9.0;

/// Piecewise-linear mapping with clamped ends.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframes {
    inputs: SmallVec<[f64; 5]>,
    outputs: SmallVec<[f64; 5]>,
}

impl Keyframes {
    /// Creates keyframes from ascending `inputs` and matching `outputs`.
    ///
    /// Extra entries on the longer side are ignored.
    #[must_use]
    pub fn new(inputs: &[f64], outputs: &[f64]) -> Self {
        let len = inputs.len().min(outputs.len());
        debug_assert!(
            inputs[..len].windows(2).all(|w| w[0] <= w[1]),
            "keyframe inputs must be ascending; got {inputs:?}"
        );
        Self {
            inputs: SmallVec::from_slice(&inputs[..len]),
            outputs: SmallVec::from_slice(&outputs[..len]),
        }
    }

    /// Returns the output at `input`, clamped to the first and last keyframe.
    #[must_use]
    pub fn sample(&self, input: f64) -> f64 {
        let (Some(&first_in), Some(&last_in)) = (self.inputs.first(), self.inputs.last()) else {
            return 0.0;
        };
        if input.is_nan() || input <= first_in {
            return self.outputs[0];
        }
        if input >= last_in {
            return self.outputs[self.outputs.len() - 1];
        }
        let upper = self.inputs.partition_point(|&x| x <= input);
        let lower = upper - 1;
        let (x0, x1) = (self.inputs[lower], self.inputs[upper]);
        let (y0, y1) = (self.outputs[lower], self.outputs[upper]);
        if x1 <= x0 {
            return y1;
        }
        y0 + (y1 - y0) * (input - x0) / (x1 - x0)
    }

    /// First and last input.
    #[must_use]
    pub fn input_range(&self) -> Option<(f64, f64)> {
        Some((*self.inputs.first()?, *self.inputs.last()?))
    }
}

/// Style of one slide at one scroll position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlideStyle {
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Uniform scale about the slide's centre.
    pub scale: f64,
    /// Translation applied after scaling and rotation.
    pub translate: Vec2,
    /// Rotation about the slide's centre, in degrees.
    pub rotation_degrees: f64,
    /// Paint order; higher paints on top.
    pub z_index: i32,
}

impl SlideStyle {
    /// The fully active appearance.
    pub const ACTIVE: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        translate: Vec2::ZERO,
        rotation_degrees: 0.0,
        z_index: 0,
    };

    /// Transform in a coordinate space whose origin is the slide's centre.
    #[must_use]
    pub fn transform(&self) -> Affine {
        Affine::translate(self.translate)
            * Affine::rotate(self.rotation_degrees.to_radians())
            * Affine::scale(self.scale)
    }
}

impl Default for SlideStyle {
    fn default() -> Self {
        Self::ACTIVE
    }
}

/// What an interpolator knows about the slide it styles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InterpolationContext {
    /// Virtual index of the slide.
    pub virtual_index: usize,
    /// Number of virtual indices.
    pub virtual_len: usize,
    /// Slide extent along the scroll axis.
    pub item_extent: f64,
    /// Scroll axis.
    pub axis: Axis,
}

impl InterpolationContext {
    /// Default paint order: earlier slides on top.
    #[must_use]
    pub fn stacking_order(&self) -> i32 {
        i32::try_from(self.virtual_len.saturating_sub(self.virtual_index)).unwrap_or(i32::MAX)
    }

    fn along(&self, main: f64, cross: f64) -> Vec2 {
        match self.axis {
            Axis::Horizontal => Vec2::new(main, cross),
            Axis::Vertical => Vec2::new(cross, main),
        }
    }
}

/// Maps a relative distance to a [`SlideStyle`].
///
/// Implementations must return the fully active appearance at distance `0.0`
/// and must not extrapolate beyond the neighbors they describe.
pub trait SlideInterpolator: core::fmt::Debug {
    /// Style of the slide described by `cx` at `relative` distance from the scroll position.
    fn style(&self, relative: f64, cx: &InterpolationContext) -> SlideStyle;
}

/// A built-in profile resolved against a configuration and slide extent.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileInterpolator {
    opacity: Option<Keyframes>,
    scale: Option<Keyframes>,
    main: Option<Keyframes>,
    cross: Option<Keyframes>,
    rotation: Option<Keyframes>,
    stacked: bool,
}

impl ProfileInterpolator {
    /// Resolves `config.profile` for slides of `item_extent`.
    #[must_use]
    pub fn resolve(config: &CarouselConfig, item_extent: f64) -> Self {
        let size = item_extent;
        let opacity = config.inactive_slide_opacity;
        let neighbors = [-1.0, 0.0, 1.0];
        let fade = (opacity < 1.0).then(|| Keyframes::new(&neighbors, &[opacity, 1.0, opacity]));
        match config.profile {
            InterpolationProfile::Default => {
                let scale = config.inactive_slide_scale;
                Self {
                    opacity: fade,
                    scale: (scale < 1.0).then(|| Keyframes::new(&neighbors, &[scale, 1.0, scale])),
                    main: None,
                    cross: None,
                    rotation: None,
                    stacked: false,
                }
            }
            InterpolationProfile::Shift => {
                let shift = config.inactive_slide_shift;
                Self {
                    opacity: fade,
                    scale: None,
                    main: None,
                    cross: Some(Keyframes::new(&neighbors, &[shift, 0.0, shift])),
                    rotation: None,
                    stacked: false,
                }
            }
            InterpolationProfile::Stack => {
                let card_offset = config.card_offset.unwrap_or(STACK_CARD_OFFSET);
                let (card1, card2) = (0.9, 0.8);
                let translate = |card: f64, scale: f64| {
                    -(size * card / scale).round()
                        + ((size - size * scale) / 2.0).round()
                        + (card_offset * card / scale).round()
                };
                let fade_out = if opacity >= 1.0 {
                    [1.0, 1.0, 1.0, 0.0]
                } else {
                    [1.0, 0.75, 0.5, 0.0]
                };
                Self {
                    opacity: Some(Keyframes::new(&[0.0, 1.0, 2.0, 3.0], &fade_out)),
                    scale: Some(Keyframes::new(
                        &[-1.0, 0.0, 1.0, 2.0],
                        &[card1, 1.0, card1, card2],
                    )),
                    main: Some(Keyframes::new(
                        &[-1.0, 0.0, 1.0, 2.0, 3.0],
                        &[
                            -size * 0.5,
                            0.0,
                            translate(1.0, card1),
                            translate(2.0, card2),
                            translate(3.0, card2),
                        ],
                    )),
                    cross: None,
                    rotation: None,
                    stacked: true,
                }
            }
            InterpolationProfile::Tinder => {
                let card_offset = config.card_offset.unwrap_or(TINDER_CARD_OFFSET);
                let scales = [1.0, 0.96, 0.92, 0.88];
                let main = |card: f64, scale: f64| -(size * card / scale).round();
                let cross = |card: f64, scale: f64| (card_offset * card / scale).round();
                Self {
                    opacity: Some(Keyframes::new(
                        &[-1.0, 0.0, 1.0, 2.0, 3.0],
                        &[0.0, 1.0, 1.0, 1.0, 0.0],
                    )),
                    scale: Some(Keyframes::new(&[0.0, 1.0, 2.0, 3.0], &scales)),
                    main: Some(Keyframes::new(
                        &[-1.0, 0.0, 1.0, 2.0, 3.0],
                        &[
                            -size * 1.1,
                            0.0,
                            main(1.0, scales[1]),
                            main(2.0, scales[2]),
                            main(3.0, scales[3]),
                        ],
                    )),
                    cross: Some(Keyframes::new(
                        &[0.0, 1.0, 2.0, 3.0],
                        &[
                            0.0,
                            cross(1.0, scales[1]),
                            cross(2.0, scales[2]),
                            cross(3.0, scales[3]),
                        ],
                    )),
                    rotation: Some(Keyframes::new(&[-1.0, 0.0], &[-22.0, 0.0])),
                    stacked: true,
                }
            }
        }
    }
}

impl SlideInterpolator for ProfileInterpolator {
    fn style(&self, relative: f64, cx: &InterpolationContext) -> SlideStyle {
        let channel = |keys: &Option<Keyframes>, rest: f64| {
            keys.as_ref().map_or(rest, |keys| keys.sample(relative))
        };
        SlideStyle {
            opacity: channel(&self.opacity, 1.0).clamp(0.0, 1.0),
            scale: channel(&self.scale, 1.0),
            translate: cx.along(channel(&self.main, 0.0), channel(&self.cross, 0.0)),
            rotation_degrees: channel(&self.rotation, 0.0),
            z_index: if self.stacked { cx.stacking_order() } else { 0 },
        }
    }
}

/// Styles for every virtual index of one carousel.
///
/// Rebuilt whenever the item count, slide size, viewport size, or profile changes.
#[derive(Debug)]
pub struct InterpolatorSet {
    anchors: Vec<f64>,
    item_extent: f64,
    axis: Axis,
    profile: ProfileInterpolator,
    custom: Option<Box<dyn SlideInterpolator>>,
}

impl InterpolatorSet {
    /// Builds the set for `positions` under `config`.
    #[must_use]
    pub fn new(config: &CarouselConfig, positions: &PositionTable) -> Self {
        let mut set = Self {
            anchors: Vec::new(),
            item_extent: 0.0,
            axis: config.axis,
            profile: ProfileInterpolator::resolve(config, 0.0),
            custom: None,
        };
        set.rebuild(config, positions);
        set
    }

    /// Re-resolves the profile and slide anchors. A custom interpolator is kept.
    pub fn rebuild(&mut self, config: &CarouselConfig, positions: &PositionTable) {
        self.item_extent = positions.item_extent();
        self.axis = config.axis;
        self.profile = ProfileInterpolator::resolve(config, self.item_extent);
        self.anchors.clear();
        self.anchors
            .extend(positions.spans().iter().map(|span| span.start));
    }

    /// Replaces the built-in profile, or restores it with `None`.
    pub fn set_custom(&mut self, custom: Option<Box<dyn SlideInterpolator>>) {
        self.custom = custom;
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Returns `true` if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Relative distance of `virtual_index` from scroll `offset`.
    #[must_use]
    pub fn relative(&self, virtual_index: usize, offset: f64) -> Option<f64> {
        let anchor = *self.anchors.get(virtual_index)?;
        if self.item_extent > 0.0 {
            Some((anchor - offset) / self.item_extent)
        } else {
            Some(0.0)
        }
    }

    /// Style of `virtual_index` at scroll `offset`.
    #[must_use]
    pub fn style(&self, virtual_index: usize, offset: f64) -> Option<SlideStyle> {
        let relative = self.relative(virtual_index, offset)?;
        let cx = InterpolationContext {
            virtual_index,
            virtual_len: self.anchors.len(),
            item_extent: self.item_extent,
            axis: self.axis,
        };
        Some(match &self.custom {
            Some(custom) => custom.style(relative, &cx),
            None => self.profile.style(relative, &cx),
        })
    }

    /// Styles of every virtual index at scroll `offset`.
    pub fn styles(&self, offset: f64) -> impl Iterator<Item = SlideStyle> + '_ {
        (0..self.anchors.len()).filter_map(move |index| self.style(index, offset))
    }
}

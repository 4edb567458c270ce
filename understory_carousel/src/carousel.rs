// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel controller.

use alloc::boxed::Box;
use alloc::vec::{Drain, Vec};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Size;

use crate::{
    AutoplayScheduler, AutoplayState, Axis, CarouselConfig, CarouselEvent, InterpolatorSet,
    LayoutDirection, PendingSnap, PositionTable, ScrollCommand, ScrollHost, SlideInterpolator,
    SlideStyle, SnapPhase, TimerKind, TimerTable, VirtualIndexSpace, active_slide_tolerance,
    content_insets, decide_snap_target, resolve_active, scroll_position,
};

/// A carousel over `item_count` slides, driving a host scrollable.
///
/// The carousel owns all mutable state of one carousel instance: the scroll state,
/// the snap phase, autoplay, and its timers. Every method runs to completion on
/// the caller's thread. Time comes from the host: inputs that may start a timer
/// carry a `now_ms` timestamp, and due timers fire in [`Carousel::advance`].
///
/// Inputs from the host:
/// - [`Carousel::on_scroll`] for every scroll offset sample,
/// - [`Carousel::on_drag_begin`], [`Carousel::on_drag_end`], [`Carousel::on_momentum_end`]
///   for the gesture lifecycle,
/// - [`Carousel::on_touch_start`] / [`Carousel::on_touch_end`] to pause autoplay,
/// - [`Carousel::on_scroll_settled`] when an animated scroll command completes,
/// - [`Carousel::set_layout`], [`Carousel::set_item_count`], [`Carousel::set_config`]
///   when geometry or configuration changes,
/// - [`Carousel::advance`] to fire due timers.
///
/// Outputs go to the [`ScrollHost`] as [`ScrollCommand`]s and are queued as
/// [`CarouselEvent`]s for [`Carousel::drain_events`].
#[derive(Debug)]
pub struct Carousel<H: ScrollHost> {
    host: H,
    config: CarouselConfig,
    space: VirtualIndexSpace,
    positions: PositionTable,
    interpolators: InterpolatorSet,
    tolerance: f64,

    current_offset: f64,
    active_index: usize,
    reported_data: Option<usize>,
    settled_data: Option<usize>,
    phase: SnapPhase,
    reposition_from: Option<usize>,
    awaiting_momentum: bool,
    scroll_locked: bool,

    autoplay: AutoplayScheduler,
    timers: TimerTable,
    now_ms: u64,

    events: Vec<CarouselEvent>,
    mounted: bool,
}

impl<H: ScrollHost> Carousel<H> {
    /// Creates a carousel and scrolls the host to [`CarouselConfig::first_item`].
    ///
    /// An invalid configuration is reported once as a warning; the carousel then
    /// runs with zero-sized geometry, where snapping is a no-op.
    pub fn new(config: CarouselConfig, item_count: usize, host: H, now_ms: u64) -> Self {
        warn_if_invalid(&config);
        let space = index_space(&config, item_count, &host);
        let positions = PositionTable::new(space.len(), config.item_extent());
        let interpolators = InterpolatorSet::new(&config, &positions);
        let tolerance = active_slide_tolerance(config.item_extent(), config.active_slide_offset);
        let autoplay =
            AutoplayScheduler::new(config.autoplay.interval_ms, config.autoplay.delay_ms);
        let first_item = if config.first_item < item_count {
            config.first_item
        } else {
            0
        };

        let mut carousel = Self {
            host,
            config,
            space,
            positions,
            interpolators,
            tolerance,
            current_offset: 0.0,
            active_index: 0,
            reported_data: None,
            settled_data: None,
            phase: SnapPhase::Idle,
            reposition_from: None,
            awaiting_momentum: false,
            scroll_locked: false,
            autoplay,
            timers: TimerTable::new(),
            now_ms,
            events: Vec::new(),
            mounted: true,
        };
        carousel.realign(first_item);
        if carousel.config.autoplay.enabled {
            carousel.autoplay.start(&mut carousel.timers, now_ms);
        }
        carousel
    }

    // --- Accessors ---

    /// Data index of the active slide.
    #[must_use]
    pub fn current_data_index(&self) -> Option<usize> {
        self.space.to_data(self.active_index)
    }

    /// Last observed scroll offset.
    #[must_use]
    pub const fn current_scroll_offset(&self) -> f64 {
        self.current_offset
    }

    /// Virtual index of the active slide.
    #[must_use]
    pub const fn active_virtual_index(&self) -> usize {
        self.active_index
    }

    /// Continuous virtual position of the current scroll offset.
    #[must_use]
    pub fn scroll_position(&self) -> f64 {
        scroll_position(self.current_offset, self.positions.item_extent())
    }

    /// Gesture and snap phase.
    #[must_use]
    pub const fn phase(&self) -> &SnapPhase {
        &self.phase
    }

    /// Autoplay state.
    #[must_use]
    pub const fn autoplay_state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// The virtual index space.
    #[must_use]
    pub const fn index_space(&self) -> &VirtualIndexSpace {
        &self.space
    }

    /// Spans of every virtual index.
    #[must_use]
    pub const fn positions(&self) -> &PositionTable {
        &self.positions
    }

    /// Padding the host places before and after the strip.
    #[must_use]
    pub fn content_insets(&self) -> (f64, f64) {
        content_insets(
            self.config.alignment,
            self.config.slider_extent(),
            self.config.item_extent(),
        )
    }

    /// Total extent of the strip, insets excluded.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        self.positions.content_extent()
    }

    /// Style of `virtual_index` at the current scroll offset.
    #[must_use]
    pub fn slide_style(&self, virtual_index: usize) -> Option<SlideStyle> {
        self.interpolators.style(virtual_index, self.current_offset)
    }

    /// Styles of every virtual index at the current scroll offset.
    pub fn slide_styles(&self) -> impl Iterator<Item = SlideStyle> + '_ {
        self.interpolators.styles(self.current_offset)
    }

    /// Returns `true` while user scrolling is locked by an in-flight snap.
    #[must_use]
    pub const fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Returns `false` after [`Carousel::teardown`].
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Earliest pending timer deadline; the host should call [`Carousel::advance`] by then.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Shared access to the host adapter.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host adapter.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Removes and returns the queued events, oldest first.
    pub fn drain_events(&mut self) -> Drain<'_, CarouselEvent> {
        self.events.drain(..)
    }

    // --- Host inputs ---

    /// Handles a scroll offset sample taken at `now_ms`.
    pub fn on_scroll(&mut self, offset: f64, now_ms: u64) {
        if !self.mounted {
            return;
        }
        self.observe(now_ms);
        self.current_offset = offset;
        if self.awaiting_momentum {
            self.arm_momentum_fallback();
        }
        if !self.positions.is_usable() {
            return;
        }
        let index = resolve_active(&self.positions, offset, self.tolerance);
        if index != self.active_index {
            log::trace!(
                "carousel: active {} -> {index} at offset {offset}",
                self.active_index
            );
            self.active_index = index;
            self.report_active();
            if !self.config.snap_enabled {
                self.report_snapped(true);
            }
        }
        if let Some(&pending) = self.phase.pending()
            && pending.animated
            && (offset - pending.offset).abs() <= self.config.callback_offset_margin
        {
            self.settle();
        }
    }

    /// Handles the start of a drag at `offset`.
    ///
    /// A snap still in flight is abandoned; the drag's release decides the next target.
    pub fn on_drag_begin(&mut self, offset: f64, now_ms: u64) {
        if !self.mounted {
            return;
        }
        self.observe(now_ms);
        if self.phase.pending().is_some() {
            log::debug!("carousel: drag abandons in-flight snap");
            self.phase = SnapPhase::Idle;
            self.timers.cancel(TimerKind::SettleFallback);
            self.unlock_scroll();
        }
        self.cancel_reposition();
        self.stop_awaiting_momentum();
        self.on_scroll(offset, now_ms);
        self.phase = SnapPhase::Dragging {
            start_offset: offset,
            start_index: self.active_index,
        };
    }

    /// Handles the end of a drag at `offset`.
    ///
    /// Snaps unless snapping is disabled or momentum snapping is enabled. With
    /// momentum snapping the snap waits for [`Carousel::on_momentum_end`]; if no
    /// scroll sample arrives for [`CarouselConfig::momentum_fallback_ms`], the drag
    /// is released where it stands.
    pub fn on_drag_end(&mut self, offset: f64, now_ms: u64) {
        if !self.mounted {
            return;
        }
        self.on_scroll(offset, now_ms);
        if !self.phase.is_dragging() {
            return;
        }
        if !self.config.snap_enabled {
            self.phase = SnapPhase::Idle;
        } else if self.config.momentum_enabled {
            self.awaiting_momentum = true;
            self.arm_momentum_fallback();
        } else {
            self.release_drag(offset);
        }
    }

    /// Handles the end of momentum scrolling at `offset`.
    pub fn on_momentum_end(&mut self, offset: f64, now_ms: u64) {
        if !self.mounted {
            return;
        }
        self.on_scroll(offset, now_ms);
        self.stop_awaiting_momentum();
        if self.config.momentum_enabled && self.phase.is_dragging() {
            self.release_drag(offset);
        }
    }

    /// Handles completion of an animated scroll command.
    pub fn on_scroll_settled(&mut self, now_ms: u64) {
        if self.mounted && self.phase.pending().is_some() {
            self.observe(now_ms);
            self.settle();
        }
    }

    /// Pauses autoplay while the user touches the carousel.
    pub fn on_touch_start(&mut self, now_ms: u64) {
        if self.mounted {
            self.observe(now_ms);
            self.autoplay.pause(&mut self.timers);
        }
    }

    /// Resumes autoplay paused by [`Carousel::on_touch_start`] with a full interval from `now_ms`.
    pub fn on_touch_end(&mut self, now_ms: u64) {
        if self.mounted {
            self.observe(now_ms);
            self.autoplay.resume(&mut self.timers, self.now_ms);
        }
    }

    /// Fires every timer due at `now_ms`, in deadline order.
    pub fn advance(&mut self, now_ms: u64) {
        if !self.mounted {
            return;
        }
        self.observe(now_ms);
        while let Some((kind, _deadline)) = self.timers.pop_due(self.now_ms) {
            match kind {
                TimerKind::AutoplayDelay | TimerKind::AutoplayInterval => {
                    if self.autoplay.on_timer(kind, &mut self.timers, self.now_ms) {
                        self.step(true, true, self.now_ms);
                    }
                }
                TimerKind::Reposition => {
                    if let Some(from) = self.reposition_from.take() {
                        self.reposition(from);
                    }
                }
                TimerKind::SettleFallback => {
                    if self.phase.pending().is_some() {
                        self.settle();
                    }
                }
                TimerKind::ScrollLock => self.unlock_scroll(),
                TimerKind::MomentumFallback => {
                    if self.awaiting_momentum {
                        log::debug!("carousel: no momentum after release");
                        self.awaiting_momentum = false;
                        self.release_drag(self.current_offset);
                    }
                }
            }
        }
    }

    /// Applies new slide and viewport sizes, keeping the active data index.
    pub fn set_layout(&mut self, item_size: Size, slider_size: Size) {
        if !self.mounted {
            return;
        }
        if item_size == self.config.item_size && slider_size == self.config.slider_size {
            return;
        }
        self.config.item_size = item_size;
        self.config.slider_size = slider_size;
        warn_if_invalid(&self.config);
        self.rebuild(self.space.data_len());
    }

    /// Applies a new item count, clamping the active data index into range.
    pub fn set_item_count(&mut self, item_count: usize) {
        if !self.mounted || item_count == self.space.data_len() {
            return;
        }
        self.rebuild(item_count);
    }

    /// Applies a new configuration at `now_ms`, keeping the active data index.
    pub fn set_config(&mut self, config: CarouselConfig, now_ms: u64) {
        if !self.mounted || config == self.config {
            return;
        }
        self.observe(now_ms);
        warn_if_invalid(&config);
        let autoplay_was = self.config.autoplay;
        self.config = config;
        self.autoplay
            .set_timing(self.config.autoplay.interval_ms, self.config.autoplay.delay_ms);
        if autoplay_was.enabled != self.config.autoplay.enabled {
            if self.config.autoplay.enabled {
                self.autoplay.start(&mut self.timers, self.now_ms);
            } else {
                self.autoplay.stop(&mut self.timers);
            }
        }
        self.rebuild(self.space.data_len());
    }

    /// Replaces the configured interpolation profile, or restores it with `None`.
    pub fn set_custom_interpolator(&mut self, interpolator: Option<Box<dyn SlideInterpolator>>) {
        self.interpolators.set_custom(interpolator);
    }

    /// Cancels every timer and turns later calls into no-ops.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        log::debug!("carousel: teardown");
        self.autoplay.stop(&mut self.timers);
        self.timers.clear();
        self.phase = SnapPhase::Idle;
        self.reposition_from = None;
        self.awaiting_momentum = false;
        self.scroll_locked = false;
        self.current_offset = 0.0;
        self.events.clear();
        self.mounted = false;
    }

    // --- Imperative commands ---

    /// Snaps to `data_index`, clamped into range.
    ///
    /// Does nothing if that item is already active and nothing is in flight.
    pub fn snap_to_item(
        &mut self,
        data_index: usize,
        animated: bool,
        fire_callback: bool,
        now_ms: u64,
    ) {
        let Some(target) = self.space.to_virtual(data_index) else {
            return;
        };
        let in_flight = self.phase.pending().map(|pending| pending.target);
        if in_flight == Some(target) || (in_flight.is_none() && target == self.active_index) {
            return;
        }
        if self.mounted {
            self.observe(now_ms);
        }
        self.snap_to_virtual(target, animated, fire_callback);
    }

    /// Snaps to the next data item.
    ///
    /// Without looping this does nothing on the last item.
    pub fn snap_to_next(&mut self, animated: bool, now_ms: u64) {
        self.step(true, animated, now_ms);
    }

    /// Snaps to the previous data item.
    ///
    /// Without looping this does nothing on the first item.
    pub fn snap_to_prev(&mut self, animated: bool, now_ms: u64) {
        self.step(false, animated, now_ms);
    }

    /// Starts autoplay at `now_ms`. Does nothing if already playing.
    pub fn start_autoplay(&mut self, now_ms: u64) {
        if self.mounted {
            self.observe(now_ms);
            self.autoplay.start(&mut self.timers, self.now_ms);
        }
    }

    /// Stops autoplay.
    pub fn stop_autoplay(&mut self) {
        if self.mounted {
            self.autoplay.stop(&mut self.timers);
        }
    }

    // --- Snap engine ---

    /// Moves the clock forward; timestamps older than the last one seen are ignored.
    fn observe(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn step(&mut self, forward: bool, animated: bool, now_ms: u64) {
        if !self.mounted {
            return;
        }
        self.observe(now_ms);
        let base = self
            .phase
            .pending()
            .map_or(self.active_index, |pending| pending.target);
        if let Some(target) = self.space.step(base, forward) {
            self.snap_to_virtual(target, animated, true);
        }
    }

    fn release_drag(&mut self, end_offset: f64) {
        let SnapPhase::Dragging {
            start_offset,
            start_index,
        } = self.phase
        else {
            return;
        };
        self.phase = SnapPhase::Idle;
        let end_index = resolve_active(&self.positions, end_offset, self.tolerance);
        let decided = decide_snap_target(
            start_index,
            end_index,
            end_offset - start_offset,
            self.config.swipe_threshold,
        );
        // A swipe past either end of the strip wraps when looping and stays put otherwise.
        let target = match decided {
            Some(target) if self.space.clamp(target) == Some(target) => target,
            _ => {
                let toward_end = end_offset > start_offset;
                self.space
                    .step(start_index, toward_end != self.space.is_mirrored())
                    .unwrap_or(start_index)
            }
        };
        log::debug!(
            "carousel: release {start_index}@{start_offset} -> {end_index}@{end_offset}, snapping to {target}"
        );
        self.snap_to_virtual(target, true, true);
    }

    /// Issues the scroll command for `target`. A snap in flight is superseded.
    fn snap_to_virtual(&mut self, target: usize, animated: bool, fire_callback: bool) {
        if !self.mounted || !self.positions.is_usable() {
            return;
        }
        let Some(target) = self.space.clamp(target) else {
            return;
        };
        let Some(span) = self.positions.position_of(target) else {
            return;
        };
        self.timers.cancel(TimerKind::SettleFallback);
        self.cancel_reposition();
        self.stop_awaiting_momentum();

        let data = self.space.to_data(target);
        let fresh = data != self.settled_data;
        if fresh && fire_callback && let Some(data) = data {
            self.events.push(CarouselEvent::BeforeSnap(data));
        }
        if animated && fresh && self.config.lock_scroll_while_snapping {
            self.lock_scroll();
        }

        log::debug!(
            "carousel: snap to {target} (data {data:?}) at {}, animated {animated}",
            span.start
        );
        self.phase = SnapPhase::Settling(PendingSnap {
            target,
            offset: span.start,
            animated,
            fire_callback,
        });
        self.host.scroll_to(ScrollCommand {
            offset: span.start,
            animated,
        });

        let arrived = (self.current_offset - span.start).abs() <= self.config.callback_offset_margin;
        if !animated || arrived {
            self.settle();
        } else if !self.host.settles_reliably() {
            self.timers.arm(
                TimerKind::SettleFallback,
                self.now_ms,
                self.config.settle_fallback_ms,
            );
        }
    }

    fn settle(&mut self) {
        let SnapPhase::Settling(pending) = self.phase else {
            return;
        };
        self.phase = SnapPhase::Idle;
        self.timers.cancel(TimerKind::SettleFallback);
        self.unlock_scroll();

        self.current_offset = pending.offset;
        self.active_index = pending.target;
        self.report_active();
        self.report_snapped(pending.fire_callback);
        log::debug!("carousel: settled on {}", pending.target);

        if self.space.is_clone(pending.target) {
            if self.config.reposition_delay_ms == 0 {
                self.reposition(pending.target);
            } else {
                self.reposition_from = Some(pending.target);
                self.timers.arm(
                    TimerKind::Reposition,
                    self.now_ms,
                    self.config.reposition_delay_ms,
                );
            }
        }
    }

    /// Jumps from a clone slot to the canonical slot showing the same item.
    fn reposition(&mut self, from: usize) {
        if self.phase != SnapPhase::Idle || self.active_index != from {
            return;
        }
        let Some(canonical) = self.space.canonical(from) else {
            return;
        };
        let Some(span) = self.positions.position_of(canonical) else {
            return;
        };
        if canonical == from {
            return;
        }
        log::debug!("carousel: reposition {from} -> {canonical}");
        self.host.scroll_to(ScrollCommand {
            offset: span.start,
            animated: false,
        });
        self.current_offset = span.start;
        self.active_index = canonical;
    }

    fn arm_momentum_fallback(&mut self) {
        self.timers.arm(
            TimerKind::MomentumFallback,
            self.now_ms,
            self.config.momentum_fallback_ms,
        );
    }

    fn stop_awaiting_momentum(&mut self) {
        self.awaiting_momentum = false;
        self.timers.cancel(TimerKind::MomentumFallback);
    }

    fn cancel_reposition(&mut self) {
        self.reposition_from = None;
        self.timers.cancel(TimerKind::Reposition);
    }

    fn lock_scroll(&mut self) {
        if !self.scroll_locked {
            self.scroll_locked = true;
            self.host.set_scroll_enabled(false);
        }
        self.timers.arm(
            TimerKind::ScrollLock,
            self.now_ms,
            self.config.lock_scroll_timeout_ms,
        );
    }

    fn unlock_scroll(&mut self) {
        self.timers.cancel(TimerKind::ScrollLock);
        if self.scroll_locked {
            self.scroll_locked = false;
            self.host.set_scroll_enabled(true);
        }
    }

    fn report_active(&mut self) {
        let data = self.space.to_data(self.active_index);
        if data != self.reported_data {
            self.reported_data = data;
            if let Some(data) = data {
                self.events.push(CarouselEvent::ActiveIndexChanged(data));
            }
        }
    }

    fn report_snapped(&mut self, fire_callback: bool) {
        let data = self.space.to_data(self.active_index);
        if data != self.settled_data {
            self.settled_data = data;
            if fire_callback && let Some(data) = data {
                self.events.push(CarouselEvent::Snapped(data));
            }
        }
    }

    // --- Geometry ---

    fn rebuild(&mut self, item_count: usize) {
        let keep = self
            .current_data_index()
            .unwrap_or(0)
            .min(item_count.saturating_sub(1));
        self.space = index_space(&self.config, item_count, &self.host);
        self.positions
            .rebuild(self.space.len(), self.config.item_extent());
        self.interpolators.rebuild(&self.config, &self.positions);
        self.tolerance =
            active_slide_tolerance(self.config.item_extent(), self.config.active_slide_offset);
        self.realign(keep);
    }

    /// Drops anything in flight and jumps to `data_index` without callbacks.
    fn realign(&mut self, data_index: usize) {
        if self.phase.pending().is_some() {
            self.phase = SnapPhase::Idle;
        }
        self.timers.cancel(TimerKind::SettleFallback);
        self.cancel_reposition();
        self.unlock_scroll();

        let Some(target) = self.space.to_virtual(data_index) else {
            self.active_index = 0;
            self.current_offset = 0.0;
            self.reported_data = None;
            self.settled_data = None;
            return;
        };
        self.active_index = target;
        self.current_offset = self
            .positions
            .position_of(target)
            .map_or(0.0, |span| span.start);
        if self.positions.is_usable() {
            self.host.scroll_to(ScrollCommand {
                offset: self.current_offset,
                animated: false,
            });
        }
        self.reported_data = self.space.to_data(target);
        self.settled_data = self.reported_data;
    }
}

fn index_space<H: ScrollHost>(
    config: &CarouselConfig,
    item_count: usize,
    host: &H,
) -> VirtualIndexSpace {
    let mirrored = config.direction == LayoutDirection::Rtl
        && config.axis == Axis::Horizontal
        && !host.mirrors_rtl_natively();
    VirtualIndexSpace::new(
        item_count,
        config.looping,
        config.loop_clones_per_side,
        mirrored,
    )
}

fn warn_if_invalid(config: &CarouselConfig) {
    if let Err(err) = config.validate() {
        log::warn!("carousel: {err}; running with degenerate geometry");
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::Size;

    use super::Carousel;
    use crate::{
        AutoplayState, Axis, CarouselConfig, CarouselEvent, LayoutDirection, ScrollCommand,
        ScrollHost, SnapPhase,
    };

    #[derive(Debug, Default)]
    struct RecordingHost {
        commands: Vec<ScrollCommand>,
        scroll_enabled: Vec<bool>,
        unreliable: bool,
        flips_rtl: bool,
    }

    impl ScrollHost for RecordingHost {
        fn scroll_to(&mut self, command: ScrollCommand) {
            self.commands.push(command);
        }

        fn set_scroll_enabled(&mut self, enabled: bool) {
            self.scroll_enabled.push(enabled);
        }

        fn settles_reliably(&self) -> bool {
            !self.unreliable
        }

        fn mirrors_rtl_natively(&self) -> bool {
            !self.flips_rtl
        }
    }

    fn config() -> CarouselConfig {
        CarouselConfig::new(
            Axis::Horizontal,
            Size::new(100.0, 80.0),
            Size::new(300.0, 80.0),
        )
    }

    fn carousel(config: CarouselConfig, items: usize) -> Carousel<RecordingHost> {
        Carousel::new(config, items, RecordingHost::default(), 0)
    }

    fn events(carousel: &mut Carousel<RecordingHost>) -> Vec<CarouselEvent> {
        carousel.drain_events().collect()
    }

    fn last_command(carousel: &Carousel<RecordingHost>) -> ScrollCommand {
        *carousel.host().commands.last().unwrap()
    }

    const fn jump(offset: f64) -> ScrollCommand {
        ScrollCommand {
            offset,
            animated: false,
        }
    }

    const fn animate(offset: f64) -> ScrollCommand {
        ScrollCommand {
            offset,
            animated: true,
        }
    }

    #[test]
    fn starts_on_first_item_without_callbacks() {
        let mut c = carousel(config().with_first_item(2), 5);
        assert_eq!(c.host().commands, vec![jump(200.0)]);
        assert_eq!(c.current_data_index(), Some(2));
        assert_eq!(c.current_scroll_offset(), 200.0);
        assert!(events(&mut c).is_empty());
        assert_eq!(c.slide_style(2).unwrap().opacity, 1.0);
    }

    #[test]
    fn out_of_range_first_item_falls_back_to_zero() {
        let c = carousel(config().with_first_item(9), 5);
        assert_eq!(c.current_data_index(), Some(0));
        assert_eq!(c.host().commands, vec![jump(0.0)]);
    }

    #[test]
    fn long_swipe_advances_one_slide() {
        let mut c = carousel(config().with_first_item(2), 5);
        c.on_drag_begin(200.0, 0);
        c.on_scroll(235.0, 0);
        c.on_drag_end(235.0, 0);
        assert_eq!(last_command(&c), animate(300.0));
        assert_eq!(events(&mut c), vec![CarouselEvent::BeforeSnap(3)]);
        assert_eq!(c.phase().pending().map(|p| p.target), Some(3));

        c.on_scroll_settled(0);
        assert_eq!(
            events(&mut c),
            vec![
                CarouselEvent::ActiveIndexChanged(3),
                CarouselEvent::Snapped(3)
            ]
        );
        assert_eq!(c.phase(), &SnapPhase::Idle);
        assert_eq!(c.current_data_index(), Some(3));
    }

    #[test]
    fn short_swipe_returns_without_callbacks() {
        let mut c = carousel(config().with_first_item(2), 5);
        c.on_drag_begin(200.0, 0);
        c.on_drag_end(210.0, 0);
        assert_eq!(last_command(&c), animate(200.0));
        assert!(events(&mut c).is_empty());

        // A sample within the offset margin settles the snap.
        c.on_scroll(203.0, 0);
        assert_eq!(c.phase(), &SnapPhase::Idle);
        assert!(events(&mut c).is_empty());
    }

    #[test]
    fn snapping_to_the_active_item_is_a_no_op() {
        let mut c = carousel(config().with_first_item(2), 5);
        c.snap_to_item(2, true, true, 0);
        assert_eq!(c.host().commands.len(), 1);
        assert!(events(&mut c).is_empty());

        c.snap_to_item(99, false, true, 0);
        assert_eq!(last_command(&c), jump(400.0));
        assert_eq!(
            events(&mut c),
            vec![
                CarouselEvent::BeforeSnap(4),
                CarouselEvent::ActiveIndexChanged(4),
                CarouselEvent::Snapped(4)
            ]
        );
    }

    #[test]
    fn silent_snap_skips_callbacks() {
        let mut c = carousel(config(), 5);
        c.snap_to_item(3, false, false, 0);
        assert_eq!(
            events(&mut c),
            vec![CarouselEvent::ActiveIndexChanged(3)]
        );
        assert_eq!(c.current_data_index(), Some(3));
    }

    #[test]
    fn autoplay_stops_at_the_end_without_loop() {
        let mut c = carousel(config().with_autoplay(3000, 0), 4);
        assert_eq!(c.autoplay_state(), AutoplayState::Running);
        for t in [3000, 6000, 9000] {
            c.advance(t);
            let offset = last_command(&c).offset;
            c.on_scroll(offset, t);
        }
        let snapped: Vec<_> = events(&mut c)
            .into_iter()
            .filter(|e| matches!(e, CarouselEvent::Snapped(_)))
            .collect();
        assert_eq!(
            snapped,
            vec![
                CarouselEvent::Snapped(1),
                CarouselEvent::Snapped(2),
                CarouselEvent::Snapped(3)
            ]
        );

        let issued = c.host().commands.len();
        c.advance(12000);
        assert_eq!(c.host().commands.len(), issued);
        assert_eq!(c.current_data_index(), Some(3));
        assert_eq!(c.next_deadline(), Some(15000));
    }

    #[test]
    fn autoplay_delay_and_touch_pause() {
        let mut c = carousel(config().with_autoplay(3000, 1000), 4);
        assert_eq!(c.autoplay_state(), AutoplayState::Armed);
        assert_eq!(c.next_deadline(), Some(1000));

        c.advance(1000);
        assert_eq!(c.autoplay_state(), AutoplayState::Running);
        assert_eq!(c.next_deadline(), Some(4000));

        c.on_touch_start(1000);
        assert_eq!(c.autoplay_state(), AutoplayState::Paused);
        assert_eq!(c.next_deadline(), None);

        c.advance(2000);
        c.on_touch_end(2000);
        assert_eq!(c.autoplay_state(), AutoplayState::Running);
        assert_eq!(c.next_deadline(), Some(5000));

        c.stop_autoplay();
        assert_eq!(c.autoplay_state(), AutoplayState::Stopped);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn settling_in_a_clone_jumps_to_the_canonical_slot() {
        let mut c = carousel(config().with_loop(2), 3);
        assert_eq!(c.host().commands, vec![jump(200.0)]);

        c.snap_to_prev(true, 0);
        assert_eq!(last_command(&c), animate(100.0));
        c.on_scroll_settled(0);

        assert_eq!(last_command(&c), jump(400.0));
        assert_eq!(c.active_virtual_index(), 4);
        assert_eq!(c.current_data_index(), Some(2));
        assert_eq!(
            events(&mut c),
            vec![
                CarouselEvent::BeforeSnap(2),
                CarouselEvent::ActiveIndexChanged(2),
                CarouselEvent::Snapped(2)
            ]
        );
    }

    #[test]
    fn delayed_reposition_fires_from_a_timer() {
        let mut config = config().with_loop(2);
        config.reposition_delay_ms = 50;
        let mut c = carousel(config, 3);
        c.snap_to_prev(true, 0);
        c.on_scroll_settled(0);
        assert_eq!(last_command(&c), animate(100.0));
        assert_eq!(c.next_deadline(), Some(50));

        c.advance(50);
        assert_eq!(last_command(&c), jump(400.0));
        assert_eq!(c.active_virtual_index(), 4);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn a_new_snap_cancels_a_pending_reposition() {
        let mut config = config().with_loop(2);
        config.reposition_delay_ms = 50;
        let mut c = carousel(config, 3);
        c.snap_to_prev(true, 0);
        c.on_scroll_settled(0);

        c.snap_to_next(true, 0);
        assert_eq!(last_command(&c), animate(200.0));
        assert_eq!(c.next_deadline(), None);

        c.advance(100);
        assert_eq!(c.host().commands.len(), 3);
    }

    #[test]
    fn unreliable_host_settles_on_a_timer() {
        let host = RecordingHost {
            unreliable: true,
            ..RecordingHost::default()
        };
        let mut c = Carousel::new(config(), 5, host, 0);
        c.snap_to_next(true, 0);
        assert_eq!(c.next_deadline(), Some(250));
        assert!(events(&mut c).contains(&CarouselEvent::BeforeSnap(1)));

        c.advance(250);
        assert_eq!(c.phase(), &SnapPhase::Idle);
        assert!(events(&mut c).contains(&CarouselEvent::Snapped(1)));
    }

    #[test]
    fn snap_to_next_chains_from_the_pending_target() {
        let mut c = carousel(config(), 5);
        c.snap_to_next(true, 0);
        c.snap_to_next(true, 0);
        assert_eq!(last_command(&c), animate(200.0));
        c.on_scroll_settled(0);
        assert_eq!(c.current_data_index(), Some(2));
    }

    #[test]
    fn scroll_lock_is_released_on_settle_or_timeout() {
        let mut config = config();
        config.lock_scroll_while_snapping = true;
        let mut c = carousel(config, 5);

        c.snap_to_next(true, 0);
        assert!(c.is_scroll_locked());
        c.on_scroll_settled(0);
        assert!(!c.is_scroll_locked());
        assert_eq!(c.host().scroll_enabled, vec![false, true]);

        c.snap_to_next(true, 0);
        assert!(c.is_scroll_locked());
        c.advance(1000);
        assert!(!c.is_scroll_locked());
        assert!(c.phase().pending().is_some());
    }

    #[test]
    fn dragging_abandons_an_in_flight_snap() {
        let mut c = carousel(config(), 5);
        c.snap_to_next(true, 0);
        c.on_drag_begin(40.0, 0);
        assert_eq!(
            c.phase(),
            &SnapPhase::Dragging {
                start_offset: 40.0,
                start_index: 0
            }
        );
        c.on_scroll_settled(0);
        assert_eq!(events(&mut c), vec![CarouselEvent::BeforeSnap(1)]);
    }

    #[test]
    fn snapping_disabled_reports_while_scrolling() {
        let mut config = config();
        config.snap_enabled = false;
        let mut c = carousel(config, 5);
        c.on_drag_begin(0.0, 0);
        c.on_scroll(100.0, 0);
        c.on_drag_end(100.0, 0);
        assert_eq!(c.phase(), &SnapPhase::Idle);
        assert_eq!(c.host().commands.len(), 1);
        assert_eq!(
            events(&mut c),
            vec![
                CarouselEvent::ActiveIndexChanged(1),
                CarouselEvent::Snapped(1)
            ]
        );
    }

    #[test]
    fn momentum_snaps_when_momentum_ends() {
        let mut config = config();
        config.momentum_enabled = true;
        let mut c = carousel(config, 5);
        c.on_drag_begin(0.0, 0);
        c.on_drag_end(35.0, 0);
        assert!(c.phase().is_dragging());
        assert_eq!(c.host().commands.len(), 1);

        c.on_momentum_end(60.0, 0);
        assert_eq!(last_command(&c), animate(100.0));
    }

    #[test]
    fn rtl_mirrors_when_the_host_does_not() {
        let mut config = config();
        config.direction = LayoutDirection::Rtl;
        let host = RecordingHost {
            flips_rtl: true,
            ..RecordingHost::default()
        };
        let mut c = Carousel::new(config, 5, host, 0);
        assert!(c.index_space().is_mirrored());
        assert_eq!(c.host().commands, vec![jump(400.0)]);

        c.snap_to_next(true, 0);
        assert_eq!(last_command(&c), animate(300.0));
        c.on_scroll_settled(0);
        assert_eq!(c.current_data_index(), Some(1));
    }

    #[test]
    fn geometry_changes_keep_the_active_item() {
        let mut c = carousel(config().with_first_item(4), 5);
        c.set_item_count(3);
        assert_eq!(c.current_data_index(), Some(2));
        assert_eq!(last_command(&c), jump(200.0));

        c.set_layout(Size::new(200.0, 80.0), Size::new(300.0, 80.0));
        assert_eq!(last_command(&c), jump(400.0));
        assert_eq!(c.content_extent(), 600.0);
        assert_eq!(c.content_insets(), (50.0, 50.0));
        assert!(events(&mut c).is_empty());
    }

    #[test]
    fn enabling_autoplay_through_config() {
        let mut c = carousel(config(), 5);
        c.set_config(config().with_autoplay(500, 0), 0);
        assert_eq!(c.autoplay_state(), AutoplayState::Running);
        assert_eq!(c.next_deadline(), Some(500));
        c.set_config(config(), 0);
        assert_eq!(c.autoplay_state(), AutoplayState::Stopped);
    }

    #[test]
    fn missing_geometry_degrades_to_no_ops() {
        let mut c = carousel(CarouselConfig::default(), 5);
        assert!(c.host().commands.is_empty());
        c.snap_to_next(true, 0);
        c.on_scroll(50.0, 0);
        c.on_drag_begin(50.0, 0);
        c.on_drag_end(90.0, 0);
        assert!(c.host().commands.is_empty());
        assert_eq!(c.current_data_index(), Some(0));
    }

    #[test]
    fn empty_carousel_has_no_active_item() {
        let mut c = carousel(config(), 0);
        assert_eq!(c.current_data_index(), None);
        c.snap_to_next(true, 0);
        c.snap_to_item(0, true, true, 0);
        assert!(c.host().commands.is_empty());
        assert!(events(&mut c).is_empty());
    }

    #[test]
    fn teardown_turns_everything_into_no_ops() {
        let mut c = carousel(config().with_autoplay(100, 0), 5);
        c.snap_to_next(true, 0);
        c.teardown();
        assert!(!c.is_mounted());
        assert_eq!(c.next_deadline(), None);
        assert!(events(&mut c).is_empty());

        let issued = c.host().commands.len();
        c.advance(10_000);
        c.snap_to_next(true, 0);
        c.on_scroll(300.0, 0);
        c.on_scroll_settled(0);
        assert_eq!(c.host().commands.len(), issued);
        assert!(events(&mut c).is_empty());
    }

    fn mirrored_carousel(first_item: usize) -> Carousel<RecordingHost> {
        let mut config = config().with_first_item(first_item);
        config.direction = LayoutDirection::Rtl;
        let host = RecordingHost {
            flips_rtl: true,
            ..RecordingHost::default()
        };
        Carousel::new(config, 5, host, 0)
    }

    #[test]
    fn rtl_drags_follow_the_finger_at_every_length() {
        for (delta, landing) in [(35.0, 300.0), (60.0, 300.0), (90.0, 300.0), (-35.0, 100.0)] {
            let mut c = mirrored_carousel(2);
            assert_eq!(c.host().commands, vec![jump(200.0)]);
            c.on_drag_begin(200.0, 0);
            c.on_drag_end(200.0 + delta, 0);
            assert_eq!(last_command(&c), animate(landing), "drag by {delta}");
        }
    }

    #[test]
    fn rtl_swipe_towards_higher_offsets_shows_the_previous_item() {
        let mut c = mirrored_carousel(2);
        c.on_drag_begin(200.0, 0);
        c.on_drag_end(235.0, 0);
        c.on_scroll_settled(0);
        assert_eq!(c.active_virtual_index(), 3);
        assert_eq!(c.current_data_index(), Some(1));
    }

    #[test]
    fn resumed_autoplay_waits_a_full_interval_from_the_release() {
        let mut c = carousel(config().with_autoplay(3000, 0), 4);
        c.advance(3000);
        c.on_scroll(100.0, 3000);
        c.on_touch_start(3500);
        c.on_touch_end(20_000);
        assert_eq!(c.next_deadline(), Some(23_000));
    }

    #[test]
    fn settle_fallback_counts_from_the_snap() {
        let host = RecordingHost {
            unreliable: true,
            ..RecordingHost::default()
        };
        let mut c = Carousel::new(config().with_loop(2), 3, host, 0);
        c.snap_to_prev(true, 10_000);
        assert_eq!(c.next_deadline(), Some(10_250));

        c.advance(10_016);
        assert!(c.phase().pending().is_some());
        assert_eq!(last_command(&c), animate(100.0));

        c.advance(10_250);
        assert_eq!(c.phase(), &SnapPhase::Idle);
        assert_eq!(last_command(&c), jump(400.0));
    }

    #[test]
    fn swiping_past_the_ends_wraps_without_clones() {
        let mut c = carousel(config().with_loop(0).with_first_item(4), 5);
        assert!(c.index_space().is_looping());
        c.on_drag_begin(400.0, 0);
        c.on_drag_end(435.0, 0);
        assert_eq!(last_command(&c), animate(0.0));

        let mut c = carousel(config().with_loop(0), 5);
        c.on_drag_begin(0.0, 0);
        c.on_drag_end(-35.0, 0);
        assert_eq!(last_command(&c), animate(400.0));
    }

    #[test]
    fn swiping_past_the_end_without_loop_stays_put() {
        let mut c = carousel(config().with_first_item(4), 5);
        c.on_drag_begin(400.0, 0);
        c.on_drag_end(435.0, 0);
        assert_eq!(last_command(&c), animate(400.0));
        assert!(events(&mut c).is_empty());
    }

    #[test]
    fn autoplay_wraps_through_the_clone_region() {
        let mut c = carousel(config().with_loop(1).with_autoplay(1000, 0), 3);
        assert_eq!(c.host().commands, vec![jump(100.0)]);
        for t in [1000, 2000, 3000, 4000] {
            c.advance(t);
            let offset = last_command(&c).offset;
            c.on_scroll(offset, t);
            if t == 3000 {
                assert_eq!(last_command(&c), jump(100.0));
                assert_eq!(c.active_virtual_index(), 1);
            }
        }
        let snapped: Vec<_> = events(&mut c)
            .into_iter()
            .filter(|e| matches!(e, CarouselEvent::Snapped(_)))
            .collect();
        assert_eq!(
            snapped,
            vec![
                CarouselEvent::Snapped(1),
                CarouselEvent::Snapped(2),
                CarouselEvent::Snapped(0),
                CarouselEvent::Snapped(1)
            ]
        );
        assert_eq!(c.active_virtual_index(), 2);
    }

    #[test]
    fn snapping_again_to_a_settled_item_is_a_no_op() {
        let mut c = carousel(config(), 5);
        c.snap_to_item(3, true, true, 0);
        c.on_scroll_settled(0);
        assert_eq!(c.current_data_index(), Some(3));
        let issued = c.host().commands.len();
        let _ = events(&mut c);

        c.snap_to_item(3, true, true, 10);
        c.snap_to_item(3, false, true, 20);
        assert_eq!(c.host().commands.len(), issued);
        assert!(events(&mut c).is_empty());
        assert_eq!(c.phase(), &SnapPhase::Idle);
    }

    #[test]
    fn momentum_that_never_reports_its_end_is_released() {
        let mut config = config();
        config.momentum_enabled = true;
        let mut c = carousel(config, 5);
        c.on_drag_begin(0.0, 0);
        c.on_drag_end(35.0, 0);
        assert_eq!(c.next_deadline(), Some(100));

        // Samples keep the release waiting.
        c.on_scroll(50.0, 80);
        c.advance(120);
        assert!(c.phase().is_dragging());

        c.advance(180);
        assert_eq!(last_command(&c), animate(100.0));
        assert!(c.phase().pending().is_some());
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A looping, autoplaying carousel driven by a simulated scroll view.
//!
//! The simulated host animates programmatic scrolls over a fixed duration, reports
//! offset samples every frame, and acknowledges completion. Halfway through, the
//! "user" swipes backwards, pausing autoplay for the duration of the touch.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_carousel_examples --example carousel_autoplay`

use kurbo::Size;
use understory_carousel::{
    Axis, Carousel, CarouselConfig, CarouselEvent, InterpolationProfile, ScrollCommand,
    ScrollHost,
};

const FRAME_MS: u64 = 16;
const ANIMATION_MS: u64 = 300;

/// A scroll view that eases linearly towards the last requested offset.
#[derive(Debug, Default)]
struct SimulatedScrollView {
    offset: f64,
    from: f64,
    to: f64,
    started_at: u64,
    animating: bool,
    now: u64,
}

impl SimulatedScrollView {
    /// Moves the animation forward to `now`. Returns `true` when it just finished.
    fn tick(&mut self, now: u64) -> bool {
        self.now = now;
        if !self.animating {
            return false;
        }
        let t = ((now - self.started_at) as f64 / ANIMATION_MS as f64).min(1.0);
        self.offset = self.from + (self.to - self.from) * t;
        if t >= 1.0 {
            self.animating = false;
            return true;
        }
        false
    }
}

impl ScrollHost for SimulatedScrollView {
    fn scroll_to(&mut self, command: ScrollCommand) {
        if command.animated {
            self.from = self.offset;
            self.to = command.offset;
            self.started_at = self.now;
            self.animating = true;
        } else {
            self.offset = command.offset;
            self.animating = false;
        }
    }
}

fn report(carousel: &mut Carousel<SimulatedScrollView>, now: u64) {
    for event in carousel.drain_events() {
        match event {
            CarouselEvent::BeforeSnap(index) => println!("{now:>6} ms  heading to item {index}"),
            CarouselEvent::Snapped(index) => println!("{now:>6} ms  snapped to item {index}"),
            CarouselEvent::ActiveIndexChanged(_) => {}
        }
    }
}

fn main() {
    env_logger::init();

    let config = CarouselConfig::new(
        Axis::Horizontal,
        Size::new(240.0, 160.0),
        Size::new(320.0, 160.0),
    )
    .with_loop(2)
    .with_autoplay(1000, 500)
    .with_profile(InterpolationProfile::Stack);

    let mut carousel = Carousel::new(config, 4, SimulatedScrollView::default(), 0);
    println!(
        "{} virtual slides, content extent {}, insets {:?}",
        carousel.index_space().len(),
        carousel.content_extent(),
        carousel.content_insets(),
    );

    let mut now = 0;
    while now <= 8000 {
        // The user swipes backwards between 3.2 s and 3.5 s.
        if now == 3200 {
            carousel.on_touch_start(now);
            let offset = carousel.host().offset;
            carousel.on_drag_begin(offset, now);
            carousel.on_drag_end(offset - 60.0, now);
            carousel.on_touch_end(now);
        }

        let finished = carousel.host_mut().tick(now);
        let offset = carousel.host().offset;
        carousel.on_scroll(offset, now);
        if finished {
            carousel.on_scroll_settled(now);
        }
        carousel.advance(now);
        report(&mut carousel, now);

        now += FRAME_MS;
    }

    let active = carousel.active_virtual_index();
    if let Some(style) = carousel.slide_style(active) {
        println!(
            "active slide {active}: opacity {:.2}, scale {:.2}",
            style.opacity, style.scale
        );
    }
    carousel.teardown();
}

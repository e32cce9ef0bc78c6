//! Experience carousel: a single clamped index over a fixed slide set.
//!
//! Input events are translated to target indices by [`transition`], which is
//! free of rendering concerns. [`Carousel`] owns the state, validates targets
//! in [`Carousel::go_to`] and produces a [`CarouselView`] for the renderer.

use tracing::trace;

pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Horizontal displacement a swipe must strictly exceed to navigate.
    pub swipe_threshold: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarouselState {
    pub active_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    PreviousClicked,
    NextClicked,
    IndicatorClicked(usize),
    KeyPressed(Key),
    Swipe { start_x: f64, end_x: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left: show the next slide.
    Advance,
    /// Finger moved right: show the previous slide.
    Retreat,
}

pub fn swipe_direction(start_x: f64, end_x: f64, threshold: f64) -> Option<SwipeDirection> {
    let displacement = start_x - end_x;
    if displacement > threshold {
        Some(SwipeDirection::Advance)
    } else if displacement < -threshold {
        Some(SwipeDirection::Retreat)
    } else {
        None
    }
}

/// Maps one input event to the index it asks for, or `None` when the event
/// dispatches nothing. Indicator targets are passed through unchecked;
/// [`Carousel::go_to`] rejects them if out of range.
pub fn transition(
    state: CarouselState,
    slide_count: usize,
    config: &CarouselConfig,
    event: CarouselEvent,
) -> Option<usize> {
    let previous = || (state.active_index > 0).then(|| state.active_index - 1);
    let next = || (state.active_index + 1 < slide_count).then(|| state.active_index + 1);

    match event {
        CarouselEvent::PreviousClicked | CarouselEvent::KeyPressed(Key::ArrowLeft) => previous(),
        CarouselEvent::NextClicked | CarouselEvent::KeyPressed(Key::ArrowRight) => next(),
        CarouselEvent::IndicatorClicked(index) => Some(index),
        CarouselEvent::KeyPressed(Key::Other) => None,
        CarouselEvent::Swipe { start_x, end_x } => {
            match swipe_direction(start_x, end_x, config.swipe_threshold)? {
                SwipeDirection::Advance => next(),
                SwipeDirection::Retreat => previous(),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    pub active_index: usize,
    /// Horizontal translation of the slide track, in percent of one slide.
    pub offset_percent: f64,
    pub indicators: Vec<Indicator>,
    pub counter: String,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

/// Records where a touch or pointer gesture started.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    pub fn finish(&mut self, x: f64) -> Option<CarouselEvent> {
        let start_x = self.start_x.take()?;
        Some(CarouselEvent::Swipe { start_x, end_x: x })
    }
}

pub struct Carousel<S> {
    slides: Vec<S>,
    state: CarouselState,
    config: CarouselConfig,
    swipe: SwipeTracker,
}

impl<S> Carousel<S> {
    /// Returns `None` for an empty slide set; there is nothing to control.
    pub fn initialize(slides: Vec<S>, config: CarouselConfig) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        Some(Self {
            slides,
            state: CarouselState::default(),
            config,
            swipe: SwipeTracker::default(),
        })
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    pub fn active_slide(&self) -> &S {
        &self.slides[self.state.active_index]
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    /// Moves to `index` and re-renders. Out-of-range requests are ignored.
    pub fn go_to(&mut self, index: usize) -> Option<CarouselView> {
        if index >= self.slides.len() {
            trace!(index, slides = self.slides.len(), "ignoring out-of-range slide");
            return None;
        }
        self.state.active_index = index;
        Some(self.render())
    }

    pub fn handle(&mut self, event: CarouselEvent) -> Option<CarouselView> {
        let target = transition(self.state, self.slides.len(), &self.config, event)?;
        self.go_to(target)
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.swipe.begin(x);
    }

    pub fn pointer_up(&mut self, x: f64) -> Option<CarouselView> {
        let event = self.swipe.finish(x)?;
        self.handle(event)
    }

    pub fn render(&self) -> CarouselView {
        let active = self.state.active_index;
        let count = self.slides.len();
        CarouselView {
            active_index: active,
            offset_percent: -(active as f64) * 100.0,
            indicators: (0..count)
                .map(|index| Indicator {
                    index,
                    active: index == active,
                    label: format!("Go to slide {}", index + 1),
                })
                .collect(),
            counter: format!("{} / {}", active + 1, count),
            previous_disabled: active == 0,
            next_disabled: active + 1 == count,
        }
    }
}

#[cfg(test)]
#[path = "tests/carousel_tests.rs"]
mod tests;

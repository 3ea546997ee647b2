//! Hero slideshow controller.
//!
//! The slideshow rotates through a fixed list of hero images on a timer.
//! The starting slide is seeded from the minute of the hour so consecutive
//! visits open on different images without any stored state.
//!
//! ## Motion preference
//!
//! While the visitor asks for reduced motion the rotation timer is not
//! running and the parallax offset is pinned to zero. Hosts without the
//! media feature are treated as "motion allowed".
//!
//! ## Layers
//!
//! - [`SlideshowState`] + [`transition`]: pure `(state, event) -> state`.
//! - [`SlideshowDriver`]: owns the timer and listener handles registered
//!   with a [`Host`] between [`SlideshowDriver::init`] and
//!   [`SlideshowDriver::dispose`], and notifies observers of changes.

use super::cursor::Cursor;
use super::events::{SubscriptionId, Subscriptions};
use super::host::{Host, HostEvent, ListenerId, ListenerKind, TimerId};
use serde::Serialize;

pub const DEFAULT_INTERVAL_MS: u64 = 7000;
pub const DEFAULT_FADE_MS: u64 = 1000;
pub const DEFAULT_PARALLAX_FACTOR: f64 = 0.5;

/// Timing and parallax parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlideshowSettings {
    /// Time each slide stays up before the next tick.
    pub interval_ms: u64,
    /// Cross-fade duration between slides (rendering only).
    pub fade_ms: u64,
    /// Parallax offset per pixel of scroll.
    pub parallax_factor: f64,
}

impl Default for SlideshowSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            fade_ms: DEFAULT_FADE_MS,
            parallax_factor: DEFAULT_PARALLAX_FACTOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlideshowState {
    cursor: Cursor,
    reduced_motion: bool,
    parallax_offset: f64,
}

impl SlideshowState {
    /// Initial state for `len` slides, starting at `minute mod len`.
    pub fn seeded(len: usize, minute: u32) -> Self {
        Self {
            cursor: Cursor::seeded(len, minute as usize),
            reduced_motion: false,
            parallax_offset: 0.0,
        }
    }

    pub fn active_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Vertical offset in pixels for the slide background layer.
    pub fn parallax_offset(&self) -> f64 {
        self.parallax_offset
    }

    /// Next slide, wrapping; no-op for an empty list.
    pub fn advance(self) -> Self {
        Self {
            cursor: self.cursor.forward(),
            ..self
        }
    }

    /// Whether the rotation timer should be running in this state.
    pub fn runs_timer(&self) -> bool {
        !self.reduced_motion && !self.cursor.is_empty()
    }

    /// CSS `transform` for the slide layer.
    pub fn transform_css(&self) -> String {
        if self.reduced_motion {
            "none".to_string()
        } else {
            format!("translateY({}px)", self.parallax_offset)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlideshowEvent {
    Tick,
    MotionPreference { reduced: bool },
    Scroll { y: f64 },
}

pub fn transition(
    state: SlideshowState,
    event: SlideshowEvent,
    settings: &SlideshowSettings,
) -> SlideshowState {
    match event {
        SlideshowEvent::Tick => state.advance(),
        SlideshowEvent::MotionPreference { reduced: true } => SlideshowState {
            reduced_motion: true,
            parallax_offset: 0.0,
            ..state
        },
        SlideshowEvent::MotionPreference { reduced: false } => SlideshowState {
            reduced_motion: false,
            ..state
        },
        SlideshowEvent::Scroll { .. } if state.reduced_motion => state,
        SlideshowEvent::Scroll { y } => SlideshowState {
            parallax_offset: y * settings.parallax_factor,
            ..state
        },
    }
}

/// What changed, for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowChange {
    Slide,
    Motion,
    Parallax,
}

/// A mounted slideshow.
#[derive(Debug)]
pub struct SlideshowDriver {
    settings: SlideshowSettings,
    state: SlideshowState,
    timer: Option<TimerId>,
    scroll: Option<ListenerId>,
    motion: Option<ListenerId>,
    mounted: bool,
    observers: Subscriptions<SlideshowChange, SlideshowState>,
}

impl SlideshowDriver {
    /// Mount a slideshow of `len` slides: seed the first slide, read the
    /// motion preference and register whatever the current mode needs.
    pub fn init<H: Host>(host: &mut H, len: usize, settings: SlideshowSettings) -> Self {
        let preference = host.prefers_reduced_motion();
        let mut state = SlideshowState::seeded(len, host.minute_of_hour());
        if preference == Some(true) {
            state = transition(
                state,
                SlideshowEvent::MotionPreference { reduced: true },
                &settings,
            );
        }
        let motion = preference.map(|_| host.listen(ListenerKind::MotionPreferenceChange, true));

        let mut driver = Self {
            settings,
            state,
            timer: None,
            scroll: None,
            motion,
            mounted: true,
            observers: Subscriptions::new(),
        };
        driver.sync(host);
        log::debug!(
            "slideshow mounted: {} slides, starting at {}, reduced motion {}",
            len,
            driver.state.active_index(),
            driver.state.reduced_motion()
        );
        driver
    }

    pub fn state(&self) -> SlideshowState {
        self.state
    }

    pub fn settings(&self) -> &SlideshowSettings {
        &self.settings
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn subscribe(
        &mut self,
        kind: SlideshowChange,
        handler: impl FnMut(&SlideshowState) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Feed a host input. Inputs this driver did not register for, and any
    /// input after [`dispose`](Self::dispose), are ignored.
    pub fn handle<H: Host>(&mut self, host: &mut H, event: HostEvent) {
        if !self.mounted {
            return;
        }
        match event {
            HostEvent::Timer(id) if self.timer == Some(id) => {
                self.apply(SlideshowEvent::Tick, SlideshowChange::Slide);
            }
            HostEvent::Scroll { y } if self.scroll.is_some() => {
                self.apply(SlideshowEvent::Scroll { y }, SlideshowChange::Parallax);
            }
            HostEvent::MotionPreferenceChanged { reduced } if self.motion.is_some() => {
                self.apply(
                    SlideshowEvent::MotionPreference { reduced },
                    SlideshowChange::Motion,
                );
                self.sync(host);
            }
            _ => {}
        }
    }

    /// Release every timer and listener. Safe to call more than once.
    pub fn dispose<H: Host>(&mut self, host: &mut H) {
        if let Some(id) = self.timer.take() {
            host.clear_interval(id);
        }
        if let Some(id) = self.scroll.take() {
            host.unlisten(id);
        }
        if let Some(id) = self.motion.take() {
            host.unlisten(id);
        }
        self.observers.clear();
        if self.mounted {
            log::debug!("slideshow disposed");
        }
        self.mounted = false;
    }

    /// Start or stop the timer and scroll listener to match the state.
    fn sync<H: Host>(&mut self, host: &mut H) {
        if self.state.runs_timer() {
            if self.timer.is_none() {
                self.timer = Some(host.set_interval(self.settings.interval_ms));
            }
        } else if let Some(id) = self.timer.take() {
            host.clear_interval(id);
        }

        if self.state.reduced_motion() {
            if let Some(id) = self.scroll.take() {
                host.unlisten(id);
            }
        } else {
            if self.scroll.is_none() {
                self.scroll = Some(host.listen(ListenerKind::Scroll, true));
            }
            let y = host.scroll_position();
            self.apply(SlideshowEvent::Scroll { y }, SlideshowChange::Parallax);
        }
    }

    fn apply(&mut self, event: SlideshowEvent, change: SlideshowChange) {
        let next = transition(self.state, event, &self.settings);
        if next != self.state {
            self.state = next;
            self.observers.emit(change, &self.state);
        }
    }
}

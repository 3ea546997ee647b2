//! The environment a controller is mounted into.
//!
//! Controllers never talk to timers or global listeners directly. They go
//! through a [`Host`], which hands out opaque handles for everything it
//! registers. Drivers keep those handles and give every one of them back on
//! teardown, so a disposed controller can never receive a stale callback.
//!
//! [`VirtualHost`] is a deterministic in-memory host with a virtual clock.
//! It only delivers an input while a listener of the matching kind is
//! registered, which is exactly the property the drivers rely on.

use std::collections::BTreeMap;

/// Handle for a repeating timer registered with a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Handle for an event listener registered with a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// The kinds of global input a controller can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Scroll,
    KeyDown,
    MotionPreferenceChange,
    ImageLoad,
}

/// A key as reported by a key-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// Input delivered by a host to whatever registered for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Timer(TimerId),
    Scroll { y: f64 },
    KeyDown(Key),
    MotionPreferenceChanged { reduced: bool },
    ImageLoaded { id: u32 },
}

pub trait Host {
    /// Start a repeating timer firing every `period_ms`.
    fn set_interval(&mut self, period_ms: u64) -> TimerId;

    /// Stop a timer. Unknown handles are ignored.
    fn clear_interval(&mut self, id: TimerId);

    /// Register a listener. `passive` listeners promise never to block or
    /// cancel the default action of the input.
    fn listen(&mut self, kind: ListenerKind, passive: bool) -> ListenerId;

    /// Remove a listener. Unknown handles are ignored.
    fn unlisten(&mut self, id: ListenerId);

    /// Current reduced-motion preference; `None` when the host has no such
    /// media feature.
    fn prefers_reduced_motion(&self) -> Option<bool>;

    /// Minute of the current hour, `0..60`.
    fn minute_of_hour(&self) -> u32;

    /// Current vertical scroll position in pixels.
    fn scroll_position(&self) -> f64;
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    period_ms: u64,
    next_due_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    kind: ListenerKind,
    passive: bool,
}

/// In-memory host driven by explicit calls instead of a real event loop.
#[derive(Debug, Default)]
pub struct VirtualHost {
    now_ms: u64,
    next_handle: u64,
    minute: u32,
    scroll_y: f64,
    reduced_motion: Option<bool>,
    timers: BTreeMap<TimerId, Timer>,
    listeners: BTreeMap<ListenerId, Listener>,
}

impl VirtualHost {
    /// Host at minute 0 with motion allowed.
    pub fn new() -> Self {
        Self {
            reduced_motion: Some(false),
            ..Self::default()
        }
    }

    pub fn with_minute(mut self, minute: u32) -> Self {
        self.minute = minute % 60;
        self
    }

    /// `None` simulates a platform without the reduced-motion media feature.
    pub fn with_reduced_motion(mut self, reduced: Option<bool>) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move the virtual clock forward, returning every timer firing that
    /// fell due, in firing order.
    pub fn advance_time(&mut self, ms: u64) -> Vec<HostEvent> {
        let target = self.now_ms + ms;
        let mut fired = Vec::new();
        loop {
            let due = self
                .timers
                .iter()
                .filter(|(_, t)| t.next_due_ms <= target)
                .min_by_key(|(id, t)| (t.next_due_ms, **id))
                .map(|(id, _)| *id);
            let Some(id) = due else { break };
            if let Some(timer) = self.timers.get_mut(&id) {
                self.now_ms = timer.next_due_ms;
                timer.next_due_ms += timer.period_ms;
            }
            fired.push(HostEvent::Timer(id));
        }
        self.now_ms = target;
        fired
    }

    pub fn scroll_to(&mut self, y: f64) -> Option<HostEvent> {
        self.scroll_y = y;
        self.deliver(ListenerKind::Scroll, HostEvent::Scroll { y })
    }

    pub fn key_down(&mut self, key: &str) -> Option<HostEvent> {
        self.deliver(ListenerKind::KeyDown, HostEvent::KeyDown(Key::from_dom(key)))
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) -> Option<HostEvent> {
        self.reduced_motion = Some(reduced);
        self.deliver(
            ListenerKind::MotionPreferenceChange,
            HostEvent::MotionPreferenceChanged { reduced },
        )
    }

    pub fn image_loaded(&mut self, id: u32) -> Option<HostEvent> {
        self.deliver(ListenerKind::ImageLoad, HostEvent::ImageLoaded { id })
    }

    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn listeners_of(&self, kind: ListenerKind) -> usize {
        self.listeners.values().filter(|l| l.kind == kind).count()
    }

    /// True when every listener of `kind` is passive (vacuously true if none).
    pub fn all_passive(&self, kind: ListenerKind) -> bool {
        self.listeners
            .values()
            .filter(|l| l.kind == kind)
            .all(|l| l.passive)
    }

    fn deliver(&self, kind: ListenerKind, event: HostEvent) -> Option<HostEvent> {
        (self.listeners_of(kind) > 0).then_some(event)
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Host for VirtualHost {
    fn set_interval(&mut self, period_ms: u64) -> TimerId {
        let id = TimerId(self.next_handle());
        let period_ms = period_ms.max(1);
        self.timers.insert(
            id,
            Timer {
                period_ms,
                next_due_ms: self.now_ms + period_ms,
            },
        );
        id
    }

    fn clear_interval(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    fn listen(&mut self, kind: ListenerKind, passive: bool) -> ListenerId {
        let id = ListenerId(self.next_handle());
        self.listeners.insert(id, Listener { kind, passive });
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn prefers_reduced_motion(&self) -> Option<bool> {
        self.reduced_motion
    }

    fn minute_of_hour(&self) -> u32 {
        self.minute
    }

    fn scroll_position(&self) -> f64 {
        self.scroll_y
    }
}

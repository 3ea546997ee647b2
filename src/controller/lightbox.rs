//! Gallery lightbox controller.
//!
//! A modal viewer over the fixed gallery list. It starts closed, opens on a
//! grid position, steps forward and back with wrap-around, and closes again.
//!
//! ```text
//! CLOSED --open(i)-->      OPEN(active = i)
//! OPEN   --close()-->      CLOSED
//! OPEN   --next()/prev()--> OPEN(active ± 1 mod N)
//! ```
//!
//! Out-of-range `open` positions are clamped to the last item; `next`/`prev`
//! while closed are no-ops. The keyboard listener exists only while the
//! lightbox is open: [`LightboxDriver`] registers it on open and removes it
//! on close.

use super::cursor::Cursor;
use super::events::{SubscriptionId, Subscriptions};
use super::host::{Host, HostEvent, Key, ListenerId, ListenerKind};
use crate::assets::AssetPaths;
use crate::types::ImageItem;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LightboxState {
    is_open: bool,
    cursor: Cursor,
}

impl LightboxState {
    pub fn closed(len: usize) -> Self {
        Self {
            is_open: false,
            cursor: Cursor::new(len),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
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

    /// Open at `index`, clamped to the last item. Ignored for an empty gallery.
    pub fn open(self, index: usize) -> Self {
        if self.cursor.is_empty() {
            return self;
        }
        Self {
            is_open: true,
            cursor: Cursor::clamped(self.cursor.len(), index),
        }
    }

    pub fn close(self) -> Self {
        Self {
            is_open: false,
            ..self
        }
    }

    pub fn next(self) -> Self {
        if !self.is_open {
            return self;
        }
        Self {
            cursor: self.cursor.forward(),
            ..self
        }
    }

    pub fn prev(self) -> Self {
        if !self.is_open {
            return self;
        }
        Self {
            cursor: self.cursor.back(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxEvent {
    Open(usize),
    Close,
    Next,
    Prev,
    KeyDown(Key),
}

pub fn transition(state: LightboxState, event: LightboxEvent) -> LightboxState {
    match event {
        LightboxEvent::Open(index) => state.open(index),
        LightboxEvent::Close => state.close(),
        LightboxEvent::Next => state.next(),
        LightboxEvent::Prev => state.prev(),
        LightboxEvent::KeyDown(_) if !state.is_open() => state,
        LightboxEvent::KeyDown(Key::Escape) => state.close(),
        LightboxEvent::KeyDown(Key::ArrowLeft) => state.prev(),
        LightboxEvent::KeyDown(Key::ArrowRight) => state.next(),
        LightboxEvent::KeyDown(Key::Other) => state,
    }
}

/// What the lightbox shows for its active item.
#[derive(Debug, Clone, PartialEq)]
pub struct LightboxView<'a> {
    pub item: &'a ImageItem,
    /// Resolved image URL, with the placeholder substituted for an empty source.
    pub src: String,
    /// 1-based position in the gallery.
    pub position: usize,
    pub total: usize,
}

/// Presentation of the active item, or `None` while closed.
pub fn view<'a>(
    state: &LightboxState,
    items: &'a [ImageItem],
    assets: &AssetPaths,
) -> Option<LightboxView<'a>> {
    if !state.is_open() {
        return None;
    }
    let item = items.get(state.active_index())?;
    Some(LightboxView {
        item,
        src: assets.image_or_placeholder(&item.src),
        position: state.active_index() + 1,
        total: items.len(),
    })
}

/// What changed, for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxChange {
    Opened,
    Closed,
    Moved,
}

/// A mounted lightbox that owns its keyboard listener.
#[derive(Debug)]
pub struct LightboxDriver {
    state: LightboxState,
    key_listener: Option<ListenerId>,
    observers: Subscriptions<LightboxChange, LightboxState>,
}

impl LightboxDriver {
    /// Mount a closed lightbox over `len` items. Nothing is registered
    /// with the host until it opens.
    pub fn new(len: usize) -> Self {
        Self {
            state: LightboxState::closed(len),
            key_listener: None,
            observers: Subscriptions::new(),
        }
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn subscribe(
        &mut self,
        kind: LightboxChange,
        handler: impl FnMut(&LightboxState) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn open<H: Host>(&mut self, host: &mut H, index: usize) {
        self.apply(host, LightboxEvent::Open(index));
    }

    pub fn close<H: Host>(&mut self, host: &mut H) {
        self.apply(host, LightboxEvent::Close);
    }

    pub fn next<H: Host>(&mut self, host: &mut H) {
        self.apply(host, LightboxEvent::Next);
    }

    pub fn prev<H: Host>(&mut self, host: &mut H) {
        self.apply(host, LightboxEvent::Prev);
    }

    /// Feed a host input. Only key-downs matter, and only while the key
    /// listener is registered.
    pub fn handle<H: Host>(&mut self, host: &mut H, event: HostEvent) {
        if let HostEvent::KeyDown(key) = event
            && self.key_listener.is_some()
        {
            self.apply(host, LightboxEvent::KeyDown(key));
        }
    }

    /// Close and release the key listener. Safe to call more than once.
    pub fn dispose<H: Host>(&mut self, host: &mut H) {
        self.state = self.state.close();
        if let Some(id) = self.key_listener.take() {
            host.unlisten(id);
        }
        self.observers.clear();
    }

    fn apply<H: Host>(&mut self, host: &mut H, event: LightboxEvent) {
        let prev = self.state;
        let next = transition(prev, event);
        self.state = next;

        if next.is_open() && self.key_listener.is_none() {
            self.key_listener = Some(host.listen(ListenerKind::KeyDown, false));
        } else if !next.is_open()
            && let Some(id) = self.key_listener.take()
        {
            host.unlisten(id);
        }

        let change = match (prev.is_open(), next.is_open()) {
            (false, true) => Some(LightboxChange::Opened),
            (true, false) => Some(LightboxChange::Closed),
            (true, true) if prev != next => Some(LightboxChange::Moved),
            _ => None,
        };
        if let Some(change) = change {
            log::debug!(
                "lightbox {:?}: item {} of {}",
                change,
                next.active_index() + 1,
                next.len()
            );
            self.observers.emit(change, &self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::host::VirtualHost;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn item(id: u32, src: &str) -> ImageItem {
        ImageItem {
            id,
            src: src.to_string(),
            alt: format!("Photo {id}"),
            caption: format!("Caption {id}"),
            category: "Portrait".to_string(),
        }
    }

    // =========================================================================
    // Pure transitions
    // =========================================================================

    #[test]
    fn starts_closed() {
        let state = LightboxState::closed(6);
        assert!(!state.is_open());
        assert_eq!(state.active_index(), 0);
    }

    #[test]
    fn open_sets_exact_index() {
        for i in 0..6 {
            let state = LightboxState::closed(6).open(i);
            assert!(state.is_open());
            assert_eq!(state.active_index(), i);
        }
    }

    #[test]
    fn open_two_then_next_twice() {
        let state = LightboxState::closed(6).open(2).next().next();
        assert_eq!(state.active_index(), 4);
    }

    #[test]
    fn next_wraps_at_upper_boundary() {
        let state = LightboxState::closed(6).open(5).next();
        assert_eq!(state.active_index(), 0);
    }

    #[test]
    fn prev_wraps_at_lower_boundary() {
        let state = LightboxState::closed(6).open(0).prev();
        assert_eq!(state.active_index(), 5);
    }

    #[test]
    fn next_prev_round_trip() {
        for n in 1..9 {
            for i in 0..n {
                let open = LightboxState::closed(n).open(i);
                assert_eq!(open.next().prev(), open);
                assert_eq!(open.prev().next(), open);
            }
        }
    }

    #[test]
    fn close_is_idempotent() {
        let once = LightboxState::closed(6).open(3).close();
        let twice = once.close();
        assert_eq!(once, twice);
        assert!(!twice.is_open());
    }

    #[test]
    fn out_of_range_open_is_clamped() {
        let state = LightboxState::closed(6).open(99);
        assert!(state.is_open());
        assert_eq!(state.active_index(), 5);
    }

    #[test]
    fn open_on_empty_gallery_is_ignored() {
        let state = LightboxState::closed(0).open(0);
        assert!(!state.is_open());
    }

    #[test]
    fn navigation_while_closed_is_noop() {
        let state = LightboxState::closed(6);
        assert_eq!(state.next(), state);
        assert_eq!(state.prev(), state);
    }

    #[test]
    fn keys_map_to_operations() {
        let open = LightboxState::closed(6).open(3);
        assert_eq!(
            transition(open, LightboxEvent::KeyDown(Key::ArrowRight)).active_index(),
            4
        );
        assert_eq!(
            transition(open, LightboxEvent::KeyDown(Key::ArrowLeft)).active_index(),
            2
        );
        assert!(!transition(open, LightboxEvent::KeyDown(Key::Escape)).is_open());
        assert_eq!(transition(open, LightboxEvent::KeyDown(Key::Other)), open);
    }

    #[test]
    fn arrow_right_on_last_item_wraps() {
        let open = LightboxState::closed(6).open(5);
        let next = transition(open, LightboxEvent::KeyDown(Key::ArrowRight));
        assert_eq!(next.active_index(), 0);
    }

    #[test]
    fn keys_while_closed_are_ignored() {
        let closed = LightboxState::closed(6).open(2).close();
        for key in [Key::Escape, Key::ArrowLeft, Key::ArrowRight] {
            assert_eq!(transition(closed, LightboxEvent::KeyDown(key)), closed);
        }
    }

    // =========================================================================
    // View
    // =========================================================================

    #[test]
    fn view_shows_active_item() {
        let items = vec![item(1, "a.jpg"), item(2, "b.jpg")];
        let assets = AssetPaths::new("/folio");
        let state = LightboxState::closed(2).open(1);
        let view = view(&state, &items, &assets).unwrap();
        assert_eq!(view.item.id, 2);
        assert_eq!(view.src, "/folio/b.jpg");
        assert_eq!(view.position, 2);
        assert_eq!(view.total, 2);
    }

    #[test]
    fn view_substitutes_placeholder_for_empty_source() {
        let items = vec![item(1, "")];
        let assets = AssetPaths::new("/folio");
        let state = LightboxState::closed(1).open(0);
        let view = view(&state, &items, &assets).unwrap();
        assert_eq!(view.src, "/folio/placeholder.svg");
        assert_eq!(view.item.caption, "Caption 1");
    }

    #[test]
    fn view_is_none_while_closed() {
        let items = vec![item(1, "a.jpg")];
        let state = LightboxState::closed(1);
        assert!(view(&state, &items, &AssetPaths::new("")).is_none());
    }

    // =========================================================================
    // Driver
    // =========================================================================

    #[test]
    fn key_listener_only_while_open() {
        let mut host = VirtualHost::new();
        let mut driver = LightboxDriver::new(6);
        assert_eq!(host.listeners_of(ListenerKind::KeyDown), 0);
        assert_eq!(host.key_down("ArrowRight"), None);

        driver.open(&mut host, 2);
        assert_eq!(host.listeners_of(ListenerKind::KeyDown), 1);

        // Reopening while open does not stack listeners
        driver.open(&mut host, 4);
        assert_eq!(host.listeners_of(ListenerKind::KeyDown), 1);

        driver.close(&mut host);
        assert_eq!(host.listeners_of(ListenerKind::KeyDown), 0);
        assert_eq!(host.key_down("ArrowRight"), None);
    }

    #[test]
    fn keyboard_drives_open_lightbox() {
        let mut host = VirtualHost::new();
        let mut driver = LightboxDriver::new(6);
        driver.open(&mut host, 5);

        let event = host.key_down("ArrowRight").unwrap();
        driver.handle(&mut host, event);
        assert_eq!(driver.state().active_index(), 0);

        let event = host.key_down("ArrowLeft").unwrap();
        driver.handle(&mut host, event);
        assert_eq!(driver.state().active_index(), 5);

        let event = host.key_down("Escape").unwrap();
        driver.handle(&mut host, event);
        assert!(!driver.state().is_open());
        assert_eq!(host.active_listeners(), 0);
    }

    #[test]
    fn stale_key_after_close_is_ignored() {
        let mut host = VirtualHost::new();
        let mut driver = LightboxDriver::new(6);
        driver.open(&mut host, 1);
        let stale = host.key_down("ArrowRight").unwrap();
        driver.close(&mut host);

        driver.handle(&mut host, stale);
        assert_eq!(driver.state().active_index(), 1);
        assert!(!driver.state().is_open());
    }

    #[test]
    fn dispose_releases_listener() {
        let mut host = VirtualHost::new();
        let mut driver = LightboxDriver::new(6);
        driver.open(&mut host, 0);
        driver.dispose(&mut host);
        assert_eq!(host.active_listeners(), 0);
        assert!(!driver.state().is_open());
        driver.dispose(&mut host);
        assert_eq!(host.active_listeners(), 0);
    }

    #[test]
    fn observers_receive_changes() {
        let mut host = VirtualHost::new();
        let mut driver = LightboxDriver::new(3);
        let log = Rc::new(RefCell::new(Vec::new()));

        for kind in [
            LightboxChange::Opened,
            LightboxChange::Moved,
            LightboxChange::Closed,
        ] {
            let l = Rc::clone(&log);
            driver.subscribe(kind, move |state| {
                l.borrow_mut().push((kind, state.active_index()))
            });
        }

        driver.open(&mut host, 1);
        driver.next(&mut host);
        driver.close(&mut host);
        driver.close(&mut host);

        assert_eq!(
            *log.borrow(),
            vec![
                (LightboxChange::Opened, 1),
                (LightboxChange::Moved, 2),
                (LightboxChange::Closed, 2),
            ]
        );
    }
}

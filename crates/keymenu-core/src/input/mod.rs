// Keymenu Input Layer
// Pressed-key tracking and change notification for keybind consumers

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::{ScanCode, ScanCodeSet};

/// A single key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventKey {
    pub code: ScanCode,
    pub down: bool,
}

impl EventKey {
    pub fn press(code: ScanCode) -> Self {
        Self { code, down: true }
    }

    pub fn release(code: ScanCode) -> Self {
        Self { code, down: false }
    }
}

/// Transitions that actually changed the pressed set in one dispatch
pub type ChangedKeys = SmallVec<[EventKey; 4]>;

/// Verdict on whether the host application still sees the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputResponse {
    consumed: bool,
}

impl InputResponse {
    /// Keep the input from reaching the host application
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Subscriber to pressed-key changes
pub trait InputListener: Send {
    /// Called once per dispatch.
    ///
    /// `changed` is false for repeats that left the pressed set untouched.
    /// `pressed` already reflects `changed_keys`.
    fn on_input_change(
        &mut self,
        changed: bool,
        pressed: &ScanCodeSet,
        changed_keys: &[EventKey],
        response: &mut InputResponse,
    );
}

/// Listener handle as held by its owner
pub type SharedListener = Arc<Mutex<dyn InputListener>>;

/// Tracks held keys and fans every change out to subscribers.
///
/// Subscriptions are weak: dropping the listener's last `Arc` ends it.
#[derive(Default)]
pub struct InputDispatcher {
    pressed: ScanCodeSet,
    listeners: Vec<Weak<Mutex<dyn InputListener>>>,
}

impl std::fmt::Debug for InputDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputDispatcher")
            .field("pressed", &self.pressed)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a listener; it is notified in subscription order
    pub fn subscribe<L>(&mut self, listener: &Arc<Mutex<L>>)
    where
        L: InputListener + 'static,
    {
        let shared: SharedListener = listener.clone();
        self.listeners.push(Arc::downgrade(&shared));
    }

    pub fn pressed(&self) -> &ScanCodeSet {
        &self.pressed
    }

    /// Number of subscribers still alive
    pub fn listener_count(&self) -> usize {
        self.listeners
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Apply a batch of transitions and notify every live listener
    pub fn process(&mut self, events: &[EventKey]) -> InputResponse {
        let mut changed_keys = ChangedKeys::new();
        for event in events {
            if event.code.is_none() {
                continue;
            }
            let changed = if event.down {
                self.pressed.insert(event.code)
            } else {
                self.pressed.remove(&event.code)
            };
            if changed {
                changed_keys.push(*event);
            }
        }
        self.dispatch(&changed_keys)
    }

    /// Release everything held, e.g. when the host loses input focus
    pub fn release_all(&mut self) -> InputResponse {
        let released: ChangedKeys = std::mem::take(&mut self.pressed)
            .into_iter()
            .map(EventKey::release)
            .collect();
        if released.is_empty() {
            return InputResponse::default();
        }
        self.dispatch(&released)
    }

    fn dispatch(&mut self, changed_keys: &[EventKey]) -> InputResponse {
        self.listeners.retain(|weak| weak.strong_count() > 0);
        let live: Vec<SharedListener> = self.listeners.iter().filter_map(Weak::upgrade).collect();

        let mut response = InputResponse::default();
        let changed = !changed_keys.is_empty();
        for listener in live {
            listener
                .lock()
                .on_input_change(changed, &self.pressed, changed_keys, &mut response);
        }
        response
    }
}

use std::collections::{HashSet, VecDeque};

use super::event::{InputEvent, Key};

/// Where the frame loop gets its input from.
///
/// Implementations must never block in [`poll_events`](Self::poll_events);
/// an empty frame simply returns no events.
pub trait InputSource {
    /// Take every discrete event that arrived since the last poll, oldest
    /// first.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Whether `key` is held down right now.
    fn is_key_held(&self, key: Key) -> bool;
}

/// Input source backed by an event queue and a held-key set.
///
/// Push-style hosts (window callbacks) feed it between frames; the frame
/// loop drains it once per iteration. `KeyDown` pushes also mark the key
/// held until [`release`](Self::release).
#[derive(Debug, Default)]
pub struct QueuedInput {
    pending: VecDeque<InputEvent>,
    held: HashSet<Key>,
}

impl QueuedInput {
    /// Create an empty queue with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next poll.
    pub fn push(&mut self, event: InputEvent) {
        if let InputEvent::KeyDown { key } = event {
            let _ = self.held.insert(key);
        }
        self.pending.push_back(event);
    }

    /// Mark a key held without queuing a `KeyDown` (OS auto-repeat).
    pub fn hold(&mut self, key: Key) {
        let _ = self.held.insert(key);
    }

    /// Mark a key released.
    pub fn release(&mut self, key: Key) {
        let _ = self.held.remove(&key);
    }

    /// Release every key, e.g. when the window loses focus and release
    /// events would never arrive.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Drop queued pointer moves, keeping every other event in order.
    ///
    /// Hosts call this together with
    /// [`FlyCamera::reset_pointer`](crate::camera::FlyCamera::reset_pointer)
    /// so a position from before the pointer left cannot become the new
    /// seed.
    pub fn discard_pointer_moves(&mut self) {
        self.pending
            .retain(|event| !matches!(event, InputEvent::PointerMoved { .. }));
    }

    /// Number of events waiting for the next poll.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl InputSource for QueuedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.pending.drain(..).collect()
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_drains_in_arrival_order() {
        let mut input = QueuedInput::new();
        input.push(InputEvent::Scroll { delta: 1.0 });
        input.push(InputEvent::PointerMoved { x: 1.0, y: 2.0 });
        input.push(InputEvent::Quit);
        assert_eq!(input.pending(), 3);

        let events = input.poll_events();
        assert_eq!(
            events,
            vec![
                InputEvent::Scroll { delta: 1.0 },
                InputEvent::PointerMoved { x: 1.0, y: 2.0 },
                InputEvent::Quit,
            ]
        );
        assert!(input.poll_events().is_empty());
    }

    #[test]
    fn discarding_pointer_moves_keeps_other_events() {
        let mut input = QueuedInput::new();
        input.push(InputEvent::PointerMoved { x: 1.0, y: 2.0 });
        input.push(InputEvent::Scroll { delta: 1.0 });
        input.push(InputEvent::PointerMoved { x: 3.0, y: 4.0 });
        input.push(InputEvent::KeyDown { key: Key::G });

        input.discard_pointer_moves();

        assert_eq!(
            input.poll_events(),
            vec![
                InputEvent::Scroll { delta: 1.0 },
                InputEvent::KeyDown { key: Key::G },
            ]
        );
    }

    #[test]
    fn key_down_marks_held_until_release() {
        let mut input = QueuedInput::new();
        input.push(InputEvent::KeyDown { key: Key::W });
        input.hold(Key::Space);
        assert!(input.is_key_held(Key::W));
        assert!(input.is_key_held(Key::Space));
        assert!(!input.is_key_held(Key::S));

        input.release(Key::W);
        assert!(!input.is_key_held(Key::W));
        input.release_all();
        assert!(!input.is_key_held(Key::Space));
    }
}

//! Keyboard events

use std::collections::HashMap;

/// Keys a game can react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub kind: KeyEventKind,
    /// Seconds since the key went down
    pub held_time: f64,
}

/// Receives key events along with game state `C`
pub trait KeyHandler<C> {
    fn on_key(&mut self, event: KeyEvent, ctx: &mut C);
}

impl<C, F> KeyHandler<C> for F
where
    F: FnMut(KeyEvent, &mut C),
{
    fn on_key(&mut self, event: KeyEvent, ctx: &mut C) {
        self(event, ctx)
    }
}

/// Forwards raw key events to the installed handler
pub struct KeyDispatcher<C> {
    handler: Option<Box<dyn KeyHandler<C>>>,
    /// Timestamp of the first non-repeat event per key
    pressed_at: HashMap<Key, f64>,
}

impl<C> Default for KeyDispatcher<C> {
    fn default() -> Self {
        Self {
            handler: None,
            pressed_at: HashMap::new(),
        }
    }
}

impl<C> KeyDispatcher<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `handler`, replacing any previous one
    pub fn set_handler(&mut self, handler: impl KeyHandler<C> + 'static) {
        self.handler = Some(Box::new(handler));
    }

    pub fn clear_handler(&mut self) {
        self.handler = None;
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Forward one event. `timestamp` is in seconds; auto-repeat events keep
    /// the original press time. Events with no handler installed are dropped.
    pub fn dispatch(
        &mut self,
        key: Key,
        kind: KeyEventKind,
        timestamp: f64,
        repeat: bool,
        ctx: &mut C,
    ) {
        let Some(handler) = self.handler.as_mut() else {
            return;
        };
        if !repeat {
            self.pressed_at.insert(key, timestamp);
        }
        let start = self.pressed_at.get(&key).copied().unwrap_or(timestamp);
        let event = KeyEvent {
            key,
            kind,
            held_time: timestamp - start,
        };
        log::trace!("Key event {:?}", event);
        handler.on_key(event, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_without_handler_is_dropped() {
        let mut dispatcher: KeyDispatcher<Vec<KeyEvent>> = KeyDispatcher::new();
        let mut log = Vec::new();
        dispatcher.dispatch(Key::Left, KeyEventKind::Pressed, 0.0, false, &mut log);
        assert!(!dispatcher.has_handler());
        assert!(log.is_empty());
    }

    #[test]
    fn test_held_time_tracks_repeats() {
        let mut dispatcher = KeyDispatcher::new();
        dispatcher.set_handler(|event: KeyEvent, log: &mut Vec<KeyEvent>| log.push(event));
        let mut log = Vec::new();
        dispatcher.dispatch(Key::Char('a'), KeyEventKind::Pressed, 1.0, false, &mut log);
        dispatcher.dispatch(Key::Char('a'), KeyEventKind::Pressed, 1.25, true, &mut log);
        dispatcher.dispatch(Key::Char('a'), KeyEventKind::Pressed, 1.5, true, &mut log);
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].held_time, 0.0);
        assert_eq!(log[2].held_time, 0.5);
        assert_eq!(log[2].key, Key::Char('a'));

        dispatcher.dispatch(Key::Char('a'), KeyEventKind::Released, 2.0, false, &mut log);
        assert_eq!(log[3].kind, KeyEventKind::Released);
        assert_eq!(log[3].held_time, 0.0);
    }

    #[test]
    fn test_keys_tracked_independently() {
        let mut dispatcher = KeyDispatcher::new();
        dispatcher.set_handler(|event: KeyEvent, log: &mut Vec<KeyEvent>| log.push(event));
        let mut log = Vec::new();
        dispatcher.dispatch(Key::Left, KeyEventKind::Pressed, 0.0, false, &mut log);
        dispatcher.dispatch(Key::Up, KeyEventKind::Pressed, 1.0, false, &mut log);
        dispatcher.dispatch(Key::Left, KeyEventKind::Pressed, 2.0, true, &mut log);
        assert_eq!(log[2].held_time, 2.0);
    }

    #[test]
    fn test_handler_replaced() {
        let mut dispatcher = KeyDispatcher::new();
        dispatcher.set_handler(|_: KeyEvent, n: &mut u32| *n += 1);
        dispatcher.set_handler(|_: KeyEvent, n: &mut u32| *n += 10);
        let mut n = 0;
        dispatcher.dispatch(Key::Down, KeyEventKind::Pressed, 0.0, false, &mut n);
        assert_eq!(n, 10);
        dispatcher.clear_handler();
        dispatcher.dispatch(Key::Down, KeyEventKind::Pressed, 0.0, false, &mut n);
        assert_eq!(n, 10);
    }
}

//! State-change notification.
//!
//! Listeners are owned by the game and called synchronously once an action
//! has settled. They receive no reference to the game: a listener that wants
//! fresh numbers reads them after the mutating call returns.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kiwi_island::{Level, MoveDirection};
//!
//! let level = Level::parse_text("1, 2,\n..,\nAna, 0, 0, 5, 1, 1,\n0,\n").unwrap();
//! let mut game = level.build().unwrap();
//! let changed = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&changed);
//! game.add_listener(move || flag.set(true));
//!
//! assert!(game.move_player(MoveDirection::East));
//! assert!(changed.get());
//! ```
//!
//! Listeners must be `'static` and the game is mutably borrowed for the
//! whole notification, so a listener cannot hold the game and call back
//! into it:
//!
//! ```compile_fail
//! use kiwi_island::Level;
//!
//! let level = Level::parse_text("1, 2,\n..,\nAna, 0, 0, 5, 1, 1,\n0,\n").unwrap();
//! let mut game = level.build().unwrap();
//! let reentrant = &mut game;
//! game.add_listener(move || {
//!     reentrant.count_kiwi();
//! });
//! ```

use std::fmt;

use tracing::warn;

/// Receives a notification after every state-changing game action.
pub trait GameEventListener {
    /// Called once the game state has changed.
    fn game_state_changed(&mut self);
}

impl<F: FnMut()> GameEventListener for F {
    fn game_state_changed(&mut self) {
        self();
    }
}

/// Handle returned when registering a listener, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered listeners.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn GameEventListener>)>,
}

// Manual Debug implementation since trait objects don't derive
impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Box<dyn GameEventListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        let removed = self.entries.len() != before;
        if !removed {
            warn!(?id, "attempted to remove unknown listener");
        }
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self) {
        for (_, listener) in &mut self.entries {
            listener.game_state_changed();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_add_notify_remove() {
        let calls = Rc::new(Cell::new(0));
        let mut listeners = Listeners::default();

        let counter = Rc::clone(&calls);
        let id = listeners.add(Box::new(move || counter.set(counter.get() + 1)));
        listeners.notify();
        listeners.notify();
        assert_eq!(calls.get(), 2);

        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        listeners.notify();
        assert_eq!(calls.get(), 2);
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut listeners = Listeners::default();
        let a = listeners.add(Box::new(|| {}));
        let b = listeners.add(Box::new(|| {}));
        assert_ne!(a, b);
    }
}

//! Change notifications.
//!
//! Every externally observable mutation of the engine is announced as an
//! [`Event`] carrying the old and new value. Observers are delivered events
//! synchronously, in registration order, in the order the mutations happened.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::types::{CellState, Position, Turn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    CursorMoved { old: Position, new: Position },
    CellChanged {
        pos: Position,
        old: CellState,
        new: CellState,
    },
    BlackScoreChanged { old: u32, new: u32 },
    WhiteScoreChanged { old: u32, new: u32 },
    TurnChanged { old: Turn, new: Turn },
    GameOver { old: bool, new: bool },
}

/// Receives engine events. Implementors use interior mutability to record
/// what they see.
pub trait Observer {
    fn notify(&self, event: &Event);
}

/// Ordered list of registered observers.
#[derive(Default)]
pub struct Notifier {
    observers: Vec<Rc<dyn Observer>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer`. Returns `false` if the same instance was already
    /// registered.
    pub fn add(&mut self, observer: Rc<dyn Observer>) -> bool {
        if self.position_of(&observer).is_some() {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Deregisters `observer`. Returns `false` if it was not registered.
    pub fn remove(&mut self, observer: &Rc<dyn Observer>) -> bool {
        match self.position_of(observer) {
            Some(idx) => {
                self.observers.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn emit(&self, event: Event) {
        for observer in &self.observers {
            observer.notify(&event);
        }
    }

    fn position_of(&self, observer: &Rc<dyn Observer>) -> Option<usize> {
        self.observers
            .iter()
            .position(|registered| same_instance(registered, observer))
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("observers", &self.observers.len())
            .finish()
    }
}

// Vtable pointers are not guaranteed unique, compare data pointers only.
fn same_instance(a: &Rc<dyn Observer>, b: &Rc<dyn Observer>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Records every event it is sent.
#[derive(Debug, Default)]
pub struct EventLog {
    events: RefCell<Vec<Event>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Returns and clears the recorded events.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl Observer for EventLog {
    fn notify(&self, event: &Event) {
        self.events.borrow_mut().push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tagged {
        tag: u8,
        seen: Rc<RefCell<Vec<u8>>>,
    }

    impl Observer for Tagged {
        fn notify(&self, _event: &Event) {
            self.seen.borrow_mut().push(self.tag);
        }
    }

    fn game_over_event() -> Event {
        Event::GameOver {
            old: false,
            new: true,
        }
    }

    #[test]
    fn delivers_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();
        for tag in [3, 1, 2] {
            notifier.add(Rc::new(Tagged {
                tag,
                seen: Rc::clone(&seen),
            }));
        }

        notifier.emit(game_over_event());

        assert_eq!(*seen.borrow(), vec![3, 1, 2]);
    }

    #[test]
    fn registration_is_idempotent_per_instance() {
        let log: Rc<dyn Observer> = Rc::new(EventLog::new());
        let mut notifier = Notifier::new();

        assert!(notifier.add(Rc::clone(&log)));
        assert!(!notifier.add(Rc::clone(&log)));
        assert_eq!(notifier.len(), 1);

        assert!(notifier.remove(&log));
        assert!(!notifier.remove(&log));
        assert!(notifier.is_empty());
    }

    #[test]
    fn event_log_keeps_order_and_take_clears() {
        let log = Rc::new(EventLog::new());
        let mut notifier = Notifier::new();
        notifier.add(log.clone());

        notifier.emit(Event::BlackScoreChanged { old: 2, new: 4 });
        notifier.emit(Event::WhiteScoreChanged { old: 2, new: 1 });

        assert_eq!(
            log.take(),
            vec![
                Event::BlackScoreChanged { old: 2, new: 4 },
                Event::WhiteScoreChanged { old: 2, new: 1 },
            ]
        );
        assert!(log.events().is_empty());
    }
}

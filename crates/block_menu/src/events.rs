use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorEvent {
    SelectionChange,
    Change,
}

impl EditorEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelectionChange => "selectionChange",
            Self::Change => "change",
        }
    }
}

impl fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Rc<dyn Fn()>;

/// Change-notification bus of a host editor. Single-threaded; listeners run synchronously in
/// subscription order.
#[derive(Default)]
pub struct EventBus {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, EditorEvent, Listener)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, event: EditorEvent, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, event, listener));
        id
    }

    /// Returns false when `id` was not subscribed to `event`.
    pub fn off(&self, event: EditorEvent, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, ev, _)| !(*lid == id && *ev == event));
        listeners.len() != before
    }

    pub fn emit(&self, event: EditorEvent) {
        // Listeners may subscribe or unsubscribe while running.
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, ev, _)| *ev == event)
            .map(|(_, _, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener();
        }
    }

    pub fn listener_count(&self, event: EditorEvent) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(_, ev, _)| *ev == event)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.borrow().len()
    }
}

//! Event types and listener registry.
//!
//! The engine emits three event kinds while typing. Listeners are invoked
//! synchronously, in registration order, on the tick that produced the
//! event. Each invocation is isolated: a panicking listener does not stop
//! the remaining listeners for the same event, and cannot corrupt engine
//! state.

use std::panic::{self, AssertUnwindSafe};

/// The three event kinds the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// One character was typed (also emitted once, charless, by `reset`).
    Update,
    /// The current line finished typing.
    LineComplete,
    /// Every queued line finished typing.
    Complete,
}

/// Payload delivered to listeners.
///
/// `completed_lines` is always a snapshot copy; mutating it cannot affect
/// engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingEvent {
    /// Emitted on every character tick, and once (without `ch`) on reset.
    Update {
        /// The partial text of the current line typed so far.
        text: String,
        /// The grapheme just typed. `None` on the reset-triggered update.
        ch: Option<String>,
        /// Index of the line being typed.
        line_index: usize,
        /// Index of the grapheme within the line. `None` on reset.
        char_index: Option<usize>,
        /// Snapshot of all fully typed lines.
        completed_lines: Vec<String>,
    },
    /// Emitted when a line finishes.
    LineComplete {
        /// The full text of the finished line.
        line: String,
        /// Index of the finished line.
        line_index: usize,
        /// Snapshot of all fully typed lines, including this one.
        completed_lines: Vec<String>,
    },
    /// Emitted once when the queue is exhausted.
    Complete {
        /// Snapshot of all fully typed lines, in queue order.
        completed_lines: Vec<String>,
    },
}

impl TypingEvent {
    /// The kind tag for this payload.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Update { .. } => EventKind::Update,
            Self::LineComplete { .. } => EventKind::LineComplete,
            Self::Complete { .. } => EventKind::Complete,
        }
    }
}

/// A listener callback.
pub type Listener = Box<dyn FnMut(&TypingEvent) + Send>;

/// Handle returned by listener registration, used for removal.
///
/// Boxed closures carry no usable identity in Rust, so removal is by
/// handle rather than by reference equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Per-kind ordered listener lists.
///
/// Registration order is dispatch order; duplicate registrations all fire.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    update: Vec<(ListenerId, Listener)>,
    line_complete: Vec<(ListenerId, Listener)>,
    complete: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    fn slot_mut(&mut self, kind: EventKind) -> &mut Vec<(ListenerId, Listener)> {
        match kind {
            EventKind::Update => &mut self.update,
            EventKind::LineComplete => &mut self.line_complete,
            EventKind::Complete => &mut self.complete,
        }
    }

    /// Register a listener. Returns the id used for removal.
    pub(crate) fn add(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.slot_mut(kind).push((id, listener));
        id
    }

    /// Remove a listener by id. Returns whether anything was removed;
    /// unknown ids are a no-op.
    pub(crate) fn remove(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let slot = self.slot_mut(kind);
        let before = slot.len();
        slot.retain(|(listener_id, _)| *listener_id != id);
        slot.len() != before
    }

    /// Dispatch `event` to every listener of its kind, in registration
    /// order. Panics inside a listener are contained per invocation.
    pub(crate) fn emit(&mut self, event: &TypingEvent) {
        for (_, listener) in self.slot_mut(event.kind()) {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener(event)));
            if outcome.is_err() {
                #[cfg(feature = "tracing")]
                tracing::warn!(kind = ?event.kind(), "listener panicked during dispatch");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn update_event() -> TypingEvent {
        TypingEvent::Update {
            text: "H".to_string(),
            ch: Some("H".to_string()),
            line_index: 0,
            char_index: Some(0),
            completed_lines: Vec::new(),
        }
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(update_event().kind(), EventKind::Update);
        let line = TypingEvent::LineComplete {
            line: "Hi".to_string(),
            line_index: 0,
            completed_lines: vec!["Hi".to_string()],
        };
        assert_eq!(line.kind(), EventKind::LineComplete);
        let done = TypingEvent::Complete {
            completed_lines: Vec::new(),
        };
        assert_eq!(done.kind(), EventKind::Complete);
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut listeners = Listeners::default();

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            listeners.add(
                EventKind::Update,
                Box::new(move |_| order.lock().unwrap().push(tag)),
            );
        }

        listeners.emit(&update_event());
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_only_matching_kind_fires() {
        let updates = Arc::new(AtomicUsize::new(0));
        let completes = Arc::new(AtomicUsize::new(0));
        let mut listeners = Listeners::default();

        let counter = updates.clone();
        listeners.add(
            EventKind::Update,
            Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        let counter = completes.clone();
        listeners.add(
            EventKind::Complete,
            Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        listeners.emit(&update_event());
        assert_eq!(updates.load(Ordering::SeqCst), 1);
        assert_eq!(completes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_duplicate_listeners_both_fire() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut listeners = Listeners::default();
        for _ in 0..2 {
            let count = count.clone();
            listeners.add(
                EventKind::Update,
                Box::new(move |_| {
                    count.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }
        listeners.emit(&update_event());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_remove_by_id() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut listeners = Listeners::default();
        let counter = count.clone();
        let id = listeners.add(
            EventKind::Update,
            Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(listeners.remove(EventKind::Update, id));
        listeners.emit(&update_event());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        // Second removal of the same id is a no-op.
        assert!(!listeners.remove(EventKind::Update, id));
    }

    #[test]
    fn test_remove_wrong_kind_is_noop() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut listeners = Listeners::default();
        let counter = count.clone();
        let id = listeners.add(
            EventKind::Update,
            Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(!listeners.remove(EventKind::Complete, id));
        listeners.emit(&update_event());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_listener_does_not_block_the_rest() {
        let prev = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));

        let count = Arc::new(AtomicUsize::new(0));
        let mut listeners = Listeners::default();
        listeners.add(EventKind::Update, Box::new(|_| panic!("bad listener")));
        let counter = count.clone();
        listeners.add(
            EventKind::Update,
            Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        listeners.emit(&update_event());

        std::panic::set_hook(prev);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}

//=========================================================================
// Events
//=========================================================================
//
// Event envelope carried through the bus, plus the menu signal payload.
//
// Payloads are borrowed: the emitter owns the data and the bus only
// lends it to listeners for the duration of one `emit` call.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt;

//=== EventType ===========================================================

/// Coarse event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Signal,
    Update,
    Custom,
}

//=== Event ===============================================================

/// An event with a type tag and an immutable, type-erased payload view.
#[derive(Clone, Copy)]
pub struct Event<'a> {
    kind: EventType,
    payload: &'a dyn Any,
}

impl<'a> Event<'a> {
    /// Wraps `payload` in an event of the given type.
    pub fn new<T: Any>(kind: EventType, payload: &'a T) -> Self {
        Self { kind, payload }
    }

    /// Shorthand for a [`EventType::Signal`] event.
    pub fn signal<T: Any>(payload: &'a T) -> Self {
        Self::new(EventType::Signal, payload)
    }

    pub fn kind(&self) -> EventType {
        self.kind
    }

    /// Returns the payload if it is a `T`.
    pub fn payload<T: Any>(&self) -> Option<&'a T> {
        self.payload.downcast_ref::<T>()
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event").field("kind", &self.kind).finish_non_exhaustive()
    }
}

//=== MenuSignal ==========================================================

/// Intent emitted by a menu button click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuSignal {
    #[default]
    None,
    Continue,
    NewGame,
    Options,
    Quit,
    Main,
}

//=========================================================================
// Tests
//=========================================================================

//=========================================================================
// Event Bus
//=========================================================================
//
// Named channels of subscriber callbacks.
//
// Architecture:
//   subscribe(name, listener) → Channel { listeners } (created on demand)
//                                   ↓
//   emit(name, event) → snapshot listeners → call each in order
//
// Dispatch iterates a snapshot, so a listener may subscribe, unsubscribe
// or emit again while it runs. Changes apply from the next emit.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::Event;

//=== Listener ============================================================

/// Shared subscriber callback. Identity is pointer identity of the `Rc`.
pub type Listener = Rc<dyn Fn(&Event<'_>)>;

/// Wraps a closure into a [`Listener`].
pub fn listener<F>(func: F) -> Listener
where
    F: Fn(&Event<'_>) + 'static,
{
    Rc::new(func)
}

//=== Channel =============================================================

struct Channel {
    name: String,
    listeners: Vec<Listener>,
}

impl Channel {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            listeners: Vec::new(),
        }
    }

    fn unsubscribe(&mut self, target: &Listener) -> bool {
        match self.listeners.iter().position(|l| Rc::ptr_eq(l, target)) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }
}

//=== EventBus ============================================================

/// Synchronous publish/subscribe hub keyed by channel name.
///
/// Listeners are not de-duplicated: subscribing the same listener twice
/// means it runs twice per emit. The bus is shared as `Rc<EventBus>` and
/// every method takes `&self`.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use conquest_engine::core::event_bus::{listener, Event, EventBus, MenuSignal};
///
/// let bus = EventBus::new();
/// let seen = Rc::new(Cell::new(MenuSignal::None));
///
/// let sink = Rc::clone(&seen);
/// bus.subscribe("menu_signals", listener(move |event| {
///     if let Some(signal) = event.payload::<MenuSignal>() {
///         sink.set(*signal);
///     }
/// }));
///
/// bus.emit("menu_signals", &Event::signal(&MenuSignal::Quit));
/// assert_eq!(seen.get(), MenuSignal::Quit);
/// ```
pub struct EventBus {
    channels: RefCell<Vec<Channel>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            channels: RefCell::new(Vec::new()),
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Appends `listener` to `channel`, creating the channel if needed.
    pub fn subscribe(&self, channel: &str, listener: Listener) {
        let mut channels = self.channels.borrow_mut();

        let index = match channels.iter().position(|c| c.name == channel) {
            Some(index) => index,
            None => {
                debug!("Creating event channel '{}'", channel);
                channels.push(Channel::new(channel));
                channels.len() - 1
            }
        };

        channels[index].listeners.push(listener);
    }

    /// Removes the first subscription of `listener` from `channel`.
    ///
    /// Unknown channels and listeners are ignored.
    pub fn unsubscribe(&self, channel: &str, listener: &Listener) {
        let mut channels = self.channels.borrow_mut();
        if let Some(c) = channels.iter_mut().find(|c| c.name == channel) {
            if c.unsubscribe(listener) {
                debug!("Listener removed from channel '{}'", channel);
            }
        }
    }

    //--- Dispatch ---------------------------------------------------------

    /// Invokes every listener of `channel` with `event`, in subscription
    /// order, on the caller's stack.
    ///
    /// Emitting on a channel nobody subscribed to does nothing.
    pub fn emit(&self, channel: &str, event: &Event<'_>) {
        let snapshot = self.snapshot(channel);
        trace!("Emitting {:?} on '{}' to {} listener(s)", event.kind(), channel, snapshot.len());

        for listener in snapshot {
            listener(event);
        }
    }

    fn snapshot(&self, channel: &str) -> Vec<Listener> {
        self.channels
            .borrow()
            .iter()
            .find(|c| c.name == channel)
            .map(|c| c.listeners.clone())
            .unwrap_or_default()
    }

    //--- Queries ----------------------------------------------------------

    /// Number of subscriptions on `channel` (0 if unknown).
    pub fn listener_count(&self, channel: &str) -> usize {
        self.channels
            .borrow()
            .iter()
            .find(|c| c.name == channel)
            .map_or(0, |c| c.listeners.len())
    }

    pub fn channel_count(&self) -> usize {
        self.channels.borrow().len()
    }

    /// Drops every channel and subscription.
    pub fn clear(&self) {
        self.channels.borrow_mut().clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::{EventType, MenuSignal};

    const CHANNEL: &str = "X";

    fn recording(log: &Rc<RefCell<Vec<u32>>>, id: u32) -> Listener {
        let log = Rc::clone(log);
        listener(move |_| log.borrow_mut().push(id))
    }

    fn ping(bus: &EventBus) {
        bus.emit(CHANNEL, &Event::new(EventType::Update, &()));
    }

    #[test]
    fn fan_out_in_subscription_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for id in 0..4 {
            bus.subscribe(CHANNEL, recording(&log, id));
        }

        ping(&bus);

        assert_eq!(*log.borrow(), [0, 1, 2, 3]);
    }

    #[test]
    fn unsubscribed_listener_is_not_invoked() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = recording(&log, 1);
        let second = recording(&log, 2);
        let third = recording(&log, 3);
        bus.subscribe(CHANNEL, Rc::clone(&first));
        bus.subscribe(CHANNEL, Rc::clone(&second));
        bus.subscribe(CHANNEL, Rc::clone(&third));

        bus.unsubscribe(CHANNEL, &second);
        ping(&bus);

        assert_eq!(*log.borrow(), [1, 3]);
        assert_eq!(bus.listener_count(CHANNEL), 2);
    }

    #[test]
    fn duplicates_are_invoked_twice_and_removed_one_at_a_time() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = recording(&log, 7);
        bus.subscribe(CHANNEL, Rc::clone(&l));
        bus.subscribe(CHANNEL, Rc::clone(&l));

        ping(&bus);
        assert_eq!(*log.borrow(), [7, 7]);

        bus.unsubscribe(CHANNEL, &l);
        ping(&bus);
        assert_eq!(*log.borrow(), [7, 7, 7]);
    }

    #[test]
    fn unsubscribe_unknown_is_noop() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let registered = recording(&log, 1);
        let stranger = recording(&log, 2);
        bus.subscribe(CHANNEL, Rc::clone(&registered));

        bus.unsubscribe(CHANNEL, &stranger);
        bus.unsubscribe("nope", &registered);

        assert_eq!(bus.listener_count(CHANNEL), 1);
        assert_eq!(bus.channel_count(), 1);
    }

    #[test]
    fn emit_on_unknown_channel_does_not_create_it() {
        let bus = EventBus::new();
        ping(&bus);
        assert_eq!(bus.channel_count(), 0);
    }

    #[test]
    fn channels_are_isolated() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe("a", recording(&log, 1));
        bus.subscribe("b", recording(&log, 2));

        bus.emit("b", &Event::new(EventType::Custom, &()));

        assert_eq!(*log.borrow(), [2]);
    }

    #[test]
    fn listener_reads_payload() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe("menu_signals", listener(move |event| {
            if let Some(signal) = event.payload::<MenuSignal>() {
                sink.borrow_mut().push(*signal);
            }
        }));

        bus.emit("menu_signals", &Event::signal(&MenuSignal::NewGame));
        bus.emit("menu_signals", &Event::new(EventType::Custom, &5u8));

        assert_eq!(*seen.borrow(), [MenuSignal::NewGame]);
    }

    #[test]
    fn listener_may_subscribe_during_dispatch() {
        let bus = Rc::new(EventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let late = recording(&log, 2);
        let bus_ref = Rc::clone(&bus);
        let log_ref = Rc::clone(&log);
        bus.subscribe(CHANNEL, listener(move |_| {
            log_ref.borrow_mut().push(1);
            bus_ref.subscribe(CHANNEL, Rc::clone(&late));
        }));

        ping(&bus);
        assert_eq!(*log.borrow(), [1], "new listener waits for the next emit");

        ping(&bus);
        assert_eq!(*log.borrow(), [1, 1, 2]);
    }

    #[test]
    fn listener_may_unsubscribe_itself_during_dispatch() {
        let bus = Rc::new(EventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let slot: Rc<RefCell<Option<Listener>>> = Rc::new(RefCell::new(None));

        let bus_ref = Rc::clone(&bus);
        let log_ref = Rc::clone(&log);
        let slot_ref = Rc::clone(&slot);
        let once = listener(move |_| {
            log_ref.borrow_mut().push(1);
            if let Some(me) = slot_ref.borrow().as_ref() {
                bus_ref.unsubscribe(CHANNEL, me);
            }
        });
        *slot.borrow_mut() = Some(Rc::clone(&once));
        bus.subscribe(CHANNEL, once);
        bus.subscribe(CHANNEL, recording(&log, 2));

        ping(&bus);
        ping(&bus);

        assert_eq!(*log.borrow(), [1, 2, 2]);
        // Break the self-reference cycle.
        slot.borrow_mut().take();
    }

    #[test]
    fn nested_emit_is_allowed() {
        let bus = Rc::new(EventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        bus.subscribe("inner", recording(&log, 2));
        let bus_ref = Rc::clone(&bus);
        let log_ref = Rc::clone(&log);
        bus.subscribe("outer", listener(move |_| {
            log_ref.borrow_mut().push(1);
            bus_ref.emit("inner", &Event::new(EventType::Custom, &()));
        }));

        bus.emit("outer", &Event::new(EventType::Custom, &()));

        assert_eq!(*log.borrow(), [1, 2]);
    }

    #[test]
    fn clear_removes_everything() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(CHANNEL, recording(&log, 1));

        bus.clear();
        ping(&bus);

        assert!(log.borrow().is_empty());
        assert_eq!(bus.channel_count(), 0);
    }
}

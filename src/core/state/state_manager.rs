//=========================================================================
// State Manager
//=========================================================================
//
// Owns the current GameState and switches between state behaviours.
//
// Architecture:
//   menu click → EventBus("menu_signals") → signal listener
//                                                ↓ push
//                                       SharedTransitionQueue
//                                                ↓ apply_transitions()
//   enter(next): reject self/terminal/unregistered → exit(old) → enter(new)
//
// Transitions are only applied at dispatch points, never from inside a
// listener, so no state hook runs while another one is on the stack.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, info, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::states::{MenuState, PauseState, PlayState, QuitState};
use super::{GameState, SharedTransitionQueue, StateBehavior, TransitionQueue};
use crate::core::event_bus::{listener, EventBus, Listener, MenuSignal, MENU_SIGNALS};
use crate::core::input::{Action, InputManager};
use crate::core::services::ServiceRegistry;
use crate::gui::Menu;

//=== Constants ===========================================================

/// Upper bound on transitions applied by one `apply_transitions` call.
/// Hooks that keep requesting each other are cut off here.
pub const MAX_TRANSITIONS_PER_DISPATCH: usize = 16;

//=== TransitionError =====================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("already in state {0:?}")]
    SelfTransition(GameState),

    #[error("no behaviour registered for state {0:?}")]
    Unregistered(GameState),

    #[error("cannot leave terminal state {0:?}")]
    FromTerminal(GameState),

    #[error("service registry has been dropped")]
    ServicesUnavailable,
}

//=== Signal Mapping ======================================================

/// Game state a menu signal leads to, if any.
///
/// `Options` and `Main` only switch menu screens.
pub fn signal_target(signal: MenuSignal) -> Option<GameState> {
    match signal {
        MenuSignal::Continue | MenuSignal::NewGame => Some(GameState::Play),
        MenuSignal::Quit => Some(GameState::Quit),
        MenuSignal::Options | MenuSignal::Main | MenuSignal::None => None,
    }
}

//=== StateManager ========================================================

type Slot = RefCell<Option<Box<dyn StateBehavior>>>;

/// Finite state machine over [`GameState`].
///
/// Holds only a weak handle to the service registry; the registry in turn
/// holds the manager. Every runtime method takes `&self`, so state hooks
/// may look the manager up in the registry and call [`request`](Self::request)
/// while a layer is driving it.
pub struct StateManager {
    current: Cell<GameState>,
    states: [Slot; GameState::COUNT],
    menu: Rc<RefCell<Menu>>,
    services: Weak<ServiceRegistry>,
    transitions: SharedTransitionQueue,

    /// Set while a state hook runs.
    in_hook: Cell<bool>,
}

impl StateManager {
    /// Creates a manager with an empty state table.
    pub fn new(initial: GameState, menu: Rc<RefCell<Menu>>, services: &Rc<ServiceRegistry>) -> Self {
        Self {
            current: Cell::new(initial),
            states: Default::default(),
            menu,
            services: Rc::downgrade(services),
            transitions: Rc::new(RefCell::new(TransitionQueue::new())),
            in_hook: Cell::new(false),
        }
    }

    /// Creates a manager with the stock Menu, Play, Pause and Quit
    /// behaviours.
    pub fn with_default_states(
        initial: GameState,
        menu: Rc<RefCell<Menu>>,
        services: &Rc<ServiceRegistry>,
    ) -> Self {
        let mut manager = Self::new(initial, Rc::clone(&menu), services);
        manager.register(GameState::Menu, Box::new(MenuState::new(menu)));
        manager.register(GameState::Play, Box::new(PlayState));
        manager.register(GameState::Pause, Box::new(PauseState));
        manager.register(GameState::Quit, Box::new(QuitState));
        manager
    }

    /// Installs the behaviour for `state`, replacing any previous one.
    pub fn register(&mut self, state: GameState, behavior: Box<dyn StateBehavior>) {
        if self.states[state.index()].get_mut().replace(behavior).is_some() {
            warn!("Replaced behaviour of state {:?}", state);
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Runs the `enter` hook of the initial state.
    pub fn start(&self) -> Result<(), TransitionError> {
        let services = self.services()?;
        let current = self.current.get();
        if !self.is_registered(current) {
            return Err(TransitionError::Unregistered(current));
        }

        info!("Starting in state {:?}", current);
        self.run_hook(current, |state| state.enter(&services));
        Ok(())
    }

    /// Switches to `next`: `exit` on the old state, then `enter` on the
    /// new one.
    ///
    /// On error nothing changes. Called from inside a state hook, the
    /// transition is queued for the running dispatch instead.
    pub fn enter(&self, next: GameState) -> Result<(), TransitionError> {
        if self.in_hook.get() {
            debug!("Deferring transition to {:?} requested from a state hook", next);
            self.request(next);
            return Ok(());
        }

        let current = self.current.get();
        if next == current {
            warn!("Ignoring transition to current state {:?}", next);
            return Err(TransitionError::SelfTransition(next));
        }
        if current.is_terminal() {
            warn!("Ignoring transition {:?} → {:?}: {:?} is terminal", current, next, current);
            return Err(TransitionError::FromTerminal(current));
        }
        if !self.is_registered(next) {
            warn!("Ignoring transition to unregistered state {:?}", next);
            return Err(TransitionError::Unregistered(next));
        }
        let services = self.services()?;

        self.run_hook(current, |old| old.exit(&services));
        self.current.set(next);
        info!("State {:?} → {:?}", current, next);
        self.run_hook(next, |new| new.enter(&services));
        Ok(())
    }

    /// Queues a transition for the next [`apply_transitions`](Self::apply_transitions).
    pub fn request(&self, target: GameState) {
        self.transitions.borrow_mut().push(target);
    }

    /// Applies queued transitions in request order, including the ones
    /// queued by the hooks it runs.
    ///
    /// Rejected transitions are logged and dropped. At most
    /// [`MAX_TRANSITIONS_PER_DISPATCH`] are applied; the rest stay queued.
    pub fn apply_transitions(&self) {
        let mut applied = 0;
        while applied < MAX_TRANSITIONS_PER_DISPATCH {
            let Some(target) = self.transitions.borrow_mut().pop() else {
                return;
            };
            applied += 1;
            if let Err(e) = self.enter(target) {
                debug!("Dropped queued transition to {:?}: {}", target, e);
            }
        }
        if !self.transitions.borrow().is_empty() {
            warn!(
                "Transition limit of {} reached, {} left for the next frame",
                MAX_TRANSITIONS_PER_DISPATCH,
                self.pending_transitions()
            );
        }
    }

    //--- Per-Frame --------------------------------------------------------

    /// Routes this frame's input to the current state.
    ///
    /// Menu input goes to the menu client. Cancel backs out of Play to the
    /// menu and out of Pause to Play.
    pub fn handle_input(&self, input: &InputManager) {
        match self.current.get() {
            GameState::Menu => self.menu.borrow_mut().handle_input(input),
            GameState::Play if input.pressed(Action::Cancel) => self.request(GameState::Menu),
            GameState::Pause if input.pressed(Action::Cancel) => self.request(GameState::Play),
            _ => {}
        }
    }

    /// Runs the `update` hook of the current state.
    pub fn update(&self) {
        let Some(services) = self.services.upgrade() else {
            return;
        };
        self.run_hook(self.current.get(), |state| state.update(&services));
    }

    //--- Signals ----------------------------------------------------------

    /// Listener that turns menu signals into queued transitions.
    pub fn signal_listener(&self) -> Listener {
        let queue = Rc::clone(&self.transitions);
        listener(move |event| {
            let Some(&signal) = event.payload::<MenuSignal>() else {
                return;
            };
            if let Some(target) = signal_target(signal) {
                debug!("Menu signal {:?} requests {:?}", signal, target);
                queue.borrow_mut().push(target);
            }
        })
    }

    /// Subscribes [`signal_listener`](Self::signal_listener) to the menu
    /// channel and returns it for later unsubscription.
    pub fn subscribe(&self, bus: &EventBus) -> Listener {
        let listener = self.signal_listener();
        bus.subscribe(MENU_SIGNALS, Rc::clone(&listener));
        listener
    }

    //--- Queries ----------------------------------------------------------

    pub fn current(&self) -> GameState {
        self.current.get()
    }

    pub fn is_terminal(&self) -> bool {
        self.current.get().is_terminal()
    }

    pub fn menu(&self) -> &Rc<RefCell<Menu>> {
        &self.menu
    }

    pub fn pending_transitions(&self) -> usize {
        self.transitions.borrow().len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn is_registered(&self, state: GameState) -> bool {
        self.states[state.index()]
            .try_borrow()
            .map_or(true, |slot| slot.is_some())
    }

    /// Runs `hook` on the behaviour of `state` with `in_hook` raised.
    ///
    /// A hook that calls back into the same slot (e.g. `update` from
    /// `update`) is skipped with a warning.
    fn run_hook(&self, state: GameState, hook: impl FnOnce(&mut dyn StateBehavior)) {
        let Ok(mut slot) = self.states[state.index()].try_borrow_mut() else {
            warn!("State {:?} is already running a hook, skipping nested call", state);
            return;
        };
        let Some(behavior) = slot.as_mut() else {
            return;
        };

        let outer = self.in_hook.replace(true);
        hook(behavior.as_mut());
        self.in_hook.set(outer);
    }

    fn services(&self) -> Result<Rc<ServiceRegistry>, TransitionError> {
        self.services
            .upgrade()
            .ok_or(TransitionError::ServicesUnavailable)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

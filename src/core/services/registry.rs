//=========================================================================
// Service Registry
//=========================================================================
//
// Tag-keyed lookup of the engine's singleton subsystems.
//
// Architecture:
//   register(tag, Rc<RefCell<T>>) → Vec<ServiceEntry> (ordered, unique tags)
//                                        ↓
//   get::<T>(tag) ← linear scan → downcast → Rc<RefCell<T>>
//
// The registry shares instances, it never owns them exclusively. Callers
// keep their own handle and decide when the subsystem dies.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use thiserror::Error;

//=== ServiceType =========================================================

/// Identifies a registered subsystem.
///
/// Add new kinds here as the engine grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    Input,
    StateManager,
    Audio,
    Settings,
    EventBus,
    Resources,
    Clock,
    Render,
}

//=== ServiceError ========================================================

/// Registration failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The tag is already bound; the existing binding was kept.
    #[error("service {0:?} is already registered")]
    AlreadyRegistered(ServiceType),
}

//=== ServiceEntry ========================================================

struct ServiceEntry {
    tag: ServiceType,
    instance: Rc<dyn Any>,
}

//=== ServiceRegistry =====================================================

/// Flat, ordered map from [`ServiceType`] to a shared service instance.
///
/// Every instance is stored as `Rc<RefCell<T>>` so that layers and states
/// can borrow the subsystem they need for the duration of one call.
/// All methods take `&self`; the registry itself is shared as
/// `Rc<ServiceRegistry>` and only ever touched from the game-loop thread.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use conquest_engine::core::services::{ServiceRegistry, ServiceType};
///
/// let registry = ServiceRegistry::new();
/// registry.register(ServiceType::Clock, Rc::new(RefCell::new(42u32))).unwrap();
///
/// let clock = registry.get::<u32>(ServiceType::Clock).unwrap();
/// assert_eq!(*clock.borrow(), 42);
/// ```
pub struct ServiceRegistry {
    entries: RefCell<Vec<ServiceEntry>>,
}

impl ServiceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::with_capacity(8)),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Binds `instance` to `tag`.
    ///
    /// Not an upsert: if `tag` is already bound the call fails and the
    /// existing binding is left untouched.
    pub fn register<T: 'static>(
        &self,
        tag: ServiceType,
        instance: Rc<RefCell<T>>,
    ) -> Result<(), ServiceError> {
        if self.contains(tag) {
            warn!("Service {:?} already registered, ignoring", tag);
            return Err(ServiceError::AlreadyRegistered(tag));
        }

        self.entries.borrow_mut().push(ServiceEntry { tag, instance });
        debug!("Registered service {:?}", tag);
        Ok(())
    }

    /// Removes the binding for `tag`, if any.
    ///
    /// Remaining entries keep their relative order.
    pub fn unregister(&self, tag: ServiceType) {
        let mut entries = self.entries.borrow_mut();
        if let Some(index) = entries.iter().position(|e| e.tag == tag) {
            entries.remove(index);
            debug!("Unregistered service {:?}", tag);
        }
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the instance bound to `tag`, or `None` if unbound.
    ///
    /// Also returns `None` (with a warning) when the bound instance is not
    /// a `RefCell<T>`.
    pub fn get<T: 'static>(&self, tag: ServiceType) -> Option<Rc<RefCell<T>>> {
        let entries = self.entries.borrow();
        let entry = entries.iter().find(|e| e.tag == tag)?;

        match Rc::clone(&entry.instance).downcast::<RefCell<T>>() {
            Ok(instance) => Some(instance),
            Err(_) => {
                warn!(
                    "Service {:?} is not a {}",
                    tag,
                    std::any::type_name::<T>()
                );
                None
            }
        }
    }

    /// Returns `true` if `tag` is bound.
    pub fn contains(&self, tag: ServiceType) -> bool {
        self.entries.borrow().iter().any(|e| e.tag == tag)
    }

    /// Returns the bound tags in registration order.
    pub fn tags(&self) -> Vec<ServiceType> {
        self.entries.borrow().iter().map(|e| e.tag).collect()
    }

    /// Number of bound services.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drops every binding. Instances survive if callers still hold them.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Default for ServiceRegistry {
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

    fn shared<T>(value: T) -> Rc<RefCell<T>> {
        Rc::new(RefCell::new(value))
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = ServiceRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get::<u32>(ServiceType::Input).is_none());
    }

    #[test]
    fn register_and_get() {
        let registry = ServiceRegistry::new();
        registry.register(ServiceType::Input, shared(7u32)).unwrap();

        let input = registry.get::<u32>(ServiceType::Input).unwrap();
        assert_eq!(*input.borrow(), 7);
    }

    #[test]
    fn duplicate_register_keeps_first_binding() {
        let registry = ServiceRegistry::new();
        let first = shared(1u32);
        let second = shared(2u32);

        assert!(registry.register(ServiceType::Audio, first).is_ok());
        assert_eq!(
            registry.register(ServiceType::Audio, second),
            Err(ServiceError::AlreadyRegistered(ServiceType::Audio))
        );

        let audio = registry.get::<u32>(ServiceType::Audio).unwrap();
        assert_eq!(*audio.borrow(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn get_returns_the_same_instance() {
        let registry = ServiceRegistry::new();
        let clock = shared(0u64);
        registry.register(ServiceType::Clock, Rc::clone(&clock)).unwrap();

        *registry.get::<u64>(ServiceType::Clock).unwrap().borrow_mut() = 99;
        assert_eq!(*clock.borrow(), 99);
    }

    #[test]
    fn get_with_wrong_type_is_none() {
        let registry = ServiceRegistry::new();
        registry.register(ServiceType::Settings, shared(1.5f32)).unwrap();

        assert!(registry.get::<u32>(ServiceType::Settings).is_none());
        assert!(registry.get::<f32>(ServiceType::Settings).is_some());
    }

    #[test]
    fn unregister_preserves_order() {
        let registry = ServiceRegistry::new();
        registry.register(ServiceType::Input, shared(0u8)).unwrap();
        registry.register(ServiceType::Audio, shared(0u8)).unwrap();
        registry.register(ServiceType::Render, shared(0u8)).unwrap();
        registry.register(ServiceType::Clock, shared(0u8)).unwrap();

        registry.unregister(ServiceType::Audio);

        assert_eq!(
            registry.tags(),
            vec![ServiceType::Input, ServiceType::Render, ServiceType::Clock]
        );
    }

    #[test]
    fn unregister_unknown_is_noop() {
        let registry = ServiceRegistry::new();
        registry.register(ServiceType::Input, shared(0u8)).unwrap();

        registry.unregister(ServiceType::EventBus);

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn reregister_after_unregister() {
        let registry = ServiceRegistry::new();
        registry.register(ServiceType::Input, shared(1u8)).unwrap();
        registry.unregister(ServiceType::Input);

        assert!(registry.register(ServiceType::Input, shared(2u8)).is_ok());
        assert_eq!(*registry.get::<u8>(ServiceType::Input).unwrap().borrow(), 2);
    }

    #[test]
    fn clear_does_not_drop_caller_handles() {
        let registry = ServiceRegistry::new();
        let input = shared(5u8);
        registry.register(ServiceType::Input, Rc::clone(&input)).unwrap();

        registry.clear();

        assert!(registry.is_empty());
        assert_eq!(*input.borrow(), 5);
        assert_eq!(Rc::strong_count(&input), 1);
    }
}

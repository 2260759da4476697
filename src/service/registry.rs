//! # Service Registry
//!
//! Capability-typed lookup shared by strategies. A service is registered
//! under the type it is looked up by: a concrete type for plain helpers, or
//! a `Box<dyn Trait>` for trait-object capabilities. The first registration
//! of a capability wins; later ones are kept only as a count.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

/// Registry of shared helper services
#[derive(Default)]
pub struct ServiceRegistry {
    /// Visible provider per capability
    by_capability: HashMap<TypeId, Box<dyn Any>>,

    /// Capability names in registration order, including shadowed ones
    registrations: Vec<&'static str>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `service` under its own type.
    ///
    /// Returns `false` when an earlier registration of the same capability
    /// shadows this one.
    pub fn register<S: Any>(&mut self, service: S) -> bool {
        self.registrations.push(type_name::<S>());
        let key = TypeId::of::<S>();
        if self.by_capability.contains_key(&key) {
            return false;
        }
        self.by_capability.insert(key, Box::new(service));
        true
    }

    /// Register a trait-object capability, e.g. `provide::<dyn CodeLookup>(Box::new(x))`
    pub fn provide<C: ?Sized + 'static>(&mut self, service: Box<C>) -> bool {
        self.register::<Box<C>>(service)
    }

    /// First registered service of type `S`; absence is not an error
    pub fn lookup<S: Any>(&self) -> Option<&S> {
        self.by_capability
            .get(&TypeId::of::<S>())
            .and_then(|s| s.downcast_ref::<S>())
    }

    pub fn lookup_mut<S: Any>(&mut self) -> Option<&mut S> {
        self.by_capability
            .get_mut(&TypeId::of::<S>())
            .and_then(|s| s.downcast_mut::<S>())
    }

    /// First registered provider of trait-object capability `C`
    pub fn capability<C: ?Sized + 'static>(&self) -> Option<&C> {
        self.lookup::<Box<C>>().map(|b| &**b)
    }

    pub fn contains<S: Any>(&self) -> bool {
        self.by_capability.contains_key(&TypeId::of::<S>())
    }

    /// Drop every registration
    pub fn clear(&mut self) {
        self.by_capability.clear();
        self.registrations.clear();
    }

    /// Number of registrations, shadowed ones included
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn registered_names(&self) -> &[&'static str] {
        &self.registrations
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("registrations", &self.registrations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Index(&'static str);

    trait Greeter {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".into()
        }
    }

    struct French;

    impl Greeter for French {
        fn greet(&self) -> String {
            "bonjour".into()
        }
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = ServiceRegistry::new();
        assert!(registry.register(Index("first")));
        assert!(!registry.register(Index("second")));

        assert_eq!(registry.lookup::<Index>(), Some(&Index("first")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_missing_capability_is_none() {
        let registry = ServiceRegistry::new();
        assert!(registry.lookup::<Index>().is_none());
        assert!(registry.capability::<dyn Greeter>().is_none());
    }

    #[test]
    fn test_trait_capability() {
        let mut registry = ServiceRegistry::new();
        registry.provide::<dyn Greeter>(Box::new(English));
        registry.provide::<dyn Greeter>(Box::new(French));

        let greeter = registry.capability::<dyn Greeter>().unwrap();
        assert_eq!(greeter.greet(), "hello");
    }

    #[test]
    fn test_lookup_mut_and_clear() {
        let mut registry = ServiceRegistry::new();
        registry.register(vec![1u32]);
        registry.lookup_mut::<Vec<u32>>().unwrap().push(2);
        assert_eq!(registry.lookup::<Vec<u32>>(), Some(&vec![1, 2]));

        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.contains::<Vec<u32>>());
    }
}

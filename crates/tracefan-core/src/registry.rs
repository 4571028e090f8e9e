//! Ordered registry of active trace listeners

use parking_lot::RwLock;

use crate::listener::SharedListener;

/// Ordered, thread-safe collection of trace listeners
///
/// Insertion order is significant: dispatch order is registration order.
/// The registry hands out snapshots so a broadcast never holds the lock
/// while a listener runs.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<Vec<SharedListener>>,
}

impl ListenerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Append a listener; it receives dispatches after every earlier one
    pub fn add(&self, listener: SharedListener) {
        self.listeners.write().push(listener);
    }

    /// Remove the first listener with the given name
    ///
    /// Returns `true` if a listener was removed.
    pub fn remove(&self, name: &str) -> bool {
        let mut listeners = self.listeners.write();
        if let Some(pos) = listeners.iter().position(|l| l.name() == name) {
            listeners.remove(pos);
            true
        } else {
            false
        }
    }

    /// Remove every listener
    pub fn clear(&self) {
        self.listeners.write().clear();
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Current listeners in registration order
    pub fn snapshot(&self) -> Vec<SharedListener> {
        self.listeners.read().clone()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.read();
        let names: Vec<&str> = listeners.iter().map(|l| l.name()).collect();
        f.debug_struct("ListenerRegistry")
            .field("listeners", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::listener::{MemoryListener, NoOpListener};

    #[test]
    fn test_registration_order_is_preserved() {
        let registry = ListenerRegistry::new();
        registry.add(Arc::new(MemoryListener::with_name("first")));
        registry.add(Arc::new(MemoryListener::with_name("second")));
        registry.add(Arc::new(MemoryListener::with_name("third")));

        let names: Vec<String> = registry
            .snapshot()
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_remove_by_name() {
        let registry = ListenerRegistry::new();
        registry.add(Arc::new(MemoryListener::new()));
        registry.add(Arc::new(NoOpListener::new()));
        assert_eq!(registry.len(), 2);

        assert!(registry.remove("noop"));
        assert_eq!(registry.len(), 1);

        // Removing again finds nothing
        assert!(!registry.remove("noop"));
    }

    #[test]
    fn test_clear() {
        let registry = ListenerRegistry::new();
        registry.add(Arc::new(MemoryListener::new()));
        registry.add(Arc::new(MemoryListener::new()));

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.snapshot().is_empty());
    }
}

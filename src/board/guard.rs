use parking_lot::Mutex;
use std::collections::HashSet;
use std::hash::Hash;

/// Set of entities that currently have a request of one kind in flight.
#[derive(Debug)]
pub struct InFlight<K> {
    active: Mutex<HashSet<K>>,
}

impl<K: Eq + Hash + Clone> InFlight<K> {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(HashSet::new()),
        }
    }

    /// Mark `key` busy. Returns `None` while a previous guard for the same
    /// key is alive.
    pub fn try_acquire(&self, key: K) -> Option<FlightGuard<'_, K>> {
        if self.active.lock().insert(key.clone()) {
            Some(FlightGuard { owner: self, key })
        } else {
            None
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.active.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.active.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash + Clone> Default for InFlight<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases its key on drop, including when the request future is dropped
/// mid-flight.
#[derive(Debug)]
pub struct FlightGuard<'a, K: Eq + Hash + Clone> {
    owner: &'a InFlight<K>,
    key: K,
}

impl<K: Eq + Hash + Clone> Drop for FlightGuard<'_, K> {
    fn drop(&mut self) {
        self.owner.active.lock().remove(&self.key);
    }
}

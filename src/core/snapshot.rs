//! Publish-once snapshots shared between a loader and many readers
//!
//! A load builds its whole result off to the side and then swaps it in with a
//! single assignment under a short write lock. Readers clone the `Arc` and
//! never see a partially built value; a failed load publishes nothing.

use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug)]
pub struct Snapshot<T> {
    current: RwLock<Option<Arc<T>>>,
}

impl<T> Snapshot<T> {
    /// Create an empty, unpublished snapshot
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Replace the published value, returning the new one
    pub fn publish(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(Arc::clone(&value));
        value
    }

    /// The currently published value, if any
    pub fn current(&self) -> Option<Arc<T>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_published(&self) -> bool {
        self.current().is_some()
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_snapshot_starts_unpublished() {
        let snapshot: Snapshot<Vec<u32>> = Snapshot::new();
        assert!(!snapshot.is_published());
        assert!(snapshot.current().is_none());
    }

    #[test]
    fn test_publish_replaces_value() {
        let snapshot = Snapshot::new();
        snapshot.publish(vec![1]);
        let old = snapshot.current().unwrap();
        snapshot.publish(vec![2, 3]);

        assert_eq!(*old, vec![1]);
        assert_eq!(*snapshot.current().unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_readers_see_whole_values_only() {
        let snapshot = Arc::new(Snapshot::new());
        snapshot.publish(vec![0u32; 100]);

        let writer = {
            let snapshot = Arc::clone(&snapshot);
            thread::spawn(move || {
                for round in 1..=50u32 {
                    snapshot.publish(vec![round; 100]);
                }
            })
        };

        for _ in 0..200 {
            let seen = snapshot.current().unwrap();
            assert!(seen.iter().all(|v| *v == seen[0]));
        }

        writer.join().unwrap();
        assert_eq!(snapshot.current().unwrap()[0], 50);
    }
}

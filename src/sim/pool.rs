//! Homogeneous entity pools
//!
//! Records carry their own active flag. Deactivation happens during the tick
//! (so later passes in the same tick still see the record), and `compact`
//! drops dead records once per tick, after collision resolution.

use serde::{Deserialize, Serialize};

/// A record that can live in an [`EntityPool`]
pub trait Poolable {
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
}

/// Ordered pool of records of a single kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityPool<T> {
    items: Vec<T>,
}

impl<T> Default for EntityPool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Poolable> EntityPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record (expected to be active)
    pub fn spawn(&mut self, record: T) {
        debug_assert!(record.is_active(), "spawned an inactive record");
        self.items.push(record);
    }

    /// Active records in spawn order
    pub fn iter_active(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter().filter(|r| r.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.items.iter_mut().filter(|r| r.is_active())
    }

    pub fn for_each_active(&self, f: impl FnMut(&T)) {
        self.iter_active().for_each(f);
    }

    /// Remove inactive records, preserving the order of survivors.
    /// Indices are not stable across this call.
    pub fn compact(&mut self) {
        self.items.retain(|r| r.is_active());
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Stored records, including ones deactivated since the last compaction
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    pub fn any_active(&self) -> bool {
        self.items.iter().any(|r| r.is_active())
    }

    /// Raw records (active and inactive)
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Dot {
        id: u32,
        active: bool,
    }

    impl Poolable for Dot {
        fn is_active(&self) -> bool {
            self.active
        }
        fn deactivate(&mut self) {
            self.active = false;
        }
    }

    fn pool_of(n: u32) -> EntityPool<Dot> {
        let mut pool = EntityPool::new();
        for id in 0..n {
            pool.spawn(Dot { id, active: true });
        }
        pool
    }

    #[test]
    fn test_iteration_skips_inactive_but_compact_is_deferred() {
        let mut pool = pool_of(5);
        pool.as_mut_slice()[1].deactivate();
        pool.as_mut_slice()[3].deactivate();

        let ids: Vec<u32> = pool.iter_active().map(|d| d.id).collect();
        assert_eq!(ids, vec![0, 2, 4]);
        // Dead records stay until compaction
        assert_eq!(pool.len(), 5);
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn test_compact_preserves_survivor_order() {
        let mut pool = pool_of(6);
        for dot in pool.iter_active_mut().filter(|d| d.id % 2 == 0) {
            dot.deactivate();
        }
        pool.compact();

        let ids: Vec<u32> = pool.as_slice().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_traversal_is_restartable() {
        let pool = pool_of(3);
        let mut seen = 0;
        pool.for_each_active(|_| seen += 1);
        pool.for_each_active(|_| seen += 1);
        assert_eq!(seen, 6);
    }

    #[test]
    fn test_any_active() {
        let mut pool = pool_of(2);
        assert!(pool.any_active());
        for dot in pool.iter_active_mut() {
            dot.deactivate();
        }
        assert!(!pool.any_active());
        pool.compact();
        assert!(pool.is_empty());
    }
}

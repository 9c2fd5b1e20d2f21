use bevy::prelude::*;
use std::collections::VecDeque;

/// Fixed-capacity pool of pre-spawned coin entities, partitioned into an
/// inactive FIFO queue and an active set. The pool only tracks membership;
/// hiding/showing an entity is the caller's job.
///
/// Handles can die under us (something despawns a pooled entity directly),
/// so every path that hands an entity out or walks the active set takes a
/// validity probe and silently drops dead handles from the bookkeeping.
#[derive(Resource)]
pub struct CoinPool {
    capacity: usize,
    inactive: VecDeque<Entity>,
    active: Vec<Entity>,
}

impl CoinPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inactive: VecDeque::with_capacity(capacity),
            active: Vec::with_capacity(capacity),
        }
    }

    /// Adds a freshly spawned, inactive entity during pool initialization.
    pub fn seed(&mut self, entity: Entity) {
        self.inactive.push_back(entity);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn inactive_count(&self) -> usize {
        self.inactive.len()
    }

    /// Pops the oldest valid inactive entity and moves it to the active set.
    /// Dead entries encountered on the way out are discarded. `None` means
    /// exhaustion, which is a normal condition for callers to skip on.
    pub fn acquire(&mut self, is_valid: impl Fn(Entity) -> bool) -> Option<Entity> {
        while let Some(entity) = self.inactive.pop_front() {
            if !is_valid(entity) {
                debug!("Dropping stale pooled entity {:?}", entity);
                continue;
            }
            self.active.push(entity);
            return Some(entity);
        }
        None
    }

    /// Moves an entity from the active set back to the inactive queue tail.
    /// Returns false (and changes nothing) if the entity is not active, so a
    /// double release is a harmless no-op.
    pub fn release(&mut self, entity: Entity) -> bool {
        let Some(index) = self.active.iter().position(|&e| e == entity) else {
            return false;
        };
        // The active set is unordered, so the cheap removal is fine.
        self.active.swap_remove(index);
        self.inactive.push_back(entity);
        true
    }

    /// Walks the active set in reverse index order so removal is safe
    /// mid-iteration. Dead handles are dropped from the bookkeeping without
    /// being recycled; entities matching `should_recycle` are released and
    /// returned so the caller can deactivate them.
    pub fn scan_release(
        &mut self,
        is_valid: impl Fn(Entity) -> bool,
        should_recycle: impl Fn(Entity) -> bool,
    ) -> Vec<Entity> {
        let mut released = Vec::new();
        for index in (0..self.active.len()).rev() {
            let entity = self.active[index];
            if !is_valid(entity) {
                // Reverse order means the swapped-in element was already
                // visited, so nothing gets skipped.
                self.active.swap_remove(index);
                debug!("Dropping stale active entity {:?}", entity);
                continue;
            }
            if should_recycle(entity) {
                self.active.swap_remove(index);
                self.inactive.push_back(entity);
                released.push(entity);
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with_entities(world: &mut World, count: usize) -> (CoinPool, Vec<Entity>) {
        let entities: Vec<Entity> = (0..count).map(|_| world.spawn_empty().id()).collect();
        let mut pool = CoinPool::new(count);
        for &entity in &entities {
            pool.seed(entity);
        }
        (pool, entities)
    }

    #[test]
    fn acquire_moves_entity_from_inactive_to_active() {
        let mut world = World::new();
        let (mut pool, entities) = pool_with_entities(&mut world, 1);

        let acquired = pool.acquire(|_| true);
        assert_eq!(acquired, Some(entities[0]));
        assert_eq!(pool.active_count(), 1);
        assert_eq!(pool.inactive_count(), 0);
    }

    #[test]
    fn acquire_returns_none_when_exhausted() {
        let mut world = World::new();
        let (mut pool, _) = pool_with_entities(&mut world, 1);

        assert!(pool.acquire(|_| true).is_some());
        assert!(pool.acquire(|_| true).is_none());
        assert_eq!(pool.active_count(), 1);
        assert_eq!(pool.inactive_count(), 0);
    }

    #[test]
    fn acquire_reuses_in_fifo_order() {
        let mut world = World::new();
        let (mut pool, entities) = pool_with_entities(&mut world, 3);

        assert_eq!(pool.acquire(|_| true), Some(entities[0]));
        assert_eq!(pool.acquire(|_| true), Some(entities[1]));

        // Release out of acquisition order; the queue tail preserves it.
        pool.release(entities[1]);
        pool.release(entities[0]);

        assert_eq!(pool.acquire(|_| true), Some(entities[2]));
        assert_eq!(pool.acquire(|_| true), Some(entities[1]));
        assert_eq!(pool.acquire(|_| true), Some(entities[0]));
    }

    #[test]
    fn acquire_skips_and_drops_stale_entries() {
        let mut world = World::new();
        let (mut pool, entities) = pool_with_entities(&mut world, 3);

        world.despawn(entities[0]);
        let alive = |e: Entity| world.get_entity(e).is_ok();

        assert_eq!(pool.acquire(alive), Some(entities[1]));
        // The dead handle is gone from the bookkeeping entirely.
        assert_eq!(pool.inactive_count(), 1);
        assert_eq!(pool.active_count() + pool.inactive_count(), 2);
    }

    #[test]
    fn release_is_idempotent() {
        let mut world = World::new();
        let (mut pool, entities) = pool_with_entities(&mut world, 2);

        let coin = pool.acquire(|_| true).unwrap();
        assert!(pool.release(coin));
        assert!(!pool.release(coin));
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.inactive_count(), 2);

        // A handle the pool never activated is also a no-op.
        assert!(!pool.release(entities[1]));
        assert_eq!(pool.inactive_count(), 2);
    }

    #[test]
    fn acquire_never_returns_an_active_handle() {
        let mut world = World::new();
        let (mut pool, _) = pool_with_entities(&mut world, 4);

        let mut seen = Vec::new();
        while let Some(entity) = pool.acquire(|_| true) {
            assert!(!seen.contains(&entity));
            seen.push(entity);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn sets_stay_disjoint_across_churn() {
        let mut world = World::new();
        let (mut pool, _) = pool_with_entities(&mut world, 5);

        for round in 0..20 {
            if round % 3 == 0 {
                if let Some(entity) = pool.acquire(|_| true) {
                    pool.release(entity);
                    pool.release(entity);
                }
            } else {
                pool.acquire(|_| true);
            }
            assert_eq!(pool.active_count() + pool.inactive_count(), 5);
        }
    }

    #[test]
    fn scan_release_recycles_matching_entities() {
        let mut world = World::new();
        let (mut pool, _) = pool_with_entities(&mut world, 3);

        let a = pool.acquire(|_| true).unwrap();
        let b = pool.acquire(|_| true).unwrap();

        let released = pool.scan_release(|_| true, |e| e == a);
        assert_eq!(released, vec![a]);
        assert_eq!(pool.active_count(), 1);
        assert_eq!(pool.inactive_count(), 2);
        assert!(pool.release(b));
    }

    #[test]
    fn scan_release_drops_stale_without_recycling() {
        let mut world = World::new();
        let (mut pool, _) = pool_with_entities(&mut world, 2);

        let a = pool.acquire(|_| true).unwrap();
        let b = pool.acquire(|_| true).unwrap();
        world.despawn(a);

        let released = pool.scan_release(|e| world.get_entity(e).is_ok(), |_| true);
        // Only the live entity comes back through the pool.
        assert_eq!(released, vec![b]);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.inactive_count(), 1);
        assert_eq!(
            pool.active_count() + pool.inactive_count(),
            pool.capacity() - 1
        );
    }
}

//! Bounded entity arena.
//!
//! Live entities occupy a contiguous prefix of the slot vector; compaction
//! after garbage collection preserves survivor order. Ids are monotonic and
//! stable for the arena's lifetime — they are deliberately decoupled from
//! slot indices, which shift on every collection.

use crate::clock::Clock;
use crate::codec;
use crate::store::PatternStore;
use holarium_data::{
    Domain, Entity, HolographicVector, GENOME_RULE_LABEL, MAX_ENTITIES, TRAIT_DORMANT_LABEL,
};

#[derive(Debug, Default)]
pub struct EntityArena {
    entities: Vec<Entity>,
    next_id: u32,
}

impl EntityArena {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(MAX_ENTITIES),
            next_id: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        MAX_ENTITIES
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    /// Resets the arena and seeds it with up to `seed_count` entities.
    ///
    /// Seed entities start active, carry the dormant-trait state vector and
    /// the canonical genome handle, and are labeled `generic`.
    pub fn initialize(&mut self, seed_count: usize, store: &mut PatternStore, clock: &mut Clock) {
        self.entities.clear();
        self.next_id = 0;

        let genome = Self::canonical_genome(store, clock);
        let dormant = Self::dormant_state(store);

        for _ in 0..seed_count {
            if self.entities.len() >= MAX_ENTITIES {
                tracing::warn!("cannot seed more entities, arena full");
                break;
            }
            let id = self.allocate_id();
            let entity = Entity::new(id, dormant.clone(), genome, Domain::Generic);
            tracing::info!(id, "initialized entity");
            self.entities.push(entity);
        }
        tracing::info!(count = self.entities.len(), "entity arena seeded");
    }

    /// Appends a new entity, labeled `emergent`, with a freshly generated
    /// dormant-trait state vector. Returns its slot index, or `None` when
    /// the arena is full.
    pub fn spawn(&mut self, store: &mut PatternStore, clock: &mut Clock) -> Option<usize> {
        if self.entities.len() >= MAX_ENTITIES {
            tracing::warn!("cannot spawn, entity arena full");
            return None;
        }

        let genome = Self::canonical_genome(store, clock);
        let state = codec::generate_label(TRAIT_DORMANT_LABEL);
        let id = self.allocate_id();

        self.entities
            .push(Entity::new(id, state, genome, Domain::Emergent));
        let index = self.entities.len() - 1;
        tracing::info!(id, index, "spawned entity");
        Some(index)
    }

    /// Removes every entity marked for collection, preserving survivor
    /// order, and returns the collected ids.
    pub fn compact(&mut self) -> Vec<u32> {
        let collected: Vec<u32> = self
            .entities
            .iter()
            .filter(|e| e.marked_for_gc)
            .map(|e| e.id)
            .collect();
        if !collected.is_empty() {
            self.entities.retain(|e| !e.marked_for_gc);
            for id in &collected {
                tracing::info!(id = *id, "entity collected");
            }
        }
        collected
    }

    /// Signature handle of the canonical genome record, inserting the
    /// record first if the store does not hold it yet.
    pub fn canonical_genome(store: &mut PatternStore, clock: &mut Clock) -> u32 {
        let pattern = codec::generate_label(GENOME_RULE_LABEL);
        let signature = pattern.signature;
        if store.lookup(signature).is_none() {
            tracing::warn!("canonical genome missing from store, inserting");
            store.insert(clock, pattern.clone(), pattern);
        }
        signature
    }

    fn dormant_state(store: &PatternStore) -> HolographicVector {
        let pattern = codec::generate_label(TRAIT_DORMANT_LABEL);
        store
            .lookup(pattern.signature)
            .cloned()
            .unwrap_or(pattern)
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> (EntityArena, PatternStore, Clock) {
        (EntityArena::new(), PatternStore::new(), Clock::new())
    }

    #[test]
    fn test_initialize_seeds_active_generic_entities() {
        let (mut arena, mut store, mut clock) = fresh();
        arena.initialize(3, &mut store, &mut clock);

        assert_eq!(arena.len(), 3);
        for (i, e) in arena.entities().iter().enumerate() {
            assert_eq!(e.id, i as u32);
            assert!(e.is_active);
            assert_eq!(e.domain, Domain::Generic);
            assert_eq!(e.fitness_score, 0);
        }
    }

    #[test]
    fn test_initialize_inserts_genome_fallback() {
        let (mut arena, mut store, mut clock) = fresh();
        assert!(store.is_empty());

        arena.initialize(1, &mut store, &mut clock);

        let genome_sig = codec::generate_label(GENOME_RULE_LABEL).signature;
        assert!(store.lookup(genome_sig).is_some(), "fallback insert happened");
        assert_eq!(arena.get(0).unwrap().genome, genome_sig);
    }

    #[test]
    fn test_spawn_labels_emergent_and_fails_at_capacity() {
        let (mut arena, mut store, mut clock) = fresh();
        arena.initialize(MAX_ENTITIES - 1, &mut store, &mut clock);

        let index = arena.spawn(&mut store, &mut clock).expect("room for one");
        assert_eq!(index, MAX_ENTITIES - 1);
        assert_eq!(arena.get(index).unwrap().domain, Domain::Emergent);

        assert!(arena.spawn(&mut store, &mut clock).is_none(), "arena full");
        assert_eq!(arena.len(), MAX_ENTITIES);
    }

    #[test]
    fn test_ids_stay_unique_across_compaction() {
        let (mut arena, mut store, mut clock) = fresh();
        arena.initialize(3, &mut store, &mut clock);

        arena.get_mut(1).unwrap().marked_for_gc = true;
        let collected = arena.compact();
        assert_eq!(collected, vec![1]);

        let index = arena.spawn(&mut store, &mut clock).unwrap();
        let new_id = arena.get(index).unwrap().id;
        assert_eq!(new_id, 3, "ids are monotonic, never reused");

        let mut ids: Vec<u32> = arena.entities().iter().map(|e| e.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), arena.len());
    }

    #[test]
    fn test_compaction_preserves_survivor_order() {
        let (mut arena, mut store, mut clock) = fresh();
        arena.initialize(3, &mut store, &mut clock);

        arena.get_mut(1).unwrap().marked_for_gc = true;
        arena.compact();

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(0).unwrap().id, 0);
        assert_eq!(arena.get(1).unwrap().id, 2);
    }

    #[test]
    fn test_initialize_clamps_to_capacity() {
        let (mut arena, mut store, mut clock) = fresh();
        arena.initialize(MAX_ENTITIES + 10, &mut store, &mut clock);
        assert_eq!(arena.len(), MAX_ENTITIES);
    }
}

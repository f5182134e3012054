//! Read-only snapshots handed to presentation and observers.
//!
//! Snapshots carry only the fields the entity grid renders; the vectors
//! themselves never leave the engine.

use crate::arena::EntityArena;
use crate::store::PatternStore;
use holarium_data::Entity;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EntitySnapshot {
    pub id: u32,
    pub is_active: bool,
    pub domain: String,
    pub interaction_count: u32,
    pub confidence: f32,
    pub fitness_score: u32,
    pub task_alignment: f32,
    pub age: u32,
    pub is_mutant: bool,
}

impl From<&Entity> for EntitySnapshot {
    fn from(e: &Entity) -> Self {
        Self {
            id: e.id,
            is_active: e.is_active,
            domain: e.domain.label().to_string(),
            interaction_count: e.interaction_count,
            confidence: e.confidence,
            fitness_score: e.fitness_score,
            task_alignment: e.task_alignment,
            age: e.age,
            is_mutant: e.is_mutant,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub cycle: u64,
    pub entities: Vec<EntitySnapshot>,
    pub record_count: usize,
}

impl WorldSnapshot {
    /// Captures the current population state.
    pub fn capture(arena: &EntityArena, store: &PatternStore, tick: u64, cycle: u64) -> Self {
        Self {
            tick,
            cycle,
            entities: arena.entities().iter().map(EntitySnapshot::from).collect(),
            record_count: store.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;

    #[test]
    fn test_capture_reflects_arena() {
        let mut arena = EntityArena::new();
        let mut store = PatternStore::new();
        let mut clock = Clock::new();
        arena.initialize(2, &mut store, &mut clock);

        let snapshot = WorldSnapshot::capture(&arena, &store, clock.now(), 0);

        assert_eq!(snapshot.entities.len(), 2);
        assert_eq!(snapshot.entities[0].id, 0);
        assert_eq!(snapshot.entities[0].domain, "generic");
        assert!(snapshot.record_count >= 1, "genome fallback was inserted");
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let arena = EntityArena::new();
        let store = PatternStore::new();
        let snapshot = WorldSnapshot::capture(&arena, &store, 0, 0);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"entities\":[]"));
    }
}

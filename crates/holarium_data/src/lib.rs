//! Plain data types shared across the Holarium workspace.
//!
//! Everything here is a value type: holographic vectors, store records and
//! entities are copied wholesale, never aliased. Capacities are compile-time
//! constants because the simulation runs on a fixed, pre-allocated budget.

use serde::{Deserialize, Serialize};

/// Number of components in every holographic vector.
pub const DIMENSIONS: usize = 512;
/// Capacity of the pattern store.
pub const MAX_RECORDS: usize = 128;
/// Capacity of the entity arena.
pub const MAX_ENTITIES: usize = 32;
/// Entities created at startup.
pub const INITIAL_ENTITIES: usize = 3;
/// Per-entity specialization score slots.
pub const MAX_DOMAINS: usize = 8;

/// Canonical genome record label.
pub const GENOME_RULE_LABEL: &str = "GENOME_SIMPLE_RULE_1";
/// Label for the active-trait vector.
pub const TRAIT_ACTIVE_LABEL: &str = "TRAIT_ACTIVE";
/// Label for the dormant-trait vector.
pub const TRAIT_DORMANT_LABEL: &str = "TRAIT_DORMANT";

/// Bootstrap vocabulary encoded into the pattern store at startup.
/// Each label is self-associated so later lookups by signature succeed.
pub const VOCABULARY: [&str; 11] = [
    "ACTION_PRODUCE",
    "ACTION_CONSUME",
    "ACTION_SHARE",
    "ACTION_ACTIVATE",
    "ACTION_DEACTIVATE",
    "TRAIT_GENERIC",
    TRAIT_ACTIVE_LABEL,
    TRAIT_DORMANT_LABEL,
    "SENSOR_NEIGHBOR_ACTIVE",
    "SENSOR_MEMORY_MATCH",
    GENOME_RULE_LABEL,
];

/// A fixed-dimension sparse vector derived deterministically from input bytes.
///
/// The signature doubles as a content-addressing key: identical inputs always
/// produce bit-identical vectors, so a signature match implies a vector match.
#[derive(Clone, Debug)]
pub struct HolographicVector {
    pub data: [f32; DIMENSIONS],
    pub signature: u32,
    pub active_dimensions: u16,
    pub valid: bool,
}

impl Default for HolographicVector {
    fn default() -> Self {
        Self {
            data: [0.0; DIMENSIONS],
            signature: 0,
            active_dimensions: 0,
            valid: false,
        }
    }
}

impl HolographicVector {
    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Euclidean magnitude. The original kernel used a fast reciprocal
    /// square root here; only the normalized ratio feeds a threshold test,
    /// so an accurate sqrt is an equivalent substitute.
    pub fn magnitude(&self) -> f32 {
        self.data.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Returns a copy with the component at `dim` sign-flipped.
    pub fn with_flipped_dimension(&self, dim: usize) -> Self {
        let mut out = self.clone();
        out.data[dim % DIMENSIONS] = -out.data[dim % DIMENSIONS];
        out
    }
}

/// One pattern association held by the store. Immutable after creation;
/// destroyed only by eviction or a store reset.
#[derive(Clone, Debug)]
pub struct StoreRecord {
    pub input: HolographicVector,
    pub output: HolographicVector,
    pub timestamp: u64,
}

/// Behavioral niche an entity currently occupies. Rendered as a short label
/// on the entity grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Domain {
    /// Seed entities from arena initialization
    Generic,
    /// Entities created by the spawn rule
    Emergent,
    /// Woken by an active neighbor
    Reactor,
    /// Went dormant with no active neighbors
    Sleeper,
}

impl Domain {
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Generic => "generic",
            Domain::Emergent => "emergent",
            Domain::Reactor => "reactor",
            Domain::Sleeper => "sleeper",
        }
    }
}

/// A population member.
///
/// The genome is a signature handle into the pattern store, not a reference:
/// store eviction shifts records in place, so entities re-look the genome up
/// by content instead of holding a pointer that could dangle.
#[derive(Clone, Debug)]
pub struct Entity {
    pub id: u32,
    pub state: HolographicVector,
    pub genome: u32,
    pub age: u32,
    pub interaction_count: u32,
    pub is_active: bool,

    pub specialization_scores: [f32; MAX_DOMAINS],
    pub resource_allocation: f32,
    pub confidence: f32,
    pub domain: Domain,

    pub task_vector: Option<HolographicVector>,
    pub path_id: u32,
    pub task_alignment: f32,

    pub fitness_score: u32,
    pub spawn_count: u32,
    pub marked_for_gc: bool,
    pub is_mutant: bool,
}

impl Entity {
    /// A fresh entity with baseline scoring fields. Seed and spawned
    /// entities differ only in their domain label.
    pub fn new(id: u32, state: HolographicVector, genome: u32, domain: Domain) -> Self {
        Self {
            id,
            state,
            genome,
            age: 0,
            interaction_count: 0,
            is_active: true,
            specialization_scores: [0.1; MAX_DOMAINS],
            resource_allocation: 1.0,
            confidence: 0.5,
            domain,
            task_vector: None,
            path_id: 0,
            task_alignment: 0.0,
            fitness_score: 0,
            spawn_count: 0,
            marked_for_gc: false,
            is_mutant: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_new_has_baseline_fields() {
        let entity = Entity::new(7, HolographicVector::default(), 0xDEAD, Domain::Generic);

        assert_eq!(entity.id, 7);
        assert_eq!(entity.age, 0);
        assert!(entity.is_active);
        assert_eq!(entity.fitness_score, 0);
        assert_eq!(entity.spawn_count, 0);
        assert!(!entity.marked_for_gc);
        assert!(!entity.is_mutant);
        assert!(entity.task_vector.is_none());
        assert_eq!(entity.confidence, 0.5);
        assert_eq!(entity.resource_allocation, 1.0);
        assert!(entity
            .specialization_scores
            .iter()
            .all(|s| (*s - 0.1).abs() < f32::EPSILON));
    }

    #[test]
    fn test_flipped_dimension_negates_exactly_one_component() {
        let mut v = HolographicVector::default();
        v.data[3] = 0.5;
        v.data[4] = -0.25;
        v.valid = true;

        let flipped = v.with_flipped_dimension(3);
        assert_eq!(flipped.data[3], -0.5);
        assert_eq!(flipped.data[4], -0.25);
        assert_eq!(flipped.signature, v.signature);
    }

    #[test]
    fn test_zero_vector_magnitude_is_zero() {
        let v = HolographicVector::default();
        assert_eq!(v.magnitude(), 0.0);
        assert_eq!(v.dot(&v), 0.0);
    }

    #[test]
    fn test_domain_labels() {
        assert_eq!(Domain::Generic.label(), "generic");
        assert_eq!(Domain::Emergent.label(), "emergent");
        assert_eq!(Domain::Reactor.label(), "reactor");
        assert_eq!(Domain::Sleeper.label(), "sleeper");
    }
}

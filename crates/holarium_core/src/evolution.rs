//! The per-cycle evolution step.
//!
//! One `update` call performs a synchronous generation over the ring of live
//! entities. Transition decisions read only the pre-cycle activity snapshot:
//! next-state values are double-buffered and applied after every entity has
//! been evaluated, so no entity observes a neighbor's same-cycle transition.
//!
//! Rule priority is strict — activate, then sleep, then spawn — and exactly
//! one rule fires per entity per cycle. Task-alignment scoring and GC
//! marking run independently of the rules.

use crate::arena::EntityArena;
use crate::clock::Clock;
use crate::codec;
use crate::config::EvolutionConfig;
use crate::store::PatternStore;
use holarium_data::{
    Domain, Entity, HolographicVector, DIMENSIONS, MAX_ENTITIES, TRAIT_ACTIVE_LABEL,
    TRAIT_DORMANT_LABEL,
};

/// Cosine similarity between two vectors. A zero magnitude is substituted
/// with 1.0, yielding a degenerate but defined alignment instead of a fault.
pub fn cosine_similarity(a: &HolographicVector, b: &HolographicVector) -> f32 {
    debug_assert!(a.valid && b.valid, "invalid vectors must never be compared");
    let mag_a = match a.magnitude() {
        m if m > 0.0 => m,
        _ => 1.0,
    };
    let mag_b = match b.magnitude() {
        m if m > 0.0 => m,
        _ => 1.0,
    };
    a.dot(b) / (mag_a * mag_b)
}

/// Summary of one completed update cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    pub cycle: u64,
    pub activated: u32,
    pub slept: u32,
    pub spawned: u32,
    pub collected: Vec<u32>,
    pub survivors: usize,
}

/// Double-buffered next-state values for one entity. Task vector and path
/// id never change for a living entity, so they are not buffered.
struct NextState {
    is_active: bool,
    state: HolographicVector,
    domain: Domain,
    alignment: f32,
}

impl From<&Entity> for NextState {
    fn from(e: &Entity) -> Self {
        Self {
            is_active: e.is_active,
            state: e.state.clone(),
            domain: e.domain,
            alignment: e.task_alignment,
        }
    }
}

#[derive(Debug, Default)]
pub struct EvolutionEngine {
    config: EvolutionConfig,
    cycle: u64,
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig) -> Self {
        Self { config, cycle: 0 }
    }

    /// Completed cycles since engine creation.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Runs one generation step: evaluate, apply, collect.
    ///
    /// A no-op when the arena is empty; the ring topology is undefined with
    /// zero members. With a single entity both neighbor slots resolve to
    /// the entity itself, so its own pre-cycle flag is counted twice.
    pub fn update(
        &mut self,
        arena: &mut EntityArena,
        store: &mut PatternStore,
        clock: &mut Clock,
    ) -> CycleReport {
        let count = arena.len();
        if count == 0 {
            return CycleReport::default();
        }

        self.cycle += 1;
        let mut report = CycleReport {
            cycle: self.cycle,
            ..Default::default()
        };
        tracing::debug!(cycle = self.cycle, entities = count, "starting update cycle");

        let pre_active: Vec<bool> = arena.entities()[..count]
            .iter()
            .map(|e| e.is_active)
            .collect();
        let mut next: Vec<NextState> = arena.entities()[..count].iter().map(NextState::from).collect();

        for i in 0..count {
            let entity = arena.get_mut(i).expect("index within live prefix");
            entity.age += 1;

            let prev = if i == 0 { count - 1 } else { i - 1 };
            let succ = if i == count - 1 { 0 } else { i + 1 };
            let neighbor_active = usize::from(pre_active[prev]) + usize::from(pre_active[succ]);

            if !pre_active[i] && neighbor_active > 0 {
                self.rule_activate(arena, i, &mut next[i]);
                report.activated += 1;
            } else if pre_active[i] && neighbor_active == 0 {
                self.rule_sleep(arena, i, &mut next[i]);
                report.slept += 1;
            } else if pre_active[i] && neighbor_active >= 2 && arena.len() < MAX_ENTITIES - 1 {
                if self.rule_spawn(arena, store, clock, i) {
                    report.spawned += 1;
                }
            }

            self.score_task_alignment(arena, i, &mut next[i]);
            self.mark_for_collection(arena, i);
        }

        // Apply phase: children appended this cycle sit beyond `count` and
        // keep their spawn-time state until the next cycle.
        for (i, buffered) in next.into_iter().enumerate() {
            let entity = arena.get_mut(i).expect("index within live prefix");
            entity.is_active = buffered.is_active;
            entity.state = buffered.state;
            entity.domain = buffered.domain;
            entity.task_alignment = buffered.alignment;
        }

        report.collected = arena.compact();
        report.survivors = arena.len();
        tracing::info!(
            cycle = self.cycle,
            survivors = report.survivors,
            collected = report.collected.len(),
            "update cycle completed"
        );
        report
    }

    fn rule_activate(&self, arena: &mut EntityArena, i: usize, next: &mut NextState) {
        let entity = arena.get_mut(i).expect("index within live prefix");
        next.is_active = true;
        next.state = codec::generate_label(TRAIT_ACTIVE_LABEL);
        next.domain = Domain::Reactor;
        entity.interaction_count += 1;
        tracing::debug!(id = entity.id, "entity activated by neighbor");
    }

    fn rule_sleep(&self, arena: &mut EntityArena, i: usize, next: &mut NextState) {
        let entity = arena.get_mut(i).expect("index within live prefix");
        next.is_active = false;
        next.state = codec::generate_label(TRAIT_DORMANT_LABEL);
        next.domain = Domain::Sleeper;
        entity.interaction_count += 1;
        tracing::debug!(id = entity.id, "entity going dormant, no active neighbors");
    }

    /// Spawns a mutant child inheriting the parent's genome, task and path.
    /// The child's state differs from the parent's in exactly one dimension,
    /// chosen by the global tick, with that component negated.
    fn rule_spawn(
        &self,
        arena: &mut EntityArena,
        store: &mut PatternStore,
        clock: &mut Clock,
        parent_index: usize,
    ) -> bool {
        let Some(child_index) = arena.spawn(store, clock) else {
            return false;
        };

        let (parent_id, genome, state, task_vector, path_id, alignment) = {
            let parent = arena.get(parent_index).expect("parent is live");
            (
                parent.id,
                parent.genome,
                parent.state.clone(),
                parent.task_vector.clone(),
                parent.path_id,
                parent.task_alignment,
            )
        };

        let mutated_dim = (clock.now() % DIMENSIONS as u64) as usize;
        {
            let child = arena.get_mut(child_index).expect("child just spawned");
            child.genome = genome;
            child.is_mutant = true;
            child.state = state.with_flipped_dimension(mutated_dim);
            child.task_vector = task_vector;
            child.path_id = path_id;
            child.task_alignment = alignment;
            tracing::debug!(
                child = child.id,
                parent = parent_id,
                dim = mutated_dim,
                "spawned mutant child"
            );
        }

        let parent = arena.get_mut(parent_index).expect("parent is live");
        parent.spawn_count += 1;
        parent.fitness_score += self.config.spawn_fitness_bonus;
        true
    }

    /// Recomputes alignment against the assigned task vector from the
    /// pre-cycle state; rewards alignment above the threshold.
    fn score_task_alignment(&self, arena: &mut EntityArena, i: usize, next: &mut NextState) {
        let alignment = {
            let entity = arena.get(i).expect("index within live prefix");
            match &entity.task_vector {
                Some(task) if task.valid => cosine_similarity(&entity.state, task),
                _ => return,
            }
        };
        next.alignment = alignment;

        if alignment > self.config.alignment_threshold {
            let entity = arena.get_mut(i).expect("index within live prefix");
            entity.fitness_score += self.config.alignment_fitness_bonus;
            tracing::debug!(
                id = entity.id,
                alignment = f64::from(alignment),
                "task alignment high, fitness rewarded"
            );
        }
    }

    /// Marks aged, low-fitness entities using post-increment age and
    /// post-bonus fitness from this cycle.
    fn mark_for_collection(&self, arena: &mut EntityArena, i: usize) {
        let entity = arena.get_mut(i).expect("index within live prefix");
        if entity.age > self.config.gc_age_threshold
            && entity.fitness_score < self.config.gc_fitness_threshold
        {
            entity.marked_for_gc = true;
            tracing::info!(id = entity.id, "entity marked for collection, low fitness");
        }
    }
}

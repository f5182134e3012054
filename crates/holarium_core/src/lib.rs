//! # Holarium Core
//!
//! The deterministic engine for Holarium — a holographic-memory simulation
//! evolving a bounded population of emergent entities.
//!
//! This crate contains:
//! - Vector codec: deterministic sparse-vector derivation from bytes
//! - Pattern store: fixed-capacity content-addressable memory with eviction
//! - Entity arena: bounded population with order-preserving compaction
//! - Evolution engine: ring-topology cellular-automaton update with
//!   mutation, task-alignment scoring and mark-and-compact collection
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! All state lives in explicitly owned structures (`PatternStore`,
//! `EntityArena`, `Clock`) constructed once at startup and passed by
//! reference into the update and rendering paths — no globals. Every
//! resource bound is fixed at compile time; overflow is handled by eviction
//! or rejection, never growth.
//!
//! ## Example
//!
//! ```
//! use holarium_core::arena::EntityArena;
//! use holarium_core::clock::Clock;
//! use holarium_core::config::EvolutionConfig;
//! use holarium_core::evolution::EvolutionEngine;
//! use holarium_core::store::PatternStore;
//!
//! let mut store = PatternStore::new();
//! let mut clock = Clock::new();
//! let mut arena = EntityArena::new();
//! store.load_vocabulary(&mut clock);
//! arena.initialize(3, &mut store, &mut clock);
//!
//! let mut engine = EvolutionEngine::new(EvolutionConfig::default());
//! let report = engine.update(&mut arena, &mut store, &mut clock);
//! assert_eq!(report.survivors, arena.len());
//! ```

/// Bounded entity arena with stable ids and compacting collection
pub mod arena;
/// Monotonic logical clock
pub mod clock;
/// Deterministic holographic vector derivation
pub mod codec;
/// Configuration management for simulation parameters
pub mod config;
/// The per-cycle evolution step
pub mod evolution;
/// Cycle metrics collection and logging
pub mod metrics;
/// Read-only snapshots for presentation
pub mod snapshot;
/// Fixed-capacity content-addressable pattern store
pub mod store;

pub use arena::EntityArena;
pub use clock::Clock;
pub use config::AppConfig;
pub use evolution::{cosine_similarity, CycleReport, EvolutionEngine};
pub use metrics::{init_logging, Metrics};
pub use snapshot::{EntitySnapshot, WorldSnapshot};
pub use store::PatternStore;

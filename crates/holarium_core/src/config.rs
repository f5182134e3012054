//! Configuration for the simulation.
//!
//! Maps to `config.toml`; every table falls back to defaults matching the
//! original kernel constants when the file or a key is absent. Hard
//! capacities (512 dimensions, 128 records, 32 entities) are compile-time
//! constants in `holarium_data` and deliberately not configurable.

use holarium_data::MAX_ENTITIES;
use serde::{Deserialize, Serialize};

/// Driving-loop and population bootstrap parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    /// Entities seeded at startup.
    pub initial_entities: usize,
    /// Ticks between evolution cycles.
    pub update_interval: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            initial_entities: 3,
            update_interval: 500_000,
        }
    }
}

/// Thresholds and rewards for the evolution cycle.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Fitness added to a parent per successful spawn.
    pub spawn_fitness_bonus: u32,
    /// Fitness added when task alignment exceeds the threshold.
    pub alignment_fitness_bonus: u32,
    /// Cosine-similarity threshold for the alignment reward.
    pub alignment_threshold: f32,
    /// Entities older than this become collection candidates.
    pub gc_age_threshold: u32,
    /// Entities at or above this fitness are never collected.
    pub gc_fitness_threshold: u32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            spawn_fitness_bonus: 10,
            alignment_fitness_bonus: 5,
            alignment_threshold: 0.7,
            gc_age_threshold: 1000,
            gc_fitness_threshold: 50,
        }
    }
}

/// Startup task assignment.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TaskConfig {
    /// Label encoded into the task vector.
    pub label: String,
    /// Numeric path tag attached alongside the task vector.
    pub path_id: u32,
    /// How many leading entities receive the task.
    pub assign_count: usize,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            label: "network_io_path".to_string(),
            path_id: 0xA1,
            assign_count: 2,
        }
    }
}

/// Presentation parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    /// Entity rows shown on the grid.
    pub max_rows: usize,
    /// Idle ticks burned per frame between cycles.
    pub ticks_per_frame: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_rows: 15,
            ticks_per_frame: 50_000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub evolution: EvolutionConfig,
    pub tasks: TaskConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.world.initial_entities <= MAX_ENTITIES,
            "Initial entities exceed arena capacity ({MAX_ENTITIES})"
        );
        anyhow::ensure!(
            self.world.update_interval > 0,
            "Update interval must be positive"
        );
        anyhow::ensure!(
            self.evolution.alignment_threshold >= -1.0 && self.evolution.alignment_threshold <= 1.0,
            "Alignment threshold must be in [-1.0, 1.0]"
        );
        anyhow::ensure!(
            self.tasks.assign_count <= MAX_ENTITIES,
            "Task assignment count exceeds arena capacity"
        );
        anyhow::ensure!(!self.tasks.label.is_empty(), "Task label must not be empty");
        anyhow::ensure!(self.display.max_rows > 0, "Display rows must be positive");
        anyhow::ensure!(
            self.display.ticks_per_frame > 0,
            "Ticks per frame must be positive"
        );
        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist. A present-but-invalid file is an error.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path, "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

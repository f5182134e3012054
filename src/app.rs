//! The driving loop.
//!
//! A single logical thread owns all core state and advances a monotonic
//! tick counter; once the counter moves past the configured interval since
//! the last cycle, one evolution update runs to completion and the entity
//! grid is re-rendered. The original kernel burned one tick per idle `hlt`
//! iteration; here the loop burns a tick budget per frame and lets the
//! async runtime block until the next frame is due.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use holarium_core::arena::EntityArena;
use holarium_core::clock::Clock;
use holarium_core::codec;
use holarium_core::config::AppConfig;
use holarium_core::evolution::{CycleReport, EvolutionEngine};
use holarium_core::metrics::Metrics;
use holarium_core::snapshot::WorldSnapshot;
use holarium_core::store::PatternStore;
use holarium_tui::renderer::EntityGrid;
use holarium_tui::Tui;

pub struct App {
    pub config: AppConfig,
    pub store: PatternStore,
    pub arena: EntityArena,
    pub engine: EvolutionEngine,
    pub clock: Clock,
    pub metrics: Metrics,
    pub running: bool,
    last_update: u64,
}

impl App {
    /// Bootstraps the simulation: vocabulary, seed entities, startup task
    /// assignment.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let mut store = PatternStore::new();
        let mut clock = Clock::new();
        let mut arena = EntityArena::new();

        store.reset();
        store.load_vocabulary(&mut clock);
        arena.initialize(config.world.initial_entities, &mut store, &mut clock);

        let task = codec::generate_label(&config.tasks.label);
        let assigned = config.tasks.assign_count.min(arena.len());
        for i in 0..assigned {
            let entity = arena.get_mut(i).expect("index within seeded prefix");
            entity.task_vector = Some(task.clone());
            entity.path_id = config.tasks.path_id;
            tracing::info!(
                id = entity.id,
                path_id = config.tasks.path_id,
                label = %config.tasks.label,
                "assigned task path"
            );
        }

        let engine = EvolutionEngine::new(config.evolution.clone());
        tracing::info!("emergence engine online");

        Ok(Self {
            config,
            store,
            arena,
            engine,
            clock,
            metrics: Metrics::new(),
            running: true,
            last_update: 0,
        })
    }

    /// Burns `ticks` idle ticks, then runs one evolution cycle if the
    /// interval since the last cycle has elapsed.
    pub fn advance(&mut self, ticks: u64) -> Option<CycleReport> {
        self.clock.advance_by(ticks);
        if self.clock.now() - self.last_update <= self.config.world.update_interval {
            return None;
        }

        let started = Instant::now();
        let report = self
            .engine
            .update(&mut self.arena, &mut self.store, &mut self.clock);
        self.last_update = self.clock.now();

        self.metrics
            .record_cycle(started.elapsed(), self.arena.len(), self.store.len());
        self.metrics
            .add_to_counter("activations", u64::from(report.activated));
        self.metrics.add_to_counter("sleeps", u64::from(report.slept));
        self.metrics.add_to_counter("spawns", u64::from(report.spawned));
        self.metrics
            .add_to_counter("collections", report.collected.len() as u64);
        Some(report)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(
            &self.arena,
            &self.store,
            self.clock.now(),
            self.engine.cycle(),
        )
    }

    /// Interactive loop: draw, poll input, advance. `q` or Esc quits.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let frame_rate = Duration::from_millis(16);
        let shutdown = shutdown_flag();
        let mut last_frame = Instant::now();

        while self.running && !shutdown.load(Ordering::SeqCst) {
            let snapshot = self.snapshot();
            let max_rows = self.config.display.max_rows;
            tui.terminal.draw(|f| {
                f.render_widget(EntityGrid::new(&snapshot, max_rows), f.area());
            })?;

            while event::poll(Duration::from_millis(1))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                    {
                        self.running = false;
                    }
                }
            }

            self.advance(self.config.display.ticks_per_frame);

            let elapsed = last_frame.elapsed();
            if elapsed < frame_rate {
                tokio::time::sleep(frame_rate - elapsed).await;
            }
            last_frame = Instant::now();
        }
        Ok(())
    }

    /// Headless loop: no terminal, cycle summaries go to the log. Stops
    /// after `cycles` evolution cycles (0 means run until interrupted).
    pub async fn run_headless(&mut self, cycles: u64, emit_json: bool) -> Result<()> {
        let shutdown = shutdown_flag();

        while self.running && !shutdown.load(Ordering::SeqCst) {
            if let Some(report) = self.advance(self.config.display.ticks_per_frame) {
                if emit_json {
                    println!("{}", serde_json::to_string(&self.snapshot())?);
                }
                if cycles > 0 && report.cycle >= cycles {
                    break;
                }
            }
            // Let the runtime breathe between idle bursts.
            tokio::task::yield_now().await;
        }

        tracing::info!(
            cycles = self.engine.cycle(),
            spawns = self.metrics.counter("spawns"),
            collections = self.metrics.counter("collections"),
            "headless run finished"
        );
        Ok(())
    }
}

fn shutdown_flag() -> Arc<AtomicBool> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Ctrl+C received, shutting down");
        flag.store(true, Ordering::SeqCst);
    });
    shutdown
}

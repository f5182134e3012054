use criterion::{black_box, criterion_group, criterion_main, Criterion};

use holarium_core::arena::EntityArena;
use holarium_core::clock::Clock;
use holarium_core::codec;
use holarium_core::config::EvolutionConfig;
use holarium_core::evolution::EvolutionEngine;
use holarium_core::store::PatternStore;

fn bench_vector_generation(c: &mut Criterion) {
    c.bench_function("codec_generate_512d", |b| {
        b.iter(|| codec::generate(black_box(b"GENOME_SIMPLE_RULE_1")))
    });
}

fn bench_store_lookup(c: &mut Criterion) {
    let mut store = PatternStore::new();
    let mut clock = Clock::new();
    for i in 0..128u32 {
        let v = codec::generate(&i.to_le_bytes());
        store.insert(&mut clock, v.clone(), v);
    }
    let oldest = codec::generate(&0u32.to_le_bytes()).signature;

    c.bench_function("store_lookup_worst_case", |b| {
        b.iter(|| store.lookup(black_box(oldest)))
    });
}

fn bench_update_cycle(c: &mut Criterion) {
    c.bench_function("evolution_update_full_arena", |b| {
        b.iter_batched(
            || {
                let mut store = PatternStore::new();
                let mut clock = Clock::new();
                let mut arena = EntityArena::new();
                store.load_vocabulary(&mut clock);
                arena.initialize(32, &mut store, &mut clock);
                let engine = EvolutionEngine::new(EvolutionConfig::default());
                (engine, arena, store, clock)
            },
            |(mut engine, mut arena, mut store, mut clock)| {
                engine.update(&mut arena, &mut store, &mut clock)
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_vector_generation,
    bench_store_lookup,
    bench_update_cycle
);
criterion_main!(benches);

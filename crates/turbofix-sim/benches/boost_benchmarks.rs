//! Boost Simulator Benchmarks
//!
//! Criterion benchmarks for the per-frame simulation step, run once per
//! tracked vehicle per frame.

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use turbofix_profile::{AntiLagSettings, BoostByGear, TurboProfile};
use turbofix_sim::prelude::*;

fn spooling_input() -> BoostInput {
    BoostInput {
        rpm: 0.7,
        throttle: 1.0,
        throttle_pedal: 1.0,
        gear: 3,
        current_boost: 0.4,
        delta_s: 1.0 / 60.0,
        ..BoostInput::default()
    }
}

fn bench_tick_default(c: &mut Criterion) {
    let profile = TurboProfile::default_profile();
    let mut sim = BoostSimulator::new();
    let mut rng = StdRng::seed_from_u64(1);
    let input = spooling_input();

    c.bench_function("tick_default", |b| {
        b.iter(|| {
            sim.tick(
                std::hint::black_box(&profile),
                std::hint::black_box(&input),
                &mut rng,
            )
        })
    });
}

fn bench_tick_anti_lag(c: &mut Criterion) {
    let profile = TurboProfile::default_profile()
        .with_boost_by_gear(BoostByGear::from_pairs([(1, 0.3), (2, 0.6), (3, 1.0)]))
        .with_anti_lag(AntiLagSettings {
            enable: true,
            ..AntiLagSettings::default()
        });
    let mut sim = BoostSimulator::new();
    let mut rng = StdRng::seed_from_u64(2);
    let mut input = BoostInput {
        throttle: 0.0,
        throttle_pedal: 0.0,
        rpm: 0.9,
        ..spooling_input()
    };

    c.bench_function("tick_anti_lag", |b| {
        b.iter(|| {
            input.now_ms = input.now_ms.wrapping_add(16);
            sim.tick(
                std::hint::black_box(&profile),
                std::hint::black_box(&input),
                &mut rng,
            )
        })
    });
}

fn bench_map_dial(c: &mut Criterion) {
    let profile = TurboProfile::default_profile();

    c.bench_function("map_dial", |b| {
        b.iter(|| map_dial(std::hint::black_box(0.42), std::hint::black_box(&profile)))
    });
}

criterion_group!(benches, bench_tick_default, bench_tick_anti_lag, bench_map_dial);
criterion_main!(benches);

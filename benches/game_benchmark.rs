//! Benchmarks for the rules engine.

#![allow(missing_docs)] // Benchmark macros generate undocumented functions

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use lucky_seven::game::{resolve_overlap, Grid, SquadId, ThreatId};
use lucky_seven::soak::{run_game, SoakConfig};
use lucky_seven::{Controller, Coord, GameState, Settings};

fn bench_new_game(c: &mut Criterion) {
    let mut seed = 0u64;
    c.bench_function("new_game", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(GameState::new(Settings::default(), seed))
        });
    });
}

fn bench_phase_cycle(c: &mut Criterion) {
    let controller = Controller::new(Settings::default(), 42);

    c.bench_function("phase_cycle", |b| {
        b.iter(|| {
            let mut controller = controller.clone();
            for _ in 0..5 {
                let _ = black_box(controller.on_advance_phase());
            }
            controller.drain_cues()
        });
    });
}

fn bench_soak_game(c: &mut Criterion) {
    let settings = Settings::default();
    let config = SoakConfig::default();

    c.bench_function("soak_game", |b| {
        b.iter(|| black_box(run_game(black_box(7), &settings, &config)));
    });
}

fn bench_resolve_overlap(c: &mut Criterion) {
    // Crowded row: one empty cell at the far end.
    let mut grid = Grid::default();
    for x in 1..6 {
        if x % 2 == 0 {
            grid.place_squad(SquadId(x), Coord::new(x, 2));
        } else {
            grid.place_threat(ThreatId(u16::from(x)), Coord::new(x, 2));
        }
    }

    c.bench_function("resolve_overlap_1000", |b| {
        b.iter(|| {
            for column in 1..=6 {
                for _ in 0..166 {
                    let _ = black_box(resolve_overlap(&grid, black_box(column), 2));
                }
            }
        });
    });
}

criterion_group!(
    benches,
    bench_new_game,
    bench_phase_cycle,
    bench_soak_game,
    bench_resolve_overlap
);
criterion_main!(benches);

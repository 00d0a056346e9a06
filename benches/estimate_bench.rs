use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use moyo::board::territory::ownership_snapshot;
use moyo::board::Player;
use moyo::estimate::{estimate, EstimateConfig};
use moyo::playout::{run_trials, PlayoutConfig};
use moyo::protocol::diagram::parse_diagram;

const MIDGAME_9X9: &str = "\
    ..XO.....\n\
    .XXOO.O..\n\
    ..XXO....\n\
    .X.XO.OO.\n\
    ..XXXOX..\n\
    .X.XOOX..\n\
    ..XO.OXX.\n\
    ..XO..OX.\n\
    .........";

fn seeded(threads: usize) -> PlayoutConfig {
    PlayoutConfig {
        seed: 42,
        threads,
        ..PlayoutConfig::default()
    }
}

fn bench_snapshot(c: &mut Criterion) {
    let board = parse_diagram(MIDGAME_9X9).unwrap();
    c.bench_function("ownership_snapshot_9x9", |b| {
        b.iter(|| ownership_snapshot(black_box(&board)))
    });
}

fn bench_trials_sequential(c: &mut Criterion) {
    let board = parse_diagram(MIDGAME_9X9).unwrap();
    let config = seeded(1);
    c.bench_function("run_trials_100_sequential", |b| {
        b.iter(|| run_trials(black_box(&board), Player::First, 100, &config))
    });
}

fn bench_estimate(c: &mut Criterion) {
    let board = parse_diagram(MIDGAME_9X9).unwrap();
    let config = EstimateConfig {
        playout: seeded(0),
        ..EstimateConfig::default()
    };

    let mut group = c.benchmark_group("estimate");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("default_trials_9x9", |b| {
        b.iter(|| estimate(black_box(&board), Player::Second, &config))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_snapshot,
    bench_trials_sequential,
    bench_estimate
);
criterion_main!(benches);

//! Engine benchmarks: setup, snapshot cloning, and a full greedy game.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use fortune_stack::game::Orchestrator;

fn play_greedy(game: &mut Orchestrator) {
    while !game.is_game_over() {
        match game.legal_columns().first().copied() {
            Some(column) => {
                game.move_card(column);
                game.settle();
            }
            None => {
                if !game.discard().is_accepted() {
                    break;
                }
            }
        }
    }
}

fn bench_setup(c: &mut Criterion) {
    let mut seed = 0u32;
    c.bench_function("setup_game", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(Orchestrator::new(seed))
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let game = Orchestrator::new("snapshot");
    c.bench_function("state_snapshot", |b| {
        b.iter(|| black_box(game.state().snapshot()))
    });
}

fn bench_greedy_game(c: &mut Criterion) {
    c.bench_function("greedy_game", |b| {
        b.iter_batched(
            || Orchestrator::new("bench"),
            |mut game| {
                play_greedy(&mut game);
                black_box(game.state().score)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_setup, bench_snapshot, bench_greedy_game);
criterion_main!(benches);

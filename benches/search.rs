//! Search benchmarks.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure:
//! - Full searches on a small board with varying iteration caps
//! - Expansion of the standard opening, where pruning applies
//! - Legal move generation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use amazons_mcts::core::{Cell, PlayerId};
use amazons_mcts::games::amazons::{Amazons, AmazonsBuilder};
use amazons_mcts::mcts::{group_by_relocation, MCTSConfig, MCTSSearch};
use amazons_mcts::rules::GameState;

/// 6x6 board with two amazons a side.
fn small_board() -> Amazons {
    AmazonsBuilder::new()
        .size(6, 6)
        .amazon(PlayerId::FIRST, Cell::new(0, 2))
        .amazon(PlayerId::FIRST, Cell::new(5, 2))
        .amazon(PlayerId::SECOND, Cell::new(2, 5))
        .amazon(PlayerId::SECOND, Cell::new(3, 0))
        .build()
        .unwrap()
}

fn config(iterations: u32) -> MCTSConfig {
    MCTSConfig::default()
        .with_max_iterations(iterations)
        .with_timeout_secs(60.0)
        .with_seed(42)
}

// =============================================================================
// Full Search Benchmarks
// =============================================================================

fn bench_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_small_board");
    let game = small_board();
    let player = game.side_to_move();
    let moves = game.legal_moves(player);

    for iterations in [100u32, 400, 1600] {
        group.throughput(Throughput::Elements(u64::from(iterations)));
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &iterations,
            |b, &iterations| {
                b.iter(|| {
                    let mut search = MCTSSearch::new(config(iterations));
                    black_box(search.search(&game, &moves, player).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_standard_opening(c: &mut Criterion) {
    let game = AmazonsBuilder::standard().build().unwrap();
    let player = game.side_to_move();
    let moves = game.legal_moves(player);

    c.bench_function("standard_opening_200", |b| {
        b.iter(|| {
            let mut search = MCTSSearch::new(config(200));
            black_box(search.search(&game, &moves, player).unwrap())
        });
    });
}

// =============================================================================
// Move Generation Benchmarks
// =============================================================================

fn bench_move_generation(c: &mut Criterion) {
    let game = AmazonsBuilder::standard().build().unwrap();

    c.bench_function("legal_moves_standard", |b| {
        b.iter(|| black_box(game.legal_moves(PlayerId::FIRST)));
    });

    let moves = game.legal_moves(PlayerId::FIRST);
    c.bench_function("group_by_relocation_standard", |b| {
        b.iter(|| black_box(group_by_relocation(&moves)));
    });
}

criterion_group!(
    benches,
    bench_search_iterations,
    bench_standard_opening,
    bench_move_generation
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xiangqi_engine::test_positions::{MIDGAME_1, MIDGAME_2};
use xiangqi_engine::{parse_fen, AIConfig, AIEngine, Board, Side};

fn bench_movegen(c: &mut Criterion) {
    let board = Board::initial();
    c.bench_function("legal_moves_startpos", |b| {
        b.iter(|| black_box(board.all_legal_moves(black_box(Side::Red))).len())
    });

    let state = parse_fen(MIDGAME_2).unwrap();
    c.bench_function("is_in_check_midgame", |b| {
        b.iter(|| black_box(&state.board).is_in_check(state.turn))
    });
}

fn bench_strategies(c: &mut Criterion) {
    let state = parse_fen(MIDGAME_1).unwrap();
    let config = AIConfig {
        seed: Some(1),
        ..Default::default()
    };

    for name in ["random", "greedy", "minimax"] {
        let ai = AIEngine::from_strategy(name, &config).unwrap();
        c.bench_function(&format!("{}_midgame", name), |b| {
            b.iter(|| ai.select_best_move(black_box(&state.board), state.turn))
        });
    }
}

fn bench_minimax_depths(c: &mut Criterion) {
    let board = Board::initial();
    let mut group = c.benchmark_group("minimax_startpos");
    group.sample_size(10);
    for depth in [2, 3] {
        let ai = AIEngine::minimax(&AIConfig {
            depth,
            ..Default::default()
        });
        group.bench_function(format!("depth_{}", depth), |b| {
            b.iter(|| ai.select_best_move(black_box(&board), Side::Red))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_movegen, bench_strategies, bench_minimax_depths);
criterion_main!(benches);

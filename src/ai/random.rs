//! 随机 AI 策略

use super::{sort_and_truncate, AIStrategy, ScoredMove};
use crate::board::Board;
use crate::types::{Move, Side};
use rand::prelude::*;
use std::sync::Mutex;

/// 随机 AI - 在全部合法走法中均匀随机选择，不做评估
pub struct RandomAI {
    rng: Mutex<StdRng>,
}

impl RandomAI {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        RandomAI {
            rng: Mutex::new(rng),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut rng)
    }
}

impl AIStrategy for RandomAI {
    fn select_moves(&self, board: &Board, side: Side, n: usize) -> Vec<ScoredMove> {
        let moves = board.all_legal_moves(side);

        let mut scored: Vec<ScoredMove> = self.with_rng(|rng| {
            moves
                .into_iter()
                .map(|mv| ScoredMove {
                    mv,
                    score: rng.gen_range(0..1000),
                })
                .collect()
        });

        sort_and_truncate(&mut scored, n);
        scored
    }

    fn select_best_move(&self, board: &Board, side: Side) -> Option<Move> {
        let moves = board.all_legal_moves(side);
        self.with_rng(|rng| moves.choose(rng).copied())
    }
}

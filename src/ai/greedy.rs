//! 贪婪 AI 策略

use super::{sort_and_truncate, AIStrategy, ScoredMove};
use crate::board::Board;
use crate::eval::evaluate;
use crate::types::{Move, Side};

/// 贪婪 AI - 一层搜索，走后局面评估 + 吃子奖励
///
/// 吃子奖励为被吃子价值的两倍，叠加在已经包含子力差的评估分之上，
/// 使中等难度更倾向于吃子。同分时先生成的走法优先。
#[derive(Debug, Default)]
pub struct GreedyAI;

impl GreedyAI {
    pub fn new() -> Self {
        GreedyAI
    }

    /// 评估单个走法
    fn evaluate_move(&self, board: &Board, side: Side, mv: Move) -> i32 {
        let (after, captured) = board.with_move(mv);
        let capture_bonus = captured.map_or(0, |p| 2 * p.kind.value());
        evaluate(&after, side) + capture_bonus
    }
}

impl AIStrategy for GreedyAI {
    fn select_moves(&self, board: &Board, side: Side, n: usize) -> Vec<ScoredMove> {
        let mut scored: Vec<ScoredMove> = board
            .all_legal_moves(side)
            .into_iter()
            .map(|mv| ScoredMove {
                mv,
                score: self.evaluate_move(board, side, mv),
            })
            .collect();

        sort_and_truncate(&mut scored, n);
        scored
    }

    fn select_best_move(&self, board: &Board, side: Side) -> Option<Move> {
        let mut best: Option<(Move, i32)> = None;
        for mv in board.all_legal_moves(side) {
            let score = self.evaluate_move(board, side, mv);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mv, score));
            }
        }
        if let Some((mv, score)) = best {
            log::debug!("greedy: best={} score={}", mv, score);
        }
        best.map(|(mv, _)| mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;
    use crate::test_positions::{CAPTURE_CANNON, THREE_MOVES};
    use crate::types::{PieceKind, Position};

    #[test]
    fn test_capture_double_counted() {
        let state = parse_fen(CAPTURE_CANNON).unwrap();
        let ai = GreedyAI::new();
        let capture = Move::new(Position::new(4, 5), Position::new(4, 4));
        let (after, _) = state.board.with_move(capture);

        assert_eq!(
            ai.evaluate_move(&state.board, Side::Red, capture),
            evaluate(&after, Side::Red) + 2 * PieceKind::Cannon.value()
        );
    }

    #[test]
    fn test_ties_keep_first_generated_move() {
        // 帅的三个走法评估相同，取生成顺序的第一个
        let board = parse_fen(THREE_MOVES).unwrap().board;
        let ai = GreedyAI::new();
        let first = board.all_legal_moves(Side::Red)[0];
        assert_eq!(ai.select_best_move(&board, Side::Red), Some(first));
        assert_eq!(ai.select_moves(&board, Side::Red, 1)[0].mv, first);
    }
}

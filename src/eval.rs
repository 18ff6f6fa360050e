//! 静态局面评估
//!
//! 分数从 `perspective` 一方的视角计算：子力 + 位置加成 + 将军/将死奖惩。
//! 将军与将死每次评估都重新判定，不做缓存。

use crate::board::Board;
use crate::types::{Piece, Position, Side};

/// 将军奖惩
pub const CHECK_BONUS: i32 = 500;

/// 将死奖惩
pub const CHECKMATE_BONUS: i32 = 10_000;

/// 位置加成表 [rank][file]，以红方视角排列，黑方棋子按 rank 镜像查表
///
/// 目前全为 0，可以在不改变接口的前提下加入子力位置表
const POSITION_BONUS: [[i32; 9]; 10] = [[0; 9]; 10];

/// 棋子在某位置的位置加成
#[inline]
pub fn position_bonus(piece: Piece, pos: Position) -> i32 {
    let rank = match piece.side {
        Side::Red => pos.rank,
        Side::Black => 9 - pos.rank,
    };
    POSITION_BONUS[rank as usize][pos.file as usize]
}

/// 子力与位置分（不含将军判定）
pub fn material_score(board: &Board, perspective: Side) -> i32 {
    board
        .pieces()
        .map(|(pos, piece)| {
            let value = piece.kind.value() + position_bonus(piece, pos);
            if piece.side == perspective {
                value
            } else {
                -value
            }
        })
        .sum()
}

/// 评估局面
pub fn evaluate(board: &Board, perspective: Side) -> i32 {
    let opponent = perspective.opposite();
    let mut score = 0;

    if board.is_in_check(perspective) {
        score -= CHECK_BONUS;
    }
    if board.is_in_check(opponent) {
        score += CHECK_BONUS;
    }

    if board.is_checkmate(opponent) {
        score += CHECKMATE_BONUS;
    }
    if board.is_checkmate(perspective) {
        score -= CHECKMATE_BONUS;
    }

    score + material_score(board, perspective)
}

/// 评估明细（用于命令行输出）
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct EvalDetail {
    pub score: i32,
    pub material: i32,
    pub in_check: bool,
    pub opponent_in_check: bool,
    pub checkmated: bool,
    pub opponent_checkmated: bool,
}

impl EvalDetail {
    pub fn compute(board: &Board, perspective: Side) -> EvalDetail {
        let opponent = perspective.opposite();
        EvalDetail {
            score: evaluate(board, perspective),
            material: material_score(board, perspective),
            in_check: board.is_in_check(perspective),
            opponent_in_check: board.is_in_check(opponent),
            checkmated: board.is_checkmate(perspective),
            opponent_checkmated: board.is_checkmate(opponent),
        }
    }
}

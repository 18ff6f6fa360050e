//! 错误类型

use crate::types::{Position, Side};
use thiserror::Error;

/// 走法被拒绝的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("position {0:?} is outside the board")]
    OutOfBoard(Position),
    #[error("no piece at {0}")]
    EmptySquare(Position),
    #[error("piece at {at} does not belong to {side}")]
    WrongSide { at: Position, side: Side },
    #[error("piece at {from} cannot reach {to}")]
    Unreachable { from: Position, to: Position },
    #[error("move {from}{to} leaves the {side} general attacked")]
    ExposesGeneral {
        from: Position,
        to: Position,
        side: Side,
    },
    #[error("the game is already over")]
    GameOver,
}

/// 存档加载错误
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("position {0:?} is outside the board")]
    OutOfBoard(Position),
    #[error("more than one piece placed at {0}")]
    Occupied(Position),
    #[error("history entry {index} refers to {pos:?} outside the board")]
    HistoryOutOfBoard { index: usize, pos: Position },
}

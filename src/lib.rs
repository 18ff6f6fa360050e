//! Xiangqi Engine
//!
//! 中国象棋规则引擎与电脑对手 - 走法生成、将军判定、局面评估、三档难度 AI

pub mod ai;
pub mod board;
pub mod error;
pub mod eval;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod rules;
pub mod snapshot;
pub mod test_positions;
pub mod types;

pub use ai::{
    select_move, AIConfig, AIEngine, AIStrategy, ScoredMove, AVAILABLE_STRATEGIES, DEFAULT_DEPTH,
    MATE_SCORE,
};
pub use board::Board;
pub use error::{IllegalMove, SnapshotError};
pub use eval::{evaluate, EvalDetail};
pub use fen::{apply_move_to_fen, parse_fen, pieces_to_fen, FenState};
pub use game::GameState;
pub use notation::to_notation;
pub use rules::{MoveOutcome, StalematePolicy};
pub use snapshot::GameSnapshot;
pub use types::{Difficulty, GameStatus, Move, MoveRecord, Piece, PieceKind, Position, Side};

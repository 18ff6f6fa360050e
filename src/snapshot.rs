//! 对局存档（JSON）
//!
//! 保存棋子摆放、走棋方、走法历史和对局状态。加载时检查坐标与重叠，
//! 不合法的输入返回 `SnapshotError`。

use crate::board::Board;
use crate::error::SnapshotError;
use crate::game::GameState;
use crate::types::{GameStatus, MoveRecord, Piece, PieceKind, Position, Side};
use serde::{Deserialize, Serialize};

/// 棋盘上的一枚棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub kind: PieceKind,
    pub side: Side,
    pub position: Position,
}

/// 存档内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub pieces: Vec<PlacedPiece>,
    pub current_player: Side,
    #[serde(default)]
    pub move_history: Vec<MoveRecord>,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn capture(game: &GameState) -> GameSnapshot {
        GameSnapshot {
            pieces: game
                .board()
                .pieces()
                .map(|(position, piece)| PlacedPiece {
                    kind: piece.kind,
                    side: piece.side,
                    position,
                })
                .collect(),
            current_player: game.side_to_move(),
            move_history: game.history().to_vec(),
            status: game.status(),
        }
    }

    /// 校验并还原为对局状态
    pub fn restore(&self) -> Result<GameState, SnapshotError> {
        let mut board = Board::empty();
        for placed in &self.pieces {
            let pos = placed.position;
            if !pos.is_valid() {
                return Err(SnapshotError::OutOfBoard(pos));
            }
            if board.is_occupied(pos) {
                return Err(SnapshotError::Occupied(pos));
            }
            board = board.place(pos, Some(Piece::new(placed.kind, placed.side)));
        }

        for (index, record) in self.move_history.iter().enumerate() {
            for pos in [record.from, record.to] {
                if !pos.is_valid() {
                    return Err(SnapshotError::HistoryOutOfBoard { index, pos });
                }
            }
        }

        Ok(GameState::from_parts(
            board,
            self.current_player,
            self.move_history.clone(),
            self.status,
        ))
    }
}

impl GameState {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&GameSnapshot::capture(self))?)
    }

    pub fn from_json(json: &str) -> Result<GameState, SnapshotError> {
        let snapshot: GameSnapshot = serde_json::from_str(json)?;
        snapshot.restore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::evaluate;
    use crate::types::Move;

    fn played() -> GameState {
        ["h2e2", "h9g7", "h0g2", "i9h9"]
            .iter()
            .fold(GameState::new(), |game, mv| {
                game.apply_move(Move::from_iccs_str(mv).unwrap()).unwrap()
            })
    }

    #[test]
    fn test_round_trip_preserves_state() {
        let game = played();
        let json = game.to_json().unwrap();
        let loaded = GameState::from_json(&json).unwrap();

        assert_eq!(loaded, game);
        for side in [Side::Red, Side::Black] {
            assert_eq!(
                evaluate(loaded.board(), side),
                evaluate(game.board(), side)
            );
        }
    }

    #[test]
    fn test_json_field_names() {
        let json = played().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["currentPlayer"], "red");
        assert_eq!(value["status"], "playing");
        assert_eq!(value["pieces"].as_array().unwrap().len(), 32);
        assert_eq!(value["moveHistory"][0]["piece"]["kind"], "cannon");
        assert_eq!(value["moveHistory"][0]["from"]["file"], 7);
    }

    #[test]
    fn test_restored_game_continues() {
        let loaded = GameState::from_json(&played().to_json().unwrap()).unwrap();
        let next = loaded.apply_move(Move::from_iccs_str("b0c2").unwrap()).unwrap();
        assert_eq!(next.history().len(), 5);
        assert!(next.undo().is_some());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            GameState::from_json("not json"),
            Err(SnapshotError::Json(_))
        ));

        let off_board = r#"{
            "pieces": [{"kind": "general", "side": "red", "position": {"file": 9, "rank": 0}}],
            "currentPlayer": "red",
            "status": "playing"
        }"#;
        assert!(matches!(
            GameState::from_json(off_board),
            Err(SnapshotError::OutOfBoard(_))
        ));

        let overlap = r#"{
            "pieces": [
                {"kind": "general", "side": "red", "position": {"file": 4, "rank": 9}},
                {"kind": "chariot", "side": "black", "position": {"file": 4, "rank": 9}}
            ],
            "currentPlayer": "black",
            "status": "playing"
        }"#;
        assert!(matches!(
            GameState::from_json(overlap),
            Err(SnapshotError::Occupied(_))
        ));

        let bad_history = r#"{
            "pieces": [],
            "currentPlayer": "red",
            "moveHistory": [{
                "from": {"file": 0, "rank": 12},
                "to": {"file": 0, "rank": 0},
                "piece": {"kind": "chariot", "side": "red"}
            }],
            "status": "playing"
        }"#;
        assert!(matches!(
            GameState::from_json(bad_history),
            Err(SnapshotError::HistoryOutOfBoard { index: 0, .. })
        ));
    }
}

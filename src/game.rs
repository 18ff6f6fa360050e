//! 对局状态
//!
//! `GameState` 是不可变值：每次走子返回新的状态，原状态保持不变，
//! 因此可以随时把快照交给 AI 在其他线程搜索。

use crate::ai::AIEngine;
use crate::board::Board;
use crate::error::IllegalMove;
use crate::rules::StalematePolicy;
use crate::types::{GameStatus, Move, MoveRecord, Position, Side};

/// 一局棋的完整状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side_to_move: Side,
    history: Vec<MoveRecord>,
    status: GameStatus,
    policy: StalematePolicy,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

impl GameState {
    /// 标准开局，红方先走
    pub fn new() -> GameState {
        GameState::from_board(Board::initial(), Side::Red)
    }

    /// 从任意局面开始，状态按当前局面判定
    pub fn from_board(board: Board, side_to_move: Side) -> GameState {
        let policy = StalematePolicy::default();
        GameState {
            board,
            side_to_move,
            history: Vec::new(),
            status: board.outcome(side_to_move, policy),
            policy,
        }
    }

    /// 更换困毙判定并重新判定状态
    pub fn with_policy(mut self, policy: StalematePolicy) -> GameState {
        self.policy = policy;
        self.status = self.board.outcome(self.side_to_move, policy);
        self
    }

    /// 由存档各部分直接组装，不重新判定状态
    pub(crate) fn from_parts(
        board: Board,
        side_to_move: Side,
        history: Vec<MoveRecord>,
        status: GameStatus,
    ) -> GameState {
        GameState {
            board,
            side_to_move,
            history,
            status,
            policy: StalematePolicy::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn policy(&self) -> StalematePolicy {
        self.policy
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// 当前走棋方是否被将军
    pub fn in_check(&self) -> bool {
        self.board.is_in_check(self.side_to_move)
    }

    /// 走一步，返回新状态
    pub fn apply_move(&self, mv: Move) -> Result<GameState, IllegalMove> {
        if self.status.is_over() {
            return Err(IllegalMove::GameOver);
        }

        let outcome = self.board.check_move(mv, self.side_to_move)?;
        let next_side = self.side_to_move.opposite();

        let mut history = self.history.clone();
        history.push(MoveRecord {
            from: mv.from,
            to: mv.to,
            piece: outcome.piece,
            captured_piece: outcome.captured,
        });

        let status = outcome.board.outcome(next_side, self.policy);
        if status.is_over() {
            log::info!(
                "game over after {} moves: {:?} (last move {})",
                history.len(),
                status,
                mv
            );
        }

        Ok(GameState {
            board: outcome.board,
            side_to_move: next_side,
            history,
            status,
            policy: self.policy,
        })
    }

    /// 悔一步：还原走动与被吃的棋子，没有历史时返回 None
    pub fn undo(&self) -> Option<GameState> {
        let (last, rest) = self.history.split_last()?;
        let board = self
            .board
            .place(last.from, Some(last.piece))
            .place(last.to, last.captured_piece);

        Some(GameState {
            board,
            side_to_move: last.piece.side,
            history: rest.to_vec(),
            status: GameStatus::Playing,
            policy: self.policy,
        })
    }

    /// 某格棋子的合法目标；不是走棋方的棋子或对局已结束时为空
    pub fn legal_moves_from(&self, pos: Position) -> Vec<Position> {
        if self.status.is_over() {
            return Vec::new();
        }
        match self.board.get(pos) {
            Some(piece) if piece.side == self.side_to_move => self.board.legal_moves(pos),
            _ => Vec::new(),
        }
    }

    /// 让 AI 为走棋方选择走法
    pub fn computer_move(&self, engine: &AIEngine) -> Option<Move> {
        if self.status.is_over() {
            return None;
        }
        engine.select_best_move(&self.board, self.side_to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AIConfig;
    use crate::fen::parse_fen;
    use crate::test_positions::{CAPTURE_CANNON, MATE_IN_ONE, STALEMATE};
    use crate::types::{Difficulty, PieceKind};

    fn mv(s: &str) -> Move {
        Move::from_iccs_str(s).unwrap()
    }

    fn state(fen: &str) -> GameState {
        let s = parse_fen(fen).unwrap();
        GameState::from_board(s.board, s.turn)
    }

    #[test]
    fn test_new_game() {
        let game = GameState::new();
        assert_eq!(game.side_to_move(), Side::Red);
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(game.history().is_empty());
        assert_eq!(*game.board(), Board::initial());
    }

    #[test]
    fn test_apply_move_is_pure() {
        let game = GameState::new();
        let next = game.apply_move(mv("h2e2")).unwrap();

        assert_eq!(game.side_to_move(), Side::Red);
        assert!(game.history().is_empty());
        assert_eq!(next.side_to_move(), Side::Black);
        assert_eq!(next.history().len(), 1);
        assert_eq!(next.last_move().unwrap().piece.kind, PieceKind::Cannon);
    }

    #[test]
    fn test_rejects_illegal_moves() {
        let game = GameState::new();
        assert_eq!(
            game.apply_move(mv("h7e7")),
            Err(IllegalMove::WrongSide {
                at: Position::new(7, 2),
                side: Side::Red
            })
        );
        assert!(matches!(
            game.apply_move(mv("e4e5")),
            Err(IllegalMove::EmptySquare(_))
        ));
        assert!(matches!(
            game.apply_move(mv("a0b0")),
            Err(IllegalMove::Unreachable { .. })
        ));
    }

    #[test]
    fn test_checkmate_ends_game() {
        let game = state(MATE_IN_ONE);
        let over = game
            .apply_move(Move::new(Position::new(0, 5), Position::new(3, 5)))
            .unwrap();
        assert_eq!(over.status(), GameStatus::RedWin);
        assert!(over.in_check());
        assert_eq!(
            over.apply_move(mv("a0a1")),
            Err(IllegalMove::GameOver)
        );
        assert!(over.legal_moves_from(Position::new(3, 0)).is_empty());
        assert_eq!(over.computer_move(&AIEngine::greedy()), None);
    }

    #[test]
    fn test_stalemate_policy_applies_to_status() {
        let game = state(STALEMATE);
        assert_eq!(game.status(), GameStatus::RedWin);
        assert_eq!(
            game.with_policy(StalematePolicy::Draw).status(),
            GameStatus::Draw
        );
    }

    #[test]
    fn test_undo_restores_capture() {
        let game = state(CAPTURE_CANNON);
        let next = game.apply_move(mv("e4e5")).unwrap();
        assert_eq!(next.last_move().unwrap().captured_piece.map(|p| p.kind), Some(PieceKind::Cannon));

        let back = next.undo().unwrap();
        assert_eq!(back, game);
        assert_eq!(game.undo(), None);
    }

    #[test]
    fn test_legal_moves_from_only_for_side_to_move() {
        let game = GameState::new();
        assert_eq!(game.legal_moves_from(Position::new(7, 7)).len(), 12);
        assert!(game.legal_moves_from(Position::new(7, 2)).is_empty());
        assert!(game.legal_moves_from(Position::new(4, 4)).is_empty());
    }

    #[test]
    fn test_computer_move_is_legal() {
        let game = GameState::new();
        let engine = AIEngine::from_difficulty(Difficulty::Medium, &AIConfig::default());
        let mv = game.computer_move(&engine).unwrap();
        assert!(game.apply_move(mv).is_ok());
    }

    /// 随机自对弈：每个局面都检查合法走法不变量与将死定义
    #[test]
    fn test_random_self_play_invariants() {
        for seed in 0..8 {
            let engine = AIEngine::random(Some(seed));
            let mut game = GameState::new();

            for _ in 0..120 {
                let board = *game.board();
                let side = game.side_to_move();

                let moves = board.all_legal_moves(side);
                for m in &moves {
                    let (after, _) = board.with_move(*m);
                    assert!(!after.is_in_check(side), "seed {} {:?} {}", seed, board, m);
                }
                assert_eq!(
                    board.is_checkmate(side),
                    board.is_in_check(side) && moves.is_empty(),
                    "seed {} {:?}",
                    seed,
                    board
                );

                match game.computer_move(&engine) {
                    Some(m) => game = game.apply_move(m).unwrap(),
                    None => break,
                }
            }

            // 整局可以逐步悔回开局
            while let Some(prev) = game.undo() {
                game = prev;
            }
            assert_eq!(*game.board(), Board::initial());
            assert_eq!(game.side_to_move(), Side::Red);
        }
    }
}

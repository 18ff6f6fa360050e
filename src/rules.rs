//! 规则判定：攻击、将军、合法走法、将死与终局
//!
//! 所有判定都是纯函数：模拟走子时使用棋盘副本，从不修改调用方的棋盘。

use crate::board::Board;
use crate::error::IllegalMove;
use crate::types::{GameStatus, Move, Piece, PieceKind, Position, Side};
use serde::{Deserialize, Serialize};

/// 无子可走（且未被将军）时的判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalematePolicy {
    /// 困毙判负（象棋惯例）
    #[default]
    Loss,
    /// 判和
    Draw,
}

/// 人类走法校验通过后的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// 走后的新棋盘
    pub board: Board,
    /// 走动的棋子
    pub piece: Piece,
    /// 被吃的棋子
    pub captured: Option<Piece>,
    /// 对方是否被将军
    pub opponent_in_check: bool,
    /// 对方是否被将死
    pub opponent_checkmated: bool,
}

impl Board {
    /// 检测某位置是否被某方攻击
    ///
    /// 逐个计算攻击方棋子的伪合法走法，不经过将军判定
    pub fn is_attacked(&self, target: Position, by_side: Side) -> bool {
        self.pieces_of(by_side)
            .any(|(from, piece)| self.pseudo_moves_for(from, piece).contains(&target))
    }

    /// 检查是否被将军，没有将帅时视为未被将军
    pub fn is_in_check(&self, side: Side) -> bool {
        match self.find_general(side) {
            Some(pos) => self.is_attacked(pos, side.opposite()),
            None => false,
        }
    }

    /// 走后是否会让己方将帅被攻击
    fn exposes_general(&self, mv: Move, side: Side) -> bool {
        let (scratch, _) = self.with_move(mv);
        scratch.is_in_check(side)
    }

    /// 某格棋子的合法目标位置
    pub fn legal_moves(&self, from: Position) -> Vec<Position> {
        let piece = match self.get(from) {
            Some(p) => p,
            None => return Vec::new(),
        };
        self.pseudo_moves_for(from, piece)
            .into_iter()
            .filter(|&to| !self.exposes_general(Move::new(from, to), piece.side))
            .collect()
    }

    /// 某方的全部合法走法
    ///
    /// 按棋盘下标扫描棋子，每个棋子内按走法生成顺序。没有将帅的一方无子可走。
    pub fn all_legal_moves(&self, side: Side) -> Vec<Move> {
        if self.find_general(side).is_none() {
            return Vec::new();
        }

        let mut moves = Vec::with_capacity(64);
        for (from, piece) in self.pieces_of(side) {
            for to in self.pseudo_moves_for(from, piece) {
                let mv = Move::new(from, to);
                if !self.exposes_general(mv, side) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// 是否存在至少一个合法走法（找到即停）
    pub fn has_legal_move(&self, side: Side) -> bool {
        if self.find_general(side).is_none() {
            return false;
        }
        self.pieces_of(side).any(|(from, piece)| {
            self.pseudo_moves_for(from, piece)
                .into_iter()
                .any(|to| !self.exposes_general(Move::new(from, to), side))
        })
    }

    /// 校验走法，返回拒绝原因
    pub fn validate_move(&self, mv: Move, side: Side) -> Result<Piece, IllegalMove> {
        if !mv.from.is_valid() {
            return Err(IllegalMove::OutOfBoard(mv.from));
        }
        if !mv.to.is_valid() {
            return Err(IllegalMove::OutOfBoard(mv.to));
        }
        let piece = self
            .get(mv.from)
            .ok_or(IllegalMove::EmptySquare(mv.from))?;
        if piece.side != side {
            return Err(IllegalMove::WrongSide { at: mv.from, side });
        }
        if !self.pseudo_moves_for(mv.from, piece).contains(&mv.to) {
            return Err(IllegalMove::Unreachable {
                from: mv.from,
                to: mv.to,
            });
        }
        if self.exposes_general(mv, side) {
            return Err(IllegalMove::ExposesGeneral {
                from: mv.from,
                to: mv.to,
                side,
            });
        }
        Ok(piece)
    }

    /// 走法是否合法
    pub fn is_legal_move(&self, from: Position, to: Position, side: Side) -> bool {
        self.validate_move(Move::new(from, to), side).is_ok()
    }

    /// 人类走法请求：校验并返回新棋盘及对方的将军/将死状态
    pub fn check_move(&self, mv: Move, side: Side) -> Result<MoveOutcome, IllegalMove> {
        let piece = self.validate_move(mv, side)?;
        let (board, captured) = self.with_move(mv);
        let opponent = side.opposite();

        Ok(MoveOutcome {
            board,
            piece,
            captured,
            opponent_in_check: board.is_in_check(opponent),
            opponent_checkmated: board.is_checkmate(opponent),
        })
    }

    /// 是否被将死：被将军且任何走法都无法解除
    pub fn is_checkmate(&self, side: Side) -> bool {
        self.is_in_check(side) && !self.has_legal_move(side)
    }

    /// 困毙：未被将军但无子可走
    pub fn is_stalemate(&self, side: Side) -> bool {
        self.find_general(side).is_some() && !self.is_in_check(side) && !self.has_legal_move(side)
    }

    /// 判断轮到 `side_to_move` 走棋时的对局状态
    pub fn outcome(&self, side_to_move: Side, policy: StalematePolicy) -> GameStatus {
        for side in [Side::Red, Side::Black] {
            if self.find_general(side).is_none() {
                return GameStatus::win_for(side.opposite());
            }
        }

        if self.has_legal_move(side_to_move) {
            return GameStatus::Playing;
        }

        if self.is_in_check(side_to_move) {
            return GameStatus::win_for(side_to_move.opposite());
        }

        match policy {
            StalematePolicy::Loss => GameStatus::win_for(side_to_move.opposite()),
            StalematePolicy::Draw => GameStatus::Draw,
        }
    }

    /// 子力统计（用于调试输出）
    pub fn material(&self, side: Side) -> i32 {
        self.pieces_of(side)
            .filter(|(_, p)| p.kind != PieceKind::General)
            .map(|(_, p)| p.kind.value())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;
    use crate::test_positions::{
        BACK_RANK_CHECK, BACK_RANK_MATE, FLYING_GENERAL, MATE_IN_ONE, MISSING_GENERAL,
        PINNED_CHARIOT, STALEMATE, START,
    };

    fn board(fen: &str) -> Board {
        parse_fen(fen).unwrap().board
    }

    fn p(file: i8, rank: i8) -> Position {
        Position::new(file, rank)
    }

    #[test]
    fn test_legal_moves_initial() {
        let board = Board::initial();
        assert_eq!(board.all_legal_moves(Side::Red).len(), 44);
        assert_eq!(board.all_legal_moves(Side::Black).len(), 44);
        assert!(!board.is_in_check(Side::Red));
        assert!(!board.is_checkmate(Side::Black));
    }

    #[test]
    fn test_check_detection() {
        let board = board(BACK_RANK_CHECK);
        assert!(board.is_in_check(Side::Black));
        assert!(!board.is_in_check(Side::Red));
        assert!(board.is_attacked(p(4, 0), Side::Red));
    }

    #[test]
    fn test_back_rank_check_responses() {
        let board = board(BACK_RANK_CHECK);
        let moves = board.all_legal_moves(Side::Black);
        assert!(!moves.is_empty());
        assert!(!board.is_checkmate(Side::Black));

        for mv in moves {
            let (after, _) = board.with_move(mv);
            assert!(!after.is_in_check(Side::Black), "{} does not resolve check", mv);
        }
    }

    #[test]
    fn test_back_rank_mate() {
        let board = board(BACK_RANK_MATE);
        assert!(board.is_in_check(Side::Black));
        assert!(board.all_legal_moves(Side::Black).is_empty());
        assert!(board.is_checkmate(Side::Black));
        assert!(!board.is_stalemate(Side::Black));
        assert_eq!(
            board.outcome(Side::Black, StalematePolicy::Draw),
            GameStatus::RedWin
        );
    }

    #[test]
    fn test_flying_general_exposure() {
        let board = board(FLYING_GENERAL);
        // 中间只有一个黑马，马不能离开该列
        let horse_moves = board.legal_moves(p(4, 4));
        assert!(horse_moves.is_empty());
        assert!(!board.is_legal_move(p(4, 4), p(2, 3), Side::Black));
        // 黑将可以离开中路
        assert!(board.is_legal_move(p(4, 0), p(3, 0), Side::Black));
    }

    #[test]
    fn test_pinned_chariot() {
        let board = board(PINNED_CHARIOT);
        // 黑车被红车牵制在 file 4 上，只能沿该列移动
        let moves = board.legal_moves(p(4, 2));
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|to| to.file == 4));
        assert!(moves.contains(&p(4, 6)));
        assert!(!board.legal_moves(p(4, 2)).contains(&p(0, 2)));
    }

    #[test]
    fn test_is_legal_move_rejections() {
        let board = Board::initial();
        // 空格
        assert_eq!(
            board.validate_move(Move::new(p(4, 4), p(4, 5)), Side::Red),
            Err(IllegalMove::EmptySquare(p(4, 4)))
        );
        // 对方棋子
        assert!(matches!(
            board.validate_move(Move::new(p(1, 2), p(4, 2)), Side::Red),
            Err(IllegalMove::WrongSide { .. })
        ));
        // 越界
        assert!(matches!(
            board.validate_move(Move::new(p(1, 7), p(1, 12)), Side::Red),
            Err(IllegalMove::OutOfBoard(_))
        ));
        assert!(matches!(
            board.validate_move(Move::new(p(-1, 7), p(1, 7)), Side::Red),
            Err(IllegalMove::OutOfBoard(_))
        ));
        // 走法不符
        assert!(matches!(
            board.validate_move(Move::new(p(1, 9), p(1, 8)), Side::Red),
            Err(IllegalMove::Unreachable { .. })
        ));
        assert!(!board.is_legal_move(p(1, 9), p(1, 8), Side::Red));
        assert!(board.is_legal_move(p(1, 9), p(2, 7), Side::Red));
    }

    #[test]
    fn test_check_move_reports_opponent_state() {
        let board = board(MATE_IN_ONE);
        let outcome = board
            .check_move(Move::new(p(0, 5), p(3, 5)), Side::Red)
            .unwrap();
        assert!(outcome.opponent_in_check);
        assert!(outcome.opponent_checkmated);
        assert_eq!(outcome.piece.kind, PieceKind::Chariot);
        assert_eq!(outcome.captured, None);
        // 原棋盘未被修改
        assert_eq!(board.at(p(3, 5)), None);

        let quiet = board
            .check_move(Move::new(p(0, 5), p(0, 4)), Side::Red)
            .unwrap();
        assert!(!quiet.opponent_in_check);
        assert!(!quiet.opponent_checkmated);
    }

    #[test]
    fn test_stalemate_policy() {
        let board = board(STALEMATE);
        assert!(!board.is_in_check(Side::Black));
        assert!(board.all_legal_moves(Side::Black).is_empty());
        assert!(board.is_stalemate(Side::Black));
        assert!(!board.is_checkmate(Side::Black));

        assert_eq!(
            board.outcome(Side::Black, StalematePolicy::Loss),
            GameStatus::RedWin
        );
        assert_eq!(
            board.outcome(Side::Black, StalematePolicy::Draw),
            GameStatus::Draw
        );
    }

    #[test]
    fn test_missing_general() {
        let board = board(MISSING_GENERAL);
        assert!(!board.is_in_check(Side::Black));
        assert!(!board.is_checkmate(Side::Black));
        assert!(!board.is_stalemate(Side::Black));
        assert!(board.all_legal_moves(Side::Black).is_empty());
        assert_eq!(
            board.outcome(Side::Red, StalematePolicy::Loss),
            GameStatus::RedWin
        );
    }

    #[test]
    fn test_outcome_playing() {
        assert_eq!(
            board(START).outcome(Side::Red, StalematePolicy::Loss),
            GameStatus::Playing
        );
    }

    #[test]
    fn test_checkmate_matches_definition() {
        for fen in [BACK_RANK_CHECK, BACK_RANK_MATE, STALEMATE, MATE_IN_ONE, START] {
            let board = board(fen);
            for side in [Side::Red, Side::Black] {
                let every_move_stays_in_check = board.pieces_of(side).all(|(from, _)| {
                    board.pseudo_moves(from).into_iter().all(|to| {
                        let (after, _) = board.with_move(Move::new(from, to));
                        after.is_in_check(side)
                    })
                });
                let expected = board.is_in_check(side) && every_move_stays_in_check;
                assert_eq!(board.is_checkmate(side), expected, "{} {}", fen, side);
            }
        }
    }
}

//! 象棋棋盘
//!
//! 使用 90 格数组存储棋子。棋盘是值类型：模拟走子总是在副本上进行，
//! 调用方持有的棋盘不会被修改。

use crate::fen::{parse_fen, pieces_to_fen};
use crate::types::{Move, Piece, PieceKind, Position, Side, FILES, RANKS};
use lazy_static::lazy_static;
use std::fmt;

const SQUARES: usize = (FILES as usize) * (RANKS as usize);

/// 开局底线排列（从 file 0 到 file 8）
const BACK_RANK: [PieceKind; 9] = [
    PieceKind::Chariot,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::General,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Chariot,
];

lazy_static! {
    static ref OPENING: Board = Board::build_opening();
}

/// 棋盘（10行 x 9列）
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// 空棋盘
    pub fn empty() -> Board {
        Board {
            squares: [None; SQUARES],
        }
    }

    /// 标准开局（32 子）
    pub fn initial() -> Board {
        *OPENING
    }

    fn build_opening() -> Board {
        let mut board = Board::empty();
        for side in [Side::Red, Side::Black] {
            let home = side.home_rank();
            let fwd = side.forward();

            for (file, kind) in BACK_RANK.iter().enumerate() {
                board.set(Position::new(file as i8, home), Some(Piece::new(*kind, side)));
            }
            for file in [1, 7] {
                board.set(
                    Position::new(file, home + 2 * fwd),
                    Some(Piece::new(PieceKind::Cannon, side)),
                );
            }
            for file in [0, 2, 4, 6, 8] {
                board.set(
                    Position::new(file, home + 3 * fwd),
                    Some(Piece::new(PieceKind::Soldier, side)),
                );
            }
        }
        board
    }

    /// 从棋子列表创建棋盘，后出现的棋子覆盖先出现的
    pub fn from_pieces<I>(pieces: I) -> Board
    where
        I: IntoIterator<Item = (Position, Piece)>,
    {
        let mut board = Board::empty();
        for (pos, piece) in pieces {
            board.set(pos, Some(piece));
        }
        board
    }

    /// 从 FEN 字符串创建棋盘（忽略回合字段）
    pub fn from_fen(fen: &str) -> Result<Board, String> {
        let state = parse_fen(fen)?;
        Ok(state.board)
    }

    /// 生成 FEN 字符串
    pub fn to_fen(&self, side_to_move: Side) -> String {
        pieces_to_fen(self, side_to_move)
    }

    /// 获取某位置的棋子
    ///
    /// 越界坐标属于调用错误，直接 panic
    #[inline]
    pub fn at(&self, pos: Position) -> Option<Piece> {
        assert!(pos.is_valid(), "position out of board: {:?}", pos);
        self.squares[pos.to_index()]
    }

    /// 越界返回 None 的查询，用于走法生成中的边界探测
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.squares[pos.to_index()]
    }

    /// 检查位置是否有棋子（越界视为无子）
    #[inline]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// 返回放置（或清空）某格后的新棋盘
    pub fn place(&self, pos: Position, piece: Option<Piece>) -> Board {
        let mut next = *self;
        next.set(pos, piece);
        next
    }

    #[inline]
    fn set(&mut self, pos: Position, piece: Option<Piece>) {
        assert!(pos.is_valid(), "position out of board: {:?}", pos);
        self.squares[pos.to_index()] = piece;
    }

    /// 所有棋子（按下标顺序）
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, sq)| sq.map(|p| (Position::from_index(i), p)))
    }

    /// 某方的所有棋子
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.side == side)
    }

    /// 找到将帅的位置
    pub fn find_general(&self, side: Side) -> Option<Position> {
        self.pieces_of(side)
            .find(|(_, p)| p.kind == PieceKind::General)
            .map(|(pos, _)| pos)
    }

    /// 在副本上执行走法：起点清空，终点放入走动的棋子，原有棋子被吃掉
    ///
    /// 返回新棋盘与被吃的棋子
    pub fn with_move(&self, mv: Move) -> (Board, Option<Piece>) {
        let mut next = *self;
        let moving = next.squares[mv.from.to_index()].take();
        let captured = next.squares[mv.to.to_index()];
        next.squares[mv.to.to_index()] = moving;
        (next, captured)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen(Side::Red))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..RANKS {
            for file in 0..FILES {
                let c = match self.squares[Position::new(file, rank).to_index()] {
                    Some(p) => p.glyph(),
                    None => '＋',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f, " {}", 9 - rank)?;
        }
        write!(f, "ａｂｃｄｅｆｇｈｉ")
    }
}

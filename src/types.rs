//! 象棋核心类型定义
//!
//! 定义棋盘坐标、阵营、棋子、走法等基础数据类型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 棋盘列数
pub const FILES: i8 = 9;
/// 棋盘行数
pub const RANKS: i8 = 10;

/// 阵营
///
/// 红方在下（rank 5-9），黑方在上（rank 0-4）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opposite(&self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// 前进方向（rank 增量）
    pub fn forward(&self) -> i8 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }

    /// 底线所在的 rank
    pub fn home_rank(&self) -> i8 {
        match self {
            Side::Red => 9,
            Side::Black => 0,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            'r' | 'w' => Some(Side::Red),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    /// 转换为 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Side::Red => 'r',
            Side::Black => 'b',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// 帥/將
    General,
    /// 仕/士
    Advisor,
    /// 相/象
    Elephant,
    /// 傌/馬
    Horse,
    /// 俥/車
    Chariot,
    /// 炮/砲
    Cannon,
    /// 兵/卒
    Soldier,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    /// 从 FEN 字符解析（不区分大小写）
    pub fn from_fen_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::General),
            'a' => Some(PieceKind::Advisor),
            'e' | 'b' => Some(PieceKind::Elephant),
            'h' | 'n' => Some(PieceKind::Horse),
            'r' => Some(PieceKind::Chariot),
            'c' => Some(PieceKind::Cannon),
            'p' => Some(PieceKind::Soldier),
            _ => None,
        }
    }

    /// 转换为 FEN 字符（小写）
    pub fn to_fen_char(&self) -> char {
        match self {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'e',
            PieceKind::Horse => 'h',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        }
    }

    /// 棋子子力价值
    ///
    /// 将帅的价值远大于其余子力之和，用作将死的近似
    pub fn value(&self) -> i32 {
        match self {
            PieceKind::General => 10000,
            PieceKind::Chariot => 450,
            PieceKind::Horse => 400,
            PieceKind::Cannon => 400,
            PieceKind::Soldier => 50,
            PieceKind::Advisor => 20,
            PieceKind::Elephant => 20,
        }
    }

    /// 棋子的显示字形（红黑不同）
    pub fn glyph(&self, side: Side) -> char {
        match (self, side) {
            (PieceKind::General, Side::Red) => '帥',
            (PieceKind::General, Side::Black) => '將',
            (PieceKind::Advisor, Side::Red) => '仕',
            (PieceKind::Advisor, Side::Black) => '士',
            (PieceKind::Elephant, Side::Red) => '相',
            (PieceKind::Elephant, Side::Black) => '象',
            (PieceKind::Horse, Side::Red) => '傌',
            (PieceKind::Horse, Side::Black) => '馬',
            (PieceKind::Chariot, Side::Red) => '俥',
            (PieceKind::Chariot, Side::Black) => '車',
            (PieceKind::Cannon, Side::Red) => '炮',
            (PieceKind::Cannon, Side::Black) => '砲',
            (PieceKind::Soldier, Side::Red) => '兵',
            (PieceKind::Soldier, Side::Black) => '卒',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::General => "General",
            PieceKind::Advisor => "Advisor",
            PieceKind::Elephant => "Elephant",
            PieceKind::Horse => "Horse",
            PieceKind::Chariot => "Chariot",
            PieceKind::Cannon => "Cannon",
            PieceKind::Soldier => "Soldier",
        };
        write!(f, "{}", name)
    }
}

/// 棋子：类型 + 阵营，值对象
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }

    /// FEN 字符：红方大写，黑方小写
    pub fn to_fen_char(&self) -> char {
        let c = self.kind.to_fen_char();
        match self.side {
            Side::Red => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let side = if c.is_ascii_uppercase() {
            Side::Red
        } else {
            Side::Black
        };
        Some(Piece { kind, side })
    }

    pub fn glyph(&self) -> char {
        self.kind.glyph(self.side)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// 棋盘坐标 (file, rank)
///
/// file: 0-8 (从左到右)
/// rank: 0-9 (0 是黑方底线，9 是红方底线)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: i8,
    pub rank: i8,
}

impl Position {
    pub fn new(file: i8, rank: i8) -> Self {
        Position { file, rank }
    }

    /// 检查位置是否在棋盘范围内
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..FILES).contains(&self.file) && (0..RANKS).contains(&self.rank)
    }

    /// 检查位置是否在该方九宫格内
    pub fn in_palace(&self, side: Side) -> bool {
        if !(3..=5).contains(&self.file) {
            return false;
        }
        match side {
            Side::Red => (7..=9).contains(&self.rank),
            Side::Black => (0..=2).contains(&self.rank),
        }
    }

    /// 检查位置是否在该方半场（未过河）
    pub fn on_own_half(&self, side: Side) -> bool {
        match side {
            Side::Red => (5..=9).contains(&self.rank),
            Side::Black => (0..=4).contains(&self.rank),
        }
    }

    /// 位置加偏移量
    #[inline]
    pub fn offset(&self, file_delta: i8, rank_delta: i8) -> Position {
        Position {
            file: self.file + file_delta,
            rank: self.rank + rank_delta,
        }
    }

    /// 数组下标 (rank * 9 + file)
    #[inline]
    pub fn to_index(&self) -> usize {
        (self.rank as usize) * (FILES as usize) + self.file as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Position {
        Position {
            file: (index % FILES as usize) as i8,
            rank: (index / FILES as usize) as i8,
        }
    }

    /// 从 ICCS 坐标解析（如 "e0" 为红帅初始位置）
    ///
    /// 数字从红方底线开始计数：digit = 9 - rank
    pub fn from_iccs_str(s: &str) -> Option<Position> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match bytes[0] {
            b'a'..=b'i' => (bytes[0] - b'a') as i8,
            _ => return None,
        };
        let rank = match bytes[1] {
            b'0'..=b'9' => 9 - (bytes[1] - b'0') as i8,
            _ => return None,
        };
        Some(Position { file, rank })
    }

    /// 转换为 ICCS 坐标
    pub fn to_iccs_str(&self) -> String {
        let file_char = b'a'.wrapping_add(self.file as u8) as char;
        format!("{}{}", file_char, 9 - self.rank)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iccs_str())
    }
}

/// 走法请求（不含历史信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }

    /// 从 ICCS 走法字符串解析，格式：`h2e2`
    pub fn from_iccs_str(s: &str) -> Option<Move> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Position::from_iccs_str(&s[0..2])?;
        let to = Position::from_iccs_str(&s[2..4])?;
        Some(Move { from, to })
    }

    pub fn to_iccs_str(&self) -> String {
        format!("{}{}", self.from.to_iccs_str(), self.to.to_iccs_str())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iccs_str())
    }
}

/// 历史走法记录：走法 + 走动的棋子 + 被吃的棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_piece: Option<Piece>,
}

impl MoveRecord {
    pub fn mv(&self) -> Move {
        Move::new(self.from, self.to)
    }
}

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Playing,
    RedWin,
    BlackWin,
    Draw,
}

impl GameStatus {
    /// 某方获胜
    pub fn win_for(side: Side) -> GameStatus {
        match side {
            Side::Red => GameStatus::RedWin,
            Side::Black => GameStatus::BlackWin,
        }
    }

    pub fn is_over(&self) -> bool {
        *self != GameStatus::Playing
    }
}

/// 电脑难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 随机走子
    Easy,
    /// 一层贪婪
    Medium,
    /// Minimax + Alpha-Beta
    Hard,
}

impl Difficulty {
    pub fn from_name(name: &str) -> Option<Difficulty> {
        match name.to_lowercase().as_str() {
            "easy" | "simple" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

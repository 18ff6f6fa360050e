//! 中文记谱
//!
//! 格式：棋子 + 起始列 + 进/退/平 + 距离或目标列，吃子时附加「吃」。
//! 红方列号从右到左记为一至九，黑方从左到右。

use crate::types::{MoveRecord, Side};

const COLUMNS: [char; 9] = ['一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// 某方视角的列号
pub fn column_name(file: i8, side: Side) -> char {
    let index = match side {
        Side::Red => 8 - file,
        Side::Black => file,
    };
    COLUMNS[index as usize]
}

/// 走法方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 进
    Advance,
    /// 退
    Retreat,
    /// 平
    Traverse,
}

impl Direction {
    pub fn of(from_rank: i8, to_rank: i8, side: Side) -> Direction {
        let step = (to_rank - from_rank) * side.forward();
        if step > 0 {
            Direction::Advance
        } else if step < 0 {
            Direction::Retreat
        } else {
            Direction::Traverse
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Direction::Advance => '进',
            Direction::Retreat => '退',
            Direction::Traverse => '平',
        }
    }
}

/// 历史记录转为中文记谱，例如「炮二平五」「马8进7」
pub fn to_notation(record: &MoveRecord) -> String {
    let side = record.piece.side;
    let (from, to) = (record.from, record.to);
    let direction = Direction::of(from.rank, to.rank, side);

    let mut text = String::new();
    text.push(record.piece.glyph());
    text.push(column_name(from.file, side));
    text.push(direction.glyph());

    if direction != Direction::Traverse && from.file == to.file {
        // 直进直退记步数
        text.push_str(&(to.rank - from.rank).abs().to_string());
    } else {
        text.push(column_name(to.file, side));
    }

    if record.captured_piece.is_some() {
        text.push('吃');
    }
    text
}

/// 带序号的历史列表，序号从 1 开始
pub fn format_history(history: &[MoveRecord]) -> Vec<String> {
    history
        .iter()
        .enumerate()
        .map(|(i, record)| format!("{}. {}", i + 1, to_notation(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::types::{Move, Position};

    fn record(board: &Board, mv: &str) -> MoveRecord {
        let mv = Move::from_iccs_str(mv).unwrap();
        let piece = board.at(mv.from).unwrap();
        let (_, captured_piece) = board.with_move(mv);
        MoveRecord {
            from: mv.from,
            to: mv.to,
            piece,
            captured_piece,
        }
    }

    #[test]
    fn test_red_central_cannon() {
        let board = Board::initial();
        assert_eq!(to_notation(&record(&board, "h2e2")), "炮二平五");
    }

    #[test]
    fn test_black_horse_advance() {
        let board = Board::initial();
        // 黑方左起第二列的马跳到第三列
        assert_eq!(to_notation(&record(&board, "b9c7")), "馬二进三");
    }

    #[test]
    fn test_straight_moves_use_distance() {
        let board = Board::initial();
        assert_eq!(to_notation(&record(&board, "a0a2")), "俥九进2");
        assert_eq!(to_notation(&record(&board, "i9i7")), "車九进2");
    }

    #[test]
    fn test_capture_suffix() {
        let board = Board::initial();
        // 红炮隔黑炮吃黑马
        assert_eq!(to_notation(&record(&board, "b2b9")), "炮八进7吃");
    }

    #[test]
    fn test_retreat() {
        let board = Board::initial().place(Position::new(1, 7), None);
        let board = board.place(
            Position::new(1, 4),
            board.at(Position::new(7, 7)),
        );
        assert_eq!(to_notation(&record(&board, "b5b2")), "炮八退3");
    }

    #[test]
    fn test_history_numbering() {
        let board = Board::initial();
        let lines = format_history(&[record(&board, "h2e2"), record(&board, "h9g7")]);
        assert_eq!(lines, vec!["1. 炮二平五", "2. 馬八进七"]);
    }
}

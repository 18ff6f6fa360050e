//! FEN 解析和生成
//!
//! 格式: `<棋盘> [回合] [其余字段忽略]`
//!
//! 棋盘从黑方底线 (rank 0) 写到红方底线 (rank 9)，行之间用 `/` 分隔。
//!
//! 棋盘符号：
//! - 红方：K(帅) A(仕) E(相) H(傌) R(俥) C(炮) P(兵)
//! - 黑方：k a e h r c p
//! - 也接受常见的 B/N 写法表示象、马
//! - 空格：数字 (1-9)
//!
//! 回合：`r`（或 `w`）红方，`b` 黑方；缺省为红方

use crate::board::Board;
use crate::types::{Move, Piece, Position, Side, FILES, RANKS};

/// FEN 解析后的状态
#[derive(Debug, Clone)]
pub struct FenState {
    pub board: Board,
    pub turn: Side,
}

/// 解析 FEN 字符串
pub fn parse_fen(fen: &str) -> Result<FenState, String> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    let board_str = parts
        .first()
        .ok_or_else(|| "Invalid FEN: empty string".to_string())?;

    let board = parse_board(board_str)?;
    let turn = match parts.get(1) {
        Some(turn_str) => turn_str
            .chars()
            .next()
            .and_then(Side::from_fen_char)
            .ok_or_else(|| format!("Invalid turn: {}", turn_str))?,
        None => Side::Red,
    };

    Ok(FenState { board, turn })
}

/// 解析棋盘字符串
fn parse_board(board_str: &str) -> Result<Board, String> {
    let rows: Vec<&str> = board_str.split('/').collect();
    if rows.len() != RANKS as usize {
        return Err(format!(
            "Invalid board: expected 10 rows, got {}",
            rows.len()
        ));
    }

    let mut pieces = Vec::with_capacity(32);

    for (rank, row_str) in rows.iter().enumerate() {
        let rank = rank as i8;
        let mut file: i8 = 0;

        for ch in row_str.chars() {
            if file >= FILES {
                return Err(format!("Rank {} has more than 9 files", rank));
            }

            if let Some(empty) = ch.to_digit(10) {
                if empty == 0 {
                    return Err(format!("Invalid empty count 0 in rank {}", rank));
                }
                file += empty as i8;
            } else {
                let piece = Piece::from_fen_char(ch)
                    .ok_or_else(|| format!("Invalid piece char: {}", ch))?;
                pieces.push((Position::new(file, rank), piece));
                file += 1;
            }
        }

        if file != FILES {
            return Err(format!("Rank {} has {} files, expected 9", rank, file));
        }
    }

    Ok(Board::from_pieces(pieces))
}

/// 从棋盘生成 FEN 字符串
pub fn pieces_to_fen(board: &Board, turn: Side) -> String {
    let mut rows = Vec::with_capacity(RANKS as usize);

    for rank in 0..RANKS {
        let mut row_str = String::new();
        let mut empty_count = 0;

        for file in 0..FILES {
            match board.at(Position::new(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        row_str.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row_str.push(piece.to_fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            row_str.push_str(&empty_count.to_string());
        }

        rows.push(row_str);
    }

    format!("{} {}", rows.join("/"), turn.to_fen_char())
}

/// 在 FEN 上执行走法，返回新的 FEN
///
/// 走法必须合法，否则返回错误
pub fn apply_move_to_fen(fen: &str, move_str: &str) -> Result<String, String> {
    let state = parse_fen(fen)?;
    let mv = Move::from_iccs_str(move_str)
        .ok_or_else(|| format!("Invalid move string: {}", move_str))?;

    let outcome = state
        .board
        .check_move(mv, state.turn)
        .map_err(|e| e.to_string())?;

    Ok(pieces_to_fen(&outcome.board, state.turn.opposite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions::START;
    use crate::types::PieceKind;

    #[test]
    fn test_parse_initial_fen() {
        let state = parse_fen(START).unwrap();

        assert_eq!(state.board.pieces().count(), 32);
        assert_eq!(state.turn, Side::Red);
        assert_eq!(state.board, Board::initial());
    }

    #[test]
    fn test_fen_roundtrip() {
        let fen = "3k5/4a4/9/9/2b6/9/9/4C4/4p4/3K1R3 b";
        let state = parse_fen(fen).unwrap();
        let regenerated = pieces_to_fen(&state.board, state.turn);
        // b 被规范化为 e
        assert_eq!(regenerated, "3k5/4a4/9/9/2e6/9/9/4C4/4p4/3K1R3 b");
        assert_eq!(parse_fen(&regenerated).unwrap().board, state.board);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_fen("").is_err());
        assert!(parse_fen("9/9/9 r").is_err());
        assert!(parse_fen("4k4/9/9/9/9/9/9/9/9/4K5 r").is_err());
        assert!(parse_fen("4k4/9/9/9/9/9/9/9/9/4X4 r").is_err());
        assert!(parse_fen("4k4/9/9/9/9/9/9/9/9/4K4 x").is_err());
    }

    #[test]
    fn test_turn_defaults_to_red() {
        let state = parse_fen("4k4/9/9/9/9/9/9/9/9/4K4").unwrap();
        assert_eq!(state.turn, Side::Red);
        let state = parse_fen("4k4/9/9/9/9/9/9/9/9/4K4 w - - 0 1").unwrap();
        assert_eq!(state.turn, Side::Red);
    }

    #[test]
    fn test_apply_move() {
        let new_fen = apply_move_to_fen(START, "h2e2").unwrap();
        let state = parse_fen(&new_fen).unwrap();

        assert_eq!(state.turn, Side::Black);
        assert_eq!(
            state.board.at(Position::new(4, 7)),
            Some(Piece::new(PieceKind::Cannon, Side::Red))
        );
        assert_eq!(state.board.at(Position::new(7, 7)), None);
    }

    #[test]
    fn test_apply_illegal_move() {
        // 黑方走子但轮到红方
        assert!(apply_move_to_fen(START, "h7e7").is_err());
        // 车被马挡住
        assert!(apply_move_to_fen(START, "a0a9").is_err());
        assert!(apply_move_to_fen(START, "zz").is_err());
    }
}

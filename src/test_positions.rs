//! 测试局面库
//!
//! 提供命名的 FEN 测试局面，方便测试和调试
//!
//! 命名规范:
//! - START: 初始局面
//! - MIDGAME_n: 中局
//! - *_CHECK / *_MATE: 将军与杀棋
//! - 其余为特殊规则局面

// =============================================================================
// 开局
// =============================================================================

/// 初始局面
pub const START: &str = "rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR r";

/// 红方第一步: 炮二平五
pub const CENTRAL_CANNON: &str = "rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RHEAKAEHR b";

// =============================================================================
// 中局
// =============================================================================

/// 双方各出动马炮
pub const MIDGAME_1: &str = "r1eakae1r/9/1ch4c1/p1p1p1p1p/9/2P6/P3P1P1P/1C2C1H2/9/RHEAKAE1R b";

/// 车炮对攻，子力较少
pub const MIDGAME_2: &str = "2eak4/4a4/4e4/p3p3p/2c6/6R2/P3P3P/4C4/9/3AKAE2 r";

// =============================================================================
// 将军与杀棋
// =============================================================================

/// 黑将在 e9 被红车沿中路将军，可以躲到 f9
pub const BACK_RANK_CHECK: &str = "4k4/9/9/9/9/4R4/9/9/9/3K5 b";

/// 双车加帅控制 d/e/f 三路，黑将被将死
pub const BACK_RANK_MATE: &str = "4k4/9/9/9/9/4RR3/9/9/9/3K5 b";

/// 红方一步杀：车 a4 平 d4
pub const MATE_IN_ONE: &str = "3k5/9/9/9/9/R8/8p/9/9/4K4 r";

/// 吃子局面：红车可以吃中路黑炮
pub const CAPTURE_CANNON: &str = "4k4/9/9/9/4c4/4R4/9/9/9/3K5 r";

// =============================================================================
// 特殊规则
// =============================================================================

/// 将帅之间只隔一匹黑马
pub const FLYING_GENERAL: &str = "4k4/9/9/9/4h4/9/9/9/9/4K4 b";

/// 黑车被红车牵制在中路
pub const PINNED_CHARIOT: &str = "4k4/9/4r4/9/9/9/9/4R4/9/3K5 b";

/// 黑方未被将军但无子可走（困毙）
pub const STALEMATE: &str = "3k5/R8/9/9/9/9/9/9/9/4K4 b";

/// 黑方没有将
pub const MISSING_GENERAL: &str = "r8/9/9/9/9/9/9/9/9/4K4 r";

/// 红方恰好有 3 个合法走法（帅的三个方向）
pub const THREE_MOVES: &str = "4k4/9/9/9/9/4p4/9/9/9/4K4 r";

/// 所有命名局面
pub const ALL: &[(&str, &str)] = &[
    ("START", START),
    ("CENTRAL_CANNON", CENTRAL_CANNON),
    ("MIDGAME_1", MIDGAME_1),
    ("MIDGAME_2", MIDGAME_2),
    ("BACK_RANK_CHECK", BACK_RANK_CHECK),
    ("BACK_RANK_MATE", BACK_RANK_MATE),
    ("MATE_IN_ONE", MATE_IN_ONE),
    ("CAPTURE_CANNON", CAPTURE_CANNON),
    ("FLYING_GENERAL", FLYING_GENERAL),
    ("PINNED_CHARIOT", PINNED_CHARIOT),
    ("STALEMATE", STALEMATE),
    ("MISSING_GENERAL", MISSING_GENERAL),
    ("THREE_MOVES", THREE_MOVES),
];

/// 按名称查找局面（不区分大小写）
pub fn by_name(name: &str) -> Option<&'static str> {
    ALL.iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, fen)| *fen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;

    #[test]
    fn test_all_positions_parse() {
        for (name, fen) in ALL {
            assert!(parse_fen(fen).is_ok(), "{} failed to parse", name);
        }
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("start"), Some(START));
        assert_eq!(by_name("Mate_In_One"), Some(MATE_IN_ONE));
        assert_eq!(by_name("nope"), None);
    }
}

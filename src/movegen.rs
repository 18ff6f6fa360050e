//! 伪合法走法生成
//!
//! 按棋子类型计算几何走法与阻挡规则，不考虑走后己方将帅是否被攻击。

use crate::board::Board;
use crate::types::{Piece, PieceKind, Position};

const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// 马的走法：(终点偏移, 马腿偏移)，马腿在长边方向上紧邻起点
const HORSE_JUMPS: [((i8, i8), (i8, i8)); 8] = [
    ((-2, -1), (-1, 0)),
    ((-2, 1), (-1, 0)),
    ((2, -1), (1, 0)),
    ((2, 1), (1, 0)),
    ((-1, -2), (0, -1)),
    ((1, -2), (0, -1)),
    ((-1, 2), (0, 1)),
    ((1, 2), (0, 1)),
];

impl Board {
    /// 获取某格棋子的所有伪合法目标位置，空格返回空列表
    pub fn pseudo_moves(&self, from: Position) -> Vec<Position> {
        match self.get(from) {
            Some(piece) => self.pseudo_moves_for(from, piece),
            None => Vec::new(),
        }
    }

    pub(crate) fn pseudo_moves_for(&self, from: Position, piece: Piece) -> Vec<Position> {
        match piece.kind {
            PieceKind::General => self.general_moves(from, piece),
            PieceKind::Advisor => self.advisor_moves(from, piece),
            PieceKind::Elephant => self.elephant_moves(from, piece),
            PieceKind::Horse => self.horse_moves(from, piece),
            PieceKind::Chariot => self.chariot_moves(from, piece),
            PieceKind::Cannon => self.cannon_moves(from, piece),
            PieceKind::Soldier => self.soldier_moves(from, piece),
        }
    }

    /// 目标格在棋盘内，且不是己方棋子
    #[inline]
    fn can_land(&self, piece: Piece, pos: Position) -> bool {
        if !pos.is_valid() {
            return false;
        }
        match self.get(pos) {
            None => true,
            Some(target) => target.side != piece.side,
        }
    }

    fn general_moves(&self, from: Position, piece: Piece) -> Vec<Position> {
        let mut moves = Vec::with_capacity(5);

        for (df, dr) in ORTHOGONAL {
            let to = from.offset(df, dr);
            if to.in_palace(piece.side) && self.can_land(piece, to) {
                moves.push(to);
            }
        }

        // 飞将：同一列且中间无子
        if let Some(enemy) = self.find_general(piece.side.opposite()) {
            if enemy.file == from.file && self.count_between(from, enemy) == 0 {
                moves.push(enemy);
            }
        }

        moves
    }

    fn advisor_moves(&self, from: Position, piece: Piece) -> Vec<Position> {
        DIAGONAL
            .iter()
            .map(|&(df, dr)| from.offset(df, dr))
            .filter(|to| to.in_palace(piece.side) && self.can_land(piece, *to))
            .collect()
    }

    fn elephant_moves(&self, from: Position, piece: Piece) -> Vec<Position> {
        let mut moves = Vec::with_capacity(4);

        for (df, dr) in DIAGONAL {
            let to = from.offset(2 * df, 2 * dr);
            // 象不能过河
            if !to.is_valid() || !to.on_own_half(piece.side) {
                continue;
            }
            // 塞象眼
            if self.is_occupied(from.offset(df, dr)) {
                continue;
            }
            if self.can_land(piece, to) {
                moves.push(to);
            }
        }

        moves
    }

    fn horse_moves(&self, from: Position, piece: Piece) -> Vec<Position> {
        let mut moves = Vec::with_capacity(8);

        for ((df, dr), (lf, lr)) in HORSE_JUMPS {
            let to = from.offset(df, dr);
            if !to.is_valid() {
                continue;
            }
            // 蹩马腿
            if self.is_occupied(from.offset(lf, lr)) {
                continue;
            }
            if self.can_land(piece, to) {
                moves.push(to);
            }
        }

        moves
    }

    fn chariot_moves(&self, from: Position, piece: Piece) -> Vec<Position> {
        let mut moves = Vec::with_capacity(17);

        for (df, dr) in ORTHOGONAL {
            let mut to = from.offset(df, dr);
            while to.is_valid() {
                match self.get(to) {
                    None => moves.push(to),
                    Some(target) => {
                        if target.side != piece.side {
                            moves.push(to);
                        }
                        break;
                    }
                }
                to = to.offset(df, dr);
            }
        }

        moves
    }

    fn cannon_moves(&self, from: Position, piece: Piece) -> Vec<Position> {
        let mut moves = Vec::with_capacity(17);

        for (df, dr) in ORTHOGONAL {
            let mut to = from.offset(df, dr);
            let mut found_screen = false;

            while to.is_valid() {
                match self.get(to) {
                    None => {
                        if !found_screen {
                            moves.push(to);
                        }
                    }
                    Some(target) => {
                        if !found_screen {
                            found_screen = true;
                        } else {
                            if target.side != piece.side {
                                moves.push(to);
                            }
                            break;
                        }
                    }
                }
                to = to.offset(df, dr);
            }
        }

        moves
    }

    fn soldier_moves(&self, from: Position, piece: Piece) -> Vec<Position> {
        let mut moves = Vec::with_capacity(3);

        let forward = from.offset(0, piece.side.forward());
        if self.can_land(piece, forward) {
            moves.push(forward);
        }

        // 过河后可以左右走
        if !from.on_own_half(piece.side) {
            for df in [-1, 1] {
                let sideways = from.offset(df, 0);
                if self.can_land(piece, sideways) {
                    moves.push(sideways);
                }
            }
        }

        moves
    }

    /// 同一直线上两点之间（不含端点）的棋子数，不共线返回 0
    pub fn count_between(&self, a: Position, b: Position) -> usize {
        let (df, dr) = match (b.file - a.file, b.rank - a.rank) {
            (0, 0) => return 0,
            (0, dr) => (0, dr.signum()),
            (df, 0) => (df.signum(), 0),
            _ => return 0,
        };

        let mut count = 0;
        let mut pos = a.offset(df, dr);
        while pos != b {
            if self.is_occupied(pos) {
                count += 1;
            }
            pos = pos.offset(df, dr);
        }
        count
    }
}

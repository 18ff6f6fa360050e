//! Minimax AI 策略

use super::{sort_and_truncate, AIConfig, AIStrategy, ScoredMove};
use crate::board::Board;
use crate::eval::evaluate;
use crate::rules::StalematePolicy;
use crate::types::{Move, Side};

/// 胜负分，远大于任何静态评估
pub const MATE_SCORE: i32 = 100_000;

const INFINITY: i32 = 1_000_000;

/// Minimax AI - 固定深度的 Negamax 搜索，带 Alpha-Beta 剪枝
///
/// 每个节点在棋盘副本上展开子局面，不需要撤销走法。
/// 走法按生成顺序搜索，不做吃子优先排序。
pub struct MinimaxAI {
    depth: u32,
    stalemate: StalematePolicy,
}

impl MinimaxAI {
    pub fn new(config: &AIConfig) -> Self {
        MinimaxAI {
            depth: config.depth.max(1),
            stalemate: config.stalemate,
        }
    }

    /// 无子可走时的分数（从走棋方视角）
    ///
    /// 被将死或没有将帅时判负，越早分出胜负分数绝对值越大
    fn terminal_score(&self, board: &Board, side: Side, ply: u32) -> i32 {
        let lost = board.find_general(side).is_none()
            || board.is_in_check(side)
            || self.stalemate == StalematePolicy::Loss;
        if lost {
            -(MATE_SCORE - ply as i32)
        } else {
            0
        }
    }

    /// Negamax 搜索（带 Alpha-Beta 剪枝）
    fn negamax(
        &self,
        board: &Board,
        side: Side,
        depth: u32,
        ply: u32,
        mut alpha: i32,
        beta: i32,
        nodes: &mut u64,
    ) -> i32 {
        *nodes += 1;

        if depth == 0 {
            return evaluate(board, side);
        }

        let moves = board.all_legal_moves(side);
        if moves.is_empty() {
            return self.terminal_score(board, side, ply);
        }

        let mut best = -INFINITY;
        for mv in moves {
            let (child, _) = board.with_move(mv);
            // 递归调用，取负值（因为对手视角相反）
            let score = -self.negamax(
                &child,
                side.opposite(),
                depth - 1,
                ply + 1,
                -beta,
                -alpha,
                nodes,
            );

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break; // Beta 剪枝
            }
        }
        best
    }

    /// 搜索根节点的一个走法
    fn search_root_move(&self, board: &Board, side: Side, mv: Move, alpha: i32, nodes: &mut u64) -> i32 {
        let (child, _) = board.with_move(mv);
        -self.negamax(
            &child,
            side.opposite(),
            self.depth - 1,
            1,
            -INFINITY,
            -alpha,
            nodes,
        )
    }
}

impl AIStrategy for MinimaxAI {
    /// 每个根走法使用完整窗口，得到精确分数
    fn select_moves(&self, board: &Board, side: Side, n: usize) -> Vec<ScoredMove> {
        let mut nodes = 0;
        let mut scored: Vec<ScoredMove> = board
            .all_legal_moves(side)
            .into_iter()
            .map(|mv| {
                let score = self.search_root_move(board, side, mv, -INFINITY, &mut nodes);
                log::trace!("minimax: {} -> {}", mv, score);
                ScoredMove { mv, score }
            })
            .collect();

        sort_and_truncate(&mut scored, n);
        log::debug!(
            "minimax: depth={} moves={} nodes={}",
            self.depth,
            scored.len(),
            nodes
        );
        scored
    }

    /// 根节点共享 alpha，只有严格更高的分数才替换当前最佳
    fn select_best_move(&self, board: &Board, side: Side) -> Option<Move> {
        let mut nodes = 0;
        let mut best: Option<(Move, i32)> = None;

        for mv in board.all_legal_moves(side) {
            let alpha = best.map_or(-INFINITY, |(_, s)| s);
            let score = self.search_root_move(board, side, mv, alpha, &mut nodes);
            log::trace!("minimax: {} -> {}", mv, score);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mv, score));
            }
        }

        if let Some((mv, score)) = best {
            log::debug!(
                "minimax: depth={} best={} score={} nodes={}",
                self.depth,
                mv,
                score,
                nodes
            );
        }
        best.map(|(mv, _)| mv)
    }
}

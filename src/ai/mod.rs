//! AI 策略模块
//!
//! 提供三种难度的电脑走子策略：随机、一层贪婪、Minimax（Alpha-Beta 剪枝）。
//! 所有策略都只读取调用方给出的棋盘快照，不在调用之间保留局面状态。

mod greedy;
mod minimax;
mod random;

pub use greedy::GreedyAI;
pub use minimax::{MinimaxAI, MATE_SCORE};
pub use random::RandomAI;

use crate::board::Board;
use crate::fen::parse_fen;
use crate::rules::StalematePolicy;
use crate::types::{Difficulty, Move, Side};
use serde::Serialize;

/// 可用策略名称
pub const AVAILABLE_STRATEGIES: &[&str] = &["random", "greedy", "minimax"];

/// 默认搜索深度
pub const DEFAULT_DEPTH: u32 = 3;

/// AI 配置
#[derive(Debug, Clone)]
pub struct AIConfig {
    /// 搜索深度（仅 minimax 使用）
    pub depth: u32,
    /// 随机种子
    pub seed: Option<u64>,
    /// 无子可走的判定
    pub stalemate: StalematePolicy,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            depth: DEFAULT_DEPTH,
            seed: None,
            stalemate: StalematePolicy::default(),
        }
    }
}

/// 走法评分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredMove {
    #[serde(rename = "move", serialize_with = "serialize_move")]
    pub mv: Move,
    pub score: i32,
}

fn serialize_move<S: serde::Serializer>(mv: &Move, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&mv.to_iccs_str())
}

/// AI 策略接口
pub trait AIStrategy: Send + Sync {
    /// 选择走法（返回按分数从高到低排序的前 n 个）
    fn select_moves(&self, board: &Board, side: Side, n: usize) -> Vec<ScoredMove>;

    /// 选择最佳走法，无合法走法时返回 None
    fn select_best_move(&self, board: &Board, side: Side) -> Option<Move> {
        self.select_moves(board, side, 1).first().map(|sm| sm.mv)
    }
}

/// 排序辅助函数（稳定排序，同分保持生成顺序）
pub(crate) fn sort_and_truncate(scored: &mut Vec<ScoredMove>, n: usize) {
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(n);
}

/// AI 引擎 - 统一的 AI 接口
pub struct AIEngine {
    strategy: Box<dyn AIStrategy>,
}

impl AIEngine {
    /// 创建随机 AI
    pub fn random(seed: Option<u64>) -> Self {
        AIEngine {
            strategy: Box::new(RandomAI::new(seed)),
        }
    }

    /// 创建贪婪 AI
    pub fn greedy() -> Self {
        AIEngine {
            strategy: Box::new(GreedyAI::new()),
        }
    }

    /// 创建 Minimax AI
    pub fn minimax(config: &AIConfig) -> Self {
        AIEngine {
            strategy: Box::new(MinimaxAI::new(config)),
        }
    }

    /// 按难度创建
    pub fn from_difficulty(difficulty: Difficulty, config: &AIConfig) -> Self {
        match difficulty {
            Difficulty::Easy => Self::random(config.seed),
            Difficulty::Medium => Self::greedy(),
            Difficulty::Hard => Self::minimax(config),
        }
    }

    /// 从策略名称或难度名称创建
    pub fn from_strategy(name: &str, config: &AIConfig) -> Result<Self, String> {
        match name.to_lowercase().as_str() {
            "random" => Ok(Self::random(config.seed)),
            "greedy" => Ok(Self::greedy()),
            "minimax" => Ok(Self::minimax(config)),
            other => Difficulty::from_name(other)
                .map(|d| Self::from_difficulty(d, config))
                .ok_or_else(|| {
                    format!(
                        "Unknown strategy: {}. Available: {}, easy, medium, hard",
                        name,
                        AVAILABLE_STRATEGIES.join(", ")
                    )
                }),
        }
    }

    pub fn select_moves(&self, board: &Board, side: Side, n: usize) -> Vec<ScoredMove> {
        self.strategy.select_moves(board, side, n)
    }

    pub fn select_best_move(&self, board: &Board, side: Side) -> Option<Move> {
        self.strategy.select_best_move(board, side)
    }

    /// 从 FEN 选择走法（返回带评分的走法字符串）
    pub fn select_moves_fen(&self, fen: &str, n: usize) -> Result<Vec<(String, i32)>, String> {
        let state = parse_fen(fen)?;
        let moves = self.strategy.select_moves(&state.board, state.turn, n);
        Ok(moves
            .into_iter()
            .map(|sm| (sm.mv.to_iccs_str(), sm.score))
            .collect())
    }

    /// 从 FEN 选择最佳走法
    pub fn select_best_move_fen(&self, fen: &str) -> Result<Option<String>, String> {
        let state = parse_fen(fen)?;
        Ok(self
            .strategy
            .select_best_move(&state.board, state.turn)
            .map(|m| m.to_iccs_str()))
    }
}

/// 按难度为某方选择走法（默认配置）
pub fn select_move(board: &Board, side: Side, difficulty: Difficulty) -> Option<Move> {
    AIEngine::from_difficulty(difficulty, &AIConfig::default()).select_best_move(board, side)
}

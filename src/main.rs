//! Xiangqi Engine CLI
//!
//! 命令行界面，用于测试规则与 AI
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 逐行交换 JSON

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::process;
use std::time::Instant;
use xiangqi_engine::notation::{format_history, to_notation};
use xiangqi_engine::test_positions;
use xiangqi_engine::{
    parse_fen, AIConfig, AIEngine, EvalDetail, FenState, GameState, GameStatus, Move,
    ScoredMove, Side, StalematePolicy, DEFAULT_DEPTH,
};

#[derive(Parser)]
#[command(name = "xiangqi-engine")]
#[command(about = "Xiangqi rules engine and computer opponent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 获取合法走法
    Moves {
        /// FEN 字符串或命名局面
        #[arg(long)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 选择最佳走法
    Best {
        /// FEN 字符串或命名局面
        #[arg(long)]
        fen: String,

        /// 难度或策略 (easy, medium, hard, random, greedy, minimax)
        #[arg(long, default_value = "hard")]
        difficulty: String,

        /// 搜索深度
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// 返回的走法数量
        #[arg(long, default_value = "1")]
        n: usize,

        /// 困毙判和（默认判负）
        #[arg(long)]
        stalemate_draw: bool,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 评估局面分数（走棋方视角）
    Score {
        /// FEN 字符串或命名局面
        #[arg(long)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 电脑自对弈
    Play {
        /// 红方难度
        #[arg(long, default_value = "medium")]
        red: String,

        /// 黑方难度
        #[arg(long, default_value = "hard")]
        black: String,

        /// 搜索深度
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,

        /// 最多走多少步
        #[arg(long, default_value = "200")]
        max_moves: usize,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// 困毙判和（默认判负）
        #[arg(long)]
        stalemate_draw: bool,

        /// 结束后输出 JSON 存档
        #[arg(long)]
        save: bool,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize)]
struct MovesResponse {
    moves: Vec<ScoredMove>,
    total: usize,
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    fen: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    depth: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    n: Option<usize>,
    #[serde(default, rename = "move")]
    mv: Option<String>,
}

#[derive(Serialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<ScoredMove>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    // eval 命令的字段
    #[serde(skip_serializing_if = "Option::is_none")]
    eval: Option<EvalDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Side>,
    // apply 命令的字段
    #[serde(skip_serializing_if = "Option::is_none")]
    fen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<GameStatus>,
}

impl ServerResponse {
    fn success_moves(moves: Vec<ScoredMove>, elapsed_ms: f64) -> Self {
        Self {
            ok: true,
            moves: Some(moves),
            elapsed_ms: Some(elapsed_ms),
            ..Default::default()
        }
    }

    fn success_legal_moves(legal_moves: Vec<String>) -> Self {
        Self {
            ok: true,
            legal_moves: Some(legal_moves),
            ..Default::default()
        }
    }

    fn success_eval(detail: EvalDetail, color: Side) -> Self {
        Self {
            ok: true,
            eval: Some(detail),
            color: Some(color),
            ..Default::default()
        }
    }

    fn success_apply(fen: String, notation: String, status: GameStatus) -> Self {
        Self {
            ok: true,
            fen: Some(fen),
            notation: Some(notation),
            status: Some(status),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn stalemate_policy(draw: bool) -> StalematePolicy {
    if draw {
        StalematePolicy::Draw
    } else {
        StalematePolicy::Loss
    }
}

fn exit_with(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    process::exit(1);
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.unwrap_or_else(|e| exit_with(e))
}

/// 接受 FEN 或命名局面（如 `start`、`mate_in_one`）
fn resolve_fen(fen: &str) -> &str {
    test_positions::by_name(fen).unwrap_or(fen)
}

fn legal_move_strings(state: &FenState) -> Vec<String> {
    state
        .board
        .all_legal_moves(state.turn)
        .into_iter()
        .map(|m| m.to_iccs_str())
        .collect()
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Moves { fen, json } => {
            let state = parse_fen(resolve_fen(&fen)).unwrap_or_else(|e| exit_with(e));
            let moves = legal_move_strings(&state);
            if json {
                println!("{}", to_json(&moves, true));
            } else {
                println!("Legal moves ({}):", moves.len());
                for mv in &moves {
                    println!("  {}", mv);
                }
            }
        }

        Commands::Best {
            fen,
            difficulty,
            depth,
            seed,
            n,
            stalemate_draw,
            json,
        } => {
            let config = AIConfig {
                depth,
                seed,
                stalemate: stalemate_policy(stalemate_draw),
            };
            let ai = AIEngine::from_strategy(&difficulty, &config).unwrap_or_else(|e| exit_with(e));
            let state = parse_fen(resolve_fen(&fen)).unwrap_or_else(|e| exit_with(e));

            let start = Instant::now();
            let moves = ai.select_moves(&state.board, state.turn, n);
            let elapsed = start.elapsed().as_secs_f64();

            if json {
                let response = MovesResponse {
                    total: moves.len(),
                    moves,
                };
                println!("{}", to_json(&response, true));
            } else if moves.is_empty() {
                println!("No legal moves for {}", state.turn);
            } else {
                println!("Best moves (difficulty={}):", difficulty);
                for sm in &moves {
                    println!("  {} (score: {})", sm.mv, sm.score);
                }
            }
            eprintln!("Stats: time={:.3}s", elapsed);
        }

        Commands::Score { fen, json } => {
            let state = parse_fen(resolve_fen(&fen)).unwrap_or_else(|e| exit_with(e));
            let detail = EvalDetail::compute(&state.board, state.turn);

            if json {
                println!("{}", to_json(&detail, true));
            } else {
                let side_cn = match state.turn {
                    Side::Red => "红方",
                    Side::Black => "黑方",
                };
                println!("局面评估 ({} 视角): {}", side_cn, detail.score);
                println!("  子力: {}", detail.material);
                if detail.checkmated {
                    println!("  已被将死");
                } else if detail.in_check {
                    println!("  正被将军");
                }
            }
        }

        Commands::Play {
            red,
            black,
            depth,
            max_moves,
            seed,
            stalemate_draw,
            save,
        } => {
            let config = AIConfig {
                depth,
                seed,
                stalemate: stalemate_policy(stalemate_draw),
            };
            let red_ai = AIEngine::from_strategy(&red, &config).unwrap_or_else(|e| exit_with(e));
            let black_ai =
                AIEngine::from_strategy(&black, &config).unwrap_or_else(|e| exit_with(e));

            let game = play(&red_ai, &black_ai, max_moves, config.stalemate);

            for line in format_history(game.history()) {
                println!("{}", line);
            }
            println!("{}", game.board());
            println!("Result: {:?} after {} moves", game.status(), game.history().len());

            if save {
                println!("{}", game.to_json().unwrap_or_else(|e| exit_with(e)));
            }
        }

        Commands::Server => {
            run_server();
        }
    }
}

/// 自对弈直到分出胜负或达到步数上限
fn play(red: &AIEngine, black: &AIEngine, max_moves: usize, policy: StalematePolicy) -> GameState {
    let mut game = GameState::new().with_policy(policy);

    while game.history().len() < max_moves {
        let engine = match game.side_to_move() {
            Side::Red => red,
            Side::Black => black,
        };
        let mv = match game.computer_move(engine) {
            Some(mv) => mv,
            None => break,
        };
        game = match game.apply_move(mv) {
            Ok(next) => next,
            Err(e) => exit_with(e),
        };
    }
    game
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        // 解析请求
        let response = match serde_json::from_str::<ServerRequest>(&line) {
            Ok(request) => match request.cmd.as_str() {
                "best" => handle_best_request(&request),
                "moves" => handle_moves_request(&request),
                "eval" => handle_eval_request(&request),
                "apply" => handle_apply_request(&request),
                "quit" => break,
                _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
            },
            Err(e) => ServerResponse::error(&format!("Invalid JSON: {}", e)),
        };

        // 返回响应
        println!("{}", to_json(&response, false));
        let _ = stdout.flush();
    }
}

/// 处理 best 命令
fn handle_best_request(request: &ServerRequest) -> ServerResponse {
    let difficulty = request.difficulty.as_deref().unwrap_or("hard");
    let n = request.n.unwrap_or(1);

    let config = AIConfig {
        depth: request.depth.unwrap_or(DEFAULT_DEPTH),
        seed: request.seed,
        ..Default::default()
    };

    let ai = match AIEngine::from_strategy(difficulty, &config) {
        Ok(ai) => ai,
        Err(e) => return ServerResponse::error(&format!("Invalid difficulty: {}", e)),
    };
    let state = match parse_fen(resolve_fen(&request.fen)) {
        Ok(s) => s,
        Err(e) => return ServerResponse::error(&format!("Invalid FEN: {}", e)),
    };

    let start = Instant::now();
    let moves = ai.select_moves(&state.board, state.turn, n);
    let elapsed = start.elapsed().as_secs_f64();
    ServerResponse::success_moves(moves, elapsed * 1000.0)
}

/// 处理 moves 命令
fn handle_moves_request(request: &ServerRequest) -> ServerResponse {
    match parse_fen(resolve_fen(&request.fen)) {
        Ok(state) => ServerResponse::success_legal_moves(legal_move_strings(&state)),
        Err(e) => ServerResponse::error(&format!("Invalid FEN: {}", e)),
    }
}

/// 处理 eval 命令（静态评估）
fn handle_eval_request(request: &ServerRequest) -> ServerResponse {
    match parse_fen(resolve_fen(&request.fen)) {
        Ok(state) => {
            ServerResponse::success_eval(EvalDetail::compute(&state.board, state.turn), state.turn)
        }
        Err(e) => ServerResponse::error(&format!("Invalid FEN: {}", e)),
    }
}

/// 处理 apply 命令（校验并执行人类走法）
fn handle_apply_request(request: &ServerRequest) -> ServerResponse {
    let state = match parse_fen(resolve_fen(&request.fen)) {
        Ok(s) => s,
        Err(e) => return ServerResponse::error(&format!("Invalid FEN: {}", e)),
    };
    let mv = match request.mv.as_deref().and_then(Move::from_iccs_str) {
        Some(mv) => mv,
        None => return ServerResponse::error("Missing or invalid move"),
    };

    let game = GameState::from_board(state.board, state.turn);
    match game.apply_move(mv) {
        Ok(next) => {
            let notation = next.last_move().map(to_notation).unwrap_or_default();
            ServerResponse::success_apply(
                next.board().to_fen(next.side_to_move()),
                notation,
                next.status(),
            )
        }
        Err(e) => ServerResponse::error(&format!("Illegal move: {}", e)),
    }
}

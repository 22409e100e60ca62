//! 终极井字棋 AI 引擎
//!
//! 包含:
//! - 深度受限的递归走法搜索
//! - 启发式权重评分（胜 +2、和 +1，子分支权重求和上传）
//! - 决策树缓存与外部棋盘同步
//! - 并列最优分支的随机挑选（可固定种子复现）

mod engine;
mod error;
mod search;

pub use engine::AiEngine;
pub use error::{AiError, Result};
pub use search::{AiConfig, DecisionNode, Difficulty, MoveSearcher};

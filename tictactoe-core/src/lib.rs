//! 终极井字棋核心规则库
//!
//! 包含:
//! - 标记、坐标、格子、棋盘等核心数据结构
//! - 连线胜负、和棋与活跃格子传导规则
//! - 走法合法性校验与应用（写时复制，原棋盘永不被修改）
//! - 对局状态与回合管理

mod board;
mod constants;
mod error;
mod mark;
mod moves;
mod rules;

pub use board::{Board, Cell, GameState};
pub use constants::*;
pub use error::{GameError, Result};
pub use mark::{Coord, Mark, Player};
pub use moves::Move;
pub use rules::{GameStatus, Rules};

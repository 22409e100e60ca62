//! 错误类型定义

use thiserror::Error;

/// 游戏规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 坐标越界
    #[error("Invalid coordinate: ({x}, {y})")]
    InvalidCoord { x: u8, y: u8 },

    /// 目标格子当前不可落子
    #[error("Cell ({x}, {y}) is not active")]
    CellNotActive { x: u8, y: u8 },

    /// 目标节点已被占用
    #[error("Node ({node_x}, {node_y}) in cell ({cell_x}, {cell_y}) is already occupied")]
    NodeOccupied {
        cell_x: u8,
        cell_y: u8,
        node_x: u8,
        node_y: u8,
    },

    /// 不是该玩家的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 对局已结束
    #[error("Game is already over")]
    GameOver,
}

/// 核心库操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;

//! 核心常量定义

/// 棋盘边长（格子数），格子内的节点布局同为此边长
pub const GRID_SIZE: usize = 3;

/// 格子总数
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// 节点总数（9 个格子，每格 9 个节点）
pub const NODE_COUNT: usize = CELL_COUNT * CELL_COUNT;

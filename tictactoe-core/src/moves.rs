//! 走法定义

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::mark::Coord;

/// 一步走法：先定位格子，再定位格子内的节点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 目标格子坐标
    pub cell: Coord,
    /// 格子内的节点坐标
    pub node: Coord,
}

impl Move {
    /// 创建新走法
    pub fn new(cell: Coord, node: Coord) -> Self {
        Self { cell, node }
    }

    /// 从外部输入的四元组坐标构造走法
    pub fn from_indices(cell_x: u8, cell_y: u8, node_x: u8, node_y: u8) -> Result<Self> {
        let cell = Coord::new(cell_x, cell_y).ok_or(GameError::InvalidCoord {
            x: cell_x,
            y: cell_y,
        })?;
        let node = Coord::new(node_x, node_y).ok_or(GameError::InvalidCoord {
            x: node_x,
            y: node_y,
        })?;
        Ok(Self { cell, node })
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cell{} node{}", self.cell, self.node)
    }
}

//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::GRID_SIZE;
use crate::error::{GameError, Result};
use crate::mark::{Coord, Mark, Player};
use crate::moves::Move;
use crate::rules::{GameStatus, Rules};

/// 格子：3×3 节点组成的小棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// 格子内的节点标记，按 [x][y] 索引
    pub nodes: [[Mark; GRID_SIZE]; GRID_SIZE],
    /// 格子归属（被某方赢下后固定，不再改变）
    pub owner: Mark,
    /// 下一手是否允许落在该格子
    pub active: bool,
    /// 格子是否已终结（被赢下或下满）
    pub completed: bool,
}

impl Cell {
    /// 创建空格子（开局时所有格子均可落子）
    pub fn new() -> Self {
        Self {
            nodes: [[Mark::Empty; GRID_SIZE]; GRID_SIZE],
            owner: Mark::Empty,
            active: true,
            completed: false,
        }
    }

    /// 获取指定节点的标记
    pub fn node(&self, pos: Coord) -> Mark {
        self.nodes[pos.x as usize][pos.y as usize]
    }

    /// 格子内节点是否全部被占用
    pub fn is_full(&self) -> bool {
        self.nodes
            .iter()
            .all(|column| column.iter().all(|node| !node.is_empty()))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

/// 大棋盘：3×3 格子
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 9 个格子，按 [x][y] 索引
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// 创建空棋盘
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| std::array::from_fn(|_| Cell::new())),
        }
    }

    /// 获取指定位置的格子
    pub fn cell(&self, pos: Coord) -> &Cell {
        &self.cells[pos.x as usize][pos.y as usize]
    }

    /// 获取指定位置的格子（可变引用）
    pub fn cell_mut(&mut self, pos: Coord) -> &mut Cell {
        &mut self.cells[pos.x as usize][pos.y as usize]
    }

    /// 获取当前所有活跃格子的坐标，x 外层、y 内层的固定次序
    pub fn active_cells(&self) -> Vec<Coord> {
        let mut cells = Vec::new();
        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                if self.cells[x][y].active {
                    cells.push(Coord::new_unchecked(x as u8, y as u8));
                }
            }
        }
        cells
    }

    /// 应用一步走法，返回落子后的新棋盘（写时复制，自身不被修改）
    ///
    /// 目标格子必须处于活跃状态且未终结，目标节点必须为空。
    pub fn apply(&self, mv: Move, player: Player) -> Result<Board> {
        for pos in [mv.cell, mv.node] {
            if !pos.is_valid() {
                return Err(GameError::InvalidCoord { x: pos.x, y: pos.y });
            }
        }

        let cell = self.cell(mv.cell);
        if !cell.active || cell.completed {
            return Err(GameError::CellNotActive {
                x: mv.cell.x,
                y: mv.cell.y,
            });
        }
        if !cell.node(mv.node).is_empty() {
            return Err(GameError::NodeOccupied {
                cell_x: mv.cell.x,
                cell_y: mv.cell.y,
                node_x: mv.node.x,
                node_y: mv.node.y,
            });
        }

        let mut next = self.clone();
        next.cell_mut(mv.cell).nodes[mv.node.x as usize][mv.node.y as usize] = player.mark();
        next.resolve_cell(mv.cell);
        next.refresh_active(mv.node);
        Ok(next)
    }

    /// 落子后重新判定格子是否终结
    fn resolve_cell(&mut self, pos: Coord) {
        let cell = self.cell_mut(pos);
        if cell.completed {
            return;
        }

        for player in [Player::Cross, Player::Naught] {
            if Rules::cell_win(cell, player) {
                cell.owner = player.mark();
                cell.completed = true;
                cell.active = false;
                return;
            }
        }

        // 下满且无人连线：终结但无归属
        if cell.is_full() {
            cell.completed = true;
            cell.active = false;
        }
    }

    /// 依据节点坐标整体重推所有格子的活跃标记
    ///
    /// 落子节点的坐标指向对方下一手的格子；该格子已终结时，
    /// 所有未终结的格子全部开放（自由落子规则）。
    fn refresh_active(&mut self, target: Coord) {
        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                self.cells[x][y].active = false;
            }
        }

        if !self.cell(target).completed {
            self.cell_mut(target).active = true;
            return;
        }

        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                if !self.cells[x][y].completed {
                    self.cells[x][y].active = true;
                }
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell_y in 0..GRID_SIZE {
            for node_y in 0..GRID_SIZE {
                let mut row = String::new();
                for cell_x in 0..GRID_SIZE {
                    for node_x in 0..GRID_SIZE {
                        row.push(self.cells[cell_x][cell_y].nodes[node_x][node_y].display_char());
                        if node_x + 1 < GRID_SIZE {
                            row.push(' ');
                        }
                    }
                    if cell_x + 1 < GRID_SIZE {
                        row.push_str(" | ");
                    }
                }
                writeln!(f, "{}", row)?;
            }
            if cell_y + 1 < GRID_SIZE {
                writeln!(f, "------+-------+------")?;
            }
        }
        Ok(())
    }
}

/// 完整对局状态（棋盘 + 当前行棋方）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// 棋盘
    pub board: Board,
    /// 当前行棋方
    pub current_turn: Player,
}

impl GameState {
    /// 创建初始状态（Cross 先手）
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_turn: Player::Cross,
        }
    }

    /// 当前行棋方落子，成功后切换行棋方并返回对局状态
    pub fn play(&mut self, mv: Move) -> Result<GameStatus> {
        if self.status() != GameStatus::InProgress {
            return Err(GameError::GameOver);
        }

        self.board = self.board.apply(mv, self.current_turn)?;
        self.switch_turn();
        Ok(self.status())
    }

    /// 以指定玩家身份落子，回合不符时拒绝
    pub fn play_as(&mut self, mv: Move, player: Player) -> Result<GameStatus> {
        if player != self.current_turn {
            return Err(GameError::NotYourTurn);
        }
        self.play(mv)
    }

    /// 切换行棋方
    pub fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    /// 获取当前对局状态
    pub fn status(&self) -> GameStatus {
        Rules::status(&self.board)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

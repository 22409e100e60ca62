//! 胜负判定与对局状态

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell};
use crate::constants::GRID_SIZE;
use crate::mark::{Coord, Mark, Player};

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 对局进行中
    InProgress,
    /// 某方获胜
    Won(Player),
    /// 和棋
    Drawn,
}

/// 规则判定器
pub struct Rules;

impl Rules {
    /// 检查 3×3 标记组上某一标记是否连成一线（3 行、3 列、2 条对角线）
    fn line_win(marks: &[[Mark; GRID_SIZE]; GRID_SIZE], mark: Mark) -> bool {
        for x in 0..GRID_SIZE {
            if (0..GRID_SIZE).all(|y| marks[x][y] == mark) {
                return true;
            }
        }

        for y in 0..GRID_SIZE {
            if (0..GRID_SIZE).all(|x| marks[x][y] == mark) {
                return true;
            }
        }

        if (0..GRID_SIZE).all(|i| marks[i][i] == mark) {
            return true;
        }

        (0..GRID_SIZE).all(|i| marks[i][GRID_SIZE - 1 - i] == mark)
    }

    /// 检查某方是否在格子内以节点连线获胜
    pub fn cell_win(cell: &Cell, player: Player) -> bool {
        Self::line_win(&cell.nodes, player.mark())
    }

    /// 检查某方是否以格子归属在大棋盘上连线获胜
    pub fn board_win(board: &Board, player: Player) -> bool {
        let owners: [[Mark; GRID_SIZE]; GRID_SIZE] = std::array::from_fn(|x| {
            std::array::from_fn(|y| board.cell(Coord::new_unchecked(x as u8, y as u8)).owner)
        });
        Self::line_win(&owners, player.mark())
    }

    /// 检查是否和棋：9 个格子全部终结且双方均未连线
    pub fn board_draw(board: &Board) -> bool {
        let mut completed = 0;
        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                if board.cell(Coord::new_unchecked(x as u8, y as u8)).completed {
                    completed += 1;
                }
            }
        }

        completed == GRID_SIZE * GRID_SIZE
            && !Self::board_win(board, Player::Cross)
            && !Self::board_win(board, Player::Naught)
    }

    /// 获取当前对局状态
    pub fn status(board: &Board) -> GameStatus {
        for player in [Player::Cross, Player::Naught] {
            if Self::board_win(board, player) {
                return GameStatus::Won(player);
            }
        }

        if Self::board_draw(board) {
            GameStatus::Drawn
        } else {
            GameStatus::InProgress
        }
    }
}

//! 走法搜索
//!
//! 递归枚举合法走法到限定深度，对终局走法打分并把子分支权重向上累加。

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tictactoe_core::{Board, Coord, Move, Player, Rules, GRID_SIZE};
use tracing::debug;

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// AI 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// 搜索深度上限（步数）
    pub max_depth: u8,
    /// 并列分支挑选所用的随机数种子，None 时随机播种
    pub seed: Option<u64>,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                max_depth: 3,
                seed: None,
            },
            Difficulty::Medium => Self {
                max_depth: 5,
                seed: None,
            },
            Difficulty::Hard => Self {
                max_depth: 6,
                seed: None,
            },
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// 搜索树节点
///
/// 记录产生该局面的走法、落子后的棋盘快照、累计权重，
/// 以及惰性展开的后续走法列表。
#[derive(Debug, Clone)]
pub struct DecisionNode {
    /// 落子后的棋盘快照（独立克隆，分支之间互不影响）
    pub board: Board,
    /// 累计权重，对生成该分支时的行棋方而言越高越好
    pub win_weight: i32,
    /// 从父局面到达该局面的走法
    pub mv: Move,
    /// 后续走法，未展开时为空
    pub future_moves: Vec<DecisionNode>,
}

impl DecisionNode {
    fn new(board: Board, mv: Move) -> Self {
        Self {
            board,
            win_weight: 0,
            mv,
            future_moves: Vec::new(),
        }
    }

    /// 根节点占位（没有产生它的走法）
    pub(crate) fn root(board: Board) -> Self {
        Self::new(board, Move::new(Coord::new_unchecked(0, 0), Coord::new_unchecked(0, 0)))
    }
}

/// 走法搜索器
pub struct MoveSearcher {
    max_depth: u8,
    nodes_generated: u64,
}

impl MoveSearcher {
    /// 创建指定深度上限的搜索器
    pub fn new(max_depth: u8) -> Self {
        Self {
            max_depth,
            nodes_generated: 0,
        }
    }

    /// 从指定局面为行棋方展开搜索树
    pub fn search(&mut self, board: &Board, player: Player) -> Vec<DecisionNode> {
        let start = Instant::now();
        let moves = self.expand(board, player, 0);
        debug!(
            "move search finished: player={:?}, nodes={}, elapsed={:?}",
            player,
            self.nodes_generated,
            start.elapsed()
        );
        moves
    }

    /// 递归展开：遍历每个活跃格子内的每个空节点
    ///
    /// 同层一旦出现制胜、致败或收和的走法即停止展开其余走法，
    /// 非终局走法以对方为行棋方继续递归，并把子分支权重求和累加。
    fn expand(&mut self, board: &Board, player: Player, depth: u8) -> Vec<DecisionNode> {
        let mut decisions = Vec::new();
        if depth >= self.max_depth {
            return decisions;
        }

        for cell in board.active_cells() {
            for node_x in 0..GRID_SIZE as u8 {
                for node_y in 0..GRID_SIZE as u8 {
                    let mv = Move::new(cell, Coord::new_unchecked(node_x, node_y));
                    let next = match board.apply(mv, player) {
                        Ok(next) => next,
                        // 节点已被占用
                        Err(_) => continue,
                    };

                    self.nodes_generated += 1;
                    let mut decision = DecisionNode::new(next, mv);

                    if Rules::board_win(&decision.board, player) {
                        // 制胜走法：加权并放弃本层其余走法
                        decision.win_weight += 2;
                        decisions.push(decision);
                        return decisions;
                    }
                    if Rules::board_win(&decision.board, player.opponent()) {
                        // 落子后对方已然连线，视为败着，同样中止本层展开
                        decisions.push(decision);
                        return decisions;
                    }
                    if Rules::board_draw(&decision.board) {
                        decision.win_weight += 1;
                        decisions.push(decision);
                        return decisions;
                    }

                    decision.future_moves =
                        self.expand(&decision.board, player.opponent(), depth + 1);
                    decision.win_weight += decision
                        .future_moves
                        .iter()
                        .map(|future| future.win_weight)
                        .sum::<i32>();
                    decisions.push(decision);
                }
            }
        }

        decisions
    }

    /// 获取已生成的搜索节点数
    pub fn nodes_generated(&self) -> u64 {
        self.nodes_generated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_core::Mark;

    /// 搜索树中最长的走法链长度
    fn chain_depth(nodes: &[DecisionNode]) -> usize {
        nodes
            .iter()
            .map(|node| 1 + chain_depth(&node.future_moves))
            .max()
            .unwrap_or(0)
    }

    /// 把所有格子置为不可落子
    fn deactivate_all(board: &mut Board) {
        for x in 0..GRID_SIZE as u8 {
            for y in 0..GRID_SIZE as u8 {
                board.cell_mut(Coord::new_unchecked(x, y)).active = false;
            }
        }
    }

    fn set_owner(board: &mut Board, x: u8, y: u8, mark: Mark) {
        let cell = board.cell_mut(Coord::new_unchecked(x, y));
        cell.owner = mark;
        cell.completed = true;
        cell.active = false;
    }

    #[test]
    fn test_difficulty_config() {
        let easy = AiConfig::from_difficulty(Difficulty::Easy);
        assert_eq!(easy.max_depth, 3);

        let medium = AiConfig::default();
        assert_eq!(medium.max_depth, 5);

        let hard = AiConfig::from_difficulty(Difficulty::Hard);
        assert_eq!(hard.max_depth, 6);
    }

    #[test]
    fn test_depth_bound() {
        let board = Board::new();

        let mut searcher = MoveSearcher::new(2);
        let moves = searcher.search(&board, Player::Cross);
        assert_eq!(chain_depth(&moves), 2);

        let mut searcher = MoveSearcher::new(0);
        assert!(searcher.search(&board, Player::Cross).is_empty());
    }

    #[test]
    fn test_iteration_order() {
        // 格子与节点均按 x 外层、y 内层的固定次序遍历
        let board = Board::new();
        let mut searcher = MoveSearcher::new(1);
        let moves = searcher.search(&board, Player::Cross);

        assert_eq!(moves.len(), tictactoe_core::NODE_COUNT);
        assert_eq!(moves[0].mv, Move::from_indices(0, 0, 0, 0).unwrap());
        assert_eq!(moves[1].mv, Move::from_indices(0, 0, 0, 1).unwrap());
        assert_eq!(moves[9].mv, Move::from_indices(0, 1, 0, 0).unwrap());
        assert_eq!(moves[80].mv, Move::from_indices(2, 2, 2, 2).unwrap());
        assert_eq!(searcher.nodes_generated(), 81);
    }

    #[test]
    fn test_search_from_empty_board() {
        let board = Board::new();
        let mut searcher = MoveSearcher::new(2);
        let moves = searcher.search(&board, Player::Cross);

        // 开局两层之内不存在终局走法，所有分支都会完整展开
        assert_eq!(moves.len(), 81);
        for decision in &moves {
            assert!(!decision.future_moves.is_empty());
            assert_eq!(decision.win_weight, 0);
        }
    }

    #[test]
    fn test_winning_move_aborts_siblings() {
        // Cross 已握有 (0,0)、(0,1) 两格，赢下 (0,2) 格即赢下整盘。
        // (0,2) 格中 (2,0) 节点为制胜点，遍历到它后本层停止展开。
        let mut board = Board::new();
        deactivate_all(&mut board);
        set_owner(&mut board, 0, 0, Mark::Cross);
        set_owner(&mut board, 0, 1, Mark::Cross);
        {
            let cell = board.cell_mut(Coord::new_unchecked(0, 2));
            cell.nodes[0][0] = Mark::Cross;
            cell.nodes[1][0] = Mark::Cross;
            cell.active = true;
        }

        let mut searcher = MoveSearcher::new(1);
        let moves = searcher.search(&board, Player::Cross);

        // 空节点共 7 个，制胜节点 (2,0) 是第 5 个被遍历到的
        assert_eq!(moves.len(), 5);
        let last = moves.last().unwrap();
        assert_eq!(last.mv, Move::from_indices(0, 2, 2, 0).unwrap());
        assert_eq!(last.win_weight, 2);
        assert!(last.future_moves.is_empty());
        for earlier in &moves[..4] {
            assert_eq!(earlier.win_weight, 0);
        }
    }

    #[test]
    fn test_opponent_line_aborts_siblings() {
        // 对方已连线的局面里，首个走法即判为败着并中止本层展开
        let mut board = Board::new();
        deactivate_all(&mut board);
        set_owner(&mut board, 0, 0, Mark::Naught);
        set_owner(&mut board, 1, 0, Mark::Naught);
        set_owner(&mut board, 2, 0, Mark::Naught);
        board.cell_mut(Coord::new_unchecked(1, 1)).active = true;

        let mut searcher = MoveSearcher::new(2);
        let moves = searcher.search(&board, Player::Cross);

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].win_weight, 0);
        assert!(moves[0].future_moves.is_empty());
    }

    #[test]
    fn test_draw_move_weight() {
        // 8 个格子已终结，最后一格补满后和棋，权重 +1。
        // 该布局无论作为格子归属还是节点标记都不含连线。
        let pattern = [
            [Mark::Cross, Mark::Naught, Mark::Cross],
            [Mark::Cross, Mark::Naught, Mark::Naught],
            [Mark::Naught, Mark::Cross, Mark::Cross],
        ];

        let mut board = Board::new();
        for x in 0..GRID_SIZE as u8 {
            for y in 0..GRID_SIZE as u8 {
                if (x, y) != (2, 2) {
                    set_owner(&mut board, x, y, pattern[x as usize][y as usize]);
                }
            }
        }
        {
            let cell = board.cell_mut(Coord::new_unchecked(2, 2));
            for x in 0..GRID_SIZE {
                for y in 0..GRID_SIZE {
                    cell.nodes[x][y] = pattern[x][y];
                }
            }
            cell.nodes[2][2] = Mark::Empty;
        }
        deactivate_all(&mut board);
        board.cell_mut(Coord::new_unchecked(2, 2)).active = true;

        let mut searcher = MoveSearcher::new(3);
        let moves = searcher.search(&board, Player::Cross);

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].win_weight, 1);
        assert!(moves[0].future_moves.is_empty());
    }

    #[test]
    fn test_child_weights_sum_into_parent() {
        // 权重直接对子分支求和上传，不随行棋方交替取反（启发式评分）
        let mut board = Board::new();
        deactivate_all(&mut board);
        set_owner(&mut board, 0, 0, Mark::Cross);
        set_owner(&mut board, 0, 1, Mark::Cross);
        {
            let cell = board.cell_mut(Coord::new_unchecked(0, 2));
            cell.nodes[0][0] = Mark::Cross;
            cell.nodes[1][0] = Mark::Cross;
        }
        board.cell_mut(Coord::new_unchecked(1, 1)).active = true;

        let mut searcher = MoveSearcher::new(2);
        let moves = searcher.search(&board, Player::Naught);

        assert_eq!(moves.len(), 9);
        for decision in &moves {
            let sum: i32 = decision
                .future_moves
                .iter()
                .map(|future| future.win_weight)
                .sum();
            assert_eq!(decision.win_weight, sum);
        }

        // Naught 落子把对方送入已终结格子时触发自由落子，
        // Cross 随即在 (0,2) 格找到制胜点，该子分支的 +2 原样计入
        assert_eq!(moves[0].mv, Move::from_indices(1, 1, 0, 0).unwrap());
        assert_eq!(moves[0].win_weight, 2);

        // 把对方锁在 (1,1) 格内则两层之内无终局，权重为 0
        let stay = moves
            .iter()
            .find(|decision| decision.mv.node == Coord::new_unchecked(1, 1))
            .unwrap();
        assert_eq!(stay.win_weight, 0);
    }
}

//! 决策缓存与对局同步
//!
//! 持有上一轮计算出的搜索树，把外部棋盘与缓存分支逐一比对后重定根，
//! 在前瞻耗尽时惰性扩展，并把选定的走法提交回外部对局状态。

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tictactoe_core::{Board, GameState, Move, Player};
use tracing::info;

use crate::error::{AiError, Result};
use crate::search::{AiConfig, DecisionNode, Difficulty, MoveSearcher};

/// AI 引擎
pub struct AiEngine {
    /// 引擎执子方
    player: Player,
    config: AiConfig,
    /// 当前搜索树的根，棋盘快照与最近一次提交的局面一致
    root: DecisionNode,
    rng: ChaCha8Rng,
    nodes_generated: u64,
}

impl AiEngine {
    /// 创建引擎，并以空棋盘为根为先手（Cross）预计算走法树
    pub fn new(player: Player, config: AiConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let board = Board::new();
        let mut searcher = MoveSearcher::new(config.max_depth);
        let mut root = DecisionNode::root(board.clone());
        root.future_moves = searcher.search(&board, Player::Cross);

        Self {
            player,
            config,
            root,
            rng,
            nodes_generated: searcher.nodes_generated(),
        }
    }

    /// 从难度创建引擎
    pub fn from_difficulty(player: Player, difficulty: Difficulty) -> Self {
        Self::new(player, AiConfig::from_difficulty(difficulty))
    }

    /// 轮到引擎行棋：与外部棋盘同步、选出最优分支并提交回外部状态
    ///
    /// 返回提交的走法；外部棋盘与缓存不符时返回 [`AiError::Desynchronized`]。
    pub fn take_turn(&mut self, live: &mut GameState) -> Result<Move> {
        let mut branch = self.locate(&live.board)?;

        // 前瞻耗尽时从该分支局面重新搜索
        if branch.future_moves.is_empty() {
            branch.future_moves = self.extend(&branch.board, self.player);
        }
        if branch.future_moves.is_empty() {
            return Err(AiError::NoMoves);
        }

        // 按权重降序排序，在并列最优的分支中等概率挑选
        branch
            .future_moves
            .sort_by(|a, b| b.win_weight.cmp(&a.win_weight));
        let best = branch.future_moves[0].win_weight;
        let tied = branch
            .future_moves
            .iter()
            .take_while(|decision| decision.win_weight == best)
            .count();
        let pick = self.rng.gen_range(0..tied);

        // 选中的分支成为新的根，其余兄弟分支随之丢弃
        self.root = branch.future_moves.swap_remove(pick);
        if self.root.future_moves.is_empty() {
            let board = self.root.board.clone();
            self.root.future_moves = self.extend(&board, self.player.opponent());
        }

        // 把提交的局面拷回外部状态并交还行棋权
        live.board = self.root.board.clone();
        live.current_turn = self.player.opponent();

        info!(
            "AI committed move: {} (weight={})",
            self.root.mv, self.root.win_weight
        );
        Ok(self.root.mv)
    }

    /// 在缓存中定位与外部棋盘一致的分支并取出
    ///
    /// 根局面本身仍与外部一致时（引擎执先手的第一步），根即匹配分支。
    fn locate(&mut self, live: &Board) -> Result<DecisionNode> {
        if self.root.board == *live {
            let placeholder = DecisionNode::root(live.clone());
            return Ok(std::mem::replace(&mut self.root, placeholder));
        }

        match self
            .root
            .future_moves
            .iter()
            .position(|branch| branch.board == *live)
        {
            Some(index) => Ok(self.root.future_moves.swap_remove(index)),
            None => Err(AiError::Desynchronized),
        }
    }

    /// 以配置的深度从指定局面重新搜索
    fn extend(&mut self, board: &Board, player: Player) -> Vec<DecisionNode> {
        let mut searcher = MoveSearcher::new(self.config.max_depth);
        let moves = searcher.search(board, player);
        self.nodes_generated += searcher.nodes_generated();
        moves
    }

    /// 引擎执子方
    pub fn player(&self) -> Player {
        self.player
    }

    /// 累计生成的搜索节点数
    pub fn nodes_generated(&self) -> u64 {
        self.nodes_generated
    }
}

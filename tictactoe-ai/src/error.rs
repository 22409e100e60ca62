//! AI 错误类型定义

use thiserror::Error;

/// AI 引擎错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// 外部棋盘与缓存的任何分支都不一致
    ///
    /// 说明出现了引擎从未计算过的外部走法，当前回合无法继续。
    #[error("Board state does not match any calculated branch")]
    Desynchronized,

    /// 当前局面已无合法走法
    #[error("No legal moves available")]
    NoMoves,
}

/// AI 操作结果类型
pub type Result<T> = std::result::Result<T, AiError>;

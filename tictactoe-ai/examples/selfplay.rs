//! AI 自对弈演示
//!
//! 运行方式:
//! ```bash
//! cargo run -p tictactoe-ai --example selfplay
//! ```

use tictactoe_ai::{AiConfig, AiEngine, Difficulty};
use tictactoe_core::{GameState, GameStatus, Player};

fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== AI 自对弈 ===\n");

    let mut cross = AiEngine::new(
        Player::Cross,
        AiConfig {
            seed: Some(1),
            ..AiConfig::from_difficulty(Difficulty::Easy)
        },
    );
    let mut naught = AiEngine::new(
        Player::Naught,
        AiConfig {
            seed: Some(2),
            ..AiConfig::from_difficulty(Difficulty::Easy)
        },
    );

    let mut game = GameState::new();
    let mut turn = 0u32;

    while game.status() == GameStatus::InProgress {
        let mv = match game.current_turn {
            Player::Cross => cross.take_turn(&mut game)?,
            Player::Naught => naught.take_turn(&mut game)?,
        };
        turn += 1;
        println!("第 {} 手 ({:?}): {}", turn, game.current_turn.opponent(), mv);
        println!("{}", game.board);
    }

    match game.status() {
        GameStatus::Won(player) => println!("胜者: {:?}", player),
        GameStatus::Drawn => println!("和棋"),
        GameStatus::InProgress => unreachable!(),
    }
    println!(
        "搜索节点: Cross={} Naught={}",
        cross.nodes_generated(),
        naught.nodes_generated()
    );

    Ok(())
}

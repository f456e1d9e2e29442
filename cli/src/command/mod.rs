pub mod bets;
pub mod create;
pub mod leaderboard;
pub mod points;
pub mod resolve;
pub mod watch;

use {crate::CliResult, async_trait::async_trait, esports_bets::Session};

pub struct CommandContext {
    pub session: Session,
}

#[async_trait]
pub trait RunCommand {
    async fn run(&self, context: &CommandContext) -> CliResult<()>;
}

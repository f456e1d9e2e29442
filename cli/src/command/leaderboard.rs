use {
    super::{CommandContext, RunCommand},
    crate::{render::leaderboard_table, CliError, CliResult},
    async_trait::async_trait,
    tracing::info,
};

pub struct LeaderboardCommand {
    limit: Option<usize>,
}

impl LeaderboardCommand {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }
}

#[async_trait]
impl RunCommand for LeaderboardCommand {
    async fn run(&self, context: &CommandContext) -> CliResult<()> {
        info!("Fetching leaderboard...");
        let state = context.session.leaderboard().await;

        if let Some(err) = state.error {
            return Err(CliError::Query(err));
        }

        let mut entries = state.data_or_default();
        if let Some(limit) = self.limit {
            entries.truncate(limit);
        }

        if entries.is_empty() {
            println!("No players have points yet.");
            return Ok(());
        }

        let account = context.session.account();
        println!("{}", leaderboard_table(&entries, account.as_deref()));
        Ok(())
    }
}

use {
    super::{CommandContext, RunCommand},
    crate::{
        render::{bet_table, leaderboard_table},
        CliResult,
    },
    async_trait::async_trait,
    std::time::Duration,
    tracing::{info, warn},
};

pub struct WatchCommand {
    interval: Duration,
}

impl WatchCommand {
    pub fn new(interval_secs: u64) -> Self {
        Self {
            interval: Duration::from_secs(interval_secs.max(1)),
        }
    }
}

#[async_trait]
impl RunCommand for WatchCommand {
    async fn run(&self, context: &CommandContext) -> CliResult<()> {
        info!("Watching bets every {:?}, press Ctrl-C to stop", self.interval);
        let session = &context.session;
        let account = session.account();

        loop {
            let bets = session.bets().await;
            let leaderboard = session.leaderboard().await;

            if let Some(err) = bets.error.as_ref().or(leaderboard.error.as_ref()) {
                warn!("Refresh failed: {}", err);
            }

            println!("{}", bet_table(&bets.data_or_default(), account.as_deref()));
            println!();
            println!(
                "{}",
                leaderboard_table(&leaderboard.data_or_default(), account.as_deref())
            );
            if let Some(account) = account.as_deref() {
                let points = session.player_points(Some(account)).await;
                println!("Your points: {}", points.data_or_default());
            }
            println!();

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => session.focus().await,
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        Ok(())
    }
}

use {
    super::{CommandContext, RunCommand},
    crate::{render::bet_table, CliError, CliResult},
    async_trait::async_trait,
    esports_bets_types::BetFilter,
    tracing::info,
};

pub struct BetsCommand {
    filter: BetFilter,
}

impl BetsCommand {
    pub fn new(resolved: Option<bool>, owner: Option<String>) -> Self {
        Self {
            filter: BetFilter { resolved, owner },
        }
    }
}

#[async_trait]
impl RunCommand for BetsCommand {
    async fn run(&self, context: &CommandContext) -> CliResult<()> {
        info!("Fetching bets...");
        let state = context.session.bets().await;

        if let Some(err) = state.error {
            return Err(CliError::Query(err));
        }

        let all = state.data_or_default();
        if all.is_empty() {
            println!("No bets yet. Be the first to create an esports prediction bet!");
            return Ok(());
        }

        let bets: Vec<_> = all
            .into_iter()
            .filter(|bet| self.filter.matches(bet))
            .collect();
        if bets.is_empty() {
            println!("No bets match the given filters.");
            return Ok(());
        }

        let account = context.session.account();
        println!("{}", bet_table(&bets, account.as_deref()));
        Ok(())
    }
}

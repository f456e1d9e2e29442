use {
    super::{CommandContext, RunCommand},
    crate::{render::bet_table, CliError, CliResult},
    async_trait::async_trait,
    dialoguer::Confirm,
    esports_bets_types::Bet,
    tracing::{info, warn},
};

pub struct ResolveCommand {
    bet_id: String,
    skip_confirmation: bool,
}

impl ResolveCommand {
    pub fn new(bet_id: String, skip_confirmation: bool) -> Self {
        Self {
            bet_id,
            skip_confirmation,
        }
    }
}

fn confirmation_prompt(bet: &Bet) -> String {
    format!(
        "Resolve bet {} ({} vs {} on {})? This will determine the winner.",
        bet.id, bet.team1, bet.team2, bet.game_date
    )
}

fn confirm(bet: &Bet) -> CliResult<bool> {
    Confirm::new()
        .with_prompt(confirmation_prompt(bet))
        .default(false)
        .interact()
        .map_err(|e| CliError::CommandExecution(format!("confirmation failed: {}", e)))
}

#[async_trait]
impl RunCommand for ResolveCommand {
    async fn run(&self, context: &CommandContext) -> CliResult<()> {
        let bets = context.session.bets().await.data_or_default();
        let bet = bets
            .iter()
            .find(|bet| bet.id == self.bet_id)
            .ok_or_else(|| CliError::CommandExecution(format!("bet {} not found", self.bet_id)))?;

        if bet.has_resolved {
            return Err(CliError::CommandExecution(format!(
                "bet {} is already resolved",
                self.bet_id
            )));
        }

        // The contract has the final say on who may resolve
        if let Some(account) = context.session.account() {
            if !bet.is_owned_by(&account) {
                warn!("Bet {} is owned by {}, not {}", bet.id, bet.owner, account);
            }
        }

        if !self.skip_confirmation && !confirm(bet)? {
            println!("Resolution cancelled.");
            return Ok(());
        }

        info!("Resolving bet {}: {} vs {}", bet.id, bet.team1, bet.team2);
        info!("Looking up the real result, this can take a couple of minutes...");

        let receipt = context.session.resolve_bet(&self.bet_id).await?;
        println!("Bet resolved in transaction {} ({})", receipt.hash, receipt.status);

        // The cache was invalidated by the resolution, so this is a fresh read
        let refreshed = context.session.bets().await.data_or_default();
        if let Some(bet) = refreshed.iter().find(|bet| bet.id == self.bet_id) {
            let account = context.session.account();
            println!("{}", bet_table(std::slice::from_ref(bet), account.as_deref()));
        }

        Ok(())
    }
}

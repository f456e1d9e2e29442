use {
    super::{CommandContext, RunCommand},
    crate::{CliError, CliResult},
    async_trait::async_trait,
    esports_bets_types::{CreateBetRequest, WinnerCode},
    tracing::info,
};

pub struct CreateCommand {
    request: CreateBetRequest,
}

impl CreateCommand {
    pub fn new(game_date: String, team1: String, team2: String, predicted_winner: String) -> Self {
        Self {
            request: CreateBetRequest {
                game_date: game_date.trim().to_string(),
                team1: team1.trim().to_string(),
                team2: team2.trim().to_string(),
                predicted_winner,
            },
        }
    }
}

#[async_trait]
impl RunCommand for CreateCommand {
    async fn run(&self, context: &CommandContext) -> CliResult<()> {
        self.request.validate().map_err(CliError::Validation)?;

        let prediction = WinnerCode::from(self.request.predicted_winner.as_str());
        info!("Creating bet...");
        info!("Game: {} vs {} on {}", self.request.team1, self.request.team2, self.request.game_date);
        info!(
            "Prediction: {}",
            prediction.label(&self.request.team1, &self.request.team2)
        );

        let receipt = context.session.create_bet(&self.request).await?;

        println!("Bet created in transaction {} ({})", receipt.hash, receipt.status);
        Ok(())
    }
}

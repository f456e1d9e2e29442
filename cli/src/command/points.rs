use {
    super::{CommandContext, RunCommand},
    crate::{CliError, CliResult},
    async_trait::async_trait,
    tracing::info,
};

pub struct PointsCommand {
    address: Option<String>,
}

impl PointsCommand {
    pub fn new(address: Option<String>) -> Self {
        Self { address }
    }
}

#[async_trait]
impl RunCommand for PointsCommand {
    async fn run(&self, context: &CommandContext) -> CliResult<()> {
        let address = self.address.clone().or_else(|| context.session.account());
        let Some(address) = address else {
            return Err(CliError::CommandExecution(
                "no address given and no account configured".to_string(),
            ));
        };

        info!("Fetching points of {}", address);
        let points = context.session.player_points(Some(&address)).await;

        println!("{}: {} points", address, points.data_or_default());
        Ok(())
    }
}

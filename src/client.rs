use {
    crate::{
        config::{resolve_endpoint, ClientConfig},
        confirm::{wait_for_receipt, ConfirmationPolicy},
        error::{ContractError, ContractResult, TransportError},
        normalize::{decode_bets, decode_leaderboard, decode_points},
        transport::{HttpTransport, Transport},
    },
    esports_bets_interface::ContractCall,
    esports_bets_types::{Bet, LeaderboardEntry, TransactionReceipt},
    serde_json::Value,
    std::{fmt, sync::Arc},
    tracing::{error, info, warn},
};

/// Typed access to the esports bets contract.
///
/// A client is bound to one account. Writes are attributed to that account;
/// switch accounts with [`ContractClient::with_account`] rather than sharing
/// one client between wallets.
#[derive(Clone)]
pub struct ContractClient {
    contract_address: String,
    account: Option<String>,
    endpoint: String,
    transport: Arc<dyn Transport>,
    confirmation: ConfirmationPolicy,
}

impl fmt::Debug for ContractClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractClient")
            .field("contract_address", &self.contract_address)
            .field("account", &self.account)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ContractClient {
    /// Connects over HTTP. `endpoint` may be a URL or a preset name and
    /// defaults to studionet.
    pub fn new(
        contract_address: impl Into<String>,
        account: Option<String>,
        endpoint: Option<&str>,
    ) -> ContractResult<Self> {
        let endpoint = resolve_endpoint(endpoint.unwrap_or("studionet"));
        let transport = HttpTransport::new(endpoint.clone())?;

        Ok(Self::with_transport(
            contract_address,
            account,
            endpoint,
            Arc::new(transport),
        ))
    }

    /// Returns `None` when the configuration has no contract address.
    pub fn from_config(config: &ClientConfig) -> ContractResult<Option<Self>> {
        let Some(contract_address) = config.contract_address.as_deref() else {
            return Ok(None);
        };

        Self::new(
            contract_address,
            config.account.clone(),
            Some(&config.endpoint_url()),
        )
        .map(Some)
    }

    pub fn with_transport(
        contract_address: impl Into<String>,
        account: Option<String>,
        endpoint: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            contract_address: contract_address.into(),
            account,
            endpoint: endpoint.into(),
            transport,
            confirmation: ConfirmationPolicy::default(),
        }
    }

    pub fn with_confirmation(mut self, confirmation: ConfirmationPolicy) -> Self {
        self.confirmation = confirmation;
        self
    }

    /// A new client for `account` on the same contract, endpoint and
    /// connection.
    pub fn with_account(&self, account: Option<String>) -> Self {
        Self {
            account,
            ..self.clone()
        }
    }

    /// Switches the account subsequent writes are sent from.
    pub fn update_account(&mut self, address: impl Into<String>) {
        self.account = Some(address.into());
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn get_bets(&self) -> ContractResult<Vec<Bet>> {
        let raw = self.read(&ContractCall::GetBets).await.map_err(|err| {
            error!("Error fetching bets: {}", err);
            ContractError::FetchBets(err)
        })?;

        Ok(decode_bets(&raw))
    }

    /// Points of `address`. Best effort: any failure reads as 0.
    pub async fn get_player_points(&self, address: Option<&str>) -> i64 {
        let Some(address) = address.filter(|address| !address.is_empty()) else {
            return 0;
        };

        let call = ContractCall::GetPlayerPoints {
            address: address.to_string(),
        };

        match self.read(&call).await {
            Ok(raw) => decode_points(&raw),
            Err(err) => {
                warn!("Error fetching player points: {}", err);
                0
            }
        }
    }

    pub async fn get_leaderboard(&self) -> ContractResult<Vec<LeaderboardEntry>> {
        let raw = self.read(&ContractCall::GetPoints).await.map_err(|err| {
            error!("Error fetching leaderboard: {}", err);
            ContractError::FetchLeaderboard(err)
        })?;

        Ok(decode_leaderboard(&raw))
    }

    pub async fn create_bet(
        &self,
        game_date: &str,
        team1: &str,
        team2: &str,
        predicted_winner: &str,
    ) -> ContractResult<TransactionReceipt> {
        let call = ContractCall::CreateBet {
            game_date: game_date.to_string(),
            team1: team1.to_string(),
            team2: team2.to_string(),
            predicted_winner: predicted_winner.to_string(),
        };

        self.submit(call).await.map_err(|err| {
            error!("Error creating bet: {}", err);
            ContractError::CreateBet(Box::new(err))
        })
    }

    /// Asks the contract to look up the real result of the game and score
    /// the bet.
    pub async fn resolve_bet(&self, bet_id: &str) -> ContractResult<TransactionReceipt> {
        let call = ContractCall::ResolveBet {
            bet_id: bet_id.to_string(),
        };

        self.submit(call).await.map_err(|err| {
            error!("Error resolving bet: {}", err);
            ContractError::ResolveBet(Box::new(err))
        })
    }

    async fn read(&self, call: &ContractCall) -> Result<Value, TransportError> {
        self.transport
            .read(&self.contract_address, self.account.as_deref(), call)
            .await
    }

    async fn submit(&self, call: ContractCall) -> ContractResult<TransactionReceipt> {
        let from = self
            .account
            .as_deref()
            .ok_or(TransportError::MissingAccount)?;

        info!("Submitting {} from {}", call.function_name(), from);

        let hash = self
            .transport
            .write(&self.contract_address, from, &call, 0)
            .await?;

        info!("Transaction submitted: {}", hash);

        wait_for_receipt(self.transport.as_ref(), &hash, &self.confirmation).await
    }
}

//! What a front-end consumes: one contract client per account, cached reads,
//! and mutations that refresh the cache once they succeed.

use {
    crate::{
        client::ContractClient,
        config::ClientConfig,
        confirm::ConfirmationPolicy,
        error::{ContractError, ContractResult},
        notify::{Notifier, TracingNotifier},
        query::{QueryClient, QueryKey, QueryOptions, QueryScope, QueryState, DEFAULT_STALE_TIME},
        transport::{HttpTransport, Transport},
    },
    esports_bets_types::{Bet, CreateBetRequest, LeaderboardEntry, TransactionReceipt},
    parking_lot::{Mutex, RwLock},
    std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        time::Duration,
    },
    tracing::{error, info},
};

const SETUP_TITLE: &str = "Setup Required";
const SETUP_DESCRIPTION: &str =
    "Contract address not configured. Please set CONTRACT_ADDRESS in your .env file.";

/// Hands out the contract client for the current account.
///
/// The client is rebuilt whenever the account changes, so a client is never
/// reconfigured while a write may be using it.
pub struct ContractProvider {
    config: RwLock<ClientConfig>,
    endpoint: String,
    transport: Arc<dyn Transport>,
    confirmation: ConfirmationPolicy,
    current: Mutex<Option<Arc<ContractClient>>>,
    warned: AtomicBool,
    notifier: Arc<dyn Notifier>,
}

impl ContractProvider {
    pub fn new(config: ClientConfig, notifier: Arc<dyn Notifier>) -> ContractResult<Self> {
        let transport = HttpTransport::new(config.endpoint_url())?;
        Ok(Self::with_transport(config, Arc::new(transport), notifier))
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            endpoint: config.endpoint_url(),
            config: RwLock::new(config),
            transport,
            confirmation: ConfirmationPolicy::default(),
            current: Mutex::new(None),
            warned: AtomicBool::new(false),
            notifier,
        }
    }

    pub fn with_confirmation(mut self, confirmation: ConfirmationPolicy) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub fn account(&self) -> Option<String> {
        self.config.read().account.clone()
    }

    /// Takes effect on the next call to [`ContractProvider::contract`].
    pub fn set_account(&self, account: Option<String>) {
        let mut config = self.config.write();
        *config = config.clone().with_account(account);
    }

    /// `None` when no contract address is configured; the setup warning is
    /// only raised the first time.
    pub fn contract(&self) -> Option<Arc<ContractClient>> {
        let config = self.config.read().clone();

        let Some(contract_address) = config.contract_address else {
            if !self.warned.swap(true, Ordering::SeqCst) {
                self.notifier.config_error(SETUP_TITLE, SETUP_DESCRIPTION);
            }
            return None;
        };

        let mut current = self.current.lock();

        if let Some(client) = current.as_ref().filter(|client| {
            client.contract_address() == contract_address
                && client.account() == config.account.as_deref()
        }) {
            return Some(Arc::clone(client));
        }

        let client = Arc::new(
            ContractClient::with_transport(
                contract_address,
                config.account,
                self.endpoint.clone(),
                Arc::clone(&self.transport),
            )
            .with_confirmation(self.confirmation.clone()),
        );
        *current = Some(Arc::clone(&client));

        Some(client)
    }
}

/// Progress of one kind of mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationState {
    pub in_flight: bool,
    /// What the mutation is working on, when it has a target
    pub target: Option<String>,
    pub error: Option<String>,
}

/// Marks a mutation as running until dropped.
struct InFlight<'a> {
    state: &'a Mutex<MutationState>,
}

impl<'a> InFlight<'a> {
    fn start(state: &'a Mutex<MutationState>, target: Option<String>) -> Self {
        let mut current = state.lock();
        current.in_flight = true;
        current.target = target;
        current.error = None;
        Self { state }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut current = self.state.lock();
        current.in_flight = false;
        current.target = None;
    }
}

pub struct Session {
    provider: ContractProvider,
    queries: QueryClient,
    notifier: Arc<dyn Notifier>,
    stale_time: Duration,
    creating: Mutex<MutationState>,
    resolving: Mutex<MutationState>,
}

impl Session {
    pub fn new(provider: ContractProvider, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            provider,
            queries: QueryClient::new(),
            notifier,
            stale_time: DEFAULT_STALE_TIME,
            creating: Mutex::new(MutationState::default()),
            resolving: Mutex::new(MutationState::default()),
        }
    }

    /// HTTP session that reports through the log.
    pub fn from_config(config: ClientConfig) -> ContractResult<Self> {
        let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
        let provider = ContractProvider::new(config, Arc::clone(&notifier))?;
        Ok(Self::new(provider, notifier))
    }

    pub fn provider(&self) -> &ContractProvider {
        &self.provider
    }

    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    pub fn contract(&self) -> Option<Arc<ContractClient>> {
        self.provider.contract()
    }

    pub fn account(&self) -> Option<String> {
        self.provider.account()
    }

    pub fn set_account(&self, account: Option<String>) {
        self.provider.set_account(account);
    }

    fn options(&self, enabled: bool) -> QueryOptions {
        QueryOptions {
            enabled,
            stale_time: self.stale_time,
        }
    }

    pub async fn bets(&self) -> QueryState<Vec<Bet>> {
        let contract = self.contract();
        let options = self.options(contract.is_some());

        self.queries
            .fetch(QueryKey::Bets, options, || async move {
                match contract {
                    Some(contract) => contract.get_bets().await.map_err(|e| e.to_string()),
                    None => Ok(vec![]),
                }
            })
            .await
    }

    pub async fn player_points(&self, address: Option<&str>) -> QueryState<i64> {
        let address = address
            .filter(|address| !address.is_empty())
            .map(str::to_string);
        let contract = self.contract();
        let options = self.options(contract.is_some() && address.is_some());
        let key = QueryKey::PlayerPoints(address.clone());

        self.queries
            .fetch(key, options, || async move {
                match contract {
                    Some(contract) => Ok(contract.get_player_points(address.as_deref()).await),
                    None => Ok(0),
                }
            })
            .await
    }

    pub async fn leaderboard(&self) -> QueryState<Vec<LeaderboardEntry>> {
        let contract = self.contract();
        let options = self.options(contract.is_some());

        self.queries
            .fetch(QueryKey::Leaderboard, options, || async move {
                match contract {
                    Some(contract) => contract.get_leaderboard().await.map_err(|e| e.to_string()),
                    None => Ok(vec![]),
                }
            })
            .await
    }

    /// The front-end regained focus: refetch whatever went stale.
    pub async fn focus(&self) {
        for key in self.queries.stale_keys(self.stale_time).await {
            match key {
                QueryKey::Bets => {
                    self.bets().await;
                }
                QueryKey::Leaderboard => {
                    self.leaderboard().await;
                }
                QueryKey::PlayerPoints(address) => {
                    self.player_points(address.as_deref()).await;
                }
            }
        }
    }

    pub async fn create_bet(&self, request: &CreateBetRequest) -> ContractResult<TransactionReceipt> {
        let outcome = match self.writable_contract("create a bet") {
            Ok(contract) => {
                let _in_flight = InFlight::start(&self.creating, None);
                let outcome = contract
                    .create_bet(
                        &request.game_date,
                        &request.team1,
                        &request.team2,
                        &request.predicted_winner,
                    )
                    .await;
                if outcome.is_ok() {
                    self.invalidate_all().await;
                }
                outcome
            }
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(receipt) => {
                info!("Bet created in transaction {}", receipt.hash);
                self.notifier.success(
                    "Bet created successfully!",
                    "Your prediction has been recorded on the blockchain.",
                );
            }
            Err(err) => {
                error!("Error creating bet: {}", err.full_message());
                self.creating.lock().error = Some(err.to_string());
                self.notifier.error("Failed to create bet", &err.full_message());
            }
        }

        outcome
    }

    pub async fn resolve_bet(&self, bet_id: &str) -> ContractResult<TransactionReceipt> {
        let outcome = match self.writable_contract("resolve a bet") {
            Ok(contract) => {
                let _in_flight = InFlight::start(&self.resolving, Some(bet_id.to_string()));
                let outcome = contract.resolve_bet(bet_id).await;
                if outcome.is_ok() {
                    self.invalidate_all().await;
                }
                outcome
            }
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(receipt) => {
                info!("Bet {} resolved in transaction {}", bet_id, receipt.hash);
                self.notifier
                    .success("Bet resolved successfully!", "The winner has been determined.");
            }
            Err(err) => {
                error!("Error resolving bet: {}", err.full_message());
                self.resolving.lock().error = Some(err.to_string());
                self.notifier.error("Failed to resolve bet", &err.full_message());
            }
        }

        outcome
    }

    /// Checked before anything is sent.
    fn writable_contract(&self, action: &'static str) -> ContractResult<Arc<ContractClient>> {
        let contract = self.contract().ok_or(ContractError::NotConfigured)?;
        if contract.account().is_none() {
            return Err(ContractError::WalletNotConnected { action });
        }
        Ok(contract)
    }

    async fn invalidate_all(&self) {
        self.queries.invalidate(QueryScope::Bets).await;
        self.queries.invalidate(QueryScope::PlayerPoints).await;
        self.queries.invalidate(QueryScope::Leaderboard).await;
    }

    pub fn is_creating(&self) -> bool {
        self.creating.lock().in_flight
    }

    pub fn is_resolving(&self) -> bool {
        self.resolving.lock().in_flight
    }

    /// Bet currently being resolved, so only its control shows progress.
    ///
    /// Tracks the most recently started resolution only. When resolutions
    /// overlap, the first one to finish clears it while the others are still
    /// running.
    pub fn resolving_bet_id(&self) -> Option<String> {
        self.resolving.lock().target.clone()
    }

    pub fn create_state(&self) -> MutationState {
        self.creating.lock().clone()
    }

    pub fn resolve_state(&self) -> MutationState {
        self.resolving.lock().clone()
    }
}

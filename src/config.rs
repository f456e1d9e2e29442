use std::{env, time::Duration};

pub const STUDIONET: &str = "https://studio.genlayer.com/api";
pub const LOCALNET: &str = "http://127.0.0.1:4000/api";

pub const CONTRACT_ADDRESS_VAR: &str = "CONTRACT_ADDRESS";
pub const RPC_URL_VAR: &str = "GENLAYER_RPC_URL";
pub const ACCOUNT_VAR: &str = "ACCOUNT_ADDRESS";

/// Timeout applied to every HTTP request made to the endpoint
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the contract.
///
/// Only the contract address is required. Without an account the client can
/// still read, but every write is refused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub contract_address: Option<String>,
    /// Endpoint URL or preset (studionet, localnet)
    pub endpoint: Option<String>,
    pub account: Option<String>,
}

impl ClientConfig {
    /// Reads the settings from the process environment. Blank values count
    /// as unset.
    pub fn from_env() -> Self {
        Self {
            contract_address: non_empty_var(CONTRACT_ADDRESS_VAR),
            endpoint: non_empty_var(RPC_URL_VAR),
            account: non_empty_var(ACCOUNT_VAR),
        }
    }

    pub fn endpoint_url(&self) -> String {
        resolve_endpoint(self.endpoint.as_deref().unwrap_or("studionet"))
    }

    pub fn with_account(mut self, account: Option<String>) -> Self {
        self.account = account.filter(|account| !account.trim().is_empty());
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn resolve_endpoint(url: &str) -> String {
    match url {
        "studionet" | "studio" | "s" => STUDIONET.to_string(),
        "localnet" | "localhost" | "l" => LOCALNET.to_string(),
        custom => custom.to_string(),
    }
}

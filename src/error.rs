use {esports_bets_types::TransactionStatus, thiserror::Error};

/// Failures talking to the RPC endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("no account configured to sign transactions")]
    MissingAccount,
}

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Contract not configured. Please set CONTRACT_ADDRESS in your .env file.")]
    NotConfigured,

    #[error("Wallet not connected. Please connect your wallet to {action}.")]
    WalletNotConnected { action: &'static str },

    #[error("Failed to fetch bets from contract")]
    FetchBets(#[source] TransportError),

    #[error("Failed to fetch leaderboard from contract")]
    FetchLeaderboard(#[source] TransportError),

    #[error("Failed to create bet")]
    CreateBet(#[source] Box<ContractError>),

    #[error("Failed to resolve bet")]
    ResolveBet(#[source] Box<ContractError>),

    #[error("transaction {hash} did not reach {target} after {attempts} attempts (last status: {last_status})")]
    ConfirmationTimeout {
        hash: String,
        target: TransactionStatus,
        attempts: u32,
        last_status: String,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type ContractResult<T> = Result<T, ContractError>;

impl ContractError {
    /// The message followed by every underlying cause, `: `-separated.
    pub fn full_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_message_walks_the_cause_chain() {
        let err = ContractError::CreateBet(Box::new(ContractError::Transport(
            TransportError::Rpc {
                code: -32000,
                message: "execution reverted".to_string(),
            },
        )));

        assert_eq!(err.to_string(), "Failed to create bet");
        assert_eq!(
            err.full_message(),
            "Failed to create bet: RPC error -32000: execution reverted"
        );
    }

    #[test]
    fn test_wallet_message_names_the_action() {
        let err = ContractError::WalletNotConnected {
            action: "create a bet",
        };
        assert_eq!(
            err.to_string(),
            "Wallet not connected. Please connect your wallet to create a bet."
        );
    }
}

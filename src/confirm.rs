use {
    crate::{
        error::{ContractError, ContractResult},
        transport::Transport,
    },
    esports_bets_types::{TransactionReceipt, TransactionStatus},
    std::time::Duration,
    tracing::{debug, info},
};

pub const DEFAULT_RETRIES: u32 = 24;
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// How long to wait for a submitted transaction, and for which status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub status: TransactionStatus,
    /// Number of times the endpoint is polled
    pub retries: u32,
    /// Fixed pause between two polls
    pub interval: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            status: TransactionStatus::Accepted,
            retries: DEFAULT_RETRIES,
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Polls `hash` until it satisfies the policy status.
///
/// Transport errors end the wait immediately. Running out of attempts is
/// reported as [`ContractError::ConfirmationTimeout`].
pub async fn wait_for_receipt(
    transport: &dyn Transport,
    hash: &str,
    policy: &ConfirmationPolicy,
) -> ContractResult<TransactionReceipt> {
    let mut last_status: Option<TransactionStatus> = None;

    for attempt in 1..=policy.retries {
        match transport.transaction(hash).await? {
            Some(mut receipt) if receipt.status.satisfies(&policy.status) => {
                if receipt.hash.is_empty() {
                    receipt.hash = hash.to_string();
                }
                info!(
                    "Transaction {} reached {} after {} attempt(s)",
                    hash, receipt.status, attempt
                );
                return Ok(receipt);
            }
            Some(receipt) => {
                debug!(
                    "Transaction {} is {} ({}/{})",
                    hash, receipt.status, attempt, policy.retries
                );
                last_status = Some(receipt.status);
            }
            None => debug!(
                "Transaction {} not known yet ({}/{})",
                hash, attempt, policy.retries
            ),
        }

        if attempt < policy.retries {
            tokio::time::sleep(policy.interval).await;
        }
    }

    Err(ContractError::ConfirmationTimeout {
        hash: hash.to_string(),
        target: policy.status.clone(),
        attempts: policy.retries,
        last_status: last_status
            .map(|status| status.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    })
}

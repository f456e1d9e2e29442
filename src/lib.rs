//! Client for the esports prediction-betting contract.
//!
//! [`ContractClient`] talks to the contract, [`Session`] adds the per-account
//! client selection, read caching and mutation tracking a front-end needs.

pub mod client;
pub mod config;
pub mod confirm;
pub mod error;
pub mod normalize;
pub mod notify;
pub mod query;
pub mod session;
pub mod transport;
pub mod utils;

pub use {
    client::ContractClient,
    config::ClientConfig,
    confirm::{wait_for_receipt, ConfirmationPolicy},
    error::{ContractError, ContractResult, TransportError, TransportResult},
    esports_bets_interface as interface,
    esports_bets_types as types,
    notify::{Notifier, TracingNotifier},
    query::{QueryClient, QueryKey, QueryScope, QueryState, QueryStatus},
    session::{ContractProvider, MutationState, Session},
    transport::{HttpTransport, Transport},
};

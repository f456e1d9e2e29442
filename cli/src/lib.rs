mod command;
pub mod render;

pub use command::*;
use {
    clap::{Parser, Subcommand},
    esports_bets::{ClientConfig, ContractError, Session},
    esports_bets_types::ValidationError,
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    name = "Esports Bets CLI",
    about = "CLI for esports prediction bets"
)]
pub struct Args {
    /// RPC endpoint URL or preset (studionet, localnet)
    #[arg(short = 'u', long, global = true, env = "GENLAYER_RPC_URL")]
    pub url: Option<String>,

    /// Address of the esports bets contract
    #[arg(short = 'c', long, global = true, env = "CONTRACT_ADDRESS")]
    pub contract: Option<String>,

    /// Account transactions are sent from
    #[arg(short = 'a', long, global = true, env = "ACCOUNT_ADDRESS")]
    pub account: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List bets
    Bets {
        /// Only show resolved bets
        #[arg(long, conflicts_with = "pending")]
        resolved: bool,

        /// Only show bets waiting for a result
        #[arg(long)]
        pending: bool,

        /// Only show bets created by this address
        #[arg(long)]
        owner: Option<String>,
    },

    /// Show the points of a player (defaults to the active account)
    Points { address: Option<String> },

    /// Show players ranked by points
    Leaderboard {
        /// Number of players to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Record a new prediction
    Create {
        /// Date of the game
        #[arg(long)]
        date: String,

        /// First team
        #[arg(long)]
        team1: String,

        /// Second team
        #[arg(long)]
        team2: String,

        /// Predicted winner: 1 (first team), 2 (second team) or 0 (draw)
        #[arg(long, value_parser = ["1", "2", "0"])]
        winner: String,
    },

    /// Resolve one of your pending bets
    Resolve {
        /// The bet id
        bet_id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Keep the bets and the leaderboard on screen, refreshing periodically
    Watch {
        /// Seconds between refreshes
        #[arg(long, default_value_t = 10)]
        interval: u64,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{}", .0.full_message())]
    Contract(#[from] ContractError),

    #[error("invalid bet: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error("query failed: {0}")]
    Query(String),

    #[error("command execution error: {0}")]
    CommandExecution(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type CliResult<T> = Result<T, CliError>;

/// Command line flags take precedence over the environment.
pub fn build_config(args: &Args) -> ClientConfig {
    let env = ClientConfig::from_env();

    ClientConfig {
        contract_address: non_blank(&args.contract).or(env.contract_address),
        endpoint: non_blank(&args.url).or(env.endpoint),
        account: None,
    }
    .with_account(non_blank(&args.account).or(env.account))
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub async fn run(args: Args) -> CliResult<()> {
    let config = build_config(&args);
    let session = Session::from_config(config)?;

    // Nothing can work without a contract; the session already warned
    if session.contract().is_none() {
        return Err(ContractError::NotConfigured.into());
    }

    let context = CommandContext { session };

    match args.command {
        Command::Bets {
            resolved,
            pending,
            owner,
        } => {
            let status = match (resolved, pending) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            bets::BetsCommand::new(status, owner).run(&context).await?;
        }
        Command::Points { address } => {
            points::PointsCommand::new(address).run(&context).await?;
        }
        Command::Leaderboard { limit } => {
            leaderboard::LeaderboardCommand::new(limit)
                .run(&context)
                .await?;
        }
        Command::Create {
            date,
            team1,
            team2,
            winner,
        } => {
            create::CreateCommand::new(date, team1, team2, winner)
                .run(&context)
                .await?;
        }
        Command::Resolve { bet_id, yes } => {
            resolve::ResolveCommand::new(bet_id, yes)
                .run(&context)
                .await?;
        }
        Command::Watch { interval } => {
            watch::WatchCommand::new(interval).run(&context).await?;
        }
    }

    Ok(())
}

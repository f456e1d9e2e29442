use serde_json::{json, Value};

/// Functions exposed by the esports bets contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    /// All bets, keyed by owner address and then by bet id
    GetBets,
    /// Points accumulated by a single player
    GetPlayerPoints { address: String },
    /// Points of every player, keyed by address
    GetPoints,
    /// Records a new prediction owned by the sender
    CreateBet {
        game_date: String,
        team1: String,
        team2: String,
        predicted_winner: String,
    },
    /// Looks up the real result of a game and scores the bet
    ResolveBet { bet_id: String },
}

impl ContractCall {
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::GetBets => "get_bets",
            Self::GetPlayerPoints { .. } => "get_player_points",
            Self::GetPoints => "get_points",
            Self::CreateBet { .. } => "create_bet",
            Self::ResolveBet { .. } => "resolve_bet",
        }
    }

    /// Positional arguments, in the order the contract declares them.
    pub fn args(&self) -> Vec<Value> {
        match self {
            Self::GetBets | Self::GetPoints => vec![],
            Self::GetPlayerPoints { address } => vec![json!(address)],
            Self::CreateBet {
                game_date,
                team1,
                team2,
                predicted_winner,
            } => vec![
                json!(game_date),
                json!(team1),
                json!(team2),
                json!(predicted_winner),
            ],
            Self::ResolveBet { bet_id } => vec![json!(bet_id)],
        }
    }
}

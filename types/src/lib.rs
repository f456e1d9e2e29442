use {
    serde::{Deserialize, Deserializer, Serialize},
    serde_json::{Map, Value},
    std::fmt,
};

/// Outcome code used by the contract for predictions and results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WinnerCode {
    /// `"1"`
    Team1,
    /// `"2"`
    Team2,
    /// `"0"`
    Draw,
    /// Anything the contract does not recognise, kept as received.
    Other(String),
}

impl WinnerCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Team1 => "1",
            Self::Team2 => "2",
            Self::Draw => "0",
            Self::Other(code) => code,
        }
    }

    /// Human readable label for this outcome, given the two team names.
    pub fn label<'a>(&'a self, team1: &'a str, team2: &'a str) -> &'a str {
        match self {
            Self::Team1 if !team1.is_empty() => team1,
            Self::Team1 => "Team 1",
            Self::Team2 if !team2.is_empty() => team2,
            Self::Team2 => "Team 2",
            Self::Draw => "Draw",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for WinnerCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "1" => Self::Team1,
            "2" => Self::Team2,
            "0" => Self::Draw,
            _ => Self::Other(code),
        }
    }
}

impl From<&str> for WinnerCode {
    fn from(code: &str) -> Self {
        Self::from(code.to_string())
    }
}

impl From<WinnerCode> for String {
    fn from(code: WinnerCode) -> Self {
        match code {
            WinnerCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for WinnerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    #[serde(default)]
    pub id: String,
    pub game_date: String,
    pub team1: String,
    pub team2: String,
    pub predicted_winner: WinnerCode,
    #[serde(default)]
    pub has_resolved: bool,
    // Resolution fields are only populated once `has_resolved` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_winner: Option<WinnerCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_url: Option<String>,
    #[serde(default)]
    pub owner: String, // Address that created the bet
}

impl Bet {
    /// Addresses compare case-insensitively, as hex checksums may differ.
    pub fn is_owned_by(&self, address: &str) -> bool {
        !address.is_empty() && self.owner.eq_ignore_ascii_case(address)
    }

    pub fn can_be_resolved_by(&self, address: &str) -> bool {
        self.is_owned_by(address) && !self.has_resolved
    }

    pub fn predicted_label(&self) -> &str {
        self.predicted_winner.label(&self.team1, &self.team2)
    }

    pub fn real_winner_label(&self) -> Option<&str> {
        self.real_winner
            .as_ref()
            .map(|code| code.label(&self.team1, &self.team2))
    }
}

/// Narrows a list of bets; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BetFilter {
    pub resolved: Option<bool>,
    pub owner: Option<String>,
}

impl BetFilter {
    pub fn matches(&self, bet: &Bet) -> bool {
        self.resolved.map_or(true, |resolved| bet.has_resolved == resolved)
            && self.owner.as_deref().map_or(true, |owner| bet.is_owned_by(owner))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub address: String,
    pub points: i64,
}

/// Lifecycle states a transaction goes through at the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum TransactionStatus {
    Uninitialized,
    Pending,
    Proposing,
    Committing,
    Revealing,
    Accepted,
    Undetermined,
    Finalized,
    Canceled,
    AppealRevealing,
    AppealCommitting,
    ReadyToFinalize,
    ValidatorsTimeout,
    LeaderTimeout,
    Unknown(String),
}

impl TransactionStatus {
    /// Status names in the order of their numeric codes.
    const NAMES: [&'static str; 14] = [
        "UNINITIALIZED",
        "PENDING",
        "PROPOSING",
        "COMMITTING",
        "REVEALING",
        "ACCEPTED",
        "UNDETERMINED",
        "FINALIZED",
        "CANCELED",
        "APPEAL_REVEALING",
        "APPEAL_COMMITTING",
        "READY_TO_FINALIZE",
        "VALIDATORS_TIMEOUT",
        "LEADER_TIMEOUT",
    ];

    pub fn from_code(code: u64) -> Self {
        Self::NAMES
            .get(code as usize)
            .map(|name| Self::from(*name))
            .unwrap_or_else(|| Self::Unknown(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Uninitialized => Self::NAMES[0],
            Self::Pending => Self::NAMES[1],
            Self::Proposing => Self::NAMES[2],
            Self::Committing => Self::NAMES[3],
            Self::Revealing => Self::NAMES[4],
            Self::Accepted => Self::NAMES[5],
            Self::Undetermined => Self::NAMES[6],
            Self::Finalized => Self::NAMES[7],
            Self::Canceled => Self::NAMES[8],
            Self::AppealRevealing => Self::NAMES[9],
            Self::AppealCommitting => Self::NAMES[10],
            Self::ReadyToFinalize => Self::NAMES[11],
            Self::ValidatorsTimeout => Self::NAMES[12],
            Self::LeaderTimeout => Self::NAMES[13],
            Self::Unknown(name) => name,
        }
    }

    /// Whether reaching `self` fulfils a wait for `target`. `Finalized`
    /// fulfils a wait for `Accepted`.
    pub fn satisfies(&self, target: &TransactionStatus) -> bool {
        self == target || (*target == Self::Accepted && *self == Self::Finalized)
    }
}

impl From<&str> for TransactionStatus {
    fn from(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "UNINITIALIZED" => Self::Uninitialized,
            "PENDING" => Self::Pending,
            "PROPOSING" => Self::Proposing,
            "COMMITTING" => Self::Committing,
            "REVEALING" => Self::Revealing,
            "ACCEPTED" => Self::Accepted,
            "UNDETERMINED" => Self::Undetermined,
            "FINALIZED" => Self::Finalized,
            "CANCELED" => Self::Canceled,
            "APPEAL_REVEALING" => Self::AppealRevealing,
            "APPEAL_COMMITTING" => Self::AppealCommitting,
            "READY_TO_FINALIZE" => Self::ReadyToFinalize,
            "VALIDATORS_TIMEOUT" => Self::ValidatorsTimeout,
            "LEADER_TIMEOUT" => Self::LeaderTimeout,
            _ => Self::Unknown(name.to_string()),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Endpoints report the status either by name or by numeric code
impl<'de> Deserialize<'de> for TransactionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(name) => Ok(Self::from(name.as_str())),
            Value::Number(code) => Ok(code
                .as_u64()
                .map(Self::from_code)
                .unwrap_or_else(|| Self::Unknown(code.to_string()))),
            other => Err(serde::de::Error::custom(format!(
                "invalid transaction status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub status: TransactionStatus,
    #[serde(default)]
    pub hash: String,
    #[serde(
        default,
        rename = "blockNumber",
        deserialize_with = "deserialize_block_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub block_number: Option<u64>,
    // Whatever else the endpoint reports about the transaction
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts `123`, `"123"` or `"0x7b"`.
fn deserialize_block_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_u64(),
        Some(Value::String(text)) => match text.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16).ok(),
            None => text.parse().ok(),
        },
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBetRequest {
    pub game_date: String,
    pub team1: String,
    pub team2: String,
    pub predicted_winner: String, // "1", "2" or "0"
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Game date is required")]
    MissingGameDate,

    #[error("Team 1 name is required")]
    MissingTeam1,

    #[error("Team 2 name is required")]
    MissingTeam2,

    #[error("Please select your predicted winner")]
    MissingPredictedWinner,
}

impl CreateBetRequest {
    /// Returns every problem with the request, not just the first one.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.game_date.trim().is_empty() {
            errors.push(ValidationError::MissingGameDate);
        }
        if self.team1.trim().is_empty() {
            errors.push(ValidationError::MissingTeam1);
        }
        if self.team2.trim().is_empty() {
            errors.push(ValidationError::MissingTeam2);
        }
        if self.predicted_winner.is_empty() {
            errors.push(ValidationError::MissingPredictedWinner);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    fn bet(owner: &str, has_resolved: bool) -> Bet {
        Bet {
            id: "bet-1".to_string(),
            game_date: "2025-06-01".to_string(),
            team1: "Alpha".to_string(),
            team2: "Beta".to_string(),
            predicted_winner: WinnerCode::Team1,
            has_resolved,
            real_winner: None,
            real_score: None,
            resolution_url: None,
            owner: owner.to_string(),
        }
    }

    #[test]
    fn test_winner_labels() {
        assert_eq!(WinnerCode::from("1").label("Alpha", "Beta"), "Alpha");
        assert_eq!(WinnerCode::from("2").label("Alpha", "Beta"), "Beta");
        assert_eq!(WinnerCode::from("0").label("Alpha", "Beta"), "Draw");
        assert_eq!(WinnerCode::from("1").label("", ""), "Team 1");
        assert_eq!(WinnerCode::from("2").label("", ""), "Team 2");
        assert_eq!(WinnerCode::from("Alpha").label("Alpha", "Beta"), "Alpha");
        assert_eq!(WinnerCode::from("3").label("Alpha", "Beta"), "3");
    }

    #[test]
    fn test_winner_code_serializes_as_plain_string() {
        assert_eq!(json!(WinnerCode::Draw), json!("0"));
        assert_eq!(json!(WinnerCode::Other("x".into())), json!("x"));
        let code: WinnerCode = serde_json::from_value(json!("2")).unwrap();
        assert_eq!(code, WinnerCode::Team2);
    }

    #[test]
    fn test_ownership_ignores_case() {
        let bet = bet("0xAbCd", false);
        assert!(bet.is_owned_by("0xabcd"));
        assert!(bet.can_be_resolved_by("0xABCD"));
        assert!(!bet.is_owned_by(""));
        assert!(!bet.is_owned_by("0xabce"));
    }

    #[test]
    fn test_resolved_bet_cannot_be_resolved_again() {
        let bet = bet("0xabcd", true);
        assert!(bet.is_owned_by("0xabcd"));
        assert!(!bet.can_be_resolved_by("0xabcd"));
    }

    #[test]
    fn test_filter_by_status_and_owner() {
        let pending = bet("0xAAA", false);
        let resolved = bet("0xbbb", true);

        let only_pending = BetFilter {
            resolved: Some(false),
            owner: None,
        };
        assert!(only_pending.matches(&pending));
        assert!(!only_pending.matches(&resolved));

        let by_owner = BetFilter {
            resolved: None,
            owner: Some("0xaaa".to_string()),
        };
        assert!(by_owner.matches(&pending));
        assert!(!by_owner.matches(&resolved));

        assert!(BetFilter::default().matches(&resolved));
    }

    #[test]
    fn test_finalized_satisfies_accepted() {
        let accepted = TransactionStatus::Accepted;
        assert!(TransactionStatus::Accepted.satisfies(&accepted));
        assert!(TransactionStatus::Finalized.satisfies(&accepted));
        assert!(!TransactionStatus::Pending.satisfies(&accepted));
        assert!(!TransactionStatus::Accepted.satisfies(&TransactionStatus::Finalized));
    }

    #[test]
    fn test_receipt_from_endpoint_payload() {
        let receipt: TransactionReceipt = serde_json::from_value(json!({
            "status": 5,
            "hash": "0xfeed",
            "blockNumber": "0x10",
            "consensus_data": { "votes": 5 }
        }))
        .unwrap();

        assert_eq!(receipt.status, TransactionStatus::Accepted);
        assert_eq!(receipt.hash, "0xfeed");
        assert_eq!(receipt.block_number, Some(16));
        assert_eq!(receipt.extra["consensus_data"], json!({ "votes": 5 }));
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let receipt: TransactionReceipt =
            serde_json::from_value(json!({ "status": "SOMETHING_NEW", "hash": "0x1" })).unwrap();
        assert_eq!(
            receipt.status,
            TransactionStatus::Unknown("SOMETHING_NEW".to_string())
        );
        assert_eq!(receipt.block_number, None);
    }

    #[test]
    fn test_create_request_reports_every_missing_field() {
        let request = CreateBetRequest {
            game_date: "  ".to_string(),
            team1: "Alpha".to_string(),
            team2: String::new(),
            predicted_winner: String::new(),
        };

        assert_eq!(
            request.validate(),
            Err(vec![
                ValidationError::MissingGameDate,
                ValidationError::MissingTeam2,
                ValidationError::MissingPredictedWinner,
            ])
        );
    }

    #[test]
    fn test_complete_request_is_valid() {
        let request = CreateBetRequest {
            game_date: "2025-06-01".to_string(),
            team1: "Alpha".to_string(),
            team2: "Beta".to_string(),
            predicted_winner: "1".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}

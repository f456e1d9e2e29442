//! Decoding of raw contract results into typed records.
//!
//! Every function here is total: a result that does not have the expected
//! shape decodes to an empty/zero value instead of failing.

use {
    esports_bets_types::{Bet, LeaderboardEntry},
    serde_json::{Map, Value},
    tracing::warn,
};

/// Flattens `owner -> bet id -> fields` into a list of bets.
///
/// Bets come out in the order the contract listed them: owners first, then
/// each owner's bets. The inner key becomes the bet `id` and the outer key its
/// `owner`, overriding any field with the same name.
pub fn decode_bets(raw: &Value) -> Vec<Bet> {
    let Some(owners) = raw.as_object() else {
        if !raw.is_null() {
            warn!("Unexpected shape for bets result, expected a mapping");
        }
        return vec![];
    };

    let mut bets = Vec::new();

    for (owner, owner_bets) in owners {
        let Some(owner_bets) = owner_bets.as_object() else {
            warn!("Skipping bets of {}: not a mapping", owner);
            continue;
        };

        for (id, fields) in owner_bets {
            match decode_bet(owner, id, fields) {
                Some(bet) => bets.push(bet),
                None => warn!("Skipping bet {} of {}: malformed fields", id, owner),
            }
        }
    }

    bets
}

fn decode_bet(owner: &str, id: &str, fields: &Value) -> Option<Bet> {
    let mut merged: Map<String, Value> = fields.as_object()?.clone();
    merged.insert("id".to_string(), Value::String(id.to_string()));
    merged.insert("owner".to_string(), Value::String(owner.to_string()));

    let mut bet: Bet = serde_json::from_value(Value::Object(merged)).ok()?;

    // Unset fields come back as empty strings
    bet.real_winner = bet.real_winner.filter(|code| !code.as_str().is_empty());
    bet.real_score = bet.real_score.filter(|score| !score.is_empty());
    bet.resolution_url = bet.resolution_url.filter(|url| !url.is_empty());

    if !bet.has_resolved {
        bet.real_winner = None;
        bet.real_score = None;
        bet.resolution_url = None;
    }

    Some(bet)
}

/// Coerces a points value to an integer, 0 when it is not numeric.
pub fn decode_points(raw: &Value) -> i64 {
    match raw {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|points| points as i64))
            .unwrap_or(0),
        Value::String(text) => parse_points(text.trim()).unwrap_or(0),
        Value::Bool(flag) => *flag as i64,
        _ => 0,
    }
}

fn parse_points(text: &str) -> Option<i64> {
    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        return i64::from_str_radix(hex, 16).ok();
    }

    text.parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().map(|points| points as i64))
}

/// Builds the leaderboard from an `address -> points` mapping, highest
/// points first. Players with equal points keep the contract's order.
pub fn decode_leaderboard(raw: &Value) -> Vec<LeaderboardEntry> {
    let Some(points) = raw.as_object() else {
        if !raw.is_null() {
            warn!("Unexpected shape for points result, expected a mapping");
        }
        return vec![];
    };

    let mut entries: Vec<LeaderboardEntry> = points
        .iter()
        .map(|(address, points)| LeaderboardEntry {
            address: address.clone(),
            points: decode_points(points),
        })
        .collect();

    // sort_by is stable
    entries.sort_by(|a, b| b.points.cmp(&a.points));
    entries
}

#[cfg(test)]
mod tests {
    use {super::*, esports_bets_types::WinnerCode, serde_json::json};

    fn fields(team1: &str, team2: &str) -> Value {
        json!({
            "game_date": "2025-06-01",
            "team1": team1,
            "team2": team2,
            "predicted_winner": "1",
            "has_resolved": false,
        })
    }

    #[test]
    fn test_flattens_every_inner_entry_in_order() {
        let raw = json!({
            "0xowner_b": {
                "b1": fields("Alpha", "Beta"),
                "b2": fields("Gamma", "Delta"),
            },
            "0xowner_a": {
                "a1": fields("Omega", "Sigma"),
            },
        });

        let bets = decode_bets(&raw);

        let positions: Vec<(&str, &str)> = bets
            .iter()
            .map(|bet| (bet.owner.as_str(), bet.id.as_str()))
            .collect();
        assert_eq!(
            positions,
            vec![("0xowner_b", "b1"), ("0xowner_b", "b2"), ("0xowner_a", "a1")]
        );
        assert_eq!(bets[1].team1, "Gamma");
    }

    #[test]
    fn test_position_wins_over_embedded_id_and_owner() {
        let mut bet = fields("Alpha", "Beta");
        bet["id"] = json!("spoofed");
        bet["owner"] = json!("0xspoofed");

        let bets = decode_bets(&json!({ "0xreal": { "real-id": bet } }));

        assert_eq!(bets[0].id, "real-id");
        assert_eq!(bets[0].owner, "0xreal");
    }

    #[test]
    fn test_non_mapping_results_decode_to_nothing() {
        for raw in [json!(null), json!([1, 2]), json!("bets"), json!(42)] {
            assert!(decode_bets(&raw).is_empty());
            assert!(decode_leaderboard(&raw).is_empty());
        }
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let raw = json!({
            "0xone": "not a mapping",
            "0xtwo": {
                "broken": { "team1": "Alpha" },
                "scalar": 7,
                "ok": fields("Alpha", "Beta"),
            },
        });

        let bets = decode_bets(&raw);
        assert_eq!(bets.len(), 1);
        assert_eq!(bets[0].id, "ok");
    }

    #[test]
    fn test_resolution_fields_follow_resolved_flag() {
        let raw = json!({
            "0xowner": {
                "pending": {
                    "game_date": "2025-06-01",
                    "team1": "Alpha",
                    "team2": "Beta",
                    "predicted_winner": "2",
                    "has_resolved": false,
                    "real_winner": "1",
                    "real_score": "",
                },
                "done": {
                    "game_date": "2025-06-01",
                    "team1": "Alpha",
                    "team2": "Beta",
                    "predicted_winner": "0",
                    "has_resolved": true,
                    "real_winner": "0",
                    "real_score": "1:1",
                    "resolution_url": "https://example.org/match/1",
                },
            },
        });

        let bets = decode_bets(&raw);

        assert_eq!(bets[0].real_winner, None);
        assert_eq!(bets[0].real_score, None);
        assert_eq!(bets[1].real_winner, Some(WinnerCode::Draw));
        assert_eq!(bets[1].real_score.as_deref(), Some("1:1"));
        assert_eq!(
            bets[1].resolution_url.as_deref(),
            Some("https://example.org/match/1")
        );
    }

    #[test]
    fn test_points_coercion() {
        assert_eq!(decode_points(&json!(12)), 12);
        assert_eq!(decode_points(&json!("40")), 40);
        assert_eq!(decode_points(&json!(3.9)), 3);
        assert_eq!(decode_points(&json!("lots")), 0);
        assert_eq!(decode_points(&json!("0x10")), 16);
        assert_eq!(decode_points(&json!(" 0X1f ")), 31);
        assert_eq!(decode_points(&json!("0xzz")), 0);
        assert_eq!(decode_points(&json!(null)), 0);
        assert_eq!(decode_points(&json!({ "points": 3 })), 0);
    }

    #[test]
    fn test_leaderboard_is_sorted_and_stable() {
        let raw = json!({
            "0xa": 5,
            "0xb": 10,
            "0xc": "5",
            "0xd": 1,
            "0xe": 10,
        });

        let addresses: Vec<String> = decode_leaderboard(&raw)
            .into_iter()
            .map(|entry| entry.address)
            .collect();

        assert_eq!(addresses, vec!["0xb", "0xe", "0xa", "0xc", "0xd"]);
    }

    #[test]
    fn test_leaderboard_ties_are_not_reordered_by_address() {
        let raw = json!({ "0xf": 2, "0xa": 7, "0x9": 2, "0x1": 2 });

        let addresses: Vec<String> = decode_leaderboard(&raw)
            .into_iter()
            .map(|entry| entry.address)
            .collect();

        assert_eq!(addresses, vec!["0xa", "0xf", "0x9", "0x1"]);
    }
}

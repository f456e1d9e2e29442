use {
    esports_bets::utils::shorten_address,
    esports_bets_types::{Bet, LeaderboardEntry},
};

const ADDRESS_WIDTH: usize = 10;

pub fn bet_status(bet: &Bet) -> String {
    match bet.real_winner_label() {
        Some(winner) if bet.has_resolved => format!("Resolved (winner: {winner})"),
        _ if bet.has_resolved => "Resolved".to_string(),
        _ => "Pending".to_string(),
    }
}

fn owner_cell(bet: &Bet, account: Option<&str>) -> String {
    let owner = shorten_address(&bet.owner, ADDRESS_WIDTH);
    match account {
        Some(account) if bet.is_owned_by(account) => format!("{owner} (you)"),
        _ => owner,
    }
}

pub fn bet_table(bets: &[Bet], account: Option<&str>) -> String {
    let mut lines = vec![format!(
        "{:<12} {:<12} {:<32} {:<16} {:<28} {}",
        "ID", "DATE", "TEAMS", "PREDICTION", "STATUS", "OWNER"
    )];

    for bet in bets {
        let mut line = format!(
            "{:<12} {:<12} {:<32} {:<16} {:<28} {}",
            bet.id,
            bet.game_date,
            format!("{} vs {}", bet.team1, bet.team2),
            bet.predicted_label(),
            bet_status(bet),
            owner_cell(bet, account),
        );
        if account.is_some_and(|account| bet.can_be_resolved_by(account)) {
            line.push_str("  [resolvable]");
        }
        lines.push(line);
    }

    lines.join("\n")
}

pub fn leaderboard_table(entries: &[LeaderboardEntry], account: Option<&str>) -> String {
    let mut lines = vec![format!("{:<6} {:<46} {:>8}", "RANK", "PLAYER", "POINTS")];

    for (rank, entry) in entries.iter().enumerate() {
        let you = match account {
            Some(account) if entry.address.eq_ignore_ascii_case(account) => " (you)",
            _ => "",
        };
        lines.push(format!(
            "{:<6} {:<46} {:>8}",
            rank + 1,
            format!("{}{}", entry.address, you),
            entry.points
        ));
    }

    lines.join("\n")
}

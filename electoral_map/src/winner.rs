use log::debug;

use crate::config::*;

/// The party with the most votes in a tally.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct WinnerResult {
    /// Empty when no party received a vote.
    pub winning_party: PartyId,
    pub winning_votes: u64,
}

/// Finds the winner of a tally.
///
/// The parties are visited in the order of the tally. A party only replaces
/// the current winner if it has strictly more votes, so ties go to the party
/// listed first. Parties with 0 votes never win.
pub fn resolve_winner(votes: &PartyVotes) -> WinnerResult {
    let mut res = WinnerResult {
        winning_party: String::new(),
        winning_votes: 0,
    };
    for (party, count) in votes.iter() {
        if count > res.winning_votes {
            res.winning_party = party.to_string();
            res.winning_votes = count;
        }
    }
    debug!("resolve_winner: {:?} -> {:?}", votes, res);
    res
}

/// The ratio `part / total`, or 0 when `total` is 0.
pub fn share(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

pub fn winning_share(winner: &WinnerResult, total_votes: u64) -> f64 {
    share(winner.winning_votes, total_votes)
}

//! Standings ranking and Swiss pairing.
//!
//! Both functions are pure: they work on snapshots already fetched from the
//! store and never touch it themselves.

use super::models::{Pairing, StandingsRow};

/// Rank standings rows by wins, most wins first.
///
/// The sort is stable, so players tied on wins keep the order they arrived
/// in. Stores list players by ascending id, which makes that the tiebreak.
pub fn rank(mut rows: Vec<StandingsRow>) -> Vec<StandingsRow> {
    rows.sort_by(|a, b| b.wins.cmp(&a.wins));
    rows
}

/// Pair ranked players for the next round.
///
/// Walks the standings from the top and seats neighbours together: rank 1
/// plays rank 2, rank 3 plays rank 4, and so on. Previous opponents are not
/// tracked, so two players can be paired again in a later round.
///
/// With an odd number of players the lowest-ranked player gets a bye, which
/// is returned as the final pairing with no second seat.
pub fn swiss_pairings(standings: &[StandingsRow]) -> Vec<Pairing> {
    let mut chunks = standings.chunks_exact(2);
    let mut pairings: Vec<Pairing> = chunks
        .by_ref()
        .map(|pair| Pairing::between(&pair[0], &pair[1]))
        .collect();

    if let [odd] = chunks.remainder() {
        log::debug!("Player {} receives a bye", odd.id);
        pairings.push(Pairing::bye(odd));
    }

    pairings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::models::{Player, PlayerId};

    fn row(id: PlayerId, wins: u32, matches: u32) -> StandingsRow {
        StandingsRow::new(Player::new(id, format!("Player {id}")), wins, matches)
    }

    fn ids(rows: &[StandingsRow]) -> Vec<PlayerId> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn test_rank_orders_by_wins_descending() {
        let ranked = rank(vec![row(1, 0, 2), row(2, 2, 2), row(3, 1, 2)]);
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn test_rank_keeps_retrieval_order_on_ties() {
        let ranked = rank(vec![row(1, 1, 1), row(2, 0, 1), row(3, 1, 1), row(4, 0, 1)]);
        assert_eq!(ids(&ranked), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_rank_no_matches_keeps_input_order() {
        let ranked = rank(vec![row(4, 0, 0), row(2, 0, 0), row(9, 0, 0)]);
        assert_eq!(ids(&ranked), vec![4, 2, 9]);
    }

    #[test]
    fn test_pairings_empty() {
        assert!(swiss_pairings(&[]).is_empty());
    }

    #[test]
    fn test_pairings_adjacent_ranks() {
        let standings = rank(vec![row(1, 1, 1), row(2, 0, 1), row(3, 1, 1), row(4, 0, 1)]);
        let pairings = swiss_pairings(&standings);

        assert_eq!(pairings.len(), 2);
        assert_eq!(pairings[0].as_tuple(), (1, "Player 1", Some(3), Some("Player 3")));
        assert_eq!(pairings[1].as_tuple(), (2, "Player 2", Some(4), Some("Player 4")));
    }

    #[test]
    fn test_pairings_odd_count_gives_bye_to_last_ranked() {
        let standings = rank(vec![row(1, 2, 2), row(2, 0, 2), row(3, 1, 2)]);
        let pairings = swiss_pairings(&standings);

        assert_eq!(pairings.len(), 2);
        assert_eq!(pairings[0].as_tuple().0, 1);
        assert_eq!(pairings[0].as_tuple().2, Some(3));
        assert!(pairings[1].is_bye());
        assert_eq!(pairings[1].first.id, 2);
    }

    #[test]
    fn test_pairings_single_player_is_a_bye() {
        let pairings = swiss_pairings(&[row(8, 0, 0)]);

        assert_eq!(pairings.len(), 1);
        assert!(pairings[0].is_bye());
        assert_eq!(pairings[0].first.id, 8);
    }
}

//! Tournament data models for Swiss-system play.

use serde::{Deserialize, Serialize};

/// Player ID type, assigned by the store on registration
pub type PlayerId = i64;

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player ID
    pub id: PlayerId,
    /// Player's full name (as registered, need not be unique)
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Outcome of a single match. Every match has exactly one winner and one loser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: PlayerId,
    pub loser: PlayerId,
}

impl MatchResult {
    pub fn new(winner: PlayerId, loser: PlayerId) -> Self {
        Self { winner, loser }
    }

    /// Whether the given player took part in this match
    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.winner == player_id || self.loser == player_id
    }
}

/// One player's line in the standings table.
///
/// Invariant: `wins <= matches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub id: PlayerId,
    pub name: String,
    /// Number of matches the player has won
    pub wins: u32,
    /// Number of matches the player has played
    pub matches: u32,
}

impl StandingsRow {
    pub fn new(player: Player, wins: u32, matches: u32) -> Self {
        Self {
            id: player.id,
            name: player.name,
            wins,
            matches,
        }
    }

    /// Matches played but not won
    pub fn losses(&self) -> u32 {
        self.matches.saturating_sub(self.wins)
    }

    fn seat(&self) -> Seat {
        Seat {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// A player's place in a pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
}

/// A proposed match for the next round.
///
/// `second` is `None` when `first` receives a bye.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub first: Seat,
    pub second: Option<Seat>,
}

impl Pairing {
    /// Pair two adjacent standings rows
    pub fn between(a: &StandingsRow, b: &StandingsRow) -> Self {
        Self {
            first: a.seat(),
            second: Some(b.seat()),
        }
    }

    /// A bye for a player with no opponent this round
    pub fn bye(row: &StandingsRow) -> Self {
        Self {
            first: row.seat(),
            second: None,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.second.is_none()
    }

    /// IDs of every player seated in this pairing
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        std::iter::once(self.first.id).chain(self.second.as_ref().map(|s| s.id))
    }

    /// The `(id1, name1, id2, name2)` view of this pairing
    pub fn as_tuple(&self) -> (PlayerId, &str, Option<PlayerId>, Option<&str>) {
        (
            self.first.id,
            self.first.name.as_str(),
            self.second.as_ref().map(|s| s.id),
            self.second.as_ref().map(|s| s.name.as_str()),
        )
    }
}

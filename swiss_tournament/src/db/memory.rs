//! In-memory `TournamentRepository` for tests and dry runs.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use super::repository::TournamentRepository;
use crate::tournament::{MatchResult, Player, PlayerId, TournamentResult};

#[derive(Default)]
struct State {
    players: Vec<Player>,
    matches: Vec<MatchResult>,
    next_id: PlayerId,
}

/// Store backed by plain vectors behind a mutex.
///
/// Ids start at 1 and are never reused, matching a database sequence.
/// Deleting all players also removes their matches, like the cascading
/// foreign keys in the PostgreSQL schema.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded match, oldest first
    pub fn matches(&self) -> Vec<MatchResult> {
        self.lock().matches.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State stays consistent even if a holder panicked mid-test
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TournamentRepository for InMemoryRepository {
    async fn insert_player(&self, name: &str) -> TournamentResult<PlayerId> {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.players.push(Player::new(id, name));
        Ok(id)
    }

    async fn delete_all_players(&self) -> TournamentResult<()> {
        let mut state = self.lock();
        state.players.clear();
        state.matches.clear();
        Ok(())
    }

    async fn delete_all_matches(&self) -> TournamentResult<()> {
        self.lock().matches.clear();
        Ok(())
    }

    async fn count_players(&self) -> TournamentResult<i64> {
        Ok(self.lock().players.len() as i64)
    }

    async fn list_players(&self) -> TournamentResult<Vec<Player>> {
        Ok(self.lock().players.clone())
    }

    async fn count_wins(&self, player_id: PlayerId) -> TournamentResult<i64> {
        let state = self.lock();
        Ok(state.matches.iter().filter(|m| m.winner == player_id).count() as i64)
    }

    async fn count_matches_played(&self, player_id: PlayerId) -> TournamentResult<i64> {
        let state = self.lock();
        Ok(state.matches.iter().filter(|m| m.involves(player_id)).count() as i64)
    }

    async fn insert_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()> {
        self.lock().matches.push(MatchResult::new(winner, loser));
        Ok(())
    }
}

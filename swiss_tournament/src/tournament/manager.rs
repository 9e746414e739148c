//! Tournament manager tying the store to the standings and pairing engine.

use std::sync::Arc;

use super::errors::{TournamentError, TournamentResult};
use super::models::{Pairing, Player, PlayerId, StandingsRow};
use super::sanitize::clean_name;
use super::standings;
use crate::db::TournamentRepository;

/// Tournament manager
#[derive(Clone)]
pub struct TournamentManager {
    repo: Arc<dyn TournamentRepository>,
}

impl TournamentManager {
    /// Create a new tournament manager over the given store
    pub fn new(repo: Arc<dyn TournamentRepository>) -> Self {
        Self { repo }
    }

    /// Remove all the match records
    pub async fn delete_matches(&self) -> TournamentResult<()> {
        self.repo.delete_all_matches().await?;
        log::info!("Deleted all matches");
        Ok(())
    }

    /// Remove all the player records
    pub async fn delete_players(&self) -> TournamentResult<()> {
        self.repo.delete_all_players().await?;
        log::info!("Deleted all players");
        Ok(())
    }

    /// Number of players currently registered
    pub async fn count_players(&self) -> TournamentResult<u64> {
        let count = self.repo.count_players().await?;
        u64::try_from(count).map_err(|_| TournamentError::InvalidCount(count))
    }

    /// Register a player. The name is cleaned first; the store assigns the id.
    ///
    /// Names need not be unique.
    pub async fn register_player(&self, name: &str) -> TournamentResult<PlayerId> {
        let name = clean_name(name)?;
        let id = self.repo.insert_player(&name).await?;
        log::info!("Registered player {id} '{name}'");
        Ok(id)
    }

    /// All registered players with their ids, in registration order
    pub async fn players(&self) -> TournamentResult<Vec<Player>> {
        self.repo.list_players().await
    }

    /// Record the outcome of a single match.
    ///
    /// Ids are passed through as-is; whether they name registered players is
    /// left to the store.
    pub async fn report_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()> {
        self.repo.insert_match(winner, loser).await?;
        log::info!("Recorded match: {winner} beat {loser}");
        Ok(())
    }

    /// Players and their win records, sorted by wins.
    ///
    /// The first entry is the player in first place, or one of the players
    /// tied for first.
    pub async fn player_standings(&self) -> TournamentResult<Vec<StandingsRow>> {
        let players = self.repo.list_players().await?;

        let mut rows = Vec::with_capacity(players.len());
        for player in players {
            let wins = to_count(self.repo.count_wins(player.id).await?)?;
            let matches = to_count(self.repo.count_matches_played(player.id).await?)?;
            rows.push(StandingsRow::new(player, wins, matches));
        }

        let ranked = standings::rank(rows);
        log::debug!("Computed standings for {} players", ranked.len());
        Ok(ranked)
    }

    /// Pairings for the next round, built from the current standings.
    ///
    /// See [`standings::swiss_pairings`] for how players are matched and how
    /// an odd player out is handled.
    pub async fn swiss_pairings(&self) -> TournamentResult<Vec<Pairing>> {
        let standings = self.player_standings().await?;
        let pairings = standings::swiss_pairings(&standings);
        log::debug!("Generated {} pairings", pairings.len());
        Ok(pairings)
    }
}

fn to_count(value: i64) -> TournamentResult<u32> {
    u32::try_from(value).map_err(|_| TournamentError::InvalidCount(value))
}

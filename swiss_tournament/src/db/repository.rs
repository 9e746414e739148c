//! Store contract for tournament data and its PostgreSQL implementation.
//!
//! The trait keeps the engine independent of the database so tests can swap
//! in [`InMemoryRepository`](super::memory::InMemoryRepository).

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::tournament::{Player, PlayerId, TournamentResult};

/// Trait for tournament store operations
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Insert a player and return the id assigned by the store
    async fn insert_player(&self, name: &str) -> TournamentResult<PlayerId>;

    /// Remove every player record
    async fn delete_all_players(&self) -> TournamentResult<()>;

    /// Remove every match record
    async fn delete_all_matches(&self) -> TournamentResult<()>;

    /// Number of registered players
    async fn count_players(&self) -> TournamentResult<i64>;

    /// All registered players in ascending id order
    async fn list_players(&self) -> TournamentResult<Vec<Player>>;

    /// Number of matches the player has won
    async fn count_wins(&self, player_id: PlayerId) -> TournamentResult<i64>;

    /// Number of matches the player has played, won or lost
    async fn count_matches_played(&self, player_id: PlayerId) -> TournamentResult<i64>;

    /// Record the outcome of a single match
    async fn insert_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()>;
}

/// Default PostgreSQL implementation of `TournamentRepository`
///
/// Every call checks a connection out of the pool for its own duration. The
/// `PoolConnection` guard hands it back when dropped, on success and on error.
#[derive(Clone)]
pub struct PgTournamentRepository {
    pool: PgPool,
}

impl PgTournamentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TournamentRepository for PgTournamentRepository {
    async fn insert_player(&self, name: &str) -> TournamentResult<PlayerId> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query("INSERT INTO players (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&mut *conn)
            .await?;

        Ok(row.get("id"))
    }

    async fn delete_all_players(&self) -> TournamentResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("DELETE FROM players").execute(&mut *conn).await?;
        Ok(())
    }

    async fn delete_all_matches(&self) -> TournamentResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("DELETE FROM matches").execute(&mut *conn).await?;
        Ok(())
    }

    async fn count_players(&self) -> TournamentResult<i64> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query("SELECT COUNT(*) AS count FROM players")
            .fetch_one(&mut *conn)
            .await?;

        Ok(row.get("count"))
    }

    async fn list_players(&self) -> TournamentResult<Vec<Player>> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query("SELECT id, name FROM players ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Player {
                id: r.get("id"),
                name: r.get("name"),
            })
            .collect())
    }

    async fn count_wins(&self, player_id: PlayerId) -> TournamentResult<i64> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query("SELECT COUNT(*) AS count FROM matches WHERE winner = $1")
            .bind(player_id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(row.get("count"))
    }

    async fn count_matches_played(&self, player_id: PlayerId) -> TournamentResult<i64> {
        let mut conn = self.pool.acquire().await?;

        let row =
            sqlx::query("SELECT COUNT(*) AS count FROM matches WHERE winner = $1 OR loser = $1")
                .bind(player_id)
                .fetch_one(&mut *conn)
                .await?;

        Ok(row.get("count"))
    }

    async fn insert_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query("INSERT INTO matches (winner, loser) VALUES ($1, $2)")
            .bind(winner)
            .bind(loser)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}

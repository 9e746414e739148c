//! # Swiss Tournament
//!
//! Player registration, match recording, standings and pairing generation
//! for a Swiss-system tournament.
//!
//! Each round, players are paired with a neighbour in the standings so that
//! competitors with similar records meet. Nobody is eliminated.
//!
//! ## Core Modules
//!
//! - [`db`]: Store contract, PostgreSQL pool and repository, in-memory store
//! - [`tournament`]: Standings and pairing engine, and the manager that
//!   drives it against a store
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use swiss_tournament::{InMemoryRepository, TournamentManager};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), swiss_tournament::TournamentError> {
//! let tournament = TournamentManager::new(Arc::new(InMemoryRepository::new()));
//! let a = tournament.register_player("Ana").await?;
//! let b = tournament.register_player("Bea").await?;
//! tournament.report_match(b, a).await?;
//!
//! let standings = tournament.player_standings().await?;
//! assert_eq!(standings[0].id, b);
//! # Ok(())
//! # }
//! ```

/// Store contract and implementations.
pub mod db;
pub use db::{
    Database, DatabaseConfig, InMemoryRepository, PgTournamentRepository, TournamentRepository,
};

/// Standings, pairings and tournament management.
pub mod tournament;
pub use tournament::{
    Pairing, Player, PlayerId, StandingsRow, TournamentError, TournamentManager,
    TournamentResult,
};

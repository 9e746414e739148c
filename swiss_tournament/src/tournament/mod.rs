//! Swiss-system tournament module.
//!
//! This module provides:
//! - Player registration with name cleaning
//! - Match result recording
//! - Standings ranked by wins
//! - Next-round pairings of adjacent players in the standings
//!
//! ## Example
//!
//! ```no_run
//! use swiss_tournament::db::Database;
//! use swiss_tournament::tournament::TournamentManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let tournament = TournamentManager::new(Arc::new(db.repository()));
//!
//!     let alice = tournament.register_player("Alice").await?;
//!     let bob = tournament.register_player("Bob").await?;
//!     tournament.report_match(alice, bob).await?;
//!
//!     for pairing in tournament.swiss_pairings().await? {
//!         println!("{:?}", pairing.as_tuple());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod sanitize;
pub mod standings;

pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{MatchResult, Pairing, Player, PlayerId, Seat, StandingsRow};
pub use sanitize::{MAX_NAME_LEN, clean_name};

//! Tournament error types.

use thiserror::Error;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Player name rejected at registration
    #[error("Invalid player name: {0}")]
    InvalidName(String),

    /// Store returned a count outside the expected range
    #[error("Invalid count from store: {0}")]
    InvalidCount(i64),
}

impl TournamentError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database and migration errors are reduced to a generic message so SQL
    /// details never reach an operator's terminal or a log shipped elsewhere.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Database(_) | TournamentError::Migration(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

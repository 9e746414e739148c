//! Database module providing PostgreSQL connection pooling and the store contract.
//!
//! The tournament engine only ever talks to a [`TournamentRepository`]. The
//! PostgreSQL implementation lives in [`repository`]; [`memory`] provides an
//! in-process store for tests and dry runs.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::tournament::TournamentResult;

pub mod config;
pub mod memory;
pub mod repository;

pub use config::DatabaseConfig;
pub use memory::InMemoryRepository;
pub use repository::{PgTournamentRepository, TournamentRepository};

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use swiss_tournament::db::{Database, DatabaseConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), sqlx::Error> {
    ///     let config = DatabaseConfig::from_env();
    ///     let db = Database::new(&config).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Build a repository sharing this pool
    pub fn repository(&self) -> PgTournamentRepository {
        PgTournamentRepository::new(self.pool.clone())
    }

    /// Apply the bundled schema migrations (`players` and `matches` tables)
    pub async fn migrate(&self) -> TournamentResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        log::info!("Database schema is up to date");
        Ok(())
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}

//! Admin tool configuration management.
//!
//! Consolidates environment variable reads and command-line overrides into a
//! validated configuration.

use swiss_tournament::DatabaseConfig;

/// Complete admin configuration
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Database configuration
    pub database: DatabaseConfig,
    /// Print results as JSON instead of text
    pub json: bool,
}

impl AdminConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `database_url_override` - Optional database URL override (from CLI args)
    /// * `json` - Whether output should be JSON
    pub fn from_env(database_url_override: Option<String>, json: bool) -> Self {
        let mut database = DatabaseConfig::from_env();
        if let Some(url) = database_url_override {
            database.database_url = url;
        }

        Self { database, json }
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.database_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                var: "DATABASE_URL".to_string(),
                hint: "Pass --db-url or set DATABASE_URL".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_CONNECTIONS".to_string(),
                reason: format!(
                    "Cannot exceed max connections ({})",
                    self.database.max_connections
                ),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AdminConfig {
        AdminConfig {
            database: DatabaseConfig::development(),
            json: false,
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "DATABASE_URL".to_string(),
            hint: "Use --db-url".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("DATABASE_URL"));
        assert!(msg.contains("Use --db-url"));
    }

    #[test]
    fn test_url_override_wins() {
        let config = AdminConfig::from_env(Some("postgres://elsewhere/db".to_string()), true);
        assert_eq!(config.database.database_url, "postgres://elsewhere/db");
        assert!(config.json);
    }

    #[test]
    fn test_development_config_is_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_url() {
        let mut config = config();
        config.database.database_url = "  ".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired { .. }));
    }

    #[test]
    fn test_config_validation_zero_pool() {
        let mut config = config();
        config.database.max_connections = 0;
        config.database.min_connections = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_config_validation_min_above_max() {
        let mut config = config();
        config.database.min_connections = 10;
        config.database.max_connections = 2;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file (`:memory:` for a private in-memory database)
    pub database_path: PathBuf,
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
}

pub const DEFAULT_DATABASE_PATH: &str = "activity_tracker.db";
pub const IN_MEMORY: &str = ":memory:";

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(IN_MEMORY),
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", value))?,
            Err(_) => 8080,
        };

        Ok(Self {
            database_path: env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATABASE_PATH)),
            port,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        })
    }

    pub fn uses_in_memory_db(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::remove_var("DATABASE_PATH");
        env::remove_var("FRONTEND_URL");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.database_path, PathBuf::from("activity_tracker.db"));
        assert_eq!(config.port, 8080);
        assert!(!config.uses_in_memory_db());

        env::set_var("PORT", "9000");
        env::set_var("DATABASE_PATH", "/tmp/runs.db");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("/tmp/runs.db"));

        env::set_var("PORT", "eighty");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PORT"));

        env::remove_var("PORT");
        env::remove_var("DATABASE_PATH");
    }

    #[test]
    fn test_default_is_in_memory() {
        assert!(Config::default().uses_in_memory_db());
    }
}

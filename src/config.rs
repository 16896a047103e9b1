//! Save-file configuration.
//!
//! Settings are read from environment variables (a `.env` file is honoured)
//! and validated before use.
//!
//! # Environment Variables
//!
//! - `FOCAL_SAVE_DIR`: directory the file store is rooted at (optional,
//!   default: `.`)
//! - `FOCAL_TOKEN_LENGTH`: hex characters in the unique token of a derived
//!   save name, `1..=32` (optional, default: 6)
//!
//! # Example
//!
//! ```rust,ignore
//! use focal::config::SaveConfig;
//!
//! let config = SaveConfig::from_env()?;
//! println!("Saving under: {}", config.save_dir.display());
//! ```

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Variable naming the save directory.
pub const SAVE_DIR_KEY: &str = "FOCAL_SAVE_DIR";
/// Variable holding the token length.
pub const TOKEN_LENGTH_KEY: &str = "FOCAL_TOKEN_LENGTH";

const DEFAULT_TOKEN_LENGTH: usize = 6;
const MAX_TOKEN_LENGTH: usize = 32;

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
    /// An environment variable is set but is not valid Unicode.
    #[error("Value of {key} is not valid Unicode")]
    NotUnicode {
        /// The name of the environment variable.
        key: String,
    },
}

/// Settings for [`SaveFileLens`](crate::storage::SaveFileLens).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveConfig {
    /// Root directory of the file store.
    pub save_dir: PathBuf,
    /// Length of the unique token in derived save names.
    pub token_length: usize,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("."),
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }
}

impl SaveConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotUnicode` if a variable is not valid Unicode.
    /// Returns `ConfigError::InvalidValue` if a variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let save_dir = read_env(SAVE_DIR_KEY)?;
        let token_length = read_env(TOKEN_LENGTH_KEY)?;
        Self::from_lookup(|key| match key {
            SAVE_DIR_KEY => save_dir.clone(),
            TOKEN_LENGTH_KEY => token_length.clone(),
            _ => None,
        })
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a value is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let save_dir = match lookup(SAVE_DIR_KEY) {
            Some(value) if value.trim().is_empty() => {
                return Err(invalid(SAVE_DIR_KEY, "must not be empty"));
            }
            Some(value) => PathBuf::from(value),
            None => defaults.save_dir,
        };
        let token_length = lookup(TOKEN_LENGTH_KEY)
            .map_or(Ok(defaults.token_length), |value| parse_token_length(&value))?;

        Ok(Self {
            save_dir,
            token_length,
        })
    }
}

fn read_env(key: &str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
            key: key.to_string(),
        }),
    }
}

fn parse_token_length(value: &str) -> Result<usize, ConfigError> {
    let length: usize = value
        .trim()
        .parse()
        .map_err(|error: std::num::ParseIntError| invalid(TOKEN_LENGTH_KEY, &error.to_string()))?;
    if (1..=MAX_TOKEN_LENGTH).contains(&length) {
        Ok(length)
    } else {
        Err(invalid(
            TOKEN_LENGTH_KEY,
            &format!("must be between 1 and {MAX_TOKEN_LENGTH}"),
        ))
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

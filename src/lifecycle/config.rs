//! Runtime configuration for the ledger system.

use crate::model::Principal;
use serde::Deserialize;
use thiserror::Error;

pub const OWNER_ENV: &str = "SUPPLY_CHAIN_OWNER";
pub const BUFFER_SIZE_ENV: &str = "SUPPLY_CHAIN_BUFFER_SIZE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} is not a valid value: {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("owner must not be blank")]
    BlankOwner,
    #[error("buffer_size must be at least 1")]
    ZeroBuffer,
}

/// Settings the ledger is started with.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// The owner principal. Fixed for the lifetime of the ledger.
    pub owner: Principal,
    /// Capacity of the ledger's request channel.
    pub buffer_size: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            owner: Principal::from("owner"),
            buffer_size: 32,
        }
    }
}

impl LedgerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Defaults overridden by `SUPPLY_CHAIN_OWNER` and `SUPPLY_CHAIN_BUFFER_SIZE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(owner) = lookup(OWNER_ENV) {
            config.owner = Principal::from(owner);
        }
        if let Some(value) = lookup(BUFFER_SIZE_ENV) {
            config.buffer_size = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    name: BUFFER_SIZE_ENV,
                    value: value.clone(),
                })?;
        }
        config.validate()
    }

    /// Normalizes the owner and rejects values the ledger cannot start with.
    fn validate(mut self) -> Result<Self, ConfigError> {
        let owner = self.owner.as_str().trim();
        if owner.is_empty() {
            return Err(ConfigError::BlankOwner);
        }
        if owner.len() != self.owner.as_str().len() {
            self.owner = Principal::from(owner);
        }
        // tokio's mpsc::channel panics on zero capacity
        if self.buffer_size == 0 {
            return Err(ConfigError::ZeroBuffer);
        }
        Ok(self)
    }
}

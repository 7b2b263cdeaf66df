use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::phase::{classify_phase, ConfigurationError, Phase, SaleTimes};
use crate::whitelist::Whitelist;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read sale config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse sale config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// The `config.json` document a storefront loads once at startup.
/// Fields written by deployments that the sale logic does not use
/// (deployer address, deploy time, ...) are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleConfig {
    pub contract_address: String,
    pub wl_start_time: u64,
    pub fcfs_start_time: u64,
    pub public_start_time: u64,
    #[serde(default)]
    pub whitelist1: Whitelist,
    #[serde(default)]
    pub whitelist2: Whitelist,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_explorer_url: Option<String>,
}

impl SaleConfig {
    /// Parses a config document without validating the phase ordering.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads and validates a config file. Unordered sale times are rejected
    /// rather than reordered.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json(&raw)?;
        config.times().check_integrity()?;
        Ok(config)
    }

    pub fn times(&self) -> SaleTimes {
        SaleTimes::new(
            self.wl_start_time,
            self.fcfs_start_time,
            self.public_start_time,
        )
    }

    pub fn phase_at(&self, now: u64) -> Phase {
        classify_phase(&self.times(), now)
    }

    pub fn whitelist_for(&self, phase: Phase) -> Option<&Whitelist> {
        match phase {
            Phase::Whitelist1 => Some(&self.whitelist1),
            Phase::Fcfs => Some(&self.whitelist2),
            _ => None,
        }
    }
}

use std::time::Duration;

use phase_engine::Phase;
use thiserror::Error;

/// Provider error code for a request the user declined in their wallet.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Failures reported by the wallet provider or the chain endpoint.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    #[error("wallet required")]
    WalletUnavailable,

    #[error("user rejected the request (code {code})")]
    UserRejected { code: i64 },

    /// The contract refused the call. `reason` is the contract's own message.
    #[error("{reason}")]
    Reverted { reason: String },

    #[error("rpc error: {0}")]
    Rpc(String),
}

impl ChainError {
    /// Maps a provider error code and message to a chain error.
    pub fn from_provider(code: i64, message: impl Into<String>) -> Self {
        if code == USER_REJECTED_CODE {
            ChainError::UserRejected { code }
        } else {
            ChainError::Rpc(message.into())
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MintError {
    #[error("a mint is already in progress")]
    InProgress,

    #[error("wallet is not connected")]
    NotConnected,

    #[error("minting has not started yet")]
    NotStarted,

    #[error("address is not eligible for the {0} phase")]
    NotEligible(Phase),

    #[error("address already minted in the {0} phase")]
    AlreadyMinted(Phase),

    #[error("mint price for the {0} phase is not loaded")]
    PriceUnavailable(Phase),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,

    #[error("refresh interval {refresh:?} is shorter than the tick interval {tick:?}")]
    RefreshFasterThanTick { tick: Duration, refresh: Duration },
}

impl MintError {
    /// Text shown to the user. Contract rejections are passed through as-is.
    pub fn user_message(&self) -> String {
        match self {
            MintError::Chain(ChainError::Reverted { reason }) => reason.clone(),
            MintError::Chain(ChainError::UserRejected { .. }) => {
                "Transaction rejected".to_string()
            }
            MintError::Chain(ChainError::WalletUnavailable) => "Wallet required".to_string(),
            MintError::Chain(ChainError::Rpc(message)) => format!("Mint failed: {}", message),
            other => other.to_string(),
        }
    }
}

pub(crate) fn connect_message(err: &ChainError) -> String {
    match err {
        ChainError::WalletUnavailable => "Wallet required".to_string(),
        ChainError::UserRejected { .. } => "Connection rejected".to_string(),
        other => format!("Connection failed: {}", other),
    }
}

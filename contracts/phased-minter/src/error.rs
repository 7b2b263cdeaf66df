use cosmwasm_std::{Coin, StdError, Uint128};
use cw_utils::PaymentError;
use phase_engine::{ConfigurationError, Phase};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Payment error")]
    PaymentError(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("{phase} mint has not started yet")]
    PhaseNotStarted { phase: Phase, start_time: u64 },

    #[error("{phase} mint has ended")]
    PhaseEnded { phase: Phase, end_time: u64 },

    #[error("Nothing can be minted before the whitelist phase")]
    MintingNotStarted {},

    #[error("Address is not on the {phase} whitelist")]
    NotWhitelisted { phase: Phase },

    #[error("Address already minted in the {phase} phase")]
    AlreadyMinted { phase: Phase },

    #[error("No tokens left to mint")]
    SoldOut {},

    #[error("Insufficient payment")]
    InsufficientPayment { expected: Coin, sent: Uint128 },

    #[error("Invalid max supply")]
    InvalidMaxSupply {},

    #[error("Invalid royalty ratio")]
    InvalidRoyaltyRatio {},

    #[error("Token {token_id} does not exist")]
    TokenNotFound { token_id: u32 },
}

impl From<ContractError> for StdError {
    fn from(err: ContractError) -> StdError {
        StdError::generic_err(err.to_string())
    }
}

use std::fmt;

use async_trait::async_trait;
use cosmwasm_std::Coin;
use phase_engine::{Phase, SaleConfig};

use crate::error::ChainError;

/// Identifier of a submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Network the wallet is asked to switch to (or add) before minting.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkParams {
    pub chain_id: u64,
    pub chain_name: Option<String>,
    pub rpc_url: Option<String>,
    pub block_explorer_url: Option<String>,
}

impl NetworkParams {
    pub fn from_config(config: &SaleConfig) -> Option<Self> {
        config.chain_id.map(|chain_id| NetworkParams {
            chain_id,
            chain_name: config.chain_name.clone(),
            rpc_url: config.rpc_url.clone(),
            block_explorer_url: config.block_explorer_url.clone(),
        })
    }
}

/// Read side of the sale contract.
#[async_trait(?Send)]
pub trait SaleContract {
    async fn mint_price(&self, phase: Phase) -> Result<Coin, ChainError>;
    async fn total_supply(&self) -> Result<u32, ChainError>;
    async fn max_supply(&self) -> Result<u32, ChainError>;
    async fn is_whitelisted(&self, address: &str, phase: Phase) -> Result<bool, ChainError>;
    async fn has_minted(&self, address: &str, phase: Phase) -> Result<bool, ChainError>;
}

/// Wallet provider capability. Signing and submission happen here; the
/// contract call for `phase` is chosen by the implementation.
#[async_trait(?Send)]
pub trait Wallet {
    async fn connect(&self) -> Result<String, ChainError>;
    async fn switch_network(&self, network: &NetworkParams) -> Result<(), ChainError>;
    async fn submit_mint(&self, phase: Phase, value: Coin) -> Result<TxHash, ChainError>;
    async fn wait_for_confirmation(&self, tx: &TxHash) -> Result<(), ChainError>;
}

/// Chain access handed to a panel instead of process-wide singletons.
pub struct ChainContext<C, W> {
    pub contract: C,
    pub wallet: W,
}

impl<C: SaleContract, W: Wallet> ChainContext<C, W> {
    pub fn new(contract: C, wallet: W) -> Self {
        ChainContext { contract, wallet }
    }
}

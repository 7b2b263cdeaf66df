use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use cosmwasm_std::{Addr, Coin};
use cw_multi_test::{App, Executor};
use mint_panel::{ChainError, NetworkParams, SaleContract, TxHash, Wallet};
use phase_engine::Phase;
use phased_minter::error::ContractError;
use phased_minter::msg::{ExecuteMsg, QueryMsg};

/// Contract reads and a signing wallet backed by a multi-test `App`.
/// Transactions execute synchronously, so confirmation is immediate.
#[derive(Clone)]
pub struct AppChain {
    pub app: Rc<RefCell<App>>,
    pub minter: Addr,
    pub sender: Addr,
}

impl AppChain {
    pub fn new(app: App, minter: Addr, sender: Addr) -> Self {
        AppChain {
            app: Rc::new(RefCell::new(app)),
            minter,
            sender,
        }
    }

    fn query<T: serde::de::DeserializeOwned>(&self, msg: &QueryMsg) -> Result<T, ChainError> {
        self.app
            .borrow()
            .wrap()
            .query_wasm_smart(&self.minter, msg)
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }
}

#[async_trait(?Send)]
impl SaleContract for AppChain {
    async fn mint_price(&self, phase: Phase) -> Result<Coin, ChainError> {
        let msg = match phase {
            Phase::Whitelist1 => QueryMsg::WlMintPrice {},
            Phase::Fcfs => QueryMsg::FcfsMintPrice {},
            Phase::Public => QueryMsg::PublicMintPrice {},
            Phase::Waiting => return Err(ChainError::Rpc("no price while waiting".to_string())),
        };
        self.query(&msg)
    }

    async fn total_supply(&self) -> Result<u32, ChainError> {
        self.query(&QueryMsg::TotalSupply {})
    }

    async fn max_supply(&self) -> Result<u32, ChainError> {
        self.query(&QueryMsg::MaxSupply {})
    }

    async fn is_whitelisted(&self, address: &str, phase: Phase) -> Result<bool, ChainError> {
        let address = address.to_string();
        match phase {
            Phase::Whitelist1 => self.query(&QueryMsg::IsWhitelist1 { address }),
            Phase::Fcfs => self.query(&QueryMsg::IsWhitelist2 { address }),
            _ => Ok(false),
        }
    }

    async fn has_minted(&self, address: &str, phase: Phase) -> Result<bool, ChainError> {
        let address = address.to_string();
        match phase {
            Phase::Whitelist1 => self.query(&QueryMsg::HasMintedWl { address }),
            Phase::Fcfs => self.query(&QueryMsg::HasMintedFcfs { address }),
            Phase::Public => self.query(&QueryMsg::HasMintedPublic { address }),
            Phase::Waiting => Ok(false),
        }
    }
}

#[async_trait(?Send)]
impl Wallet for AppChain {
    async fn connect(&self) -> Result<String, ChainError> {
        Ok(self.sender.to_string())
    }

    async fn switch_network(&self, _network: &NetworkParams) -> Result<(), ChainError> {
        Ok(())
    }

    async fn submit_mint(&self, phase: Phase, value: Coin) -> Result<TxHash, ChainError> {
        let msg = match phase {
            Phase::Whitelist1 => ExecuteMsg::MintWl {},
            Phase::Fcfs => ExecuteMsg::MintFcfs {},
            Phase::Public => ExecuteMsg::MintPublic {},
            Phase::Waiting => {
                return Err(ChainError::Reverted {
                    reason: ContractError::MintingNotStarted {}.to_string(),
                })
            }
        };
        let res = self
            .app
            .borrow_mut()
            .execute_contract(self.sender.clone(), self.minter.clone(), &msg, &[value])
            .map_err(|error| {
                match error
                    .source()
                    .and_then(|source| source.downcast_ref::<ContractError>())
                {
                    Some(reason) => ChainError::Reverted {
                        reason: reason.to_string(),
                    },
                    None => ChainError::Rpc(error.to_string()),
                }
            })?;

        let token_id = res
            .events
            .iter()
            .flat_map(|event| event.attributes.iter())
            .find(|attribute| attribute.key == "token_id")
            .map(|attribute| attribute.value.clone())
            .unwrap_or_default();
        Ok(TxHash(format!("mint-{}", token_id)))
    }

    async fn wait_for_confirmation(&self, _tx: &TxHash) -> Result<(), ChainError> {
        Ok(())
    }
}

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Decimal, Empty, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Item, Map};
use phase_engine::{MintPrices, Phase, SaleTimes};

use crate::error::ContractError;

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 500;

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub payment_collector: Addr,
    pub name: String,
    pub symbol: String,
    pub times: SaleTimes,
    pub mint_prices: MintPrices,
    pub max_supply: u32,
    pub base_uri: String,
    pub not_revealed_uri: String,
    pub revealed: bool,
    pub royalty_receiver: Addr,
    pub royalty_ratio: Decimal,
}

/// Addresses allowed to mint in one gated phase.
pub struct WhitelistStore<'a>(Map<'a, Addr, Empty>);
impl<'a> WhitelistStore<'a> {
    pub const fn new(storage_key: &'a str) -> Self {
        WhitelistStore(Map::new(storage_key))
    }

    pub fn replace(&self, store: &mut dyn Storage, addresses: &[Addr]) -> StdResult<()> {
        self.0.clear(store);
        addresses
            .iter()
            .try_for_each(|address| self.0.save(store, address.clone(), &Empty {}))
    }

    pub fn is_member(&self, store: &dyn Storage, address: &Addr) -> bool {
        self.0.has(store, address.clone())
    }

    pub fn members(
        &self,
        store: &dyn Storage,
        start_after: Option<Addr>,
        limit: Option<u32>,
    ) -> StdResult<Vec<String>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
        let start: Option<Bound<Addr>> = start_after.map(Bound::exclusive);
        self.0
            .keys(store, start, None, Order::Ascending)
            .take(limit)
            .map(|address| address.map(String::from))
            .collect()
    }
}

/// One-shot mint flags, keyed by minter and phase. Never cleared.
pub struct PhaseMints<'a>(Map<'a, (Addr, &'a str), Empty>);
impl<'a> PhaseMints<'a> {
    pub const fn new(storage_key: &'a str) -> Self {
        PhaseMints(Map::new(storage_key))
    }

    pub fn has_minted(&self, store: &dyn Storage, address: &Addr, phase: Phase) -> bool {
        self.0.has(store, (address.clone(), phase.as_str()))
    }

    pub fn record_mint(
        &self,
        store: &mut dyn Storage,
        address: &Addr,
        phase: Phase,
    ) -> Result<(), ContractError> {
        if self.has_minted(store, address, phase) {
            return Err(ContractError::AlreadyMinted { phase });
        }
        self.0
            .save(store, (address.clone(), phase.as_str()), &Empty {})?;
        Ok(())
    }
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const TOTAL_SUPPLY: Item<u32> = Item::new("total_supply");
// Token id to owner, ids start at 0
pub const TOKEN_OWNERS: Map<u32, Addr> = Map::new("token_owners");
pub const WHITELIST_1: WhitelistStore = WhitelistStore::new("whitelist_1");
pub const WHITELIST_2: WhitelistStore = WhitelistStore::new("whitelist_2");
pub const PHASE_MINTS: PhaseMints = PhaseMints::new("phase_mints");

/// The list that gates `phase`, if any. FCFS is gated by the second list.
pub fn whitelist_for(phase: Phase) -> Option<WhitelistStore<'static>> {
    match phase {
        Phase::Whitelist1 => Some(WHITELIST_1),
        Phase::Fcfs => Some(WHITELIST_2),
        Phase::Waiting | Phase::Public => None,
    }
}

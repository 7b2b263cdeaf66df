use cosmwasm_std::{Addr, Api, Decimal, StdResult, Uint128};
use phase_engine::{Phase, SaleTimes};

use crate::error::ContractError;
use crate::state::Config;

/// Addresses are compared lowercase, so they are validated and stored that way.
pub fn normalize_address(api: &dyn Api, address: &str) -> StdResult<Addr> {
    api.addr_validate(&address.trim().to_lowercase())
}

pub fn normalize_addresses(api: &dyn Api, addresses: &[String]) -> StdResult<Vec<Addr>> {
    addresses
        .iter()
        .map(|address| normalize_address(api, address))
        .collect()
}

/// Errors unless `now` falls inside the window of `phase`.
pub fn check_phase_window(times: &SaleTimes, phase: Phase, now: u64) -> Result<(), ContractError> {
    let start_time = times
        .start_of(phase)
        .ok_or(ContractError::MintingNotStarted {})?;
    if now < start_time {
        return Err(ContractError::PhaseNotStarted { phase, start_time });
    }
    if let Some(end_time) = times.end_of(phase) {
        if now >= end_time {
            return Err(ContractError::PhaseEnded { phase, end_time });
        }
    }
    Ok(())
}

pub fn check_royalty_ratio(royalty_ratio: Decimal) -> Result<(), ContractError> {
    if royalty_ratio > Decimal::one() {
        return Err(ContractError::InvalidRoyaltyRatio {});
    }
    Ok(())
}

/// Royalty owed on a secondary sale, rounded down.
pub fn royalty_amount(sale_price: Uint128, royalty_ratio: Decimal) -> Uint128 {
    sale_price.mul_floor(royalty_ratio)
}

pub fn token_uri(config: &Config, token_id: u32) -> String {
    if config.revealed {
        format!("{}{}.json", config.base_uri, token_id)
    } else {
        config.not_revealed_uri.clone()
    }
}

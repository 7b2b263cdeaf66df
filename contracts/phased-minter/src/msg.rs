use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Decimal, Uint128};
use phase_engine::{MintPrices, Phase, SaleTimes};

use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: Option<String>,
    pub payment_collector: Option<String>,
    pub name: String,
    pub symbol: String,
    pub times: SaleTimes,
    pub whitelist1: Vec<String>,
    pub whitelist2: Vec<String>,
    pub mint_prices: MintPrices,
    pub max_supply: u32,
    // Token uri after reveal is base_uri + token_id + ".json"
    pub base_uri: String,
    pub not_revealed_uri: String,
    // Defaults to the sender
    pub royalty_receiver: Option<String>,
    pub royalty_ratio: Decimal,
}

#[cw_serde]
pub enum ExecuteMsg {
    MintWl {},
    MintFcfs {},
    MintPublic {},
    // Admin messages below are allowed at any time, including mid-phase
    SetMintPrices {
        mint_prices: MintPrices,
    },
    SetTimes {
        times: SaleTimes,
    },
    // Replaces the whole list
    SetWhitelist1 {
        addresses: Vec<String>,
    },
    SetWhitelist2 {
        addresses: Vec<String>,
    },
    Reveal {},
    UpdateAdmin {
        admin: String,
    },
    UpdatePaymentCollector {
        payment_collector: String,
    },
    SetRoyalty {
        royalty_receiver: String,
        royalty_ratio: Decimal,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(TimesResponse)]
    Times {},
    #[returns(Phase)]
    ActivePhase {},
    #[returns(Coin)]
    WlMintPrice {},
    #[returns(Coin)]
    FcfsMintPrice {},
    #[returns(Coin)]
    PublicMintPrice {},
    #[returns(u32)]
    TotalSupply {},
    #[returns(u32)]
    MaxSupply {},
    #[returns(bool)]
    IsWhitelist1 { address: String },
    #[returns(bool)]
    IsWhitelist2 { address: String },
    #[returns(bool)]
    HasMintedWl { address: String },
    #[returns(bool)]
    HasMintedFcfs { address: String },
    #[returns(bool)]
    HasMintedPublic { address: String },
    #[returns(bool)]
    Revealed {},
    #[returns(String)]
    TokenUri { token_id: u32 },
    #[returns(Addr)]
    OwnerOf { token_id: u32 },
    #[returns(MembersResponse)]
    Whitelist1Members {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(MembersResponse)]
    Whitelist2Members {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(RoyaltyInfoResponse)]
    RoyaltyInfo { sale_price: Uint128 },
}

#[cw_serde]
pub struct TimesResponse {
    pub block_time: u64,
    pub wl_start_time: u64,
    pub fcfs_start_time: u64,
    pub public_start_time: u64,
}

#[cw_serde]
pub struct MembersResponse {
    pub members: Vec<String>,
}

#[cw_serde]
pub struct RoyaltyInfoResponse {
    pub address: String,
    pub royalty_amount: Uint128,
}

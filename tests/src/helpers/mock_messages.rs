use cosmwasm_std::{coin, Decimal};
use phase_engine::{MintPrices, SaleTimes};
use phased_minter::msg::InstantiateMsg;

pub const WL_START_TIME: u64 = 1_000;
pub const FCFS_START_TIME: u64 = 2_000;
pub const PUBLIC_START_TIME: u64 = 3_000;

pub fn return_mint_prices() -> MintPrices {
    MintPrices {
        wl: coin(1_000_000, "uflix"),
        fcfs: coin(2_000_000, "uflix"),
        public: coin(3_000_000, "uflix"),
    }
}

pub fn return_minter_instantiate_msg() -> InstantiateMsg {
    InstantiateMsg {
        admin: Some("admin".to_string()),
        payment_collector: Some("collector".to_string()),
        name: "Phased Collection".to_string(),
        symbol: "PHC".to_string(),
        times: SaleTimes::new(WL_START_TIME, FCFS_START_TIME, PUBLIC_START_TIME),
        whitelist1: vec!["alice".to_string()],
        whitelist2: vec!["bob".to_string()],
        mint_prices: return_mint_prices(),
        max_supply: 50,
        base_uri: "ipfs://collection/".to_string(),
        not_revealed_uri: "ipfs://hidden/hidden.json".to_string(),
        royalty_receiver: Some("creator".to_string()),
        royalty_ratio: Decimal::percent(5),
    }
}

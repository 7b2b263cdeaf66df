use cosmwasm_std::{Addr, BlockInfo, Coin, Timestamp, Uint128};
use cw_multi_test::{App, BankSudo, Executor, SudoMsg};
use phased_minter::msg::{InstantiateMsg, QueryMsg};

pub fn mint_to_address(app: &mut App, to_address: String, amount: Vec<Coin>) {
    app.sudo(SudoMsg::Bank(BankSudo::Mint { to_address, amount }))
        .unwrap();
}

pub fn set_block_time(app: &mut App, seconds: u64) {
    app.set_block(BlockInfo {
        chain_id: "test_1".to_string(),
        height: 1_000 + seconds,
        time: Timestamp::from_seconds(seconds),
    });
}

pub fn instantiate_minter(
    app: &mut App,
    code_id: u64,
    sender: &Addr,
    msg: &InstantiateMsg,
) -> Addr {
    app.instantiate_contract(code_id, sender.clone(), msg, &[], "phased-minter", None)
        .unwrap()
}

pub fn query_uflix_balance(app: &App, address: &Addr) -> Uint128 {
    app.wrap()
        .query_balance(address.to_string(), "uflix".to_string())
        .unwrap()
        .amount
}

pub fn query_total_supply(app: &App, minter: &Addr) -> u32 {
    app.wrap()
        .query_wasm_smart(minter, &QueryMsg::TotalSupply {})
        .unwrap()
}

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, Decimal, Deps, DepsMut, Env,
    MessageInfo, Response, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_utils::{may_pay, nonpayable};
use phase_engine::{classify_phase, MintPrices, Phase, SaleTimes};

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, InstantiateMsg, MembersResponse, QueryMsg, RoyaltyInfoResponse, TimesResponse,
};
use crate::state::{
    whitelist_for, Config, WhitelistStore, CONFIG, PHASE_MINTS, TOKEN_OWNERS, TOTAL_SUPPLY,
    WHITELIST_1, WHITELIST_2,
};
use crate::utils::{
    check_phase_window, check_royalty_ratio, normalize_address, normalize_addresses,
    royalty_amount, token_uri,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:phased-minter";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    nonpayable(&info)?;

    msg.times.check_integrity()?;
    msg.mint_prices.check_integrity()?;
    if msg.max_supply == 0 {
        return Err(ContractError::InvalidMaxSupply {});
    }
    check_royalty_ratio(msg.royalty_ratio)?;

    let admin = match msg.admin {
        Some(admin) => normalize_address(deps.api, &admin)?,
        None => info.sender.clone(),
    };
    let payment_collector = match msg.payment_collector {
        Some(collector) => normalize_address(deps.api, &collector)?,
        None => info.sender.clone(),
    };
    let royalty_receiver = match msg.royalty_receiver {
        Some(receiver) => normalize_address(deps.api, &receiver)?,
        None => info.sender.clone(),
    };

    let whitelist1 = normalize_addresses(deps.api, &msg.whitelist1)?;
    let whitelist2 = normalize_addresses(deps.api, &msg.whitelist2)?;
    WHITELIST_1.replace(deps.storage, &whitelist1)?;
    WHITELIST_2.replace(deps.storage, &whitelist2)?;

    let config = Config {
        admin,
        payment_collector,
        name: msg.name,
        symbol: msg.symbol,
        times: msg.times,
        mint_prices: msg.mint_prices,
        max_supply: msg.max_supply,
        base_uri: msg.base_uri,
        not_revealed_uri: msg.not_revealed_uri,
        revealed: false,
        royalty_receiver,
        royalty_ratio: msg.royalty_ratio,
    };
    CONFIG.save(deps.storage, &config)?;
    TOTAL_SUPPLY.save(deps.storage, &0)?;

    let res = Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("max_supply", config.max_supply.to_string())
        .add_attribute("whitelist1_size", whitelist1.len().to_string())
        .add_attribute("whitelist2_size", whitelist2.len().to_string());
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::MintWl {} => execute_mint(deps, env, info, Phase::Whitelist1),
        ExecuteMsg::MintFcfs {} => execute_mint(deps, env, info, Phase::Fcfs),
        ExecuteMsg::MintPublic {} => execute_mint(deps, env, info, Phase::Public),
        ExecuteMsg::SetMintPrices { mint_prices } => {
            execute_set_mint_prices(deps, info, mint_prices)
        }
        ExecuteMsg::SetTimes { times } => execute_set_times(deps, info, times),
        ExecuteMsg::SetWhitelist1 { addresses } => {
            execute_set_whitelist(deps, info, Phase::Whitelist1, WHITELIST_1, addresses)
        }
        ExecuteMsg::SetWhitelist2 { addresses } => {
            execute_set_whitelist(deps, info, Phase::Fcfs, WHITELIST_2, addresses)
        }
        ExecuteMsg::Reveal {} => execute_reveal(deps, info),
        ExecuteMsg::UpdateAdmin { admin } => execute_update_admin(deps, info, admin),
        ExecuteMsg::UpdatePaymentCollector { payment_collector } => {
            execute_update_payment_collector(deps, info, payment_collector)
        }
        ExecuteMsg::SetRoyalty {
            royalty_receiver,
            royalty_ratio,
        } => execute_set_royalty(deps, info, royalty_receiver, royalty_ratio),
    }
}

pub fn execute_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    phase: Phase,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let now = env.block.time.seconds();

    // Window first so callers learn whether the phase is upcoming or over
    check_phase_window(&config.times, phase, now)?;

    if let Some(whitelist) = whitelist_for(phase) {
        if !whitelist.is_member(deps.storage, &info.sender) {
            return Err(ContractError::NotWhitelisted { phase });
        }
    }
    if PHASE_MINTS.has_minted(deps.storage, &info.sender, phase) {
        return Err(ContractError::AlreadyMinted { phase });
    }

    let token_id = TOTAL_SUPPLY.load(deps.storage)?;
    if token_id >= config.max_supply {
        return Err(ContractError::SoldOut {});
    }

    let mint_price = phase
        .mint_price(&config.mint_prices)
        .cloned()
        .ok_or(ContractError::MintingNotStarted {})?;
    // Overpaying is accepted, everything received goes to the collector
    let paid = may_pay(&info, &mint_price.denom)?;
    if paid < mint_price.amount {
        return Err(ContractError::InsufficientPayment {
            expected: mint_price,
            sent: paid,
        });
    }

    PHASE_MINTS.record_mint(deps.storage, &info.sender, phase)?;
    TOKEN_OWNERS.save(deps.storage, token_id, &info.sender)?;
    TOTAL_SUPPLY.save(deps.storage, &(token_id + 1))?;

    let mut res = Response::new();
    if !paid.is_zero() {
        let bank_msg: CosmosMsg = CosmosMsg::Bank(BankMsg::Send {
            to_address: config.payment_collector.into_string(),
            amount: vec![Coin {
                denom: mint_price.denom,
                amount: paid,
            }],
        });
        res = res.add_message(bank_msg);
    }

    Ok(res
        .add_attribute("action", "mint")
        .add_attribute("phase", phase.as_str())
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("minter", info.sender))
}

fn load_config_as_admin(deps: Deps, info: &MessageInfo) -> Result<Config, ContractError> {
    nonpayable(info)?;
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }
    Ok(config)
}

pub fn execute_set_mint_prices(
    deps: DepsMut,
    info: MessageInfo,
    mint_prices: MintPrices,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_admin(deps.as_ref(), &info)?;
    mint_prices.check_integrity()?;
    config.mint_prices = mint_prices;
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "set_mint_prices")
        .add_attribute("wl_mint_price", config.mint_prices.wl.to_string())
        .add_attribute("fcfs_mint_price", config.mint_prices.fcfs.to_string())
        .add_attribute("public_mint_price", config.mint_prices.public.to_string());
    Ok(res)
}

pub fn execute_set_times(
    deps: DepsMut,
    info: MessageInfo,
    times: SaleTimes,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_admin(deps.as_ref(), &info)?;
    times.check_integrity()?;
    config.times = times;
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "set_times")
        .add_attribute("wl_start_time", times.wl_start_time.to_string())
        .add_attribute("fcfs_start_time", times.fcfs_start_time.to_string())
        .add_attribute("public_start_time", times.public_start_time.to_string());
    Ok(res)
}

pub fn execute_set_whitelist(
    deps: DepsMut,
    info: MessageInfo,
    phase: Phase,
    whitelist: WhitelistStore,
    addresses: Vec<String>,
) -> Result<Response, ContractError> {
    load_config_as_admin(deps.as_ref(), &info)?;
    let addresses = normalize_addresses(deps.api, &addresses)?;
    whitelist.replace(deps.storage, &addresses)?;

    let res = Response::new()
        .add_attribute("action", "set_whitelist")
        .add_attribute("phase", phase.as_str())
        .add_attribute("size", addresses.len().to_string());
    Ok(res)
}

pub fn execute_reveal(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = load_config_as_admin(deps.as_ref(), &info)?;
    config.revealed = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "reveal"))
}

pub fn execute_update_admin(
    deps: DepsMut,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_admin(deps.as_ref(), &info)?;
    config.admin = normalize_address(deps.api, &admin)?;
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "update_admin")
        .add_attribute("admin", config.admin);
    Ok(res)
}

pub fn execute_update_payment_collector(
    deps: DepsMut,
    info: MessageInfo,
    payment_collector: String,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_admin(deps.as_ref(), &info)?;
    config.payment_collector = normalize_address(deps.api, &payment_collector)?;
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "update_payment_collector")
        .add_attribute("payment_collector", config.payment_collector);
    Ok(res)
}

pub fn execute_set_royalty(
    deps: DepsMut,
    info: MessageInfo,
    royalty_receiver: String,
    royalty_ratio: Decimal,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_admin(deps.as_ref(), &info)?;
    check_royalty_ratio(royalty_ratio)?;
    config.royalty_receiver = normalize_address(deps.api, &royalty_receiver)?;
    config.royalty_ratio = royalty_ratio;
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "set_royalty")
        .add_attribute("royalty_receiver", config.royalty_receiver)
        .add_attribute("royalty_ratio", royalty_ratio.to_string());
    Ok(res)
}

// Implement Queries
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Times {} => to_json_binary(&query_times(deps, env)?),
        QueryMsg::ActivePhase {} => to_json_binary(&query_active_phase(deps, env)?),
        QueryMsg::WlMintPrice {} => to_json_binary(&query_mint_price(deps, Phase::Whitelist1)?),
        QueryMsg::FcfsMintPrice {} => to_json_binary(&query_mint_price(deps, Phase::Fcfs)?),
        QueryMsg::PublicMintPrice {} => to_json_binary(&query_mint_price(deps, Phase::Public)?),
        QueryMsg::TotalSupply {} => to_json_binary(&TOTAL_SUPPLY.load(deps.storage)?),
        QueryMsg::MaxSupply {} => to_json_binary(&CONFIG.load(deps.storage)?.max_supply),
        QueryMsg::IsWhitelist1 { address } => {
            to_json_binary(&query_is_whitelisted(deps, Phase::Whitelist1, address)?)
        }
        QueryMsg::IsWhitelist2 { address } => {
            to_json_binary(&query_is_whitelisted(deps, Phase::Fcfs, address)?)
        }
        QueryMsg::HasMintedWl { address } => {
            to_json_binary(&query_has_minted(deps, Phase::Whitelist1, address)?)
        }
        QueryMsg::HasMintedFcfs { address } => {
            to_json_binary(&query_has_minted(deps, Phase::Fcfs, address)?)
        }
        QueryMsg::HasMintedPublic { address } => {
            to_json_binary(&query_has_minted(deps, Phase::Public, address)?)
        }
        QueryMsg::Revealed {} => to_json_binary(&CONFIG.load(deps.storage)?.revealed),
        QueryMsg::TokenUri { token_id } => to_json_binary(&query_token_uri(deps, token_id)?),
        QueryMsg::OwnerOf { token_id } => to_json_binary(&query_owner_of(deps, token_id)?),
        QueryMsg::Whitelist1Members { start_after, limit } => to_json_binary(
            &query_whitelist_members(deps, Phase::Whitelist1, start_after, limit)?,
        ),
        QueryMsg::Whitelist2Members { start_after, limit } => to_json_binary(
            &query_whitelist_members(deps, Phase::Fcfs, start_after, limit)?,
        ),
        QueryMsg::RoyaltyInfo { sale_price } => {
            to_json_binary(&query_royalty_info(deps, sale_price)?)
        }
    }
}

fn query_times(deps: Deps, env: Env) -> Result<TimesResponse, ContractError> {
    let times = CONFIG.load(deps.storage)?.times;
    Ok(TimesResponse {
        block_time: env.block.time.seconds(),
        wl_start_time: times.wl_start_time,
        fcfs_start_time: times.fcfs_start_time,
        public_start_time: times.public_start_time,
    })
}

fn query_active_phase(deps: Deps, env: Env) -> Result<Phase, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(classify_phase(&config.times, env.block.time.seconds()))
}

fn query_mint_price(deps: Deps, phase: Phase) -> Result<Coin, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    phase
        .mint_price(&config.mint_prices)
        .cloned()
        .ok_or(ContractError::MintingNotStarted {})
}

fn query_is_whitelisted(deps: Deps, phase: Phase, address: String) -> Result<bool, ContractError> {
    let address = normalize_address(deps.api, &address)?;
    Ok(whitelist_for(phase)
        .map(|whitelist| whitelist.is_member(deps.storage, &address))
        .unwrap_or(false))
}

fn query_has_minted(deps: Deps, phase: Phase, address: String) -> Result<bool, ContractError> {
    let address = normalize_address(deps.api, &address)?;
    Ok(PHASE_MINTS.has_minted(deps.storage, &address, phase))
}

fn query_token_uri(deps: Deps, token_id: u32) -> Result<String, ContractError> {
    if !TOKEN_OWNERS.has(deps.storage, token_id) {
        return Err(ContractError::TokenNotFound { token_id });
    }
    let config = CONFIG.load(deps.storage)?;
    Ok(token_uri(&config, token_id))
}

fn query_owner_of(deps: Deps, token_id: u32) -> Result<Addr, ContractError> {
    TOKEN_OWNERS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::TokenNotFound { token_id })
}

fn query_whitelist_members(
    deps: Deps,
    phase: Phase,
    start_after: Option<String>,
    limit: Option<u32>,
) -> Result<MembersResponse, ContractError> {
    let start_after = start_after
        .map(|address| normalize_address(deps.api, &address))
        .transpose()?;
    let members = match whitelist_for(phase) {
        Some(whitelist) => whitelist.members(deps.storage, start_after, limit)?,
        None => Vec::new(),
    };
    Ok(MembersResponse { members })
}

fn query_royalty_info(
    deps: Deps,
    sale_price: Uint128,
) -> Result<RoyaltyInfoResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(RoyaltyInfoResponse {
        address: config.royalty_receiver.into_string(),
        royalty_amount: royalty_amount(sale_price, config.royalty_ratio),
    })
}

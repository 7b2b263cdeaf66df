use cosmwasm_std::{coin, Addr};
use cw_multi_test::{App, Executor};
use mint_panel::{ChainContext, FieldState, MintError, MintPanel, SaleContract, Wallet};
use phase_engine::{Phase, SaleConfig, Whitelist};
use phased_minter::msg::ExecuteMsg as MinterExecuteMsg;

use crate::helpers::app_chain::AppChain;
use crate::helpers::mock_messages::{
    return_minter_instantiate_msg, FCFS_START_TIME, PUBLIC_START_TIME, WL_START_TIME,
};
use crate::helpers::setup::setup;
use crate::helpers::utils::{instantiate_minter, query_total_supply, set_block_time};

fn sale_config(minter: &Addr) -> SaleConfig {
    SaleConfig {
        contract_address: minter.to_string(),
        wl_start_time: WL_START_TIME,
        fcfs_start_time: FCFS_START_TIME,
        public_start_time: PUBLIC_START_TIME,
        whitelist1: Whitelist::new(["alice"]),
        whitelist2: Whitelist::new(["bob"]),
        chain_id: None,
        chain_name: None,
        rpc_url: None,
        block_explorer_url: None,
    }
}

fn panel_for(
    app: App,
    minter: &Addr,
    sender: &Addr,
) -> (MintPanel<AppChain, AppChain>, AppChain) {
    let chain = AppChain::new(app, minter.clone(), sender.clone());
    let ctx = ChainContext::new(chain.clone(), chain.clone());
    (MintPanel::new(sale_config(minter), ctx), chain)
}

fn move_to(chain: &AppChain, seconds: u64) {
    set_block_time(&mut chain.app.borrow_mut(), seconds);
}

#[tokio::test]
async fn panel_mints_through_contract() {
    let res = setup();
    let creator = res.test_accounts.creator;
    let alice = res.test_accounts.alice;
    let mut app = res.app;
    let minter_address = instantiate_minter(
        &mut app,
        res.minter_code_id,
        &creator,
        &return_minter_instantiate_msg(),
    );
    let (panel, chain) = panel_for(app, &minter_address, &alice);

    panel.connect().await.unwrap();
    assert!(panel.tick(500));
    panel.refresh(500).await;
    let state = panel.state();
    assert_eq!(state.wl_price, FieldState::Ready(coin(1_000_000, "uflix")));
    assert_eq!(state.max_supply, FieldState::Ready(50));
    assert!(state.wallet_status.eligible_wl1);
    assert!(!panel.can_mint(500));
    assert_eq!(panel.mint(500).await, Err(MintError::NotStarted));

    // Config whitelists agree with the contract
    assert!(chain.is_whitelisted("alice", Phase::Whitelist1).await.unwrap());
    assert!(!chain.is_whitelisted("alice", Phase::Fcfs).await.unwrap());

    move_to(&chain, WL_START_TIME);
    assert!(panel.tick(WL_START_TIME));
    panel.refresh(WL_START_TIME).await;
    assert!(panel.can_mint(WL_START_TIME));

    let tx = panel.mint(WL_START_TIME).await.unwrap();
    assert_eq!(tx.to_string(), "mint-0");
    let state = panel.state();
    assert!(state.wallet_status.has_minted_wl1);
    assert_eq!(state.total_supply, FieldState::Ready(1));
    assert_eq!(state.status.as_deref(), Some("Mint successful!"));
    assert_eq!(query_total_supply(&chain.app.borrow(), &minter_address), 1);

    // Refused locally now that the contract reports the mint
    assert_eq!(
        panel.mint(WL_START_TIME + 1).await,
        Err(MintError::AlreadyMinted(Phase::Whitelist1))
    );

    // Alice is not on whitelist 2
    move_to(&chain, FCFS_START_TIME);
    panel.refresh(FCFS_START_TIME).await;
    assert_eq!(
        panel.mint(FCFS_START_TIME).await,
        Err(MintError::NotEligible(Phase::Fcfs))
    );

    move_to(&chain, PUBLIC_START_TIME);
    assert!(panel.tick(FCFS_START_TIME));
    assert!(panel.tick(PUBLIC_START_TIME));
    panel.refresh(PUBLIC_START_TIME).await;
    panel.mint(PUBLIC_START_TIME).await.unwrap();
    assert!(panel.state().wallet_status.has_minted_public);
    assert_eq!(panel.state().total_supply, FieldState::Ready(2));
}

#[tokio::test]
async fn contract_rejection_is_shown_verbatim() {
    let res = setup();
    let admin = res.test_accounts.admin;
    let creator = res.test_accounts.creator;
    let bob = res.test_accounts.bob;
    let mut app = res.app;
    let minter_address = instantiate_minter(
        &mut app,
        res.minter_code_id,
        &creator,
        &return_minter_instantiate_msg(),
    );

    let (panel, chain) = panel_for(app, &minter_address, &bob);
    panel.connect().await.unwrap();
    move_to(&chain, FCFS_START_TIME);
    panel.refresh(FCFS_START_TIME).await;
    assert_eq!(panel.state().wallet_status.listed_wl2, Some(true));
    assert!(panel.can_mint(FCFS_START_TIME));

    // The admin drops bob after the panel read the whitelist
    chain
        .app
        .borrow_mut()
        .execute_contract(
            admin,
            minter_address.clone(),
            &MinterExecuteMsg::SetWhitelist2 {
                addresses: vec!["carol".to_string()],
            },
            &[],
        )
        .unwrap();

    let error = panel.mint(FCFS_START_TIME).await.unwrap_err();
    assert!(matches!(error, MintError::Chain(_)));
    let state = panel.state();
    assert_eq!(
        state.status.as_deref(),
        Some("Address is not on the fcfs whitelist")
    );
    assert!(!state.minting);
    assert!(!state.wallet_status.has_minted_wl2);
    assert_eq!(state.total_supply, FieldState::Ready(0));

    // Reconciliation picked up the contract whitelist, config still lists bob
    assert!(state.wallet_status.eligible_wl2);
    assert_eq!(state.wallet_status.listed_wl2, Some(false));
    assert!(!panel.can_mint(FCFS_START_TIME));
    assert_eq!(
        panel.mint(FCFS_START_TIME).await,
        Err(MintError::NotEligible(Phase::Fcfs))
    );

    // Still usable once the phase moves on
    move_to(&chain, PUBLIC_START_TIME);
    panel.refresh(PUBLIC_START_TIME).await;
    panel.mint(PUBLIC_START_TIME).await.unwrap();
    assert_eq!(query_total_supply(&chain.app.borrow(), &minter_address), 1);
}

#[tokio::test]
async fn second_whitelist_mint_reverts_with_contract_text() {
    let res = setup();
    let creator = res.test_accounts.creator;
    let alice = res.test_accounts.alice;
    let mut app = res.app;
    let minter_address = instantiate_minter(
        &mut app,
        res.minter_code_id,
        &creator,
        &return_minter_instantiate_msg(),
    );
    let (panel, chain) = panel_for(app, &minter_address, &alice);
    panel.connect().await.unwrap();
    move_to(&chain, WL_START_TIME);
    panel.refresh(WL_START_TIME).await;
    panel.mint(WL_START_TIME).await.unwrap();

    // Bypass the local gate and submit straight through the wallet
    let error = chain
        .submit_mint(Phase::Whitelist1, coin(1_000_000, "uflix"))
        .await
        .unwrap_err();
    let error = MintError::from(error);
    assert_eq!(
        error.user_message(),
        "Address already minted in the whitelist1 phase"
    );
}

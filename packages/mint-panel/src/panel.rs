use std::cell::{Cell, RefCell};

use cosmwasm_std::Coin;
use phase_engine::{can_submit_mint, is_eligible, remaining_time, Countdown, Phase, SaleConfig};
use tracing::{debug, info, warn};

use crate::chain::{ChainContext, NetworkParams, SaleContract, TxHash, Wallet};
use crate::error::{connect_message, ChainError, MintError};
use crate::status::{FieldState, WalletMintStatus};

/// Phase, its price and the time left until the next boundary at a given
/// instant. `active_price` is `None` while waiting or before the price was
/// read. `countdown` is `None` once the public phase is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseState {
    pub phase: Phase,
    pub active_price: Option<Coin>,
    pub countdown: Option<Countdown>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelState {
    /// Phase seen on the last tick. `None` until the first tick.
    pub phase: Option<Phase>,
    pub address: Option<String>,
    pub wl_price: FieldState<Coin>,
    pub fcfs_price: FieldState<Coin>,
    pub public_price: FieldState<Coin>,
    pub total_supply: FieldState<u32>,
    pub max_supply: FieldState<u32>,
    pub wallet_status: WalletMintStatus,
    pub minting: bool,
    pub status: Option<String>,
}

impl PanelState {
    pub fn price_for(&self, phase: Phase) -> Option<&Coin> {
        match phase {
            Phase::Waiting => None,
            Phase::Whitelist1 => self.wl_price.ready(),
            Phase::Fcfs => self.fcfs_price.ready(),
            Phase::Public => self.public_price.ready(),
        }
    }
}

/// Client session for one sale. All chain access goes through `ctx`.
///
/// State lives in a `RefCell` and is never borrowed across an `.await`, so
/// concurrent calls on one task interleave only at await points.
pub struct MintPanel<C, W> {
    config: SaleConfig,
    network: Option<NetworkParams>,
    ctx: ChainContext<C, W>,
    state: RefCell<PanelState>,
    /// Bumped after every mint so older supply reads are dropped.
    supply_epoch: Cell<u64>,
}

impl<C: SaleContract, W: Wallet> MintPanel<C, W> {
    pub fn new(config: SaleConfig, ctx: ChainContext<C, W>) -> Self {
        let network = NetworkParams::from_config(&config);
        MintPanel {
            config,
            network,
            ctx,
            state: RefCell::new(PanelState::default()),
            supply_epoch: Cell::new(0),
        }
    }

    pub fn config(&self) -> &SaleConfig {
        &self.config
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PanelState {
        self.state.borrow().clone()
    }

    pub fn phase_state(&self, now: u64) -> PhaseState {
        let times = self.config.times();
        let phase = self.config.phase_at(now);
        PhaseState {
            phase,
            active_price: self.state.borrow().price_for(phase).cloned(),
            countdown: phase
                .next_boundary(&times)
                .map(|boundary| remaining_time(boundary, now)),
        }
    }

    /// Recomputes the phase. Returns true when it differs from the last tick.
    pub fn tick(&self, now: u64) -> bool {
        let phase = self.config.phase_at(now);
        let mut state = self.state.borrow_mut();
        if state.phase == Some(phase) {
            return false;
        }
        debug!(from = ?state.phase, to = %phase, now, "phase changed");
        state.phase = Some(phase);
        true
    }

    /// Re-reads prices and supply, and the wallet status of the current
    /// phase when a wallet is connected. Each field settles independently.
    /// A supply read that started before a mint finished is dropped.
    pub async fn refresh(&self, now: u64) {
        let epoch = self.supply_epoch.get();
        let contract = &self.ctx.contract;
        let (wl, fcfs, public, total, max) = tokio::join!(
            contract.mint_price(Phase::Whitelist1),
            contract.mint_price(Phase::Fcfs),
            contract.mint_price(Phase::Public),
            contract.total_supply(),
            contract.max_supply(),
        );
        for (field, result) in [
            ("wl_price", &wl),
            ("fcfs_price", &fcfs),
            ("public_price", &public),
        ] {
            if let Err(err) = result {
                warn!(field, error = %err, "contract read failed");
            }
        }
        if let Err(err) = &total {
            warn!(field = "total_supply", error = %err, "contract read failed");
        }
        if let Err(err) = &max {
            warn!(field = "max_supply", error = %err, "contract read failed");
        }

        {
            let mut state = self.state.borrow_mut();
            state.wl_price = wl.into();
            state.fcfs_price = fcfs.into();
            state.public_price = public.into();
            state.max_supply = max.into();
            if self.supply_epoch.get() == epoch {
                state.total_supply = total.into();
            } else {
                debug!("stale total supply dropped");
            }
        }

        let phase = self.config.phase_at(now);
        if phase != Phase::Waiting {
            self.read_listed(&[phase]).await;
            self.read_minted(&[phase]).await;
        }
    }

    /// Recomputes eligibility for the connected address and re-reads its
    /// contract whitelist membership and every minted flag.
    pub async fn refresh_wallet_status(&self) {
        let Some(address) = self.address() else {
            return;
        };
        {
            let mut state = self.state.borrow_mut();
            state.wallet_status.eligible_wl1 = self.config.whitelist1.contains(&address);
            state.wallet_status.eligible_wl2 = self.config.whitelist2.contains(&address);
        }
        self.read_listed(&[Phase::Whitelist1, Phase::Fcfs]).await;
        self.read_minted(&[Phase::Whitelist1, Phase::Fcfs, Phase::Public])
            .await;
    }

    pub async fn connect(&self) -> Result<String, ChainError> {
        let address = match self.ctx.wallet.connect().await {
            Ok(address) => address,
            Err(err) => {
                warn!(error = %err, "wallet connection failed");
                self.set_status(connect_message(&err));
                return Err(err);
            }
        };

        if let Some(network) = &self.network {
            if let Err(err) = self.ctx.wallet.switch_network(network).await {
                warn!(chain_id = network.chain_id, error = %err, "network switch failed");
                self.set_status(connect_message(&err));
                return Err(err);
            }
        }

        info!(address = %address, "wallet connected");
        {
            let mut state = self.state.borrow_mut();
            state.address = Some(address.clone());
            state.wallet_status = WalletMintStatus::default();
            state.status = None;
        }
        self.refresh_wallet_status().await;
        Ok(address)
    }

    pub fn disconnect(&self) {
        let mut state = self.state.borrow_mut();
        state.address = None;
        state.wallet_status = WalletMintStatus::default();
        state.status = None;
    }

    /// Whether the mint action should be enabled at `now`.
    pub fn can_mint(&self, now: u64) -> bool {
        let state = self.state.borrow();
        !state.minting && self.check_gate(&state, self.config.phase_at(now)).is_ok()
    }

    /// Submits one mint for the phase active at `now` and waits for it.
    ///
    /// Only one mint runs at a time; a call made while another is
    /// outstanding returns [`MintError::InProgress`] and leaves the state
    /// untouched. Whatever the outcome, minted flags and supply are re-read
    /// from the contract afterwards. Nothing is retried.
    pub async fn mint(&self, now: u64) -> Result<TxHash, MintError> {
        let phase = self.config.phase_at(now);
        let price = {
            let mut state = self.state.borrow_mut();
            if state.minting {
                return Err(MintError::InProgress);
            }
            match self.check_gate(&state, phase) {
                Ok(price) => {
                    state.minting = true;
                    state.status = Some(format!("Minting ({})...", phase));
                    price
                }
                Err(err) => {
                    debug!(phase = %phase, error = %err, "mint refused locally");
                    state.status = Some(err.user_message());
                    return Err(err);
                }
            }
        };

        debug!(phase = %phase, price = %price, "submitting mint");
        let result = self.submit(phase, price).await;
        self.reconcile(phase).await;

        let mut state = self.state.borrow_mut();
        state.minting = false;
        match &result {
            Ok(tx) => {
                info!(phase = %phase, tx = %tx, "mint confirmed");
                state.status = Some("Mint successful!".to_string());
            }
            Err(err) => {
                warn!(phase = %phase, error = %err, "mint failed");
                state.status = Some(err.user_message());
            }
        }
        result
    }

    async fn submit(&self, phase: Phase, price: Coin) -> Result<TxHash, MintError> {
        let tx = self.ctx.wallet.submit_mint(phase, price).await?;
        debug!(tx = %tx, "waiting for confirmation");
        self.ctx.wallet.wait_for_confirmation(&tx).await?;
        Ok(tx)
    }

    async fn reconcile(&self, phase: Phase) {
        self.supply_epoch.set(self.supply_epoch.get() + 1);
        self.read_listed(&[phase]).await;
        self.read_minted(&[phase]).await;
        let total = self.ctx.contract.total_supply().await;
        if let Err(err) = &total {
            warn!(field = "total_supply", error = %err, "contract read failed");
        }
        self.state.borrow_mut().total_supply = total.into();
    }

    fn check_gate(&self, state: &PanelState, phase: Phase) -> Result<Coin, MintError> {
        let address = state.address.as_deref();
        let eligible = address.map_or(false, |address| {
            is_eligible(phase, address, &self.config)
                && state.wallet_status.listed(phase) != Some(false)
        });
        let minted = state.wallet_status.has_minted(phase);

        if !can_submit_mint(phase, eligible, minted, address.is_some()) {
            return Err(if address.is_none() {
                MintError::NotConnected
            } else if phase == Phase::Waiting {
                MintError::NotStarted
            } else if !eligible {
                MintError::NotEligible(phase)
            } else {
                MintError::AlreadyMinted(phase)
            });
        }

        state
            .price_for(phase)
            .cloned()
            .ok_or(MintError::PriceUnavailable(phase))
    }

    async fn read_listed(&self, phases: &[Phase]) {
        let Some(address) = self.address() else {
            return;
        };
        for &phase in phases {
            if !matches!(phase, Phase::Whitelist1 | Phase::Fcfs) {
                continue;
            }
            match self.ctx.contract.is_whitelisted(&address, phase).await {
                Ok(listed) => {
                    let mut state = self.state.borrow_mut();
                    if state.address.as_deref() == Some(address.as_str()) {
                        if state.wallet_status.listed(phase) != Some(listed) {
                            debug!(phase = %phase, address = %address, listed, "contract whitelist changed");
                        }
                        state.wallet_status.set_listed(phase, listed);
                    }
                }
                Err(err) => {
                    warn!(phase = %phase, address = %address, error = %err, "whitelist read failed");
                }
            }
        }
    }

    async fn read_minted(&self, phases: &[Phase]) {
        let Some(address) = self.address() else {
            return;
        };
        for &phase in phases {
            match self.ctx.contract.has_minted(&address, phase).await {
                Ok(minted) => {
                    let mut state = self.state.borrow_mut();
                    // the wallet may have changed while the read was in flight
                    if state.address.as_deref() == Some(address.as_str()) {
                        state.wallet_status.set_minted(phase, minted);
                    }
                }
                Err(err) => {
                    warn!(phase = %phase, address = %address, error = %err, "minted flag read failed");
                }
            }
        }
    }

    fn address(&self) -> Option<String> {
        self.state.borrow().address.clone()
    }

    fn set_status(&self, status: String) {
        self.state.borrow_mut().status = Some(status);
    }
}

use std::fmt;

use phase_engine::Phase;

/// A value read from the chain. Each field loads and fails on its own.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum FieldState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed,
}

impl<T> FieldState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            FieldState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FieldState::Loading)
    }
}

impl<T, E> From<Result<T, E>> for FieldState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => FieldState::Ready(value),
            Err(_) => FieldState::Failed,
        }
    }
}

impl<T: fmt::Display> fmt::Display for FieldState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldState::Loading => f.write_str("Loading..."),
            FieldState::Ready(value) => value.fmt(f),
            FieldState::Failed => f.write_str("Error!"),
        }
    }
}

/// Per-address mint status. Eligibility comes from the loaded config,
/// whitelist membership and minted flags from the contract.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct WalletMintStatus {
    pub eligible_wl1: bool,
    pub eligible_wl2: bool,
    /// Contract whitelist answers. `None` until read.
    pub listed_wl1: Option<bool>,
    pub listed_wl2: Option<bool>,
    pub has_minted_wl1: bool,
    pub has_minted_wl2: bool,
    pub has_minted_public: bool,
}

impl WalletMintStatus {
    /// Eligible by config unless the contract said otherwise.
    pub fn is_eligible(&self, phase: Phase) -> bool {
        let configured = match phase {
            Phase::Waiting => false,
            Phase::Whitelist1 => self.eligible_wl1,
            Phase::Fcfs => self.eligible_wl2,
            Phase::Public => true,
        };
        configured && self.listed(phase) != Some(false)
    }

    pub fn listed(&self, phase: Phase) -> Option<bool> {
        match phase {
            Phase::Whitelist1 => self.listed_wl1,
            Phase::Fcfs => self.listed_wl2,
            Phase::Waiting | Phase::Public => None,
        }
    }

    /// Records a whitelist answer from the contract. Unlike minted flags
    /// these follow the contract both ways.
    pub fn set_listed(&mut self, phase: Phase, listed: bool) {
        match phase {
            Phase::Whitelist1 => self.listed_wl1 = Some(listed),
            Phase::Fcfs => self.listed_wl2 = Some(listed),
            Phase::Waiting | Phase::Public => {}
        }
    }

    pub fn has_minted(&self, phase: Phase) -> bool {
        match phase {
            Phase::Waiting => false,
            Phase::Whitelist1 => self.has_minted_wl1,
            Phase::Fcfs => self.has_minted_wl2,
            Phase::Public => self.has_minted_public,
        }
    }

    /// Records a minted flag read from the contract. Flags only go from
    /// false to true.
    pub fn set_minted(&mut self, phase: Phase, minted: bool) {
        let flag = match phase {
            Phase::Waiting => return,
            Phase::Whitelist1 => &mut self.has_minted_wl1,
            Phase::Fcfs => &mut self.has_minted_wl2,
            Phase::Public => &mut self.has_minted_public,
        };
        *flag |= minted;
    }
}

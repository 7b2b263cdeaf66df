use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Coin;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigurationError {
    #[error("Sale times must satisfy wl_start_time < fcfs_start_time < public_start_time")]
    InvalidSaleTimes {},
    #[error("All mint prices must use the same denom")]
    MismatchedDenoms {},
}

/// One of the four mutually exclusive sale states.
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum Phase {
    Waiting,
    Whitelist1,
    Fcfs,
    Public,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Waiting,
        Phase::Whitelist1,
        Phase::Fcfs,
        Phase::Public,
    ];

    /// Stable key used for storage and response attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Waiting => "waiting",
            Phase::Whitelist1 => "whitelist1",
            Phase::Fcfs => "fcfs",
            Phase::Public => "public",
        }
    }

    /// Whether minting in this phase requires whitelist membership.
    pub fn is_gated(&self) -> bool {
        matches!(self, Phase::Whitelist1 | Phase::Fcfs)
    }

    /// Timestamp at which this phase gives way to the next one.
    /// Public never ends.
    pub fn next_boundary(&self, times: &SaleTimes) -> Option<u64> {
        match self {
            Phase::Waiting => Some(times.wl_start_time),
            Phase::Whitelist1 => Some(times.fcfs_start_time),
            Phase::Fcfs => Some(times.public_start_time),
            Phase::Public => None,
        }
    }

    /// The price bound to this phase. Nothing can be minted while waiting.
    pub fn mint_price<'a>(&self, prices: &'a MintPrices) -> Option<&'a Coin> {
        match self {
            Phase::Waiting => None,
            Phase::Whitelist1 => Some(&prices.wl),
            Phase::Fcfs => Some(&prices.fcfs),
            Phase::Public => Some(&prices.public),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Start timestamps of the three minting phases, in Unix seconds.
#[cw_serde]
#[derive(Copy, Eq)]
pub struct SaleTimes {
    pub wl_start_time: u64,
    pub fcfs_start_time: u64,
    pub public_start_time: u64,
}

impl SaleTimes {
    pub fn new(wl_start_time: u64, fcfs_start_time: u64, public_start_time: u64) -> Self {
        SaleTimes {
            wl_start_time,
            fcfs_start_time,
            public_start_time,
        }
    }

    pub fn check_integrity(&self) -> Result<(), ConfigurationError> {
        if self.wl_start_time >= self.fcfs_start_time
            || self.fcfs_start_time >= self.public_start_time
        {
            return Err(ConfigurationError::InvalidSaleTimes {});
        }
        Ok(())
    }

    /// Start of the window in which `phase` is active.
    pub fn start_of(&self, phase: Phase) -> Option<u64> {
        match phase {
            Phase::Waiting => None,
            Phase::Whitelist1 => Some(self.wl_start_time),
            Phase::Fcfs => Some(self.fcfs_start_time),
            Phase::Public => Some(self.public_start_time),
        }
    }

    /// Exclusive end of the window in which `phase` is active.
    pub fn end_of(&self, phase: Phase) -> Option<u64> {
        match phase {
            Phase::Public => None,
            other => other.next_boundary(self),
        }
    }
}

#[cw_serde]
pub struct MintPrices {
    pub wl: Coin,
    pub fcfs: Coin,
    pub public: Coin,
}

impl MintPrices {
    pub fn denom(&self) -> &str {
        &self.public.denom
    }

    pub fn check_integrity(&self) -> Result<(), ConfigurationError> {
        if self.wl.denom != self.public.denom || self.fcfs.denom != self.public.denom {
            return Err(ConfigurationError::MismatchedDenoms {});
        }
        Ok(())
    }
}

/// Classifies `now` into a sale phase. The checks run in order and the first
/// match wins, so the windows are half-open: `[wl, fcfs)` is Whitelist1,
/// `[fcfs, public)` is FCFS and everything from `public` on is Public.
///
/// Ordering of `times` is not checked here. If the times are not strictly
/// increasing the chain still returns the first matching arm, which has no
/// product meaning; callers validate with [`SaleTimes::check_integrity`].
pub fn classify_phase(times: &SaleTimes, now: u64) -> Phase {
    if now < times.wl_start_time {
        Phase::Waiting
    } else if now < times.fcfs_start_time {
        Phase::Whitelist1
    } else if now < times.public_start_time {
        Phase::Fcfs
    } else {
        Phase::Public
    }
}

/// Local gate for enabling the mint action. The contract stays authoritative.
pub fn can_submit_mint(
    phase: Phase,
    eligible: bool,
    has_minted_this_phase: bool,
    connected: bool,
) -> bool {
    connected && eligible && !has_minted_this_phase && phase != Phase::Waiting
}

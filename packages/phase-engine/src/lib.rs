pub mod config;
pub mod countdown;
pub mod phase;
pub mod whitelist;

pub use config::{ConfigError, SaleConfig};
pub use countdown::{remaining_time, Countdown};
pub use phase::{
    can_submit_mint, classify_phase, ConfigurationError, MintPrices, Phase, SaleTimes,
};
pub use whitelist::{is_eligible, Whitelist};

pub mod chain;
pub mod error;
pub mod panel;
pub mod schedule;
pub mod status;


pub use chain::{ChainContext, NetworkParams, SaleContract, TxHash, Wallet};
pub use error::{ChainError, MintError, PolicyError, USER_REJECTED_CODE};
pub use panel::{MintPanel, PanelState, PhaseState};
pub use schedule::{run_panel, unix_now, Due, RefreshPolicy, RefreshSchedule};
pub use status::{FieldState, WalletMintStatus};

//! Domain layer - network registry, wallet session and read-only queries
//!
//! Everything here is transport-agnostic: the wallet and the chain client
//! are reached through the `WalletConnector`/`WalletHandle` and
//! `ChainReader` traits, implemented in `infrastructure`.

mod error;
pub mod network;
pub mod query;
pub mod session;
mod units;

pub use error::PulseError;
pub use network::{NetworkConfig, NetworkKind, NetworkRegistry};
pub use query::{
    read_address_balance, read_basics, read_gas_snapshot, Basics, BlockHeader, ChainReader,
    FeeEstimate, GasSnapshot,
};
pub use session::{connect, AppMeta, ChainCheck, Session, WalletConnector, WalletHandle};
pub use units::{format_ether, is_address, parse_address, parse_hex_u64};

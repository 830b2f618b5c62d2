//! Ethereum infrastructure - Alloy reader and JSON-RPC wallet implementations

mod provider;
pub(crate) mod types;
mod wallet;

pub use provider::AlloyReader;
pub use wallet::JsonRpcWalletConnector;

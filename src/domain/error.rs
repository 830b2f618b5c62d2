//! Error taxonomy for user-triggered operations

use thiserror::Error;

/// Failure of a connect or query action.
///
/// Every variant ends up as a single `Error (<op>): <message>` line in the
/// output region; nothing is retried.
#[derive(Debug, Error)]
pub enum PulseError {
    /// Wallet answered `eth_requestAccounts` with an empty list
    #[error("No address returned from eth_requestAccounts.")]
    NoAccount,

    /// Address text failed format or checksum validation
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    /// Balance check with an empty input and no session to fall back on
    #[error("Provide an address or connect first.")]
    MissingAddress,

    /// Pulse requested before any wallet session exists
    #[error("Connect first.")]
    NotConnected,

    /// Wallet transport or handshake failure
    #[error("wallet request failed: {0:#}")]
    Wallet(#[source] anyhow::Error),

    /// Chain RPC transport or decoding failure
    #[error("{0:#}")]
    Query(#[source] anyhow::Error),
}

impl PulseError {
    pub fn query(err: impl Into<anyhow::Error>) -> Self {
        PulseError::Query(err.into())
    }

    pub fn wallet(err: impl Into<anyhow::Error>) -> Self {
        PulseError::Wallet(err.into())
    }
}

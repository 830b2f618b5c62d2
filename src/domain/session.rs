//! Wallet session: capability traits and the connect handshake

use std::fmt;
use std::sync::Arc;

use super::network::NetworkConfig;
use super::units::parse_hex_u64;
use super::PulseError;

/// Application identity presented to the wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMeta {
    pub name: String,
    pub logo_url: String,
}

impl Default for AppMeta {
    fn default() -> Self {
        Self {
            name: "Base Pulse (Built for Base)".to_string(),
            logo_url: "https://base.org/favicon.ico".to_string(),
        }
    }
}

/// Narrow capability over a connected wallet
#[async_trait::async_trait]
pub trait WalletHandle: Send + Sync + 'static {
    /// `eth_requestAccounts`
    async fn request_accounts(&self) -> anyhow::Result<Vec<String>>;

    /// `eth_chainId`, as the hex string the wallet reports
    async fn request_chain_id(&self) -> anyhow::Result<String>;

    /// Arbitrary request scoped to the handle's endpoint
    async fn request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> anyhow::Result<serde_json::Value>;

    /// Endpoint display name
    fn endpoint_name(&self) -> String;
}

/// Produces wallet handles scoped to an app and a target network
#[async_trait::async_trait]
pub trait WalletConnector: Send + Sync + 'static {
    async fn open(
        &self,
        app: &AppMeta,
        network: &NetworkConfig,
    ) -> anyhow::Result<Arc<dyn WalletHandle>>;
}

/// Live wallet session
#[derive(Clone)]
pub struct Session {
    pub handle: Arc<dyn WalletHandle>,
    pub address: String,
    /// Chain id as reported by the wallet, not reconciled with the target
    pub reported_chain_id: u64,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.handle.endpoint_name())
            .field("address", &self.address)
            .field("reported_chain_id", &self.reported_chain_id)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainCheck {
    Match,
    Mismatch { expected: u64, reported: u64 },
}

impl Session {
    pub fn chain_check(&self, network: &NetworkConfig) -> ChainCheck {
        if self.reported_chain_id == network.chain_id {
            ChainCheck::Match
        } else {
            ChainCheck::Mismatch {
                expected: network.chain_id,
                reported: self.reported_chain_id,
            }
        }
    }
}

/// Request account access and read back the wallet's chain id.
pub async fn connect(
    connector: &dyn WalletConnector,
    app: &AppMeta,
    network: &NetworkConfig,
) -> Result<Session, PulseError> {
    let handle = connector
        .open(app, network)
        .await
        .map_err(PulseError::wallet)?;

    let accounts = handle
        .request_accounts()
        .await
        .map_err(PulseError::wallet)?;
    let address = accounts
        .into_iter()
        .next()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .ok_or(PulseError::NoAccount)?;

    let chain_hex = handle
        .request_chain_id()
        .await
        .map_err(PulseError::wallet)?;
    let reported_chain_id = parse_hex_u64(&chain_hex).map_err(PulseError::wallet)?;

    tracing::info!(
        endpoint = %handle.endpoint_name(),
        %address,
        reported_chain_id,
        target_chain_id = network.chain_id,
        "wallet connected"
    );

    Ok(Session {
        handle,
        address,
        reported_chain_id,
    })
}

#[cfg(test)]
pub(crate) mod stub {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Scripted wallet for tests
    pub struct StubWallet {
        pub accounts: Vec<String>,
        pub chain_id: String,
        pub scoped_to: Mutex<Option<(String, u64)>>,
        pub opens: AtomicUsize,
    }

    impl StubWallet {
        pub fn new(accounts: &[&str], chain_id: &str) -> Arc<Self> {
            Arc::new(Self {
                accounts: accounts.iter().map(|a| a.to_string()).collect(),
                chain_id: chain_id.to_string(),
                scoped_to: Mutex::new(None),
                opens: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl WalletHandle for StubWallet {
        async fn request_accounts(&self) -> anyhow::Result<Vec<String>> {
            Ok(self.accounts.clone())
        }

        async fn request_chain_id(&self) -> anyhow::Result<String> {
            Ok(self.chain_id.clone())
        }

        async fn request(
            &self,
            method: &str,
            _params: serde_json::Value,
        ) -> anyhow::Result<serde_json::Value> {
            anyhow::bail!("unsupported method {method}")
        }

        fn endpoint_name(&self) -> String {
            "stub".to_string()
        }
    }

    pub struct StubConnector(pub Arc<StubWallet>);

    #[async_trait::async_trait]
    impl WalletConnector for StubConnector {
        async fn open(
            &self,
            _app: &AppMeta,
            network: &NetworkConfig,
        ) -> anyhow::Result<Arc<dyn WalletHandle>> {
            self.0.opens.fetch_add(1, Ordering::SeqCst);
            *self.0.scoped_to.lock().unwrap() = Some((network.rpc_url.clone(), network.chain_id));
            let handle: Arc<dyn WalletHandle> = self.0.clone();
            Ok(handle)
        }
    }
}

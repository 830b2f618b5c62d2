//! JSON-RPC wallet integration
//!
//! Talks to any endpoint that answers the EIP-1193 account methods over HTTP,
//! e.g. a local wallet daemon or a dev node with unlocked accounts.

use std::sync::Arc;

use alloy::providers::Provider;
use anyhow::{Context, Result};

use crate::domain::{AppMeta, NetworkConfig, WalletConnector, WalletHandle};
use crate::infrastructure::ethereum::provider::{connect_http, HttpFillProvider};
use crate::infrastructure::ethereum::types::parse_accounts;

/// Opens [`JsonRpcWallet`] handles.
///
/// Without an explicit wallet endpoint the handle falls back to the target
/// network's RPC URL.
#[derive(Debug, Clone, Default)]
pub struct JsonRpcWalletConnector {
    pub wallet_rpc: Option<String>,
}

impl JsonRpcWalletConnector {
    pub fn new(wallet_rpc: Option<String>) -> Self {
        Self { wallet_rpc }
    }

    pub fn endpoint_for(&self, network: &NetworkConfig) -> String {
        self.wallet_rpc
            .clone()
            .unwrap_or_else(|| network.rpc_url.clone())
    }
}

#[async_trait::async_trait]
impl WalletConnector for JsonRpcWalletConnector {
    async fn open(&self, app: &AppMeta, network: &NetworkConfig) -> Result<Arc<dyn WalletHandle>> {
        let endpoint = self.endpoint_for(network);
        let provider = connect_http(&endpoint)?;
        tracing::debug!(
            app = %app.name,
            %endpoint,
            target_chain_id = network.chain_id,
            "opening wallet handle"
        );
        let handle: Arc<dyn WalletHandle> = Arc::new(JsonRpcWallet {
            provider,
            endpoint,
            app: app.clone(),
            target_chain_id: network.chain_id,
        });
        Ok(handle)
    }
}

/// Wallet handle scoped to one app and target chain
pub struct JsonRpcWallet {
    provider: HttpFillProvider,
    endpoint: String,
    app: AppMeta,
    target_chain_id: u64,
}

#[async_trait::async_trait]
impl WalletHandle for JsonRpcWallet {
    async fn request_accounts(&self) -> Result<Vec<String>> {
        let json = self
            .request("eth_requestAccounts", serde_json::Value::Array(Vec::new()))
            .await?;
        parse_accounts(&json)
    }

    async fn request_chain_id(&self) -> Result<String> {
        let json = self
            .request("eth_chainId", serde_json::Value::Array(Vec::new()))
            .await?;
        json.as_str()
            .map(|s| s.to_string())
            .with_context(|| format!("eth_chainId returned a non-string: {json}"))
    }

    async fn request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value> {
        tracing::trace!(
            app = %self.app.name,
            target_chain_id = self.target_chain_id,
            method,
            "wallet request"
        );
        self.provider
            .raw_request::<_, serde_json::Value>(method.to_string().into(), params)
            .await
            .with_context(|| format!("{method} failed ({})", self.endpoint))
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }
}

//! Alloy-backed chain reader
//!
//! Blocks are fetched with raw JSON requests so that OP-stack chains such as
//! Base decode without depending on L1-only transaction envelopes.

use alloy::network::Ethereum;
use alloy::primitives::{Address, U256};
use alloy::providers::{
    fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
    Identity, Provider, ProviderBuilder, RootProvider,
};
use anyhow::{Context, Result};

use crate::domain::{BlockHeader, ChainReader, FeeEstimate, NetworkConfig};
use crate::infrastructure::ethereum::types::parse_block_header;

const BASE_FEE_MULTIPLIER_PERCENT: u128 = 120;

pub(crate) type HttpFillProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
    Ethereum,
>;

pub(crate) fn connect_http(url: &str) -> Result<HttpFillProvider> {
    let rpc_url = url
        .parse()
        .with_context(|| format!("Invalid HTTP URL: {url}"))?;
    Ok(ProviderBuilder::new().connect_http(rpc_url))
}

/// Read client over one HTTP RPC endpoint
pub struct AlloyReader {
    provider: HttpFillProvider,
    endpoint: String,
}

impl AlloyReader {
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            provider: connect_http(url)?,
            endpoint: url.to_string(),
        })
    }

    pub fn for_network(network: &NetworkConfig) -> Result<Self> {
        Self::new(&network.rpc_url)
    }
}

#[async_trait::async_trait]
impl ChainReader for AlloyReader {
    async fn block_number(&self) -> Result<u64> {
        self.provider
            .get_block_number()
            .await
            .context("eth_blockNumber failed")
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        self.provider
            .get_balance(address)
            .await
            .context("eth_getBalance failed")
    }

    async fn latest_block(&self) -> Result<BlockHeader> {
        let json: serde_json::Value = self
            .provider
            .raw_request("eth_getBlockByNumber".into(), ("latest", false))
            .await
            .context("eth_getBlockByNumber failed")?;
        parse_block_header(&json)
    }

    async fn estimate_fees(&self) -> Result<FeeEstimate> {
        // Own header read; the base fee may come from a newer block than the
        // one fetched alongside it
        let latest = self.latest_block().await?;

        // Pre-London style chains have no base fee; only a legacy gas price exists
        let Some(base_fee) = latest.base_fee_per_gas else {
            let gas_price = self
                .provider
                .get_gas_price()
                .await
                .context("eth_gasPrice failed")?;
            return Ok(FeeEstimate {
                gas_price: Some(gas_price),
                ..FeeEstimate::default()
            });
        };

        let priority = self
            .provider
            .get_max_priority_fee_per_gas()
            .await
            .context("eth_maxPriorityFeePerGas failed")?;
        Ok(FeeEstimate {
            max_fee_per_gas: Some(max_fee_per_gas(base_fee, priority)),
            max_priority_fee_per_gas: Some(priority),
            gas_price: None,
        })
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }
}

/// Base fee padded by 20% for the next blocks, plus the priority tip
pub(crate) fn max_fee_per_gas(base_fee: u64, priority: u128) -> u128 {
    u128::from(base_fee) * BASE_FEE_MULTIPLIER_PERCENT / 100 + priority
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_fee_per_gas() {
        assert_eq!(max_fee_per_gas(1_000_000, 1_000), 1_201_000);
        assert_eq!(max_fee_per_gas(0, 5), 5);
    }

    #[test]
    fn test_rejects_bad_url() {
        assert!(AlloyReader::new("not a url").is_err());
    }

    #[test]
    fn test_reader_keeps_endpoint_name() {
        let reader = AlloyReader::for_network(&NetworkConfig::base_sepolia()).unwrap();
        assert_eq!(reader.endpoint_name(), "https://sepolia.base.org");
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_fee_estimate_on_sepolia() {
        let url = std::env::var("RPC_URL").unwrap_or_else(|_| "https://sepolia.base.org".into());
        let reader = AlloyReader::new(&url).unwrap();

        let header = reader.latest_block().await.expect("latest block");
        assert!(header.number > 0);

        let fees = reader.estimate_fees().await.expect("fee estimate");
        let max_fee = fees.max_fee_per_gas.expect("Base is post-London");
        let priority = fees.max_priority_fee_per_gas.expect("priority fee");
        assert!(max_fee >= priority);
        assert!(fees.gas_price.is_none());
    }
}

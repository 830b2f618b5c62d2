//! Read-only chain queries against the active network

use alloy::primitives::{Address, U256};

use super::units::parse_address;
use super::PulseError;

/// Latest block header fields used by the pulse snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub number: u64,
    pub timestamp: u64,
    pub base_fee_per_gas: Option<u64>,
}

/// Fee-per-gas estimate; any field may be absent depending on the chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeEstimate {
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
    pub gas_price: Option<u128>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basics {
    pub block_number: u64,
    pub balance: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasSnapshot {
    pub latest_block: BlockHeader,
    pub fees: FeeEstimate,
}

/// Read client bound to one RPC endpoint
#[async_trait::async_trait]
pub trait ChainReader: Send + Sync + 'static {
    async fn block_number(&self) -> anyhow::Result<u64>;

    async fn balance(&self, address: Address) -> anyhow::Result<U256>;

    async fn latest_block(&self) -> anyhow::Result<BlockHeader>;

    async fn estimate_fees(&self) -> anyhow::Result<FeeEstimate>;

    fn endpoint_name(&self) -> String;
}

/// Latest block number and balance, fetched in parallel
pub async fn read_basics(reader: &dyn ChainReader, address: Address) -> Result<Basics, PulseError> {
    let (block_number, balance) = futures::try_join!(reader.block_number(), reader.balance(address))
        .map_err(PulseError::query)?;
    Ok(Basics {
        block_number,
        balance,
    })
}

/// Latest header and fee estimate, fetched in parallel
pub async fn read_gas_snapshot(reader: &dyn ChainReader) -> Result<GasSnapshot, PulseError> {
    let (latest_block, fees) = futures::try_join!(reader.latest_block(), reader.estimate_fees())
        .map_err(PulseError::query)?;
    Ok(GasSnapshot { latest_block, fees })
}

/// Validate `input` and look up its balance; no request is made for bad input
pub async fn read_address_balance(
    reader: &dyn ChainReader,
    input: &str,
) -> Result<(Address, U256), PulseError> {
    let address = parse_address(input)?;
    let balance = reader.balance(address).await.map_err(PulseError::query)?;
    Ok((address, balance))
}

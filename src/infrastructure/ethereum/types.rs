//! Conversions from raw JSON-RPC payloads to domain types

use anyhow::{Context, Result};

use crate::domain::{parse_hex_u64, BlockHeader};

/// Parse an `eth_getBlockByNumber` result.
///
/// Works on the raw JSON so OP-stack blocks (Base) decode the same as L1.
pub fn parse_block_header(json: &serde_json::Value) -> Result<BlockHeader> {
    if json.is_null() {
        anyhow::bail!("node returned no block");
    }
    let number = hex_field(json, "number")?.context("block is missing `number`")?;
    let timestamp = hex_field(json, "timestamp")?.context("block is missing `timestamp`")?;
    let base_fee_per_gas = hex_field(json, "baseFeePerGas")?;

    Ok(BlockHeader {
        number,
        timestamp,
        base_fee_per_gas,
    })
}

/// Parse a string-typed account list (`eth_requestAccounts`/`eth_accounts`)
pub fn parse_accounts(json: &serde_json::Value) -> Result<Vec<String>> {
    let Some(items) = json.as_array() else {
        anyhow::bail!("expected an account array, got {json}");
    };
    Ok(items
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.to_string())
        .collect())
}

fn hex_field(json: &serde_json::Value, key: &str) -> Result<Option<u64>> {
    match json.get(key).and_then(|v| v.as_str()) {
        Some(raw) => parse_hex_u64(raw)
            .map(Some)
            .with_context(|| format!("bad `{key}` field")),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_block_header() {
        let block = json!({
            "number": "0x64",
            "timestamp": "0x6553f100",
            "baseFeePerGas": "0xf4240",
            "transactions": ["0xaa"]
        });
        let header = parse_block_header(&block).unwrap();
        assert_eq!(header.number, 100);
        assert_eq!(header.timestamp, 1_700_000_000);
        assert_eq!(header.base_fee_per_gas, Some(1_000_000));
    }

    #[test]
    fn test_parse_legacy_block_without_base_fee() {
        let block = json!({ "number": "0x1", "timestamp": "0x2" });
        let header = parse_block_header(&block).unwrap();
        assert_eq!(header.base_fee_per_gas, None);
    }

    #[test]
    fn test_parse_block_errors() {
        assert!(parse_block_header(&serde_json::Value::Null).is_err());
        assert!(parse_block_header(&json!({ "timestamp": "0x2" })).is_err());
        assert!(parse_block_header(&json!({ "number": "zz", "timestamp": "0x2" })).is_err());
    }

    #[test]
    fn test_parse_accounts() {
        let accounts = parse_accounts(&json!(["0xabc", "0xdef"])).unwrap();
        assert_eq!(accounts, vec!["0xabc".to_string(), "0xdef".to_string()]);
        assert!(parse_accounts(&json!([])).unwrap().is_empty());
        assert!(parse_accounts(&json!("0xabc")).is_err());
    }
}

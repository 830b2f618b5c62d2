//! Plain-text reports shown in the output region

use alloy::primitives::U256;
use chrono::DateTime;

use crate::domain::{format_ether, Basics, ChainCheck, GasSnapshot, NetworkConfig, Session};
use crate::infrastructure::runtime::Operation;

pub fn ready(network: &NetworkConfig) -> Vec<String> {
    vec![
        "Ready.".to_string(),
        format!(
            "Active target: {} (chainId {}).",
            network.label, network.chain_id
        ),
        "Connect wallet to print Base explorer links and fetch read-only network state."
            .to_string(),
    ]
}

pub fn toggled(network: &NetworkConfig) -> Vec<String> {
    vec![format!(
        "Network toggled. Active target: {} (chainId {}). Connect again.",
        network.label, network.chain_id
    )]
}

pub fn progress(op: Operation) -> Vec<String> {
    let text = match op {
        Operation::Connect => "Connecting…",
        Operation::Pulse => "Fetching pulse snapshot…",
        Operation::Balance => "Reading balance…",
    };
    vec![text.to_string()]
}

pub fn error(op: Operation, message: &str) -> Vec<String> {
    vec![format!("Error ({}): {}", op.label(), message)]
}

pub fn connected(network: &NetworkConfig, session: &Session, basics: &Basics) -> Vec<String> {
    let mut lines = vec![
        "Connected".to_string(),
        format!("Network: {}", network.label),
        format!("chainId (wallet): {}", session.reported_chain_id),
    ];
    if let ChainCheck::Mismatch { expected, reported } = session.chain_check(network) {
        lines.push(format!(
            "Warning: wallet reports chainId {reported}, target is {expected}. Results come from the target RPC."
        ));
    }
    lines.extend([
        format!("Address: {}", session.address),
        format!("ETH balance: {} ETH", format_ether(basics.balance)),
        format!("Latest block: {}", basics.block_number),
        format!("Explorer: {}", network.address_url(&session.address)),
        String::new(),
        "Next: Run Pulse Snapshot or check a custom address balance.".to_string(),
    ]);
    lines
}

pub fn pulse(network: &NetworkConfig, snapshot: &GasSnapshot) -> Vec<String> {
    let block = &snapshot.latest_block;
    let fees = &snapshot.fees;
    let mut lines = vec![
        "Pulse Snapshot (read-only)".to_string(),
        format!("Network: {}", network.label),
        format!("chainId: {}", network.chain_id),
        String::new(),
        format!("Block number: {}", block.number),
        format!(
            "Block timestamp: {} ({})",
            block.timestamp,
            utc_time(block.timestamp)
        ),
        String::new(),
        "Fee snapshot (estimateFeesPerGas):".to_string(),
        format!("maxFeePerGas: {}", or_na(fees.max_fee_per_gas)),
        format!(
            "maxPriorityFeePerGas: {}",
            or_na(fees.max_priority_fee_per_gas)
        ),
    ];
    if let Some(gas_price) = fees.gas_price {
        lines.push(format!("gasPrice: {gas_price}"));
    }
    lines.extend([
        String::new(),
        format!("Verifier (explorer): {}", network.block_url(block.number)),
    ]);
    lines
}

pub fn balance(network: &NetworkConfig, address: &str, balance: U256) -> Vec<String> {
    vec![
        "Address Balance (read-only)".to_string(),
        format!("Network: {}", network.label),
        format!("chainId: {}", network.chain_id),
        String::new(),
        format!("Address: {address}"),
        format!("ETH balance: {} ETH", format_ether(balance)),
        format!("Explorer: {}", network.address_url(address)),
    ]
}

fn or_na(value: Option<u128>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

fn utc_time(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "out of range".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::stub::StubWallet;
    use crate::domain::{BlockHeader, FeeEstimate};

    fn session(chain_id: u64) -> Session {
        Session {
            handle: StubWallet::new(&[], "0x0"),
            address: "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359".to_string(),
            reported_chain_id: chain_id,
        }
    }

    #[test]
    fn test_connected_report() {
        let net = NetworkConfig::base_sepolia();
        let basics = Basics {
            block_number: 100,
            balance: U256::from(1_000_000_000_000_000_000u64),
        };
        let lines = connected(&net, &session(84532), &basics);
        assert_eq!(lines[0], "Connected");
        assert!(lines.contains(&"ETH balance: 1 ETH".to_string()));
        assert!(lines.contains(&"Latest block: 100".to_string()));
        assert!(lines.contains(
            &"Explorer: https://sepolia.basescan.org/address/0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359"
                .to_string()
        ));
        assert!(!lines.iter().any(|l| l.starts_with("Warning")));
    }

    #[test]
    fn test_connected_report_flags_chain_mismatch() {
        let net = NetworkConfig::base_sepolia();
        let basics = Basics {
            block_number: 1,
            balance: U256::ZERO,
        };
        let lines = connected(&net, &session(8453), &basics);
        assert!(lines[0] == "Connected");
        assert!(lines
            .iter()
            .any(|l| l.starts_with("Warning: wallet reports chainId 8453, target is 84532")));
    }

    #[test]
    fn test_pulse_report_renders_missing_fees_as_na() {
        let snapshot = GasSnapshot {
            latest_block: BlockHeader {
                number: 100,
                timestamp: 1_700_000_000,
                base_fee_per_gas: None,
            },
            fees: FeeEstimate {
                gas_price: Some(7),
                ..FeeEstimate::default()
            },
        };
        let lines = pulse(&NetworkConfig::base_mainnet(), &snapshot);
        assert!(lines.contains(&"maxFeePerGas: n/a".to_string()));
        assert!(lines.contains(&"maxPriorityFeePerGas: n/a".to_string()));
        assert!(lines.contains(&"gasPrice: 7".to_string()));
        assert!(lines.contains(&"Block timestamp: 1700000000 (2023-11-14 22:13:20 UTC)".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Verifier (explorer): https://basescan.org/block/100"
        );
    }

    #[test]
    fn test_balance_report_echoes_input() {
        let typed = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
        let lines = balance(&NetworkConfig::base_sepolia(), typed, U256::ZERO);
        assert!(lines.contains(&format!("Address: {typed}")));
        assert!(lines.contains(&"ETH balance: 0 ETH".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            &format!("Explorer: https://sepolia.basescan.org/address/{typed}")
        );
    }

    #[test]
    fn test_error_line() {
        assert_eq!(
            error(Operation::Balance, "Invalid address format: x"),
            vec!["Error (Balance): Invalid address format: x".to_string()]
        );
    }
}

//! Address validation and wei/hex formatting helpers

use std::str::FromStr;

use alloy::primitives::{Address, U256};

use super::PulseError;

const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// Parse a user-supplied address.
///
/// Requires a `0x` prefix and 40 hex digits. All-lowercase and all-uppercase
/// payloads are accepted as-is; mixed case must be a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address, PulseError> {
    let invalid = || PulseError::InvalidAddress(input.to_string());

    let payload = input.strip_prefix("0x").ok_or_else(invalid)?;
    if payload.len() != 40 || !payload.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let address = Address::from_str(payload).map_err(|_| invalid())?;

    let has_lower = payload.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = payload.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && address.to_checksum(None) != input {
        return Err(invalid());
    }

    Ok(address)
}

pub fn is_address(input: &str) -> bool {
    parse_address(input).is_ok()
}

/// Wei to ether, without thousand separators or trailing zeros ("1", "0.5")
pub fn format_ether(wei: U256) -> String {
    let unit = U256::from(WEI_PER_ETHER);
    let whole = wei / unit;
    let remainder = wei % unit;
    if remainder.is_zero() {
        return whole.to_string();
    }
    let decimal = format!("{:0>18}", remainder.to_string());
    format!("{}.{}", whole, decimal.trim_end_matches('0'))
}

/// Parse an `eth_chainId` style hex quantity
pub fn parse_hex_u64(value: &str) -> anyhow::Result<u64> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() {
        anyhow::bail!("empty hex quantity");
    }
    u64::from_str_radix(digits, 16)
        .map_err(|err| anyhow::anyhow!("invalid hex quantity {trimmed:?}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

    #[test]
    fn test_parse_address_accepts_valid_forms() {
        assert!(is_address(CHECKSUMMED));
        assert!(is_address(&CHECKSUMMED.to_lowercase()));
        assert!(is_address(&format!("0x{}", CHECKSUMMED[2..].to_uppercase())));
    }

    #[test]
    fn test_parse_address_rejects_invalid_forms() {
        assert!(!is_address("not-an-address"));
        assert!(!is_address(""));
        // missing prefix
        assert!(!is_address(&CHECKSUMMED[2..]));
        // too short
        assert!(!is_address("0xfb6916095ca1df60bb79ce92ce3ea74c37c5d35"));
        // non-hex
        assert!(!is_address("0xzb6916095ca1df60bb79ce92ce3ea74c37c5d359"));
        // broken checksum
        assert!(!is_address("0xFb6916095ca1df60bB79Ce92cE3Ea74c37c5d359"));
    }

    #[test]
    fn test_parse_address_error_carries_input() {
        match parse_address("not-an-address") {
            Err(PulseError::InvalidAddress(raw)) => assert_eq!(raw, "not-an-address"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(U256::from(1_000_000_000_000_000_000u64)), "1");
        assert_eq!(format_ether(U256::from(1_500_000_000_000_000_000u64)), "1.5");
        assert_eq!(format_ether(U256::from(1u64)), "0.000000000000000001");
        assert_eq!(format_ether(U256::ZERO), "0");
        assert_eq!(
            format_ether(U256::from(12_345_000_000_000_000_000u128)),
            "12.345"
        );
    }

    #[test]
    fn test_parse_hex_u64() {
        assert_eq!(parse_hex_u64("0x14a34").unwrap(), 84532);
        assert_eq!(parse_hex_u64("0x2105").unwrap(), 8453);
        assert_eq!(parse_hex_u64("2105").unwrap(), 8453);
        assert!(parse_hex_u64("0x").is_err());
        assert!(parse_hex_u64("0xzz").is_err());
    }
}

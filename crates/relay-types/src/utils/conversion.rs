//! Conversion utilities for values read from configuration and requests.

use super::formatting::without_0x_prefix;
use alloy_primitives::{Address, U256};

/// Parses a 20-byte address from a hex string, with or without "0x" prefix.
///
/// Checksums are not enforced; any casing is accepted.
pub fn parse_address(value: &str) -> Result<Address, String> {
	let raw = without_0x_prefix(value.trim());
	let bytes = hex::decode(raw).map_err(|e| format!("Invalid hex address '{}': {}", value, e))?;
	if bytes.len() != 20 {
		return Err(format!(
			"Invalid address '{}': expected 20 bytes, got {}",
			value,
			bytes.len()
		));
	}
	Ok(Address::from_slice(&bytes))
}

/// Parses an unsigned 256-bit amount.
///
/// Accepts decimal strings, "0x"-prefixed hex strings, and the literal "max"
/// for `2^256 - 1` (the conventional unlimited allowance).
pub fn parse_amount(value: &str) -> Result<U256, String> {
	let value = value.trim();
	if value.eq_ignore_ascii_case("max") {
		return Ok(U256::MAX);
	}
	if value.starts_with("0x") || value.starts_with("0X") {
		return U256::from_str_radix(without_0x_prefix(value), 16)
			.map_err(|e| format!("Invalid hex amount '{}': {}", value, e));
	}
	U256::from_str_radix(value, 10).map_err(|e| format!("Invalid amount '{}': {}", value, e))
}

//! String formatting utilities.
//!
//! Provides functions for formatting strings for display, including
//! hex string prefix management and truncation for readability.

/// Truncates a hex string for display purposes.
///
/// Shows only the first 10 characters followed by ".." for longer strings,
/// enough to keep the `0x` prefix and four bytes of the value.
pub fn truncate_id(id: &str) -> String {
	if id.len() <= 10 {
		id.to_string()
	} else {
		format!("{}..", &id[..10])
	}
}

/// Adds "0x" prefix to a hex string if it doesn't already have one.
pub fn with_0x_prefix(hex_str: &str) -> String {
	if hex_str.to_lowercase().starts_with("0x") {
		hex_str.to_string()
	} else {
		format!("0x{}", hex_str)
	}
}

/// Removes "0x" or "0X" prefix from a hex string if present.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_truncate_id() {
		assert_eq!(truncate_id("0x1234"), "0x1234");
		assert_eq!(truncate_id("0x1234567890abcdef"), "0x12345678..");
	}

	#[test]
	fn test_prefix_helpers() {
		assert_eq!(with_0x_prefix("abcd"), "0xabcd");
		assert_eq!(with_0x_prefix("0Xabcd"), "0Xabcd");
		assert_eq!(without_0x_prefix("0xabcd"), "abcd");
		assert_eq!(without_0x_prefix("0Xabcd"), "abcd");
		assert_eq!(without_0x_prefix("abcd"), "abcd");
	}
}

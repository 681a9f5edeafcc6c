//! Secure string type for private keys.
//!
//! `SecretString` zeroes its memory when dropped and never shows its contents
//! in `Debug` or `Display` output.

use std::fmt;
use zeroize::Zeroizing;

/// A string that is zeroed on drop and redacted when printed.
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	pub fn new(s: String) -> Self {
		Self(Zeroizing::new(s))
	}

	/// Exposes the secret to a closure, limiting the scope where it is visible.
	pub fn with_exposed<F, R>(&self, f: F) -> R
	where
		F: FnOnce(&str) -> R,
	{
		f(&self.0)
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretString(***REDACTED***)")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "***REDACTED***")
	}
}

impl From<String> for SecretString {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}

impl From<&str> for SecretString {
	fn from(s: &str) -> Self {
		Self::new(s.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_redacted_output() {
		let secret = SecretString::from("0xdeadbeef");
		assert_eq!(format!("{}", secret), "***REDACTED***");
		assert_eq!(format!("{:?}", secret), "SecretString(***REDACTED***)");
	}

	#[test]
	fn test_with_exposed() {
		let secret = SecretString::from("0xdeadbeef".to_string());
		assert_eq!(secret.with_exposed(|s| s.len()), 10);
	}
}

//! Local private-key account.
//!
//! Signs with a secp256k1 key held in process memory. Intended for tests,
//! scripts and development relays; production signers keep keys in a wallet.

use crate::{AccountError, AccountInterface};
use alloy_primitives::{Address, Signature};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use relay_types::{without_0x_prefix, SecretString};

/// Account backed by an in-memory private key.
pub struct LocalAccount {
	signer: PrivateKeySigner,
}

impl LocalAccount {
	/// Creates an account from a hex-encoded 32-byte private key, with or
	/// without "0x".
	///
	/// The key text is held in a `SecretString` and zeroed once parsed.
	pub fn new(private_key: impl Into<SecretString>) -> Result<Self, AccountError> {
		let private_key: SecretString = private_key.into();
		let signer = private_key.with_exposed(|key| {
			without_0x_prefix(key)
				.parse::<PrivateKeySigner>()
				.map_err(|e| AccountError::InvalidKey(e.to_string()))
		})?;
		Ok(Self { signer })
	}
}

#[async_trait]
impl AccountInterface for LocalAccount {
	async fn address(&self) -> Result<Address, AccountError> {
		Ok(self.signer.address())
	}

	async fn sign_message(&self, message: &[u8]) -> Result<Signature, AccountError> {
		self.signer
			.sign_message(message)
			.await
			.map_err(|e| AccountError::SigningFailed(e.to_string()))
	}
}

//! Account management module for off-chain signers.
//!
//! Asset owners use an account to sign transfer digests before handing them
//! to a relayer. Signing applies the EIP-191 personal-message prefix, the same
//! convention the relay's signature recovery expects.

use alloy_primitives::{Address, Bytes, Signature, B256};
use async_trait::async_trait;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when signing operations fail.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

/// Trait defining the interface for account implementations.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	/// Retrieves the address associated with this account.
	async fn address(&self) -> Result<Address, AccountError>;

	/// Signs `message` as an EIP-191 personal message:
	/// `keccak256("\x19Ethereum Signed Message:\n" ‖ len ‖ message)`.
	async fn sign_message(&self, message: &[u8]) -> Result<Signature, AccountError>;
}

/// Service that signs transfer digests with an underlying account.
pub struct AccountService {
	/// The underlying account implementation.
	implementation: Box<dyn AccountInterface>,
}

impl AccountService {
	pub fn new(implementation: Box<dyn AccountInterface>) -> Self {
		Self { implementation }
	}

	/// Retrieves the address associated with the managed account.
	pub async fn get_address(&self) -> Result<Address, AccountError> {
		self.implementation.address().await
	}

	/// Signs a transfer digest and returns the 65-byte `r ‖ s ‖ v` encoding
	/// (v is 27 or 28) a relayer submits alongside the intent.
	pub async fn sign_digest(&self, digest: &B256) -> Result<Bytes, AccountError> {
		let signature = self.implementation.sign_message(digest.as_slice()).await?;
		Ok(Bytes::from(signature.as_bytes().to_vec()))
	}
}

//! Core of the meta-transaction relay.
//!
//! Ties digest construction, signature recovery, replay protection and the
//! asset ledgers together into `TransferAuthorizer`, and provides
//! `RelayBuilder` to assemble one from configuration.

use alloy_primitives::{Address, U256};
use relay_ledger::LedgerError;
use relay_storage::StorageError;
use thiserror::Error;

pub mod authorizer;
pub mod builder;
pub mod digest;
pub mod nonce;
pub mod signature;

pub use authorizer::{TransferAuthorizer, TransferReceipt};
pub use builder::{BuilderError, RelayBuilder, RelayFactories};
pub use digest::{compute_digest, intent_digest};
pub use nonce::NonceRegistry;
pub use signature::{recover_identity, SignatureError};

/// Reasons a transfer is refused.
///
/// Every variant is returned with no balance moved and no nonce consumed.
#[derive(Debug, Error)]
pub enum AuthorizationError {
	/// The signature is malformed or not in canonical form.
	#[error("Invalid signature: {0}")]
	InvalidSignature(#[from] SignatureError),
	/// The signature is valid but was produced by someone other than the sender.
	#[error("Signer mismatch: intent names {claimed}, signature recovers {recovered}")]
	SignerMismatch { claimed: Address, recovered: Address },
	#[error("Nonce {nonce} already used by {sender}")]
	NonceAlreadyUsed { sender: Address, nonce: U256 },
	#[error("Unsupported asset: {0}")]
	UnsupportedAsset(Address),
	/// The ledger refused the debit or credit.
	#[error("Ledger error: {0}")]
	Ledger(#[from] LedgerError),
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}

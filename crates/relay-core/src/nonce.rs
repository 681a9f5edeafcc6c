//! Replay protection.
//!
//! A `(sender, nonce)` pair may authorize at most one transfer. Pairs are
//! consumed through the storage service's conditional insert, so two
//! concurrent submissions of the same pair cannot both win, whichever
//! backend is configured.

use alloy_primitives::{Address, U256};
use relay_storage::{StorageError, StorageService};
use relay_types::{Digest, StorageKey};
use std::sync::Arc;

/// Registry of consumed `(sender, nonce)` pairs.
///
/// Nonces need not be sequential; any unused value is accepted. Entries are
/// never removed except to undo a reservation whose transfer did not commit.
#[derive(Clone)]
pub struct NonceRegistry {
	storage: Arc<StorageService>,
}

impl NonceRegistry {
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self { storage }
	}

	fn id(sender: &Address, nonce: &U256) -> String {
		format!("{:#x}:{}", sender, nonce)
	}

	/// Marks the pair as used, recording the digest that consumed it.
	///
	/// Returns `false` without writing anything if the pair was already used.
	pub async fn consume(
		&self,
		sender: Address,
		nonce: U256,
		digest: &Digest,
	) -> Result<bool, StorageError> {
		self.storage
			.store_if_absent(StorageKey::Nonces.as_str(), &Self::id(&sender, &nonce), digest)
			.await
	}

	/// Returns a reserved pair to the unused state.
	pub async fn release(&self, sender: Address, nonce: U256) -> Result<(), StorageError> {
		self.storage
			.remove(StorageKey::Nonces.as_str(), &Self::id(&sender, &nonce))
			.await
	}

	/// Whether the pair has authorized a transfer.
	pub async fn is_used(&self, sender: Address, nonce: U256) -> Result<bool, StorageError> {
		self.storage
			.exists(StorageKey::Nonces.as_str(), &Self::id(&sender, &nonce))
			.await
	}

	/// Digest of the transfer that consumed the pair, if any.
	pub async fn consumed_by(
		&self,
		sender: Address,
		nonce: U256,
	) -> Result<Option<Digest>, StorageError> {
		match self
			.storage
			.retrieve(StorageKey::Nonces.as_str(), &Self::id(&sender, &nonce))
			.await
		{
			Ok(digest) => Ok(Some(digest)),
			Err(StorageError::NotFound) => Ok(None),
			Err(e) => Err(e),
		}
	}
}

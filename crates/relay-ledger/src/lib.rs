//! Token ledger module for the meta-transaction relay.
//!
//! The ledger is the collaborator that actually holds balances and
//! allowances for a fungible asset. The relay only needs two mutating
//! operations from it, debit-with-allowance and credit, plus a checkpoint
//! mechanism so a failed transfer can be rolled back as a whole.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use relay_types::{ConfigSchema, ImplementationRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod memory;
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
	/// The spender is not allowed to move this much of the owner's funds.
	#[error("Insufficient allowance: {spender} may spend {allowance} of {owner}'s funds, needed {needed}")]
	InsufficientAllowance {
		owner: Address,
		spender: Address,
		allowance: U256,
		needed: U256,
	},
	/// The owner does not hold enough funds.
	#[error("Insufficient balance: {owner} holds {balance}, needed {needed}")]
	InsufficientBalance {
		owner: Address,
		balance: U256,
		needed: U256,
	},
	/// Funds cannot be credited to this recipient.
	#[error("Invalid recipient: {0}")]
	InvalidRecipient(Address),
	/// A balance or supply would exceed 2^256 - 1.
	#[error("Arithmetic overflow")]
	Overflow,
	/// The checkpoint was already committed, reverted, or never taken.
	#[error("Unknown checkpoint: {0}")]
	UnknownCheckpoint(u64),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
	/// Error that occurs in the ledger backend.
	#[error("Backend error: {0}")]
	Backend(String),
}

/// Handle to a point in ledger history that can be reverted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(pub u64);

/// Trait defining the interface for ledger implementations.
#[async_trait]
pub trait LedgerInterface: Send + Sync {
	/// Returns the configuration schema for this ledger implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Returns the balance held by `owner`.
	async fn balance_of(&self, owner: Address) -> Result<U256, LedgerError>;

	/// Returns how much `spender` may move out of `owner`'s balance.
	async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, LedgerError>;

	/// Removes `amount` from `owner`'s balance on behalf of `spender`.
	///
	/// Fails with `InsufficientAllowance` or `InsufficientBalance` without
	/// changing any state.
	async fn debit(&self, owner: Address, spender: Address, amount: U256)
		-> Result<(), LedgerError>;

	/// Adds `amount` to `recipient`'s balance.
	async fn credit(&self, recipient: Address, amount: U256) -> Result<(), LedgerError>;

	/// Records the current state so that later writes can be undone.
	async fn checkpoint(&self) -> Result<Checkpoint, LedgerError>;

	/// Keeps every write made since `checkpoint` and forgets the checkpoint.
	async fn commit(&self, checkpoint: Checkpoint) -> Result<(), LedgerError>;

	/// Restores the state recorded by `checkpoint`, undoing every later write.
	async fn revert(&self, checkpoint: Checkpoint) -> Result<(), LedgerError>;
}

/// Type alias for ledger factory functions.
pub type LedgerFactory = fn(&toml::Value) -> Result<Box<dyn LedgerInterface>, LedgerError>;

/// Registry trait for ledger implementations.
pub trait LedgerRegistry: ImplementationRegistry<Factory = LedgerFactory> {}

/// Get all registered ledger implementations.
pub fn get_all_implementations() -> Vec<(&'static str, LedgerFactory)> {
	use implementations::memory;

	vec![(memory::Registry::NAME, memory::Registry::factory())]
}

/// Routes ledger operations to the ledger of the asset they concern.
#[derive(Default)]
pub struct LedgerService {
	ledgers: HashMap<Address, Arc<dyn LedgerInterface>>,
}

impl LedgerService {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the ledger for `asset`, replacing any previous one.
	pub fn register(&mut self, asset: Address, ledger: Arc<dyn LedgerInterface>) {
		self.ledgers.insert(asset, ledger);
	}

	/// Returns the ledger for `asset`, if the relay serves it.
	pub fn get(&self, asset: &Address) -> Option<&Arc<dyn LedgerInterface>> {
		self.ledgers.get(asset)
	}

	/// Addresses of all served assets.
	pub fn assets(&self) -> impl Iterator<Item = &Address> {
		self.ledgers.keys()
	}

	/// Reads `owner`'s balance of `asset`; `None` if the asset is not served.
	pub async fn balance_of(
		&self,
		asset: &Address,
		owner: Address,
	) -> Option<Result<U256, LedgerError>> {
		match self.ledgers.get(asset) {
			Some(ledger) => Some(ledger.balance_of(owner).await),
			None => None,
		}
	}
}

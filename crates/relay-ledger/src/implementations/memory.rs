//! In-memory ERC20-style ledger.
//!
//! Holds balances and allowances in process memory. Besides the operations
//! the relay calls, it offers `mint` and `approve` so that tests and local
//! deployments can seed accounts, either programmatically or through the
//! `balances` / `allowances` configuration keys.
//!
//! An allowance of `U256::MAX` is treated as unlimited and is never
//! decremented, matching common ERC20 implementations.

use crate::{Checkpoint, LedgerError, LedgerFactory, LedgerInterface, LedgerRegistry};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use relay_types::{
	address_validator, amount_validator, parse_address, parse_amount, ConfigSchema, Field,
	FieldType, ImplementationRegistry, Schema, ValidationError,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
struct LedgerState {
	balances: HashMap<Address, U256>,
	allowances: HashMap<(Address, Address), U256>,
	total_supply: U256,
}

#[derive(Debug, Default)]
struct Inner {
	state: LedgerState,
	/// Open checkpoints, oldest first.
	checkpoints: Vec<(u64, LedgerState)>,
	next_checkpoint: u64,
}

/// In-memory ledger. Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
	inner: Arc<RwLock<Inner>>,
}

impl InMemoryLedger {
	pub fn new() -> Self {
		Self::default()
	}

	fn with_state(state: LedgerState) -> Self {
		Self {
			inner: Arc::new(RwLock::new(Inner {
				state,
				..Inner::default()
			})),
		}
	}

	/// Creates `amount` new units owned by `to`.
	pub async fn mint(&self, to: Address, amount: U256) -> Result<(), LedgerError> {
		let mut inner = self.inner.write().await;
		mint_into(&mut inner.state, to, amount)
	}

	/// Sets how much `spender` may move out of `owner`'s balance.
	pub async fn approve(
		&self,
		owner: Address,
		spender: Address,
		amount: U256,
	) -> Result<(), LedgerError> {
		let mut inner = self.inner.write().await;
		inner.state.allowances.insert((owner, spender), amount);
		Ok(())
	}

	/// Total units in existence.
	pub async fn total_supply(&self) -> U256 {
		self.inner.read().await.state.total_supply
	}
}

fn mint_into(state: &mut LedgerState, to: Address, amount: U256) -> Result<(), LedgerError> {
	if to == Address::ZERO {
		return Err(LedgerError::InvalidRecipient(to));
	}
	let supply = state
		.total_supply
		.checked_add(amount)
		.ok_or(LedgerError::Overflow)?;
	let balance = state.balances.entry(to).or_default();
	*balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
	state.total_supply = supply;
	Ok(())
}

#[async_trait]
impl LedgerInterface for InMemoryLedger {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(InMemoryLedgerSchema)
	}

	async fn balance_of(&self, owner: Address) -> Result<U256, LedgerError> {
		let inner = self.inner.read().await;
		Ok(inner.state.balances.get(&owner).copied().unwrap_or_default())
	}

	async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, LedgerError> {
		let inner = self.inner.read().await;
		Ok(inner
			.state
			.allowances
			.get(&(owner, spender))
			.copied()
			.unwrap_or_default())
	}

	async fn debit(
		&self,
		owner: Address,
		spender: Address,
		amount: U256,
	) -> Result<(), LedgerError> {
		let mut inner = self.inner.write().await;
		let state = &mut inner.state;

		let allowance = state
			.allowances
			.get(&(owner, spender))
			.copied()
			.unwrap_or_default();
		if allowance < amount {
			return Err(LedgerError::InsufficientAllowance {
				owner,
				spender,
				allowance,
				needed: amount,
			});
		}

		let balance = state.balances.get(&owner).copied().unwrap_or_default();
		if balance < amount {
			return Err(LedgerError::InsufficientBalance {
				owner,
				balance,
				needed: amount,
			});
		}

		if allowance != U256::MAX {
			state
				.allowances
				.insert((owner, spender), allowance - amount);
		}
		state.balances.insert(owner, balance - amount);
		state.total_supply -= amount;

		tracing::debug!(%owner, %spender, %amount, "Debited");
		Ok(())
	}

	async fn credit(&self, recipient: Address, amount: U256) -> Result<(), LedgerError> {
		let mut inner = self.inner.write().await;
		mint_into(&mut inner.state, recipient, amount)?;

		tracing::debug!(%recipient, %amount, "Credited");
		Ok(())
	}

	async fn checkpoint(&self) -> Result<Checkpoint, LedgerError> {
		let mut inner = self.inner.write().await;
		let id = inner.next_checkpoint;
		inner.next_checkpoint += 1;
		let snapshot = inner.state.clone();
		inner.checkpoints.push((id, snapshot));
		Ok(Checkpoint(id))
	}

	async fn commit(&self, checkpoint: Checkpoint) -> Result<(), LedgerError> {
		let mut inner = self.inner.write().await;
		let position = inner
			.checkpoints
			.iter()
			.position(|(id, _)| *id == checkpoint.0)
			.ok_or(LedgerError::UnknownCheckpoint(checkpoint.0))?;
		// Only this checkpoint is forgotten; later ones stay revertible
		inner.checkpoints.remove(position);
		Ok(())
	}

	async fn revert(&self, checkpoint: Checkpoint) -> Result<(), LedgerError> {
		let mut inner = self.inner.write().await;
		let position = inner
			.checkpoints
			.iter()
			.position(|(id, _)| *id == checkpoint.0)
			.ok_or(LedgerError::UnknownCheckpoint(checkpoint.0))?;
		let mut dropped = inner.checkpoints.split_off(position);
		let (_, snapshot) = dropped.swap_remove(0);
		inner.state = snapshot;
		Ok(())
	}
}

/// Configuration schema for InMemoryLedger.
pub struct InMemoryLedgerSchema;

impl ConfigSchema for InMemoryLedgerSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let allowance_schema = Schema::new(
			vec![
				Field::new("owner", FieldType::String).with_validator(address_validator),
				Field::new("spender", FieldType::String).with_validator(address_validator),
				Field::new("amount", FieldType::String).with_validator(amount_validator),
			],
			vec![],
		);

		let schema = Schema::new(
			vec![],
			vec![
				Field::new("balances", FieldType::Map(Box::new(FieldType::String))).with_validator(
					|v| {
						let table = v.as_table().ok_or("expected a table")?;
						for (owner, amount) in table {
							parse_address(owner)?;
							amount_validator(amount)?;
						}
						Ok(())
					},
				),
				Field::new(
					"allowances",
					FieldType::Array(Box::new(FieldType::Table(allowance_schema))),
				),
			],
		);
		schema.validate(config)
	}
}

/// Builds the initial ledger state from a validated configuration table.
fn genesis_state(config: &toml::Value) -> Result<LedgerState, LedgerError> {
	let mut state = LedgerState::default();

	if let Some(balances) = config.get("balances").and_then(|v| v.as_table()) {
		for (owner, amount) in balances {
			let owner = parse_address(owner).map_err(LedgerError::Configuration)?;
			let amount = amount
				.as_str()
				.ok_or_else(|| LedgerError::Configuration("balance must be a string".into()))
				.and_then(|s| parse_amount(s).map_err(LedgerError::Configuration))?;
			mint_into(&mut state, owner, amount)?;
		}
	}

	if let Some(allowances) = config.get("allowances").and_then(|v| v.as_array()) {
		for entry in allowances {
			let field = |name: &str| {
				entry
					.get(name)
					.and_then(|v| v.as_str())
					.ok_or_else(|| LedgerError::Configuration(format!("allowance missing {}", name)))
			};
			let owner = parse_address(field("owner")?).map_err(LedgerError::Configuration)?;
			let spender = parse_address(field("spender")?).map_err(LedgerError::Configuration)?;
			let amount = parse_amount(field("amount")?).map_err(LedgerError::Configuration)?;
			state.allowances.insert((owner, spender), amount);
		}
	}

	Ok(state)
}

/// Factory function to create an in-memory ledger from configuration.
///
/// Configuration parameters:
/// - `balances`: table of owner address to amount string
/// - `allowances`: array of `{ owner, spender, amount }` tables; `amount` may be "max"
pub fn create_ledger(config: &toml::Value) -> Result<Box<dyn LedgerInterface>, LedgerError> {
	InMemoryLedgerSchema
		.validate(config)
		.map_err(|e| LedgerError::Configuration(e.to_string()))?;

	Ok(Box::new(InMemoryLedger::with_state(genesis_state(config)?)))
}

/// Registry for the in-memory ledger implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "memory";
	type Factory = LedgerFactory;

	fn factory() -> Self::Factory {
		create_ledger
	}
}

impl LedgerRegistry for Registry {}

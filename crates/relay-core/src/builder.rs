//! Builder for constructing a transfer authorizer from configuration.
//!
//! The nonce store and every asset ledger are created through factory
//! functions looked up by the implementation name given in the config, so
//! backends can be swapped without touching the authorizer.

use crate::authorizer::TransferAuthorizer;
use crate::nonce::NonceRegistry;
use relay_config::Config;
use relay_ledger::{LedgerError, LedgerInterface, LedgerService};
use relay_storage::{StorageError, StorageInterface, StorageService};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while assembling the relay.
#[derive(Debug, Error)]
pub enum BuilderError {
	#[error("Configuration error: {0}")]
	Config(String),
	#[error("Missing required component: {0}")]
	MissingComponent(String),
}

/// Factory functions available to the builder, keyed by implementation name.
pub struct RelayFactories<SF, LF> {
	pub storage_factories: HashMap<String, SF>,
	pub ledger_factories: HashMap<String, LF>,
}

/// Builder for a `TransferAuthorizer` with pluggable backends.
pub struct RelayBuilder {
	config: Config,
}

impl RelayBuilder {
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Creates the primary nonce store and one ledger per configured asset.
	pub fn build<SF, LF>(
		self,
		factories: RelayFactories<SF, LF>,
	) -> Result<TransferAuthorizer, BuilderError>
	where
		SF: Fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>,
		LF: Fn(&toml::Value) -> Result<Box<dyn LedgerInterface>, LedgerError>,
	{
		let primary = &self.config.storage.primary;
		let factory = factories.storage_factories.get(primary).ok_or_else(|| {
			BuilderError::MissingComponent(format!("storage implementation '{}'", primary))
		})?;
		let storage_config = self
			.config
			.storage
			.implementations
			.get(primary)
			.cloned()
			.unwrap_or_else(|| toml::Value::Table(toml::map::Map::new()));

		let backend = factory(&storage_config).map_err(|e| {
			tracing::error!(
				component = "storage",
				implementation = %primary,
				error = %e,
				"Failed to create storage implementation"
			);
			BuilderError::Config(format!(
				"Failed to create storage implementation '{}': {}",
				primary, e
			))
		})?;
		tracing::info!(component = "storage", implementation = %primary, "Loaded");

		let nonces = NonceRegistry::new(Arc::new(StorageService::new(backend)));

		let mut ledgers = LedgerService::new();
		for asset in &self.config.assets {
			let factory = factories
				.ledger_factories
				.get(&asset.implementation)
				.ok_or_else(|| {
					BuilderError::MissingComponent(format!(
						"ledger implementation '{}' for {}",
						asset.implementation, asset.symbol
					))
				})?;

			let ledger = factory(&asset.config).map_err(|e| {
				tracing::error!(
					component = "ledger",
					asset = %asset.symbol,
					implementation = %asset.implementation,
					error = %e,
					"Failed to create ledger implementation"
				);
				BuilderError::Config(format!(
					"Failed to create ledger for {}: {}",
					asset.symbol, e
				))
			})?;
			tracing::info!(
				component = "ledger",
				asset = %asset.symbol,
				address = %asset.address,
				implementation = %asset.implementation,
				"Loaded"
			);
			ledgers.register(asset.address, Arc::from(ledger));
		}

		if ledgers.assets().next().is_none() {
			return Err(BuilderError::Config("No assets configured".into()));
		}

		Ok(TransferAuthorizer::new(
			self.config.relay.address,
			nonces,
			ledgers,
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, U256};
	use relay_ledger::LedgerFactory;
	use relay_storage::StorageFactory;

	fn factories() -> RelayFactories<StorageFactory, LedgerFactory> {
		RelayFactories {
			storage_factories: relay_storage::get_all_implementations()
				.into_iter()
				.map(|(name, f)| (name.to_string(), f))
				.collect(),
			ledger_factories: relay_ledger::get_all_implementations()
				.into_iter()
				.map(|(name, f)| (name.to_string(), f))
				.collect(),
		}
	}

	const CONFIG: &str = r#"
[relay]
id = "test-relay"
address = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"

[storage]
primary = "memory"

[storage.implementations.memory]

[[assets]]
address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
symbol = "TOK"
implementation = "memory"

[assets.config.balances]
"0x70997970C51812dc3A010C7d01b50e0d17dc79C8" = "10000"

[[assets.config.allowances]]
owner = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
spender = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"
amount = "max"
"#;

	#[tokio::test]
	async fn test_build_from_config() {
		let config: Config = CONFIG.parse().unwrap();
		let authorizer = RelayBuilder::new(config).build(factories()).unwrap();

		assert_eq!(
			authorizer.address(),
			address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512")
		);
		let token = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
		let user = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
		assert_eq!(
			authorizer.ledgers().balance_of(&token, user).await,
			Some(Ok(U256::from(10000u64)))
		);
	}

	#[test]
	fn test_unknown_storage_implementation() {
		let config: Config = CONFIG
			.replace("primary = \"memory\"", "primary = \"redis\"")
			.replace("[storage.implementations.memory]", "[storage.implementations.redis]")
			.parse()
			.unwrap();
		let result = RelayBuilder::new(config).build(factories());
		assert!(matches!(result, Err(BuilderError::MissingComponent(_))));
	}

	#[test]
	fn test_unknown_ledger_implementation() {
		let config: Config = CONFIG
			.replace("implementation = \"memory\"", "implementation = \"erc20\"")
			.parse()
			.unwrap();
		let result = RelayBuilder::new(config).build(factories());
		assert!(matches!(result, Err(BuilderError::MissingComponent(_))));
	}
}

//! Configuration module for the meta-transaction relay.
//!
//! Configuration is read from a TOML file. `${VAR}` and `${VAR:-default}`
//! references are replaced with environment variables before parsing, which
//! keeps addresses and storage paths out of checked-in files. The parsed
//! configuration is validated before it is returned.

use alloy_primitives::Address;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep only the message, not the echoed input
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the relay.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Identity of this relay instance.
	pub relay: RelayConfig,
	/// Storage backend holding the nonce registry.
	pub storage: StorageConfig,
	/// Token ledgers the relay can move funds on.
	#[serde(default)]
	pub assets: Vec<AssetConfig>,
	/// HTTP API server.
	pub api: Option<ApiConfig>,
}

/// Configuration specific to the relay instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
	/// Unique identifier used in logs.
	pub id: String,
	/// Address of the authorizer itself. This is the spender that asset owners
	/// approve and the party debits are executed by.
	pub address: Address,
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which implementation to use.
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// A token ledger the relay moves funds on.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetConfig {
	/// Address identifying the ledger; part of every signed intent.
	pub address: Address,
	pub symbol: String,
	#[serde(default = "default_decimals")]
	pub decimals: u8,
	/// Name of the ledger implementation, e.g. "memory".
	pub implementation: String,
	/// Implementation-specific table.
	#[serde(default = "empty_table")]
	pub config: toml::Value,
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Whether the API server is enabled.
	#[serde(default)]
	pub enabled: bool,
	/// Host address to bind the server to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_api_port")]
	pub port: u16,
}

fn default_decimals() -> u8 {
	18
}

fn empty_table() -> toml::Value {
	toml::Value::Table(toml::map::Map::new())
}

fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
	3000
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to bound regex work.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last_end = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)))
				},
			},
		};

		result.push_str(&input[last_end..full_match.start()]);
		result.push_str(&value);
		last_end = full_match.end();
	}
	result.push_str(&input[last_end..]);

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, resolving environment variables.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			ConfigError::Io(std::io::Error::new(
				e.kind(),
				format!("Cannot read {}: {}", path.display(), e),
			))
		})?;
		content.parse()
	}

	/// Looks up the configuration of an asset by its address.
	pub fn asset(&self, address: &Address) -> Option<&AssetConfig> {
		self.assets.iter().find(|a| &a.address == address)
	}

	/// Validates the configuration to ensure all required fields are properly set.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.relay.id.is_empty() {
			return Err(ConfigError::Validation("Relay ID cannot be empty".into()));
		}
		if self.relay.address == Address::ZERO {
			return Err(ConfigError::Validation(
				"Relay address cannot be the zero address".into(),
			));
		}

		if self.storage.primary.is_empty() {
			return Err(ConfigError::Validation(
				"Storage primary implementation cannot be empty".into(),
			));
		}
		if !self
			.storage
			.implementations
			.contains_key(&self.storage.primary)
		{
			return Err(ConfigError::Validation(format!(
				"Primary storage '{}' not found in implementations",
				self.storage.primary
			)));
		}

		if self.assets.is_empty() {
			return Err(ConfigError::Validation(
				"At least one asset must be configured".into(),
			));
		}
		let mut seen = HashSet::new();
		for asset in &self.assets {
			if asset.address == Address::ZERO {
				return Err(ConfigError::Validation(format!(
					"Asset '{}' cannot use the zero address",
					asset.symbol
				)));
			}
			if !seen.insert(asset.address) {
				return Err(ConfigError::Validation(format!(
					"Duplicate asset address {}",
					asset.address
				)));
			}
			if asset.implementation.is_empty() {
				return Err(ConfigError::Validation(format!(
					"Asset '{}' must name a ledger implementation",
					asset.symbol
				)));
			}
		}

		Ok(())
	}
}

/// Parses configuration from a TOML string.
///
/// Environment variables are resolved and the configuration is validated
/// after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

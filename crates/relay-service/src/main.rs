//! Main entry point for the relay service.
//!
//! Loads the configuration, assembles a transfer authorizer from the
//! configured nonce store and asset ledgers, and serves the HTTP API.

use clap::Parser;
use relay_config::Config;
use relay_core::{RelayBuilder, RelayFactories, TransferAuthorizer};
use std::path::PathBuf;

mod apis;
mod server;

/// Command-line arguments for the relay service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config/relay.toml", env = "RELAY_CONFIG")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started relay");

	let config = Config::from_file(&args.config).await?;
	tracing::info!("Loaded configuration [{}]", config.relay.id);

	let authorizer = build_relay(config.clone())?;

	let Some(api_config) = config.api.clone().filter(|api| api.enabled) else {
		tracing::warn!("API disabled in configuration, nothing to serve");
		return Ok(());
	};
	server::start_server(api_config, config, authorizer).await?;

	tracing::info!("Stopped relay");
	Ok(())
}

/// Wires every registered storage and ledger implementation into the builder.
fn build_relay(config: Config) -> Result<TransferAuthorizer, Box<dyn std::error::Error>> {
	let factories = RelayFactories {
		storage_factories: relay_storage::get_all_implementations()
			.into_iter()
			.map(|(name, factory)| (name.to_string(), factory))
			.collect(),
		ledger_factories: relay_ledger::get_all_implementations()
			.into_iter()
			.map(|(name, factory)| (name.to_string(), factory))
			.collect(),
	};

	Ok(RelayBuilder::new(config).build(factories)?)
}

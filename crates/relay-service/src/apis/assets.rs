//! Asset information API.
//!
//! Lists the assets the relay serves and exposes balances held in their
//! ledgers.

use relay_config::Config;
use relay_core::TransferAuthorizer;
use relay_types::{parse_address, APIError, BalanceResponse};
use serde::Serialize;
use tokio::sync::Mutex;

/// Response for GET /api/assets.
#[derive(Debug, Serialize)]
pub struct AssetsResponse {
	pub assets: Vec<AssetInfo>,
}

/// Information about a served asset.
#[derive(Debug, Serialize)]
pub struct AssetInfo {
	/// Ledger address, the `asset` field of a transfer intent.
	pub address: String,
	pub symbol: String,
	pub decimals: u8,
}

/// Handles GET /api/assets requests.
pub fn list_assets(config: &Config) -> AssetsResponse {
	AssetsResponse {
		assets: config
			.assets
			.iter()
			.map(|asset| AssetInfo {
				address: asset.address.to_string(),
				symbol: asset.symbol.clone(),
				decimals: asset.decimals,
			})
			.collect(),
	}
}

/// Handles GET /api/assets/{asset}/balances/{owner} requests.
pub async fn get_balance(
	authorizer: &Mutex<TransferAuthorizer>,
	asset: &str,
	owner: &str,
) -> Result<BalanceResponse, APIError> {
	let asset = parse_address(asset).map_err(|e| APIError::BadRequest {
		error_type: "INVALID_ADDRESS".to_string(),
		message: e,
	})?;
	let owner = parse_address(owner).map_err(|e| APIError::BadRequest {
		error_type: "INVALID_ADDRESS".to_string(),
		message: e,
	})?;

	let authorizer = authorizer.lock().await;
	let balance = match authorizer.ledgers().balance_of(&asset, owner).await {
		Some(Ok(balance)) => balance,
		Some(Err(e)) => {
			return Err(APIError::InternalServerError {
				error_type: "LEDGER_ERROR".to_string(),
				message: e.to_string(),
			})
		},
		None => {
			return Err(APIError::BadRequest {
				error_type: "UNSUPPORTED_ASSET".to_string(),
				message: format!("Unsupported asset: {}", asset),
			})
		},
	};

	Ok(BalanceResponse {
		asset,
		owner,
		balance,
	})
}

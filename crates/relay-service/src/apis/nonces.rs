//! Nonce status endpoint.

use alloy_primitives::U256;
use relay_core::TransferAuthorizer;
use relay_types::{parse_address, APIError, NonceStatusResponse};
use tokio::sync::Mutex;

/// Handles GET /api/nonces/{sender}/{nonce} requests.
pub async fn get_nonce_status(
	authorizer: &Mutex<TransferAuthorizer>,
	sender: &str,
	nonce: &str,
) -> Result<NonceStatusResponse, APIError> {
	let sender = parse_address(sender).map_err(|e| APIError::BadRequest {
		error_type: "INVALID_ADDRESS".to_string(),
		message: e,
	})?;
	let nonce = nonce.parse::<U256>().map_err(|e| APIError::BadRequest {
		error_type: "INVALID_NONCE".to_string(),
		message: format!("Invalid nonce '{}': {}", nonce, e),
	})?;

	let used = authorizer
		.lock()
		.await
		.is_nonce_used(sender, nonce)
		.await
		.map_err(|e| APIError::InternalServerError {
			error_type: "STORAGE_ERROR".to_string(),
			message: e.to_string(),
		})?;

	Ok(NonceStatusResponse {
		sender,
		nonce,
		used,
	})
}

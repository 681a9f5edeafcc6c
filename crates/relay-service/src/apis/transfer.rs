//! Transfer submission endpoint.
//!
//! Relayers post a signed intent here. The authorizer is locked for the
//! whole call so transfers are processed one at a time.

use relay_core::{AuthorizationError, TransferAuthorizer};
use relay_ledger::LedgerError;
use relay_types::{APIError, TransferRequest, TransferResponse};
use tokio::sync::Mutex;

/// Handles POST /api/transfers requests.
pub async fn submit_transfer(
	authorizer: &Mutex<TransferAuthorizer>,
	request: TransferRequest,
) -> Result<TransferResponse, APIError> {
	let mut authorizer = authorizer.lock().await;
	let receipt = authorizer
		.transfer(&request.intent, &request.signature)
		.await
		.map_err(to_api_error)?;

	Ok(TransferResponse {
		digest: receipt.digest,
		signer: receipt.signer,
		recipient: receipt.intent.recipient,
		amount: receipt.intent.amount,
		nonce: receipt.intent.nonce,
	})
}

/// Maps a refused transfer onto the HTTP error it is reported as.
pub fn to_api_error(e: AuthorizationError) -> APIError {
	let message = e.to_string();
	match e {
		AuthorizationError::InvalidSignature(_) => APIError::Unauthorized {
			error_type: "INVALID_SIGNATURE".to_string(),
			message,
		},
		AuthorizationError::SignerMismatch { .. } => APIError::Unauthorized {
			error_type: "SIGNER_MISMATCH".to_string(),
			message,
		},
		AuthorizationError::NonceAlreadyUsed { .. } => APIError::Conflict {
			error_type: "NONCE_ALREADY_USED".to_string(),
			message,
		},
		AuthorizationError::UnsupportedAsset(_) => APIError::BadRequest {
			error_type: "UNSUPPORTED_ASSET".to_string(),
			message,
		},
		AuthorizationError::Ledger(ledger_err) => match ledger_err {
			LedgerError::InsufficientAllowance { .. }
			| LedgerError::InsufficientBalance { .. }
			| LedgerError::InvalidRecipient(_)
			| LedgerError::Overflow => APIError::UnprocessableEntity {
				error_type: "LEDGER_REJECTED".to_string(),
				message,
				details: Some(serde_json::json!({ "reason": ledger_err.to_string() })),
			},
			LedgerError::UnknownCheckpoint(_)
			| LedgerError::Configuration(_)
			| LedgerError::Backend(_) => APIError::InternalServerError {
				error_type: "LEDGER_ERROR".to_string(),
				message,
			},
		},
		AuthorizationError::Storage(_) => APIError::InternalServerError {
			error_type: "STORAGE_ERROR".to_string(),
			message,
		},
	}
}

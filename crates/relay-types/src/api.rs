//! API types for the relay HTTP endpoints.
//!
//! Amounts and nonces travel as decimal strings so that the full 256-bit range
//! survives JSON clients that parse numbers as doubles.

use crate::intent::{Digest, TransferIntent};
use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Response for `POST /api/digest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestResponse {
	/// The bytes an off-chain signer must sign with its personal-message routine.
	pub digest: Digest,
}

/// Request for `POST /api/transfers`: a signed intent submitted by a relayer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
	#[serde(flatten)]
	pub intent: TransferIntent,
	/// 65-byte `r ‖ s ‖ v` signature, hex encoded.
	pub signature: Bytes,
}

/// Response for a transfer that was authorized and executed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResponse {
	pub digest: Digest,
	/// Identity recovered from the signature; always equals the intent sender.
	pub signer: Address,
	pub recipient: Address,
	#[serde(with = "u256_serde")]
	pub amount: U256,
	#[serde(with = "u256_serde")]
	pub nonce: U256,
}

/// Response for `GET /api/nonces/{sender}/{nonce}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonceStatusResponse {
	pub sender: Address,
	#[serde(with = "u256_serde")]
	pub nonce: U256,
	pub used: bool,
}

/// Response for `GET /api/assets/{asset}/balances/{owner}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
	pub asset: Address,
	pub owner: Address,
	#[serde(with = "u256_serde")]
	pub balance: U256,
}

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Machine-readable error kind, e.g. "NONCE_ALREADY_USED".
	pub error: String,
	/// Human-readable description.
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}

/// API error with an associated HTTP status.
#[derive(Debug)]
pub enum APIError {
	/// Malformed request (400).
	BadRequest { error_type: String, message: String },
	/// Signature could not be verified or was not produced by the sender (401).
	Unauthorized { error_type: String, message: String },
	/// Request conflicts with state, e.g. a replayed nonce (409).
	Conflict { error_type: String, message: String },
	/// Well-formed request the ledger could not execute (422).
	UnprocessableEntity {
		error_type: String,
		message: String,
		details: Option<serde_json::Value>,
	},
	/// Unexpected failure (500).
	InternalServerError { error_type: String, message: String },
}

impl APIError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			APIError::BadRequest { .. } => 400,
			APIError::Unauthorized { .. } => 401,
			APIError::Conflict { .. } => 409,
			APIError::UnprocessableEntity { .. } => 422,
			APIError::InternalServerError { .. } => 500,
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		let (error_type, message, details) = match self {
			APIError::BadRequest {
				error_type,
				message,
			}
			| APIError::Unauthorized {
				error_type,
				message,
			}
			| APIError::Conflict {
				error_type,
				message,
			}
			| APIError::InternalServerError {
				error_type,
				message,
			} => (error_type, message, None),
			APIError::UnprocessableEntity {
				error_type,
				message,
				details,
			} => (error_type, message, details.clone()),
		};
		ErrorResponse {
			error: error_type.clone(),
			message: message.clone(),
			details,
		}
	}
}

impl fmt::Display for APIError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			APIError::BadRequest { message, .. } => write!(f, "Bad Request: {}", message),
			APIError::Unauthorized { message, .. } => write!(f, "Unauthorized: {}", message),
			APIError::Conflict { message, .. } => write!(f, "Conflict: {}", message),
			APIError::UnprocessableEntity { message, .. } => {
				write!(f, "Unprocessable Entity: {}", message)
			},
			APIError::InternalServerError { message, .. } => {
				write!(f, "Internal Server Error: {}", message)
			},
		}
	}
}

impl std::error::Error for APIError {}

impl axum::response::IntoResponse for APIError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = StatusCode::from_u16(self.status_code())
			.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		(status, Json(self.to_error_response())).into_response()
	}
}

/// Serde module for U256 values as decimal strings.
pub mod u256_serde {
	use alloy_primitives::U256;
	use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

	pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		value.to_string().serialize(serializer)
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		U256::from_str_radix(&s, 10).map_err(D::Error::custom)
	}
}

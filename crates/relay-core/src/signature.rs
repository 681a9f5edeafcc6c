//! Signer recovery for transfer digests.
//!
//! Signatures are produced by off-chain wallets with the personal-message
//! routine, so recovery runs over the EIP-191 prefixed hash of the digest.
//! Only the canonical form of a signature is accepted: `v` in {27, 28},
//! non-zero `r` and `s` below the curve order, and `s` in the lower half of
//! the order. The high-s twin of a valid signature recovers the same signer
//! and is rejected.

use alloy_primitives::{eip191_hash_message, uint, Address, Signature, B256, U256};
use relay_types::Digest;
use thiserror::Error;

/// Length of an `r ‖ s ‖ v` signature.
pub const SIGNATURE_LEN: usize = 65;

/// Order of the secp256k1 group.
pub const SECP256K1_N: U256 =
	uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141_U256);

/// Largest `s` accepted in a canonical signature, `n / 2`.
pub const SECP256K1_HALF_N: U256 =
	uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// Reasons a signature cannot yield a signer identity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
	#[error("expected {SIGNATURE_LEN} bytes, got {0}")]
	InvalidLength(usize),
	#[error("recovery id must be 27 or 28, got {0}")]
	InvalidRecoveryId(u8),
	#[error("r and s must be non-zero and below the curve order")]
	OutOfRange,
	#[error("s is in the upper half of the curve order")]
	NonCanonical,
	#[error("public key recovery failed: {0}")]
	Recovery(String),
}

/// Hash a wallet actually signs when asked to sign `digest` as a personal
/// message: `keccak256("\x19Ethereum Signed Message:\n32" ‖ digest)`.
pub fn personal_message_hash(digest: &Digest) -> B256 {
	eip191_hash_message(digest)
}

/// Recovers the identity that signed `digest`.
///
/// Pure; equal inputs always give the same result.
pub fn recover_identity(digest: &Digest, signature: &[u8]) -> Result<Address, SignatureError> {
	let signature = parse_canonical(signature)?;
	signature
		.recover_address_from_prehash(&personal_message_hash(digest))
		.map_err(|e| SignatureError::Recovery(e.to_string()))
}

/// Splits and checks a 65-byte signature.
fn parse_canonical(bytes: &[u8]) -> Result<Signature, SignatureError> {
	if bytes.len() != SIGNATURE_LEN {
		return Err(SignatureError::InvalidLength(bytes.len()));
	}

	let r = U256::from_be_slice(&bytes[..32]);
	let s = U256::from_be_slice(&bytes[32..64]);
	let y_parity = match bytes[64] {
		27 => false,
		28 => true,
		v => return Err(SignatureError::InvalidRecoveryId(v)),
	};

	if r.is_zero() || s.is_zero() || r >= SECP256K1_N {
		return Err(SignatureError::OutOfRange);
	}
	if s > SECP256K1_HALF_N {
		return Err(SignatureError::NonCanonical);
	}

	Ok(Signature::new(r, s, y_parity))
}

//! Digest construction for transfer intents.
//!
//! The digest is `keccak256` over the packed intent. Every field is written at
//! a fixed width, so no two distinct intents share an encoding and only a
//! hash collision could make two of them share a digest.

use alloy_primitives::{keccak256, Address, U256};
use relay_types::{Digest, TransferIntent};

/// Computes the digest an asset owner signs to authorize a transfer.
///
/// Pure and deterministic; safe to call from signers, relayers and verifiers.
pub fn compute_digest(
	sender: Address,
	amount: U256,
	recipient: Address,
	asset: Address,
	nonce: U256,
) -> Digest {
	intent_digest(&TransferIntent::new(sender, amount, recipient, asset, nonce))
}

/// Computes the digest of an already assembled intent.
pub fn intent_digest(intent: &TransferIntent) -> Digest {
	keccak256(intent.encode_packed())
}

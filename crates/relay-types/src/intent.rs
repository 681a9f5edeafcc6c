//! Transfer intent types.
//!
//! A transfer intent is the set of parameters an asset owner signs off-chain
//! so that a relayer can move funds on their behalf. The intent only lives for
//! the duration of a single authorization attempt.

use crate::utils::PackedEncoder;
use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// A 32-byte hash over the packed fields of a [`TransferIntent`].
///
/// This is the exact value an off-chain signer passes to its personal-message
/// signing routine.
pub type Digest = B256;

/// Length in bytes of a packed transfer intent:
/// three 20-byte addresses and two 32-byte words.
pub const PACKED_INTENT_LEN: usize = 20 * 3 + 32 * 2;

/// Parameters of a single meta-transaction transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferIntent {
	/// Owner of the funds and the identity expected to have signed the intent.
	pub sender: Address,
	/// Amount in the asset's base units.
	#[serde(with = "crate::api::u256_serde")]
	pub amount: U256,
	/// Account credited with the funds.
	pub recipient: Address,
	/// Address of the token ledger the funds are held in.
	pub asset: Address,
	/// Caller-chosen, per-sender unique value.
	#[serde(with = "crate::api::u256_serde")]
	pub nonce: U256,
}

impl TransferIntent {
	pub fn new(
		sender: Address,
		amount: U256,
		recipient: Address,
		asset: Address,
		nonce: U256,
	) -> Self {
		Self {
			sender,
			amount,
			recipient,
			asset,
			nonce,
		}
	}

	/// Encodes the intent with every field at its fixed width, in signing order:
	/// `sender ‖ amount ‖ recipient ‖ asset ‖ nonce`.
	///
	/// Addresses take 20 bytes and integers 32 big-endian bytes, matching
	/// Solidity's `abi.encodePacked(address, uint256, address, address, uint256)`.
	pub fn encode_packed(&self) -> Vec<u8> {
		let mut enc = PackedEncoder::with_capacity(PACKED_INTENT_LEN);
		enc.push_address(&self.sender);
		enc.push_u256(self.amount);
		enc.push_address(&self.recipient);
		enc.push_address(&self.asset);
		enc.push_u256(self.nonce);
		enc.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;
	use alloy_sol_types::SolValue;

	fn sample() -> TransferIntent {
		TransferIntent::new(
			address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
			U256::from(10u64),
			address!("90F79bf6EB2c4f870365E785982E1f101E93b906"),
			address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
			U256::from(1u64),
		)
	}

	#[test]
	fn test_encode_packed_matches_solidity() {
		let intent = sample();
		let expected = (
			intent.sender,
			intent.amount,
			intent.recipient,
			intent.asset,
			intent.nonce,
		)
			.abi_encode_packed();

		let packed = intent.encode_packed();
		assert_eq!(packed.len(), PACKED_INTENT_LEN);
		assert_eq!(packed, expected);
	}

	#[test]
	fn test_field_layout() {
		let intent = sample();
		let packed = intent.encode_packed();

		assert_eq!(&packed[0..20], intent.sender.as_slice());
		assert_eq!(&packed[20..52], &intent.amount.to_be_bytes::<32>());
		assert_eq!(&packed[52..72], intent.recipient.as_slice());
		assert_eq!(&packed[72..92], intent.asset.as_slice());
		assert_eq!(&packed[92..124], &intent.nonce.to_be_bytes::<32>());
	}

	#[test]
	fn test_json_amounts_are_decimal_strings() {
		let intent = sample();
		let json = serde_json::to_value(intent).unwrap();
		assert_eq!(json["amount"], "10");
		assert_eq!(json["nonce"], "1");

		let back: TransferIntent = serde_json::from_value(json).unwrap();
		assert_eq!(back, intent);
	}
}

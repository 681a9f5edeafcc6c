//! Fixed-width packed encoding.
//!
//! Mirrors Solidity's `abi.encodePacked` for the static types that make up a
//! transfer intent. Every value is written at its natural width with no
//! padding or length prefix, so a sequence of pushes has exactly one decoding.

use alloy_primitives::{Address, U256};

/// Minimal packed encoder for static types.
pub struct PackedEncoder {
	buf: Vec<u8>,
}

impl PackedEncoder {
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			buf: Vec::with_capacity(capacity),
		}
	}

	/// Appends the 20 raw address bytes.
	pub fn push_address(&mut self, addr: &Address) {
		self.buf.extend_from_slice(addr.as_slice());
	}

	/// Appends a 32-byte big-endian word.
	pub fn push_u256(&mut self, v: U256) {
		let word: [u8; 32] = v.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

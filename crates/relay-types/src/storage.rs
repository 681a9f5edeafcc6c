//! Storage namespaces used by the relay.

/// Storage keys for different data collections.
///
/// Used as the namespace prefix of every key written through the storage
/// service, e.g. `nonces:<sender>:<nonce>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
	/// Consumed `(sender, nonce)` pairs.
	Nonces,
}

impl StorageKey {
	/// Returns the string representation of the storage key.
	pub fn as_str(&self) -> &'static str {
		match self {
			StorageKey::Nonces => "nonces",
		}
	}
}

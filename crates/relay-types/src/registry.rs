//! Registry trait for self-registering implementations.
//!
//! Backends (storage, ledger, account) declare the name they are referenced by
//! in configuration together with the factory that builds them.

/// Base trait for implementation registries.
///
/// Each implementation module provides a `Registry` struct implementing this
/// trait, so the builder can map configuration names to factories without a
/// hand-maintained match.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation,
	/// e.g. "memory" for `storage.implementations.memory`.
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Returns the factory function for this implementation.
	fn factory() -> Self::Factory;
}

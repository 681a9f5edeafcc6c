//! Common types module for the meta-transaction relay.
//!
//! This module defines the data types shared by every relay component:
//! the transfer intent that gets signed, the wire types of the HTTP API,
//! configuration validation helpers and the implementation registry used
//! to wire pluggable backends together.

/// API types for HTTP endpoints and request/response structures.
pub mod api;
/// Transfer intents and the fixed-width values they are built from.
pub mod intent;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Secret string wrapper for private keys.
pub mod secret_string;
/// Storage namespaces used by the relay.
pub mod storage;
/// Utility functions for encoding, parsing and formatting.
pub mod utils;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

pub use alloy_primitives::{Address, B256, U256};

// Re-export all types for convenient access
pub use api::*;
pub use intent::*;
pub use registry::ImplementationRegistry;
pub use secret_string::SecretString;
pub use storage::*;
pub use utils::{parse_address, parse_amount, truncate_id, with_0x_prefix, without_0x_prefix};
pub use validation::*;

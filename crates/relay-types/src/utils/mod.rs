//! Utility functions for common type conversions and transformations.
//!
//! This module provides the fixed-width packed encoder used for digests,
//! parsing helpers for configuration and request values, and string
//! formatting used in logs.

pub mod conversion;
pub mod encoding;
pub mod formatting;

pub use conversion::{parse_address, parse_amount};
pub use encoding::PackedEncoder;
pub use formatting::{truncate_id, with_0x_prefix, without_0x_prefix};

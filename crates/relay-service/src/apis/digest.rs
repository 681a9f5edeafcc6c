//! Digest endpoint.
//!
//! Lets wallets and relayers obtain the exact bytes an owner must sign for a
//! given transfer without reimplementing the packed encoding.

use relay_core::intent_digest;
use relay_types::{DigestResponse, TransferIntent};

/// Handles POST /api/digest requests.
pub fn process_digest_request(intent: &TransferIntent) -> DigestResponse {
	DigestResponse {
		digest: intent_digest(intent),
	}
}

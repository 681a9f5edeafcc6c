//! Signature-authorized transfers.
//!
//! `TransferAuthorizer` lets a relayer move an owner's funds on the owner's
//! behalf. The owner signs the digest of a transfer intent off-chain; the
//! relayer submits intent and signature, and the authorizer:
//!
//! 1. recomputes the digest from the submitted fields,
//! 2. recovers the signer and requires it to be the intent's sender,
//! 3. consumes the `(sender, nonce)` pair,
//! 4. debits the sender using the relay's allowance and credits the recipient.
//!
//! Step 3 is durable before step 4 starts. If step 4 fails, the ledger is
//! reverted to its checkpoint and the nonce reservation is released, so a
//! failed transfer leaves no trace.
//!
//! `transfer` takes `&mut self`: a ledger cannot call back into the
//! authorizer while a transfer is in progress.

use crate::digest::{compute_digest, intent_digest};
use crate::nonce::NonceRegistry;
use crate::signature::recover_identity;
use crate::AuthorizationError;
use alloy_primitives::{Address, U256};
use relay_ledger::{LedgerError, LedgerInterface, LedgerService};
use relay_storage::StorageError;
use relay_types::{truncate_id, with_0x_prefix, Digest, TransferIntent};
use tracing::instrument;

/// Outcome of an executed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
	pub digest: Digest,
	/// Identity recovered from the signature.
	pub signer: Address,
	pub intent: TransferIntent,
}

/// Verifies signed transfer intents and executes them against asset ledgers.
pub struct TransferAuthorizer {
	/// Identity that holds the owners' allowances and executes debits.
	address: Address,
	nonces: NonceRegistry,
	ledgers: LedgerService,
}

impl TransferAuthorizer {
	pub fn new(address: Address, nonces: NonceRegistry, ledgers: LedgerService) -> Self {
		Self {
			address,
			nonces,
			ledgers,
		}
	}

	/// Identity the relay debits under.
	pub fn address(&self) -> Address {
		self.address
	}

	pub fn ledgers(&self) -> &LedgerService {
		&self.ledgers
	}

	/// Digest an owner must sign to authorize the given transfer.
	pub fn compute_digest(
		&self,
		sender: Address,
		amount: U256,
		recipient: Address,
		asset: Address,
		nonce: U256,
	) -> Digest {
		compute_digest(sender, amount, recipient, asset, nonce)
	}

	/// Whether `(sender, nonce)` has already authorized a transfer.
	pub async fn is_nonce_used(&self, sender: Address, nonce: U256) -> Result<bool, StorageError> {
		self.nonces.is_used(sender, nonce).await
	}

	/// Verifies `signature` over `intent` and moves the funds.
	///
	/// On success the nonce is consumed and exactly `amount` moved from
	/// sender to recipient. On error no funds have moved and the nonce is
	/// unused, with one exception: when the ledger cannot confirm a commit or
	/// a revert, or the reservation cannot be released, the nonce stays used.
	/// The signature can then never be replayed, even if funds did move.
	#[instrument(skip_all, fields(sender = %intent.sender, nonce = %intent.nonce))]
	pub async fn transfer(
		&mut self,
		intent: &TransferIntent,
		signature: &[u8],
	) -> Result<TransferReceipt, AuthorizationError> {
		let digest = intent_digest(intent);
		let digest_hex = with_0x_prefix(&hex::encode(digest));

		let signer = recover_identity(&digest, signature).inspect_err(|e| {
			tracing::warn!(digest = %truncate_id(&digest_hex), error = %e, "Rejected signature");
		})?;

		if signer != intent.sender {
			tracing::warn!(
				digest = %truncate_id(&digest_hex),
				recovered = %signer,
				"Signature does not belong to sender"
			);
			return Err(AuthorizationError::SignerMismatch {
				claimed: intent.sender,
				recovered: signer,
			});
		}

		let ledger = self
			.ledgers
			.get(&intent.asset)
			.cloned()
			.ok_or(AuthorizationError::UnsupportedAsset(intent.asset))?;

		if !self
			.nonces
			.consume(intent.sender, intent.nonce, &digest)
			.await?
		{
			tracing::warn!(digest = %truncate_id(&digest_hex), "Nonce already used");
			return Err(AuthorizationError::NonceAlreadyUsed {
				sender: intent.sender,
				nonce: intent.nonce,
			});
		}

		if let Err(failure) = self.move_funds(ledger.as_ref(), intent).await {
			if !failure.rolled_back {
				tracing::error!(
					digest = %truncate_id(&digest_hex),
					error = %failure.error,
					"Ledger outcome unconfirmed, nonce stays used"
				);
			} else if let Err(release_err) = self.nonces.release(intent.sender, intent.nonce).await
			{
				tracing::error!(
					digest = %truncate_id(&digest_hex),
					error = %release_err,
					"Failed to release nonce after aborted transfer"
				);
			} else {
				tracing::warn!(
					digest = %truncate_id(&digest_hex),
					error = %failure.error,
					"Transfer aborted"
				);
			}
			return Err(failure.error.into());
		}

		tracing::info!(
			digest = %truncate_id(&digest_hex),
			recipient = %intent.recipient,
			amount = %intent.amount,
			"Transfer executed"
		);

		Ok(TransferReceipt {
			digest,
			signer,
			intent: *intent,
		})
	}

	/// Debit then credit inside a ledger checkpoint.
	async fn move_funds(
		&self,
		ledger: &dyn LedgerInterface,
		intent: &TransferIntent,
	) -> Result<(), LedgerFailure> {
		// Nothing has been written if the checkpoint cannot be taken
		let checkpoint = ledger.checkpoint().await.map_err(LedgerFailure::undone)?;

		let result = async {
			ledger
				.debit(intent.sender, self.address, intent.amount)
				.await?;
			ledger.credit(intent.recipient, intent.amount).await
		}
		.await;

		match result {
			Ok(()) => ledger
				.commit(checkpoint)
				.await
				.map_err(LedgerFailure::unconfirmed),
			Err(e) => match ledger.revert(checkpoint).await {
				Ok(()) => Err(LedgerFailure::undone(e)),
				Err(revert_err) => {
					tracing::error!(error = %revert_err, "Failed to revert ledger checkpoint");
					Err(LedgerFailure::unconfirmed(e))
				},
			},
		}
	}
}

/// A failed ledger step and whether its writes are known to be undone.
struct LedgerFailure {
	error: LedgerError,
	rolled_back: bool,
}

impl LedgerFailure {
	fn undone(error: LedgerError) -> Self {
		Self {
			error,
			rolled_back: true,
		}
	}

	fn unconfirmed(error: LedgerError) -> Self {
		Self {
			error,
			rolled_back: false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, Bytes};
	use async_trait::async_trait;
	use relay_account::{implementations::local::LocalAccount, AccountService};
	use relay_ledger::{implementations::memory::InMemoryLedger, Checkpoint};
	use relay_storage::{implementations::memory::MemoryStorage, StorageService};
	use relay_types::ConfigSchema;
	use std::sync::atomic::{AtomicBool, Ordering};
	use std::sync::Arc;

	const USER_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
	const OTHER_KEY: &str = "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a";
	const USER: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
	const RECIPIENT: Address = address!("90F79bf6EB2c4f870365E785982E1f101E93b906");
	const TOKEN: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
	const RELAY: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");

	fn ether(n: u64) -> U256 {
		U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
	}

	fn account(key: &str) -> AccountService {
		AccountService::new(Box::new(LocalAccount::new(key).unwrap()))
	}

	fn nonces() -> NonceRegistry {
		NonceRegistry::new(Arc::new(StorageService::new(Box::new(MemoryStorage::new()))))
	}

	/// User holds 10000 tokens and has approved the relay for all of them.
	async fn setup() -> (TransferAuthorizer, InMemoryLedger) {
		let ledger = InMemoryLedger::new();
		ledger.mint(USER, ether(10000)).await.unwrap();
		ledger.approve(USER, RELAY, U256::MAX).await.unwrap();

		let mut ledgers = LedgerService::new();
		ledgers.register(TOKEN, Arc::new(ledger.clone()));

		(TransferAuthorizer::new(RELAY, nonces(), ledgers), ledger)
	}

	async fn sign(key: &str, intent: &TransferIntent) -> Bytes {
		account(key).sign_digest(&intent_digest(intent)).await.unwrap()
	}

	fn intent(amount: U256, nonce: u64) -> TransferIntent {
		TransferIntent::new(USER, amount, RECIPIENT, TOKEN, U256::from(nonce))
	}

	#[tokio::test]
	async fn test_transfer_moves_funds() {
		let (mut authorizer, ledger) = setup().await;

		let first = intent(ether(10), 1);
		let first_sig = sign(USER_KEY, &first).await;
		let receipt = authorizer.transfer(&first, &first_sig).await.unwrap();

		assert_eq!(receipt.signer, USER);
		assert_eq!(receipt.digest, intent_digest(&first));
		assert_eq!(ledger.balance_of(USER).await.unwrap(), ether(9990));
		assert_eq!(ledger.balance_of(RECIPIENT).await.unwrap(), ether(10));
		assert!(authorizer
			.is_nonce_used(USER, U256::from(1u64))
			.await
			.unwrap());

		let second = intent(ether(10), 2);
		let sig = sign(USER_KEY, &second).await;
		authorizer.transfer(&second, &sig).await.unwrap();

		assert_eq!(ledger.balance_of(USER).await.unwrap(), ether(9980));
		assert_eq!(ledger.balance_of(RECIPIENT).await.unwrap(), ether(20));

		// Resubmitting the first transfer after the second one is still refused
		assert!(matches!(
			authorizer.transfer(&first, &first_sig).await,
			Err(AuthorizationError::NonceAlreadyUsed { .. })
		));
		assert_eq!(ledger.balance_of(USER).await.unwrap(), ether(9980));
		assert_eq!(ledger.balance_of(RECIPIENT).await.unwrap(), ether(20));
		assert_eq!(ledger.total_supply().await, ether(10000));
	}

	#[tokio::test]
	async fn test_replay_rejected() {
		let (mut authorizer, ledger) = setup().await;

		let transfer = intent(ether(10), 1);
		let sig = sign(USER_KEY, &transfer).await;
		authorizer.transfer(&transfer, &sig).await.unwrap();

		let replay = authorizer.transfer(&transfer, &sig).await;
		assert!(matches!(
			replay,
			Err(AuthorizationError::NonceAlreadyUsed { sender, nonce })
				if sender == USER && nonce == U256::from(1u64)
		));
		assert_eq!(ledger.balance_of(USER).await.unwrap(), ether(9990));
		assert_eq!(ledger.balance_of(RECIPIENT).await.unwrap(), ether(10));
	}

	#[tokio::test]
	async fn test_used_nonce_rejected_for_different_intent() {
		let (mut authorizer, ledger) = setup().await;

		let transfer = intent(ether(10), 1);
		let sig = sign(USER_KEY, &transfer).await;
		authorizer.transfer(&transfer, &sig).await.unwrap();

		// Fresh signature over a different amount, same nonce
		let other = intent(ether(5), 1);
		let sig = sign(USER_KEY, &other).await;
		assert!(matches!(
			authorizer.transfer(&other, &sig).await,
			Err(AuthorizationError::NonceAlreadyUsed { .. })
		));
		assert_eq!(ledger.balance_of(USER).await.unwrap(), ether(9990));
	}

	#[tokio::test]
	async fn test_nonces_need_not_be_sequential() {
		let (mut authorizer, ledger) = setup().await;

		for nonce in [500u64, 3, 9] {
			let transfer = intent(ether(1), nonce);
			let sig = sign(USER_KEY, &transfer).await;
			authorizer.transfer(&transfer, &sig).await.unwrap();
		}
		assert_eq!(ledger.balance_of(RECIPIENT).await.unwrap(), ether(3));
	}

	#[tokio::test]
	async fn test_signature_from_other_key_rejected() {
		let (mut authorizer, ledger) = setup().await;

		let transfer = intent(ether(10), 1);
		let sig = sign(OTHER_KEY, &transfer).await;
		let result = authorizer.transfer(&transfer, &sig).await;

		assert!(matches!(
			result,
			Err(AuthorizationError::SignerMismatch { claimed, recovered })
				if claimed == USER
					&& recovered == address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC")
		));
		assert_eq!(ledger.balance_of(USER).await.unwrap(), ether(10000));
		assert!(!authorizer
			.is_nonce_used(USER, U256::from(1u64))
			.await
			.unwrap());
	}

	#[tokio::test]
	async fn test_tampered_field_rejected() {
		let (mut authorizer, ledger) = setup().await;

		let signed = intent(ether(10), 1);
		let sig = sign(USER_KEY, &signed).await;

		let tampered = [
			TransferIntent {
				amount: ether(100),
				..signed
			},
			TransferIntent {
				recipient: Address::repeat_byte(0x66),
				..signed
			},
			TransferIntent {
				nonce: U256::from(2u64),
				..signed
			},
		];
		for intent in tampered {
			assert!(matches!(
				authorizer.transfer(&intent, &sig).await,
				Err(AuthorizationError::SignerMismatch { claimed, recovered })
					if claimed == USER && recovered != USER
			));
		}
		assert_eq!(ledger.balance_of(USER).await.unwrap(), ether(10000));
	}

	#[tokio::test]
	async fn test_malformed_signature_rejected() {
		let (mut authorizer, _) = setup().await;

		let transfer = intent(ether(10), 1);
		let mut sig = sign(USER_KEY, &transfer).await.to_vec();
		sig.truncate(64);

		assert!(matches!(
			authorizer.transfer(&transfer, &sig).await,
			Err(AuthorizationError::InvalidSignature(_))
		));
		assert!(!authorizer
			.is_nonce_used(USER, U256::from(1u64))
			.await
			.unwrap());
	}

	#[tokio::test]
	async fn test_ledger_failure_leaves_nonce_unused() {
		let ledger = InMemoryLedger::new();
		ledger.mint(USER, ether(5)).await.unwrap();
		ledger.approve(USER, RELAY, U256::MAX).await.unwrap();
		let mut ledgers = LedgerService::new();
		ledgers.register(TOKEN, Arc::new(ledger.clone()));
		let mut authorizer = TransferAuthorizer::new(RELAY, nonces(), ledgers);

		let transfer = intent(ether(10), 1);
		let sig = sign(USER_KEY, &transfer).await;
		assert!(matches!(
			authorizer.transfer(&transfer, &sig).await,
			Err(AuthorizationError::Ledger(LedgerError::InsufficientBalance { .. }))
		));
		assert!(!authorizer
			.is_nonce_used(USER, U256::from(1u64))
			.await
			.unwrap());

		// Once funded, the same signed intent goes through
		ledger.mint(USER, ether(5)).await.unwrap();
		authorizer.transfer(&transfer, &sig).await.unwrap();
		assert_eq!(ledger.balance_of(RECIPIENT).await.unwrap(), ether(10));
	}

	#[tokio::test]
	async fn test_missing_allowance_rejected() {
		let ledger = InMemoryLedger::new();
		ledger.mint(USER, ether(100)).await.unwrap();
		ledger.approve(USER, RELAY, ether(5)).await.unwrap();
		let mut ledgers = LedgerService::new();
		ledgers.register(TOKEN, Arc::new(ledger.clone()));
		let mut authorizer = TransferAuthorizer::new(RELAY, nonces(), ledgers);

		let transfer = intent(ether(10), 1);
		let sig = sign(USER_KEY, &transfer).await;
		assert!(matches!(
			authorizer.transfer(&transfer, &sig).await,
			Err(AuthorizationError::Ledger(LedgerError::InsufficientAllowance { .. }))
		));
		assert_eq!(ledger.balance_of(USER).await.unwrap(), ether(100));
		assert_eq!(ledger.allowance(USER, RELAY).await.unwrap(), ether(5));
	}

	#[tokio::test]
	async fn test_failed_credit_reverts_debit() {
		let (mut authorizer, ledger) = setup().await;

		let transfer = TransferIntent::new(USER, ether(10), Address::ZERO, TOKEN, U256::from(1u64));
		let sig = sign(USER_KEY, &transfer).await;
		assert!(matches!(
			authorizer.transfer(&transfer, &sig).await,
			Err(AuthorizationError::Ledger(LedgerError::InvalidRecipient(_)))
		));
		assert_eq!(ledger.balance_of(USER).await.unwrap(), ether(10000));
		assert!(!authorizer
			.is_nonce_used(USER, U256::from(1u64))
			.await
			.unwrap());
	}

	#[tokio::test]
	async fn test_unsupported_asset_rejected() {
		let (mut authorizer, _) = setup().await;

		let transfer = TransferIntent::new(
			USER,
			ether(1),
			RECIPIENT,
			Address::repeat_byte(0x77),
			U256::from(1u64),
		);
		let sig = sign(USER_KEY, &transfer).await;
		assert!(matches!(
			authorizer.transfer(&transfer, &sig).await,
			Err(AuthorizationError::UnsupportedAsset(_))
		));
		assert!(!authorizer
			.is_nonce_used(USER, U256::from(1u64))
			.await
			.unwrap());
	}

	#[tokio::test]
	async fn test_zero_amount_consumes_nonce() {
		let (mut authorizer, ledger) = setup().await;

		let transfer = intent(U256::ZERO, 4);
		let sig = sign(USER_KEY, &transfer).await;
		authorizer.transfer(&transfer, &sig).await.unwrap();

		assert!(authorizer
			.is_nonce_used(USER, U256::from(4u64))
			.await
			.unwrap());
		assert_eq!(ledger.balance_of(USER).await.unwrap(), ether(10000));
	}

	#[tokio::test]
	async fn test_compute_digest_matches_signed_digest() {
		let (authorizer, _) = setup().await;
		let transfer = intent(ether(10), 1);
		assert_eq!(
			authorizer.compute_digest(USER, ether(10), RECIPIENT, TOKEN, U256::from(1u64)),
			intent_digest(&transfer)
		);
	}

	/// Ledger that records whether the nonce was already consumed when its
	/// debit ran.
	struct ObservingLedger {
		inner: InMemoryLedger,
		nonces: NonceRegistry,
		saw_used_nonce: Arc<AtomicBool>,
	}

	#[async_trait]
	impl LedgerInterface for ObservingLedger {
		fn config_schema(&self) -> Box<dyn ConfigSchema> {
			self.inner.config_schema()
		}

		async fn balance_of(&self, owner: Address) -> Result<U256, LedgerError> {
			self.inner.balance_of(owner).await
		}

		async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, LedgerError> {
			self.inner.allowance(owner, spender).await
		}

		async fn debit(
			&self,
			owner: Address,
			spender: Address,
			amount: U256,
		) -> Result<(), LedgerError> {
			let used = self
				.nonces
				.is_used(owner, U256::from(1u64))
				.await
				.map_err(|e| LedgerError::Backend(e.to_string()))?;
			self.saw_used_nonce.store(used, Ordering::SeqCst);
			self.inner.debit(owner, spender, amount).await
		}

		async fn credit(&self, recipient: Address, amount: U256) -> Result<(), LedgerError> {
			self.inner.credit(recipient, amount).await
		}

		async fn checkpoint(&self) -> Result<Checkpoint, LedgerError> {
			self.inner.checkpoint().await
		}

		async fn commit(&self, checkpoint: Checkpoint) -> Result<(), LedgerError> {
			self.inner.commit(checkpoint).await
		}

		async fn revert(&self, checkpoint: Checkpoint) -> Result<(), LedgerError> {
			self.inner.revert(checkpoint).await
		}
	}

	#[tokio::test]
	async fn test_nonce_consumed_before_ledger_runs() {
		let inner = InMemoryLedger::new();
		inner.mint(USER, ether(100)).await.unwrap();
		inner.approve(USER, RELAY, U256::MAX).await.unwrap();

		let nonces = nonces();
		let saw_used_nonce = Arc::new(AtomicBool::new(false));
		let mut ledgers = LedgerService::new();
		ledgers.register(
			TOKEN,
			Arc::new(ObservingLedger {
				inner,
				nonces: nonces.clone(),
				saw_used_nonce: saw_used_nonce.clone(),
			}),
		);
		let mut authorizer = TransferAuthorizer::new(RELAY, nonces, ledgers);

		let transfer = intent(ether(10), 1);
		let sig = sign(USER_KEY, &transfer).await;
		authorizer.transfer(&transfer, &sig).await.unwrap();

		assert!(saw_used_nonce.load(Ordering::SeqCst));
	}

	/// Ledger that applies every operation but can report commit or revert
	/// as failed.
	struct FaultyLedger {
		inner: InMemoryLedger,
		fail_commit: bool,
		fail_revert: bool,
	}

	#[async_trait]
	impl LedgerInterface for FaultyLedger {
		fn config_schema(&self) -> Box<dyn ConfigSchema> {
			self.inner.config_schema()
		}

		async fn balance_of(&self, owner: Address) -> Result<U256, LedgerError> {
			self.inner.balance_of(owner).await
		}

		async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, LedgerError> {
			self.inner.allowance(owner, spender).await
		}

		async fn debit(
			&self,
			owner: Address,
			spender: Address,
			amount: U256,
		) -> Result<(), LedgerError> {
			self.inner.debit(owner, spender, amount).await
		}

		async fn credit(&self, recipient: Address, amount: U256) -> Result<(), LedgerError> {
			self.inner.credit(recipient, amount).await
		}

		async fn checkpoint(&self) -> Result<Checkpoint, LedgerError> {
			self.inner.checkpoint().await
		}

		async fn commit(&self, checkpoint: Checkpoint) -> Result<(), LedgerError> {
			self.inner.commit(checkpoint).await?;
			if self.fail_commit {
				return Err(LedgerError::Backend("commit not acknowledged".into()));
			}
			Ok(())
		}

		async fn revert(&self, checkpoint: Checkpoint) -> Result<(), LedgerError> {
			if self.fail_revert {
				return Err(LedgerError::Backend("revert not acknowledged".into()));
			}
			self.inner.revert(checkpoint).await
		}
	}

	async fn faulty_authorizer(
		fail_commit: bool,
		fail_revert: bool,
	) -> (TransferAuthorizer, InMemoryLedger) {
		let inner = InMemoryLedger::new();
		inner.mint(USER, ether(100)).await.unwrap();
		inner.approve(USER, RELAY, U256::MAX).await.unwrap();

		let mut ledgers = LedgerService::new();
		ledgers.register(
			TOKEN,
			Arc::new(FaultyLedger {
				inner: inner.clone(),
				fail_commit,
				fail_revert,
			}),
		);
		(TransferAuthorizer::new(RELAY, nonces(), ledgers), inner)
	}

	#[tokio::test]
	async fn test_failed_commit_keeps_nonce_used() {
		let (mut authorizer, ledger) = faulty_authorizer(true, false).await;

		let transfer = intent(ether(10), 1);
		let sig = sign(USER_KEY, &transfer).await;
		assert!(matches!(
			authorizer.transfer(&transfer, &sig).await,
			Err(AuthorizationError::Ledger(LedgerError::Backend(_)))
		));
		assert!(authorizer
			.is_nonce_used(USER, U256::from(1u64))
			.await
			.unwrap());

		// The signature cannot move funds a second time
		for _ in 0..2 {
			assert!(matches!(
				authorizer.transfer(&transfer, &sig).await,
				Err(AuthorizationError::NonceAlreadyUsed { .. })
			));
		}
		assert_eq!(ledger.balance_of(USER).await.unwrap(), ether(90));
		assert_eq!(ledger.balance_of(RECIPIENT).await.unwrap(), ether(10));
	}

	#[tokio::test]
	async fn test_failed_revert_keeps_nonce_used() {
		let (mut authorizer, _) = faulty_authorizer(false, true).await;

		let transfer = TransferIntent::new(USER, ether(10), Address::ZERO, TOKEN, U256::from(1u64));
		let sig = sign(USER_KEY, &transfer).await;
		assert!(matches!(
			authorizer.transfer(&transfer, &sig).await,
			Err(AuthorizationError::Ledger(LedgerError::InvalidRecipient(_)))
		));
		assert!(authorizer
			.is_nonce_used(USER, U256::from(1u64))
			.await
			.unwrap());
		assert!(matches!(
			authorizer.transfer(&transfer, &sig).await,
			Err(AuthorizationError::NonceAlreadyUsed { .. })
		));
	}
}

use prehandle_interfaces::SignatureEngine;
use prehandle_types::{Key, SignatureVerification};
use std::sync::Arc;
use threadpool::ThreadPool;
use tokio::sync::watch;

/// An eventually-completed handle to a single-key signature verification,
/// created already-scheduled: constructing one always submits the
/// verification to the CPU-bound pool, it never lazily waits to be
/// awaited.
///
/// Cloning a `SignatureVerificationFuture` shares the same underlying
/// completion slot (it wraps a [`watch::Receiver`]), so two clones resolve
/// to the identical [`SignatureVerification`] value the moment either one
/// observes completion — this is what lets [`crate::composite::evaluate_key`]
/// and repeated `verification_for` queries return the same future, checkable
/// via [`Self::same_future_as`].
#[derive(Clone)]
pub struct SignatureVerificationFuture {
    key: Key,
    evm_alias: Option<Vec<u8>>,
    rx: watch::Receiver<Option<SignatureVerification>>,
}

impl SignatureVerificationFuture {
    /// Submits a verification of `signature_bytes` against `key` and
    /// `message_hash` onto `pool`, returning immediately with a handle to
    /// the eventual result. `expected_alias` is the EVM alias a
    /// hollow-account dispatch expects the recovered key to resolve to; it
    /// is known up front and is why `evm_alias()` doesn't require awaiting.
    pub fn dispatch<E>(
        pool: &ThreadPool,
        engine: Arc<E>,
        key: Key,
        signature_bytes: Vec<u8>,
        message_hash: Vec<u8>,
        expected_alias: Option<Vec<u8>>,
    ) -> Self
    where
        E: SignatureEngine + 'static,
    {
        let (tx, rx) = watch::channel(None);
        let dispatched_key = key.clone();
        let alias_for_worker = expected_alias.clone();
        pool.execute(move || {
            let verification = engine.verify_signature(
                &key,
                &signature_bytes,
                &message_hash,
                alias_for_worker.as_deref(),
            );
            // The receiver side outlives this closure for as long as the
            // PreHandleResult that owns it is alive; a send error here only
            // means every consumer already gave up, which is fine to ignore.
            let _ = tx.send(Some(verification));
        });
        Self {
            key: dispatched_key,
            evm_alias: expected_alias,
            rx,
        }
    }

    /// Builds a future already bound to a known outcome, for tests and for
    /// the immediate-failure paths that don't need a real dispatch.
    pub fn ready(verification: SignatureVerification) -> Self {
        let key = verification.key().clone();
        let evm_alias = verification.evm_alias().map(|a| a.to_vec());
        let (tx, rx) = watch::channel(Some(verification));
        // Keep the sender alive for the lifetime of this future so the
        // receiver never observes a closed channel.
        std::mem::forget(tx);
        Self { key, evm_alias, rx }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn evm_alias(&self) -> Option<&[u8]> {
        self.evm_alias.as_deref()
    }

    /// Awaits the verdict. Cancellation is unsupported: dropping the
    /// returned future simply stops polling, it does not stop the
    /// already-submitted pool job.
    pub async fn result(&self) -> SignatureVerification {
        let mut rx = self.rx.clone();
        loop {
            if let Some(v) = rx.borrow_and_update().clone() {
                return v;
            }
            if rx.changed().await.is_err() {
                // The sender was dropped without ever completing — the
                // pool job panicked. Absent is failure.
                return SignatureVerification::failed_for(self.key.clone());
            }
        }
    }

    /// True iff `self` and `other` share the same underlying completion
    /// slot, i.e. they are the *same* future rather than two futures that
    /// merely happen to agree once resolved.
    pub fn same_future_as(&self, other: &Self) -> bool {
        self.rx.same_channel(&other.rx)
    }
}

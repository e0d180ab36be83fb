use prehandle_types::{Key, SignatureVerification};

/// The single-signature verification collaborator. Always returns a
/// verdict; an engine-internal error maps to `passed = false` rather than
/// propagating a `Result`.
///
/// Synchronous by design: real verification work is CPU-bound, so this
/// core dispatches it onto a dedicated verification thread pool rather
/// than modelling it as `async`. The asynchrony callers see is in how the
/// dispatch is wrapped (see `prehandle_evaluator::SignatureVerificationFuture`),
/// not in this trait.
pub trait SignatureEngine: Send + Sync {
    /// Verifies `signature_bytes` against `key` and `message_hash`. When
    /// `expected_alias` is set, the caller is verifying a hollow account's
    /// signature and expects the recovered key's EVM alias echoed back in
    /// the verdict so `PreHandleResult::verification_for_alias` can find it.
    fn verify_signature(
        &self,
        key: &Key,
        signature_bytes: &[u8],
        message_hash: &[u8],
        expected_alias: Option<&[u8]>,
    ) -> SignatureVerification;
}

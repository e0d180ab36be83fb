/// The terminal state of a pre-handle pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreHandleStatus {
    /// Decoded, payer resolved, handler ran, verifications dispatched.
    SoFarSoGood,
    /// Decode failed. The node, not the submitter, is at fault.
    NodeDueDiligenceFailure,
    /// Decoded fine, but payer resolution or handler key-gathering failed.
    PreHandleFailure,
    /// Any other, uncaught failure.
    UnknownFailure,
}

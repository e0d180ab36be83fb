use prehandle_types::PreCheckError;

/// The transaction-kind-specific key-gathering step. What each transaction kind requires is
/// explicitly out of scope for this core; this trait is the seam the workflow calls through so the
/// orchestrator itself stays transaction-kind-agnostic.
///
/// `Ctx` is left generic rather than naming a concrete context type here so
/// this crate doesn't need to depend on `prehandle-workflow` (which is the
/// crate that actually defines `PreHandleContext`); the orchestrator binds
/// the concrete type.
pub trait TransactionHandler<Ctx>: Send + Sync {
    /// Populates `ctx` with every key and hollow account this transaction
    /// kind requires, via `ctx.require_key(...)`,
    /// `ctx.require_key_or_throw*(...)`, and
    /// `ctx.require_signature_for_hollow_account(...)`.
    fn gather_required_keys(&self, ctx: &mut Ctx) -> Result<(), PreCheckError>;
}

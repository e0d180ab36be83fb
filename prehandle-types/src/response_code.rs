use serde::{Deserialize, Serialize};

/// The response-code surface this core produces. Handlers downstream of
/// the core may produce additional codes of their own; this enum is not a
/// closed vocabulary for the whole node, only for what pre-handle itself can
/// emit plus the codes a handler hands back through [`crate::error::PreCheckError`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ResponseCode {
    /// Success path.
    Ok,
    /// Uncaught-exception fallback.
    Unknown,
    /// Payer missing or unkeyed.
    InvalidPayerAccountId,
    /// Malformed envelope.
    InvalidTransaction,
    /// Envelope decoded but the body is missing or unparsable.
    InvalidTransactionBody,
    /// A referenced account does not exist.
    InvalidAccountId,
    /// A referenced contract does not exist.
    InvalidContractId,
    /// A key attached to an account or contract is not a valid [`crate::key::Key`].
    InvalidAccountKey,
    /// Catch-all for handler-specific validation failures not covered above.
    Other(String),
}

impl ResponseCode {
    pub fn is_ok(&self) -> bool {
        matches!(self, ResponseCode::Ok)
    }
}

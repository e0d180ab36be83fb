use crate::response_code::ResponseCode;
use thiserror::Error;

/// A validation failure detected inside the pre-handle workflow that maps
/// directly onto a [`ResponseCode`] and becomes a `PreHandleResult` of
/// status `PRE_HANDLE_FAILURE` (or `NODE_DUE_DILIGENCE_FAILURE`, for decode
/// failures). This is the *recoverable* half of the fault taxonomy: the
/// submitted transaction, not the core, is at fault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("pre-check failed: {response_code:?}")]
pub struct PreCheckError {
    pub response_code: ResponseCode,
}

impl PreCheckError {
    pub fn new(response_code: ResponseCode) -> Self {
        Self { response_code }
    }
}

/// A programmer error: a precondition the caller violated that has nothing
/// to do with the transaction's validity (null where not permitted, the
/// hollow-account type check in `requireSignatureForHollowAccount`). The
/// workflow lets these surface immediately rather than catching them into a
/// `PreHandleResult`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid argument: {0}")]
pub struct InvalidArgument(pub String);

impl InvalidArgument {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

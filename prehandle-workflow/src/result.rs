use crate::status::PreHandleStatus;
use prehandle_evaluator::{evaluate_key, SignatureVerificationFuture};
use prehandle_types::{AccountId, Key, ResponseCode, SignatureVerification, TransactionInfo};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The immutable, handed-off-to-consensus outcome of one pre-handle pass.
/// Built once by [`crate::workflow::PreHandleWorkflow`] and never mutated
/// again; every signature verification it names has already been
/// dispatched, not yet necessarily completed.
#[derive(Clone)]
pub struct PreHandleResult {
    status: PreHandleStatus,
    response_code: ResponseCode,
    payer: Option<AccountId>,
    payer_key: Option<Key>,
    tx_info: Option<TransactionInfo>,
    verification_results: Option<Arc<HashMap<Key, SignatureVerificationFuture>>>,
    inner_result: Option<Box<PreHandleResult>>,
}

/// Hand-written rather than derived: `payer_key` and `verification_results`
/// carry key/signature material, so this prints a dispatched-verification
/// count instead of the map's keys.
impl fmt::Debug for PreHandleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreHandleResult")
            .field("status", &self.status)
            .field("response_code", &self.response_code)
            .field("payer", &self.payer)
            .field(
                "verification_count",
                &self.verification_results.as_ref().map(|m| m.len()),
            )
            .field("has_inner_result", &self.inner_result.is_some())
            .finish()
    }
}

impl PreHandleResult {
    /// The node itself could not make sense of the transaction: nothing
    /// downstream is the submitter's fault, so the node's own account
    /// stands in as payer.
    pub fn node_due_diligence_failure(
        node_account: AccountId,
        response_code: ResponseCode,
        tx_info: Option<TransactionInfo>,
    ) -> Self {
        Self {
            status: PreHandleStatus::NodeDueDiligenceFailure,
            response_code,
            payer: Some(node_account),
            payer_key: None,
            tx_info,
            verification_results: None,
            inner_result: None,
        }
    }

    /// Decoded fine, but payer resolution or the handler's key gathering
    /// failed. `payer` is still known even on failure (it comes straight
    /// off the transaction id); `payer_key` is only known if resolution
    /// got that far before failing.
    pub fn pre_handle_failure(
        payer: AccountId,
        payer_key: Option<Key>,
        response_code: ResponseCode,
        tx_info: Option<TransactionInfo>,
        inner_result: Option<Box<PreHandleResult>>,
    ) -> Self {
        Self {
            status: PreHandleStatus::PreHandleFailure,
            response_code,
            payer: Some(payer),
            payer_key,
            tx_info,
            verification_results: None,
            inner_result,
        }
    }

    /// An uncaught error escaped the workflow. Always `ResponseCode::Unknown`.
    pub fn unknown_failure() -> Self {
        Self {
            status: PreHandleStatus::UnknownFailure,
            response_code: ResponseCode::Unknown,
            payer: None,
            payer_key: None,
            tx_info: None,
            verification_results: None,
            inner_result: None,
        }
    }

    /// Everything succeeded: decode, payer resolution, handler key
    /// gathering, and signature dispatch. `verification_results` maps
    /// every distinct required key (and every required hollow account's
    /// sentinel entry) to its already-dispatched future.
    #[allow(clippy::too_many_arguments)]
    pub fn so_far_so_good(
        payer: AccountId,
        payer_key: Key,
        tx_info: TransactionInfo,
        verification_results: Arc<HashMap<Key, SignatureVerificationFuture>>,
        inner_result: Option<Box<PreHandleResult>>,
    ) -> Self {
        Self {
            status: PreHandleStatus::SoFarSoGood,
            response_code: ResponseCode::Ok,
            payer: Some(payer),
            payer_key: Some(payer_key),
            tx_info: Some(tx_info),
            verification_results: Some(verification_results),
            inner_result,
        }
    }

    pub fn status(&self) -> PreHandleStatus {
        self.status
    }

    pub fn response_code(&self) -> &ResponseCode {
        &self.response_code
    }

    pub fn payer(&self) -> Option<AccountId> {
        self.payer
    }

    pub fn payer_key(&self) -> Option<&Key> {
        self.payer_key.as_ref()
    }

    pub fn tx_info(&self) -> Option<&TransactionInfo> {
        self.tx_info.as_ref()
    }

    pub fn inner_result(&self) -> Option<&PreHandleResult> {
        self.inner_result.as_deref()
    }

    /// Evaluates `key` against the dispatched futures, composing a
    /// `KeyList`/`ThresholdKey` verdict out of its cryptographic leaves. A
    /// result built from a failure constructor has no dispatched futures
    /// at all, so this always resolves to failed rather than awaiting
    /// anything.
    pub async fn verification_for(&self, key: &Key) -> SignatureVerification {
        match &self.verification_results {
            Some(futures) => evaluate_key(key, futures).await,
            None => SignatureVerification::failed_for(key.clone()),
        }
    }

    /// Finds the dispatched verification for a hollow account by its EVM
    /// alias rather than by key: a hollow account's key is the sentinel
    /// placeholder, so it cannot be looked up by key the way every other
    /// required signer is. Linear scan, since the number of hollow
    /// accounts a single transaction can require is small.
    pub async fn verification_for_alias(&self, alias: &[u8]) -> SignatureVerification {
        let Some(futures) = &self.verification_results else {
            return SignatureVerification::new(Key::Unset, Some(alias.to_vec()), false);
        };
        match futures.values().find(|fut| fut.evm_alias() == Some(alias)) {
            Some(fut) => fut.result().await,
            None => SignatureVerification::new(Key::Unset, Some(alias.to_vec()), false),
        }
    }
}

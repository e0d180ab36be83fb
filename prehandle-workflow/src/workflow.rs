use crate::config::PreHandleConfig;
use crate::context::PreHandleContext;
use crate::metrics::PreHandleMetrics;
use crate::result::PreHandleResult;
use prehandle_evaluator::{collect_cryptographic_leaves, SignatureVerificationFuture};
use prehandle_interfaces::{ReadableStoreFactory, SignatureEngine, TransactionHandler};
use prehandle_logger::{debug, warn, ReplicaLogger};
use prehandle_types::{
    Account, AccountId, Key, MalformedTransactionError, ResponseCode, TransactionInfo,
};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use threadpool::ThreadPool;

/// The orchestrator: decode → payer resolution →
/// handler key-gathering → signature dispatch → `PreHandleResult`. Holds the
/// CPU-bound pool signature verifications are submitted to, separate from
/// whatever pool runs `pre_handle` itself.
pub struct PreHandleWorkflow<E: SignatureEngine> {
    engine: Arc<E>,
    pool: Arc<Mutex<ThreadPool>>,
    logger: ReplicaLogger,
    metrics: Arc<PreHandleMetrics>,
}

impl<E: SignatureEngine + 'static> PreHandleWorkflow<E> {
    pub fn new(
        engine: Arc<E>,
        config: &PreHandleConfig,
        logger: ReplicaLogger,
        metrics: Arc<PreHandleMetrics>,
    ) -> Self {
        Self {
            engine,
            pool: Arc::new(Mutex::new(ThreadPool::new(
                config.signature_verification_threads,
            ))),
            logger,
            metrics,
        }
    }

    /// Runs one transaction through the full state machine: decode, payer
    /// resolution, handler key-gathering, signature dispatch. Returns
    /// immediately once verifications are dispatched; it never awaits their
    /// completion.
    ///
    /// `signatures` maps each required cryptographic leaf's wire encoding to
    /// its submitted signature bytes. `hollow_signatures` maps each required
    /// hollow account's 20-byte EVM alias to the signature the verification
    /// engine should recover a key from — a hollow account has no key on
    /// record yet, so its signature can't be looked up by key the way every
    /// other required signer's can.
    ///
    /// Everything from payer resolution onward (store lookups, the handler's
    /// own key-gathering code) runs behind `catch_unwind`: a panicking
    /// collaborator becomes `PreHandleResult::unknown_failure()` rather than
    /// unwinding through this call.
    pub fn pre_handle<H>(
        &self,
        decoded: Result<TransactionInfo, MalformedTransactionError>,
        node_account: AccountId,
        store_factory: Arc<dyn ReadableStoreFactory>,
        handler: &H,
        signatures: &HashMap<Key, Vec<u8>>,
        hollow_signatures: &HashMap<Vec<u8>, Vec<u8>>,
        message_hash: &[u8],
    ) -> PreHandleResult
    where
        H: TransactionHandler<PreHandleContext>,
    {
        let start = Instant::now();
        let txn_info = match decoded {
            Ok(info) => info,
            Err(err) => {
                warn!(self.logger, "transaction decode failed: {}", err; "node" => %node_account);
                let response_code = match err {
                    MalformedTransactionError::InvalidEnvelope => {
                        ResponseCode::InvalidTransaction
                    }
                    MalformedTransactionError::MissingBody => {
                        ResponseCode::InvalidTransactionBody
                    }
                };
                let result =
                    PreHandleResult::node_due_diligence_failure(node_account, response_code, None);
                self.metrics.observe_status(result.status());
                self.metrics
                    .observe_duration_seconds(start.elapsed().as_secs_f64());
                return result;
            }
        };

        let payer = txn_info.payer();
        let result = catch_unwind(AssertUnwindSafe(|| {
            self.pre_handle_body(
                txn_info,
                store_factory,
                handler,
                signatures,
                hollow_signatures,
                message_hash,
            )
        }))
        .unwrap_or_else(|_| {
            warn!(self.logger, "pre-handle panicked"; "payer" => %payer);
            PreHandleResult::unknown_failure()
        });

        self.metrics.observe_status(result.status());
        self.metrics
            .observe_duration_seconds(start.elapsed().as_secs_f64());
        result
    }

    /// The part of `pre_handle` that can call into collaborators (the store
    /// factory, the handler) and so is run behind `catch_unwind` by its
    /// caller.
    fn pre_handle_body<H>(
        &self,
        txn_info: TransactionInfo,
        store_factory: Arc<dyn ReadableStoreFactory>,
        handler: &H,
        signatures: &HashMap<Key, Vec<u8>>,
        hollow_signatures: &HashMap<Vec<u8>, Vec<u8>>,
        message_hash: &[u8],
    ) -> PreHandleResult
    where
        H: TransactionHandler<PreHandleContext>,
    {
        let payer = txn_info.payer();
        let mut ctx = match PreHandleContext::new(
            Arc::clone(&store_factory),
            txn_info.clone(),
            payer,
            ResponseCode::InvalidPayerAccountId,
        ) {
            Ok(ctx) => ctx,
            Err(err) => {
                debug!(
                    self.logger,
                    "payer resolution failed";
                    "payer" => %payer,
                    "response_code" => ?err.response_code,
                );
                return PreHandleResult::pre_handle_failure(
                    payer,
                    None,
                    err.response_code,
                    Some(txn_info),
                    None,
                );
            }
        };

        if let Err(err) = handler.gather_required_keys(&mut ctx) {
            debug!(
                self.logger,
                "handler key gathering failed";
                "payer" => %payer,
                "response_code" => ?err.response_code,
            );
            let payer_key = ctx.payer_key().clone();
            return PreHandleResult::pre_handle_failure(
                payer,
                Some(payer_key),
                err.response_code,
                Some(txn_info),
                None,
            );
        }

        self.finalize(ctx, signatures, hollow_signatures, message_hash)
    }

    /// Turns a fully key-gathered context into a `PreHandleResult`,
    /// recursing into any nested (scheduled-transaction) context to build
    /// its `inner_result` the same way.
    fn finalize(
        &self,
        ctx: PreHandleContext,
        signatures: &HashMap<Key, Vec<u8>>,
        hollow_signatures: &HashMap<Vec<u8>, Vec<u8>>,
        message_hash: &[u8],
    ) -> PreHandleResult {
        let (
            payer,
            payer_key,
            tx_info,
            required_non_payer_keys,
            required_hollow_accounts,
            inner_context,
        ) = ctx.into_parts();

        let mut futures = HashMap::new();
        self.dispatch_key(&mut futures, &payer_key, signatures, message_hash);
        for key in &required_non_payer_keys {
            self.dispatch_key(&mut futures, key, signatures, message_hash);
        }
        for account in &required_hollow_accounts {
            self.dispatch_hollow_account(&mut futures, account, hollow_signatures, message_hash);
        }

        let inner_result = inner_context.map(|inner| {
            Box::new(self.finalize(*inner, signatures, hollow_signatures, message_hash))
        });

        PreHandleResult::so_far_so_good(payer, payer_key, tx_info, Arc::new(futures), inner_result)
    }

    /// Dispatches one future per distinct cryptographic leaf reachable from
    /// `key`, skipping any leaf already present in `futures`.
    fn dispatch_key(
        &self,
        futures: &mut HashMap<Key, SignatureVerificationFuture>,
        key: &Key,
        signatures: &HashMap<Key, Vec<u8>>,
        message_hash: &[u8],
    ) {
        let mut leaves = Vec::new();
        collect_cryptographic_leaves(key, &mut leaves);
        for leaf in leaves {
            if futures.contains_key(&leaf) {
                continue;
            }
            let signature_bytes = signatures.get(&leaf).cloned().unwrap_or_default();
            let pool = self.pool.lock().unwrap().clone();
            let fut = SignatureVerificationFuture::dispatch(
                &pool,
                Arc::clone(&self.engine),
                leaf.clone(),
                signature_bytes,
                message_hash.to_vec(),
                None,
            );
            self.metrics.observe_dispatched_key();
            futures.insert(leaf, fut);
        }
    }

    /// Dispatches a verification for a hollow account's alias. The signature
    /// is looked up by alias, not by key, because a hollow account's key
    /// isn't known ahead of time. The map slot this future is stored under
    /// only needs to be unique within this result's `futures` map:
    /// `evaluate_key` never reaches it (it isn't a cryptographic leaf of any
    /// required key), and `PreHandleResult::verification_for_alias` finds it
    /// by scanning `evm_alias()`, not by this slot.
    fn dispatch_hollow_account(
        &self,
        futures: &mut HashMap<Key, SignatureVerificationFuture>,
        account: &Account,
        hollow_signatures: &HashMap<Vec<u8>, Vec<u8>>,
        message_hash: &[u8],
    ) {
        let alias = account.alias.clone();
        let signature_bytes = hollow_signatures.get(&alias).cloned().unwrap_or_default();
        let sentinel_slot = Key::Ed25519(alias.clone());
        let pool = self.pool.lock().unwrap().clone();
        let fut = SignatureVerificationFuture::dispatch(
            &pool,
            Arc::clone(&self.engine),
            Key::empty_key_list(),
            signature_bytes,
            message_hash.to_vec(),
            Some(alias),
        );
        self.metrics.observe_dispatched_hollow_account();
        futures.insert(sentinel_slot, fut);
    }
}

use crate::future::SignatureVerificationFuture;
use crate::verdict::{verdict, Verdict};
use prehandle_types::{Key, SignatureVerification};
use std::collections::HashMap;

/// Evaluates `key` against a map of dispatched futures and returns the
/// composite [`SignatureVerification`] bound to `key`.
///
/// Strategy: rather than folding over completions incrementally to chase
/// early-exit latency, this awaits every distinct cryptographic leaf
/// reachable from `key` concurrently and then applies the pure [`verdict`]
/// function to the now-fully-known results. Correctness tests here do not
/// observe latency, so this keeps the function a straight-line `async fn`
/// instead of a hand-rolled `Future` impl that has to track partial
/// completion state itself.
pub async fn evaluate_key(
    key: &Key,
    futures: &HashMap<Key, SignatureVerificationFuture>,
) -> SignatureVerification {
    let mut leaves = Vec::new();
    collect_cryptographic_leaves(key, &mut leaves);

    let awaited = futures::future::join_all(leaves.iter().map(|leaf| async move {
        let passed = match futures.get(leaf) {
            Some(fut) => fut.result().await.passed(),
            None => false, // absent is treated as fail
        };
        (leaf.clone(), passed)
    }))
    .await;
    let results: HashMap<Key, bool> = awaited.into_iter().collect();

    let lookup = |leaf: &Key| -> Verdict {
        match results.get(leaf) {
            Some(true) => Verdict::Pass,
            _ => Verdict::Fail,
        }
    };

    let outcome = verdict(key, &lookup);
    SignatureVerification::new(key.clone(), None, outcome == Verdict::Pass)
}

/// Collects every distinct cryptographic leaf reachable from `key`,
/// deduplicated by structural equality. Contract-id variants are skipped:
/// they are never keys in the `verificationResults` map. Exposed for the
/// workflow crate, which dispatches one future per leaf rather than per
/// top-level required key.
pub fn collect_cryptographic_leaves(key: &Key, out: &mut Vec<Key>) {
    match key {
        Key::Ed25519(_) | Key::EcdsaSecp256k1(_) => {
            if !out.contains(key) {
                out.push(key.clone());
            }
        }
        Key::ContractId(_) | Key::DelegatableContractId(_) | Key::Unset => {}
        Key::KeyList(children) => {
            for child in children {
                collect_cryptographic_leaves(child, out);
            }
        }
        Key::ThresholdKey { keys, .. } => {
            for child in keys {
                collect_cryptographic_leaves(child, out);
            }
        }
    }
}

use prehandle_types::Key;

/// The result of evaluating a key expression against a (possibly partial)
/// set of completed signature verifications. `Pending` means the
/// expression cannot yet be decided one way or the other from what's known
/// so far — never produced by this core's own `lookup` closures, but kept
/// as a first-class variant because the recursive rules below are only
/// correct if threshold keys can express "not determined yet".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    Pending,
}

/// The pure, synchronous half of the compound-key evaluator. `lookup`
/// answers the verdict of a single cryptographic leaf; this function folds
/// that over the recursive `KeyList`/`ThresholdKey` structure. Absence is
/// the caller's responsibility to encode as `Verdict::Fail` inside
/// `lookup` — this function never reaches outside the key tree to decide
/// that.
pub fn verdict(key: &Key, lookup: &impl Fn(&Key) -> Verdict) -> Verdict {
    match key {
        Key::Unset => Verdict::Fail,

        Key::Ed25519(_) | Key::EcdsaSecp256k1(_) => lookup(key),

        // Contract authorization is decided out-of-band by the call frame
        // that invokes the contract, not by this signature-map-driven
        // evaluator. See DESIGN.md for the "always pass here" decision
        // and its rationale.
        Key::ContractId(_) | Key::DelegatableContractId(_) => Verdict::Pass,

        Key::KeyList(children) => {
            if children.is_empty() {
                return Verdict::Fail;
            }
            let mut saw_pending = false;
            for child in children {
                match verdict(child, lookup) {
                    Verdict::Fail => return Verdict::Fail,
                    Verdict::Pending => saw_pending = true,
                    Verdict::Pass => {}
                }
            }
            if saw_pending {
                Verdict::Pending
            } else {
                Verdict::Pass
            }
        }

        Key::ThresholdKey { keys, .. } => {
            let threshold = key
                .effective_threshold()
                .expect("ThresholdKey always has an effective threshold");
            let n = keys.len();
            let mut pass_count = 0usize;
            let mut fail_count = 0usize;
            for child in keys {
                match verdict(child, lookup) {
                    Verdict::Pass => pass_count += 1,
                    Verdict::Fail => fail_count += 1,
                    Verdict::Pending => {}
                }
            }
            if pass_count >= threshold {
                Verdict::Pass
            } else if n - fail_count < threshold {
                Verdict::Fail
            } else {
                Verdict::Pending
            }
        }
    }
}

//! The compound-key evaluator and the signature-verification future it
//! folds over.
//!
//! [`verdict`] is the pure recursive rule: given a leaf lookup, it folds
//! `KeyList`/`ThresholdKey` structure into `Pass`/`Fail`/`Pending`.
//! [`SignatureVerificationFuture`] is the dispatched, eventually-completed
//! handle to one leaf's verification. [`evaluate_key`] ties the two
//! together into the async composite the `PreHandleResult` crate calls.

mod composite;
mod future;
mod verdict;

pub use composite::{collect_cryptographic_leaves, evaluate_key};
pub use future::SignatureVerificationFuture;
pub use verdict::{verdict, Verdict};

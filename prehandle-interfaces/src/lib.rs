//! Trait surface the pre-handle core consumes from components explicitly
//! out of scope for this workspace: the wire codec, the account/
//! contract state store, and the cryptographic primitives. Pre-handle and
//! evaluator crates depend on these traits, never on a concrete store or
//! crypto engine, so tests can supply in-memory doubles.

mod crypto;
mod handler;
mod store;

pub use crypto::SignatureEngine;
pub use handler::TransactionHandler;
pub use store::{AccountStore, ContractStore, ReadableStoreFactory};

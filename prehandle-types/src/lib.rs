//! Core data model for the pre-handle and signature-verification core.
//!
//! This crate holds the value types every other crate in the workspace
//! depends on: [`Key`] and its structural validity/threshold rules,
//! [`Account`] and the entity identifiers, [`SignatureVerification`], the
//! [`ResponseCode`] vocabulary, and the two error types that carry the
//! recoverable/programmer-error split from the pre-handle error model.
//!
//! Nothing here is async and nothing here touches I/O; nested key trees are
//! owned by value so there is no lifetime or reference-cycle management to
//! do.

mod account;
mod error;
mod ids;
mod key;
mod response_code;
mod tx_info;
mod verification;

pub use account::Account;
pub use error::{InvalidArgument, PreCheckError};
pub use ids::{AccountId, ContractId, EntityId};
pub use key::{Key, ECDSA_SECP256K1_KEY_LEN, ED25519_KEY_LEN, EVM_ALIAS_LEN};
pub use response_code::ResponseCode;
pub use tx_info::{MalformedTransactionError, TransactionId, TransactionInfo};
pub use verification::SignatureVerification;

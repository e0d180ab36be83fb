use crate::ids::AccountId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A transaction identifier: the payer plus a client-chosen start time used
/// for replay protection. The exact encoding is owned by the wire codec;
/// this is the minimal shape the core needs to route a transaction to its
/// payer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId {
    pub payer: AccountId,
    pub valid_start_epoch_seconds: i64,
    pub valid_start_nanos: i32,
}

/// The decoded, payer-routable shell of a transaction, handed to the
/// pre-handle workflow by the wire codec. The core never interprets the
/// body beyond what a transaction-kind handler asks of it through
/// [`crate::Key`] requirements; the body itself is opaque here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub transaction_id: TransactionId,
    #[serde(with = "serde_bytes")]
    pub body_bytes: Vec<u8>,
}

impl TransactionInfo {
    pub fn new(transaction_id: TransactionId, body_bytes: Vec<u8>) -> Self {
        Self {
            transaction_id,
            body_bytes,
        }
    }

    pub fn payer(&self) -> AccountId {
        self.transaction_id.payer
    }
}

/// Surfaced by the wire codec boundary: the two decode failure modes the
/// workflow must map onto `NODE_DUE_DILIGENCE_FAILURE`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedTransactionError {
    #[error("malformed transaction envelope")]
    InvalidEnvelope,
    #[error("transaction envelope decoded but the body is missing or unparsable")]
    MissingBody,
}

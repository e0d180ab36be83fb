use crate::ids::ContractId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ED25519 public key, 32 bytes.
pub const ED25519_KEY_LEN: usize = 32;
/// A compressed ECDSA(secp256k1) public key, 33 bytes.
pub const ECDSA_SECP256K1_KEY_LEN: usize = 33;
/// Length of an EVM alias (the last 20 bytes of a keccak256 hash of an
/// uncompressed ECDSA public key).
pub const EVM_ALIAS_LEN: usize = 20;

/// A key expression: a single cryptographic key, a contract reference, or a
/// recursively nested list/threshold composition of sub-keys.
///
/// `Key` is a value tree, not a reference graph: [`Key::KeyList`] and
/// [`Key::ThresholdKey`] own their children by value. There is no way to
/// construct a cycle, because every `Key` is built bottom-up from a decoded
/// wire form.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Ed25519(#[serde(with = "serde_bytes")] Vec<u8>),
    EcdsaSecp256k1(#[serde(with = "serde_bytes")] Vec<u8>),
    ContractId(ContractId),
    DelegatableContractId(ContractId),
    KeyList(Vec<Key>),
    ThresholdKey { threshold: i32, keys: Vec<Key> },
    Unset,
}

impl Key {
    /// A key is valid iff it is not [`Key::Unset`] and, recursively, every
    /// nested key is valid. An empty [`Key::KeyList`] is *not* valid.
    pub fn is_valid(&self) -> bool {
        match self {
            Key::Unset => false,
            Key::Ed25519(bytes) => bytes.len() == ED25519_KEY_LEN,
            Key::EcdsaSecp256k1(bytes) => bytes.len() == ECDSA_SECP256K1_KEY_LEN,
            Key::ContractId(_) | Key::DelegatableContractId(_) => true,
            Key::KeyList(keys) => !keys.is_empty() && keys.iter().all(Key::is_valid),
            Key::ThresholdKey { keys, .. } => !keys.is_empty() && keys.iter().all(Key::is_valid),
        }
    }

    /// Whether this key is a cryptographic leaf whose verdict comes from the
    /// signature-verification map rather than out-of-band contract
    /// authorization.
    pub fn is_cryptographic_leaf(&self) -> bool {
        matches!(self, Key::Ed25519(_) | Key::EcdsaSecp256k1(_))
    }

    /// The effective threshold for a [`Key::ThresholdKey`]: `min(max(t,1),n)`
    /// where `n` is the number of sub-keys. Returns `None` for any other
    /// variant.
    pub fn effective_threshold(&self) -> Option<usize> {
        match self {
            Key::ThresholdKey { threshold, keys } => {
                let n = keys.len() as i64;
                let t = (*threshold as i64).max(1).min(n.max(1));
                Some(t as usize)
            }
            _ => None,
        }
    }

    /// An empty key-list, used as the unset-key sentinel on hollow accounts.
    pub fn empty_key_list() -> Self {
        Key::KeyList(Vec::new())
    }

    /// True for the hollow-account sentinel: an empty key list, or [`Key::Unset`].
    pub fn is_hollow_sentinel(&self) -> bool {
        matches!(self, Key::Unset) || matches!(self, Key::KeyList(keys) if keys.is_empty())
    }
}

/// Delegates to [`Display`](fmt::Display) rather than deriving, so a `Key`
/// never prints raw key bytes through `{:?}` (e.g. in a log's key-value
/// pairs or a panic message).
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Ed25519(bytes) => write!(f, "ed25519:{}", truncated_hex(bytes)),
            Key::EcdsaSecp256k1(bytes) => write!(f, "ecdsa_secp256k1:{}", truncated_hex(bytes)),
            Key::ContractId(id) => write!(f, "contract:{id}"),
            Key::DelegatableContractId(id) => write!(f, "delegatable_contract:{id}"),
            Key::KeyList(keys) => write!(f, "keylist[{}]", keys.len()),
            Key::ThresholdKey { threshold, keys } => {
                write!(f, "threshold({}/{})", threshold, keys.len())
            }
            Key::Unset => write!(f, "unset"),
        }
    }
}

/// Renders a key's leading bytes as hex so logs never carry full key
/// material.
fn truncated_hex(bytes: &[u8]) -> String {
    let prefix = &bytes[..bytes.len().min(4)];
    format!("{}..", hex::encode(prefix))
}

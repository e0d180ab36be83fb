use crate::ids::AccountId;
use crate::key::{Key, EVM_ALIAS_LEN};
use serde::{Deserialize, Serialize};

/// A read-only snapshot of an account as observed by a single pre-handle
/// pass.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub key: Key,
    /// The EVM address this account is also known by, if any. A hollow
    /// account is identified by its alias before it has ever signed, so its
    /// `key` is the [`Key::is_hollow_sentinel`] placeholder.
    #[serde(with = "serde_bytes", default)]
    pub alias: Vec<u8>,
    pub receiver_sig_required: bool,
}

impl Account {
    pub fn new(id: AccountId, key: Key) -> Self {
        Self {
            id,
            key,
            alias: Vec::new(),
            receiver_sig_required: false,
        }
    }

    pub fn with_alias(mut self, alias: Vec<u8>) -> Self {
        self.alias = alias;
        self
    }

    pub fn with_receiver_sig_required(mut self, required: bool) -> Self {
        self.receiver_sig_required = required;
        self
    }

    /// A hollow account has a 20-byte EVM alias and carries no real key yet.
    pub fn is_hollow(&self) -> bool {
        self.alias.len() == EVM_ALIAS_LEN && self.key.is_hollow_sentinel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hollow_requires_both_alias_length_and_sentinel_key() {
        let id = AccountId::new(0, 0, 100);
        let hollow = Account::new(id, Key::empty_key_list()).with_alias(vec![0u8; 20]);
        assert!(hollow.is_hollow());

        let wrong_len = Account::new(id, Key::empty_key_list()).with_alias(vec![0u8; 19]);
        assert!(!wrong_len.is_hollow());

        let has_key = Account::new(id, Key::Ed25519(vec![1; 32])).with_alias(vec![0u8; 20]);
        assert!(!has_key.is_hollow());
    }
}

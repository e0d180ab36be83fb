use serde::{Deserialize, Serialize};
use std::fmt;

/// A `shard.realm.num` entity identifier, shared by accounts and contracts.
///
/// The triple is kept generic (rather than a bare `u64`) because the ledgers
/// this core targets shard account space across independent realms; the
/// pre-handle core never interprets the components beyond equality and
/// display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub shard: u64,
    pub realm: u64,
    pub num: u64,
}

impl EntityId {
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

/// Identifies an account. Distinct from [`ContractId`] only by type, so the
/// two can't be accidentally swapped at a call site even though both wrap an
/// [`EntityId`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub EntityId);

impl AccountId {
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self(EntityId::new(shard, realm, num))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Identifies a contract account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContractId(pub EntityId);

impl ContractId {
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self(EntityId::new(shard, realm, num))
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

use prehandle_types::{Account, AccountId, ContractId};

/// Read-only view over account state. Returns `None` on
/// absence; implementations must never throw/panic for an unknown id or
/// alias.
pub trait AccountStore: Send + Sync {
    fn get_account_by_id(&self, id: AccountId) -> Option<Account>;
    fn get_account_by_alias(&self, alias: &[u8]) -> Option<Account>;
}

/// Read-only view over contract state. Contracts are represented with the
/// same [`Account`] shape as regular accounts, since a contract's key is
/// still a [`prehandle_types::Key`] that can require a signature.
pub trait ContractStore: Send + Sync {
    fn get_contract_by_id(&self, id: ContractId) -> Option<Account>;
}

/// Parameterises a pre-handle pass over a snapshot-consistent set of
/// read-only stores. The core only ever asks for the account and contract
/// stores; a ledger's full set of stores (token, token-relation, NFT,
/// alias) is a superset this core's handlers don't exercise, so it is not
/// reproduced here.
pub trait ReadableStoreFactory: Send + Sync {
    fn account_store(&self) -> &dyn AccountStore;
    fn contract_store(&self) -> &dyn ContractStore;
}

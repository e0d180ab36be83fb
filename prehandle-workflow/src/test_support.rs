//! In-memory store doubles shared by this crate's inline tests.

use prehandle_interfaces::{AccountStore, ContractStore, ReadableStoreFactory};
use prehandle_types::{Account, AccountId, ContractId};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct InMemoryAccountStore {
    by_id: HashMap<AccountId, Account>,
}

impl InMemoryAccountStore {
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            by_id: accounts.into_iter().map(|a| (a.id, a)).collect(),
        }
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get_account_by_id(&self, id: AccountId) -> Option<Account> {
        self.by_id.get(&id).cloned()
    }

    fn get_account_by_alias(&self, alias: &[u8]) -> Option<Account> {
        self.by_id.values().find(|a| a.alias == alias).cloned()
    }
}

#[derive(Default)]
pub struct InMemoryContractStore {
    by_id: HashMap<ContractId, Account>,
}

impl InMemoryContractStore {
    pub fn with_contracts(contracts: Vec<(ContractId, Account)>) -> Self {
        Self {
            by_id: contracts.into_iter().collect(),
        }
    }
}

impl ContractStore for InMemoryContractStore {
    fn get_contract_by_id(&self, id: ContractId) -> Option<Account> {
        self.by_id.get(&id).cloned()
    }
}

pub struct TestStoreFactory {
    accounts: InMemoryAccountStore,
    contracts: InMemoryContractStore,
}

impl ReadableStoreFactory for TestStoreFactory {
    fn account_store(&self) -> &dyn AccountStore {
        &self.accounts
    }

    fn contract_store(&self) -> &dyn ContractStore {
        &self.contracts
    }
}

pub fn account_store_with(accounts: Vec<Account>) -> InMemoryAccountStore {
    InMemoryAccountStore::with_accounts(accounts)
}

pub fn store_factory(accounts: InMemoryAccountStore) -> Arc<dyn ReadableStoreFactory> {
    Arc::new(TestStoreFactory {
        accounts,
        contracts: InMemoryContractStore::default(),
    })
}

pub fn store_factory_with_contracts(
    accounts: InMemoryAccountStore,
    contracts: InMemoryContractStore,
) -> Arc<dyn ReadableStoreFactory> {
    Arc::new(TestStoreFactory { accounts, contracts })
}

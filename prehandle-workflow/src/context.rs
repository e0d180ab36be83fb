use indexmap::IndexSet;
use prehandle_interfaces::ReadableStoreFactory;
use prehandle_types::{
    Account, AccountId, ContractId, InvalidArgument, Key, PreCheckError, ResponseCode,
    TransactionInfo,
};
use std::sync::Arc;

/// The default, sentinel account id (`0.0.0`): "no account referenced" for
/// optional account-id parameters, mirroring how the ledgers this core
/// targets use an all-zero id as their unset value rather than an `Option`
/// at the wire level.
pub fn is_default_account(id: AccountId) -> bool {
    id == AccountId::default()
}

/// Contract-id counterpart of [`is_default_account`].
pub fn is_default_contract(id: ContractId) -> bool {
    id == ContractId::default()
}

/// The mutable, single-thread-owned builder assembled during one
/// transaction's pre-handle pass. Created once per transaction, and again
/// per nested (scheduled) transaction via
/// [`PreHandleContext::create_nested_context`]; mutated only by the
/// handler's key-gathering phase, then read-only once handed to the
/// workflow that turns it into a `PreHandleResult`.
pub struct PreHandleContext {
    store_factory: Arc<dyn ReadableStoreFactory>,
    txn_info: TransactionInfo,
    payer: AccountId,
    payer_key: Key,
    required_non_payer_keys: IndexSet<Key>,
    required_hollow_accounts: IndexSet<Account>,
    inner_context: Option<Box<PreHandleContext>>,
}

impl PreHandleContext {
    /// Looks up `payer` through `store_factory` and fails
    /// `PreCheckError(response_code_on_missing_payer)` if the account is
    /// absent or its key is not a valid [`Key`]. `response_code_on_missing_payer`
    /// lets [`PreHandleContext::create_nested_context`] use a different code
    /// for an inner (scheduled) context than the outer `INVALID_PAYER_ACCOUNT_ID`.
    pub fn new(
        store_factory: Arc<dyn ReadableStoreFactory>,
        txn_info: TransactionInfo,
        payer: AccountId,
        response_code_on_missing_payer: ResponseCode,
    ) -> Result<Self, PreCheckError> {
        let account = store_factory
            .account_store()
            .get_account_by_id(payer)
            .ok_or(PreCheckError::new(response_code_on_missing_payer.clone()))?;
        if !account.key.is_valid() {
            return Err(PreCheckError::new(response_code_on_missing_payer));
        }
        Ok(Self {
            store_factory,
            txn_info,
            payer,
            payer_key: account.key,
            required_non_payer_keys: IndexSet::new(),
            required_hollow_accounts: IndexSet::new(),
            inner_context: None,
        })
    }

    pub fn payer(&self) -> AccountId {
        self.payer
    }

    pub fn payer_key(&self) -> &Key {
        &self.payer_key
    }

    pub fn txn_info(&self) -> &TransactionInfo {
        &self.txn_info
    }

    pub fn required_non_payer_keys(&self) -> &IndexSet<Key> {
        &self.required_non_payer_keys
    }

    pub fn required_hollow_accounts(&self) -> &IndexSet<Account> {
        &self.required_hollow_accounts
    }

    pub fn inner_context(&self) -> Option<&PreHandleContext> {
        self.inner_context.as_deref()
    }

    pub fn inner_context_mut(&mut self) -> Option<&mut PreHandleContext> {
        self.inner_context.as_deref_mut()
    }

    /// Adds `key` to the required non-payer keys if it is valid and not
    /// equal to the payer's key. De-duplicates by structural equality,
    /// preserving first-insertion order.
    pub fn require_key(&mut self, key: Key) -> &mut Self {
        if key.is_valid() && key != self.payer_key {
            self.required_non_payer_keys.insert(key);
        }
        self
    }

    /// Like [`PreHandleContext::require_key`], but fails `response_code` if
    /// `key` is not valid.
    pub fn require_key_or_throw(
        &mut self,
        key: Key,
        response_code: ResponseCode,
    ) -> Result<&mut Self, PreCheckError> {
        if !key.is_valid() {
            return Err(PreCheckError::new(response_code));
        }
        Ok(self.require_key(key))
    }

    /// Looks up `account_id` and requires its key, failing `response_code`
    /// if the id is absent from the store or its key is not valid.
    pub fn require_key_for_account_or_throw(
        &mut self,
        account_id: AccountId,
        response_code: ResponseCode,
    ) -> Result<&mut Self, PreCheckError> {
        let account = self
            .store_factory
            .account_store()
            .get_account_by_id(account_id)
            .ok_or(PreCheckError::new(response_code.clone()))?;
        if !account.key.is_valid() {
            return Err(PreCheckError::new(response_code));
        }
        Ok(self.require_key(account.key))
    }

    /// Contract-store counterpart of
    /// [`PreHandleContext::require_key_for_account_or_throw`].
    pub fn require_key_for_contract_or_throw(
        &mut self,
        contract_id: ContractId,
        response_code: ResponseCode,
    ) -> Result<&mut Self, PreCheckError> {
        let account = self
            .store_factory
            .contract_store()
            .get_contract_by_id(contract_id)
            .ok_or(PreCheckError::new(response_code.clone()))?;
        if !account.key.is_valid() {
            return Err(PreCheckError::new(response_code));
        }
        Ok(self.require_key(account.key))
    }

    /// No-op if `account_id` is the default id. Fails `response_code` if the
    /// account is absent. No-op if the account's `receiver_sig_required`
    /// flag is unset. Otherwise fails `response_code` if the key is unset,
    /// and requires it.
    pub fn require_key_if_receiver_sig_required_for_account(
        &mut self,
        account_id: AccountId,
        response_code: ResponseCode,
    ) -> Result<&mut Self, PreCheckError> {
        if is_default_account(account_id) {
            return Ok(self);
        }
        let account = self
            .store_factory
            .account_store()
            .get_account_by_id(account_id)
            .ok_or(PreCheckError::new(response_code.clone()))?;
        if !account.receiver_sig_required {
            return Ok(self);
        }
        if !account.key.is_valid() {
            return Err(PreCheckError::new(response_code));
        }
        Ok(self.require_key(account.key))
    }

    /// Contract-store counterpart of
    /// [`PreHandleContext::require_key_if_receiver_sig_required_for_account`].
    pub fn require_key_if_receiver_sig_required_for_contract(
        &mut self,
        contract_id: ContractId,
        response_code: ResponseCode,
    ) -> Result<&mut Self, PreCheckError> {
        if is_default_contract(contract_id) {
            return Ok(self);
        }
        let account = self
            .store_factory
            .contract_store()
            .get_contract_by_id(contract_id)
            .ok_or(PreCheckError::new(response_code.clone()))?;
        if !account.receiver_sig_required {
            return Ok(self);
        }
        if !account.key.is_valid() {
            return Err(PreCheckError::new(response_code));
        }
        Ok(self.require_key(account.key))
    }

    /// Requires a signature for a hollow account. Unlike every other
    /// `require*` method, a type mismatch here (the account isn't actually
    /// hollow) is a programmer error, not a transaction-validation failure:
    /// it panics (via `assert!`, so this check runs in release builds too)
    /// rather than producing a [`PreCheckError`].
    pub fn require_signature_for_hollow_account(&mut self, account: Account) -> &mut Self {
        if !account.is_hollow() {
            let err = InvalidArgument::new(format!(
                "require_signature_for_hollow_account called with a non-hollow account: {:?}",
                account.id
            ));
            panic!("{err}");
        }
        self.required_hollow_accounts.insert(account);
        self
    }

    /// Constructs an inner context for a nested (scheduled) transaction,
    /// identically to [`PreHandleContext::new`], stores it as this
    /// context's inner context, and returns a mutable reference to it so the
    /// caller can populate it the same way as the outer context.
    pub fn create_nested_context(
        &mut self,
        nested_txn_info: TransactionInfo,
        payer: AccountId,
        response_code: ResponseCode,
    ) -> Result<&mut PreHandleContext, PreCheckError> {
        let nested = PreHandleContext::new(
            Arc::clone(&self.store_factory),
            nested_txn_info,
            payer,
            response_code,
        )?;
        self.inner_context = Some(Box::new(nested));
        Ok(self.inner_context.as_mut().unwrap())
    }

    /// Consumes the context, handing back its parts for the workflow to
    /// dispatch signature verifications over and build a `PreHandleResult`
    /// from. The context must not be mutated after this point.
    pub fn into_parts(
        self,
    ) -> (
        AccountId,
        Key,
        TransactionInfo,
        IndexSet<Key>,
        IndexSet<Account>,
        Option<Box<PreHandleContext>>,
    ) {
        (
            self.payer,
            self.payer_key,
            self.txn_info,
            self.required_non_payer_keys,
            self.required_hollow_accounts,
            self.inner_context,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        account_store_with, store_factory, store_factory_with_contracts, InMemoryAccountStore,
        InMemoryContractStore,
    };
    use prehandle_types::TransactionId;

    fn txn_info(payer: AccountId) -> TransactionInfo {
        TransactionInfo::new(
            TransactionId {
                payer,
                valid_start_epoch_seconds: 0,
                valid_start_nanos: 0,
            },
            vec![],
        )
    }

    fn ed25519(b: u8) -> Key {
        Key::Ed25519(vec![b; 32])
    }

    #[test]
    fn construction_fails_when_payer_missing() {
        let payer = AccountId::new(0, 0, 100);
        let factory = store_factory(InMemoryAccountStore::default());
        let err = PreHandleContext::new(
            factory,
            txn_info(payer),
            payer,
            ResponseCode::InvalidPayerAccountId,
        )
        .unwrap_err();
        assert_eq!(err.response_code, ResponseCode::InvalidPayerAccountId);
    }

    #[test]
    fn construction_fails_when_payer_key_unset() {
        let payer = AccountId::new(0, 0, 100);
        let factory = store_factory(account_store_with(vec![Account::new(payer, Key::Unset)]));
        let err = PreHandleContext::new(
            factory,
            txn_info(payer),
            payer,
            ResponseCode::InvalidPayerAccountId,
        )
        .unwrap_err();
        assert_eq!(err.response_code, ResponseCode::InvalidPayerAccountId);
    }

    #[test]
    fn require_key_excludes_payer_key_and_dedupes() {
        let payer = AccountId::new(0, 0, 100);
        let payer_key = ed25519(1);
        let other = ed25519(2);
        let factory = store_factory(account_store_with(vec![Account::new(
            payer,
            payer_key.clone(),
        )]));
        let mut ctx = PreHandleContext::new(
            factory,
            txn_info(payer),
            payer,
            ResponseCode::InvalidPayerAccountId,
        )
        .unwrap();

        ctx.require_key(payer_key.clone());
        ctx.require_key(other.clone());
        ctx.require_key(other.clone());

        assert_eq!(ctx.required_non_payer_keys().len(), 1);
        assert!(ctx.required_non_payer_keys().contains(&other));
        assert!(!ctx.required_non_payer_keys().contains(&payer_key));
    }

    #[test]
    fn require_key_or_throw_rejects_invalid_key() {
        let payer = AccountId::new(0, 0, 100);
        let factory = store_factory(account_store_with(vec![Account::new(payer, ed25519(1))]));
        let mut ctx = PreHandleContext::new(
            factory,
            txn_info(payer),
            payer,
            ResponseCode::InvalidPayerAccountId,
        )
        .unwrap();

        let err = ctx
            .require_key_or_throw(Key::Unset, ResponseCode::InvalidAccountKey)
            .unwrap_err();
        assert_eq!(err.response_code, ResponseCode::InvalidAccountKey);
    }

    #[test]
    fn require_signature_for_hollow_account_rejects_non_hollow() {
        let payer = AccountId::new(0, 0, 100);
        let factory = store_factory(account_store_with(vec![Account::new(payer, ed25519(1))]));
        let mut ctx = PreHandleContext::new(
            factory,
            txn_info(payer),
            payer,
            ResponseCode::InvalidPayerAccountId,
        )
        .unwrap();

        let not_hollow = Account::new(AccountId::new(0, 0, 200), ed25519(9));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            ctx.require_signature_for_hollow_account(not_hollow);
        }));
        assert!(result.is_err());
    }

    #[test]
    fn nested_context_behaves_identically_to_outer() {
        let payer = AccountId::new(0, 0, 100);
        let scheduled_payer = AccountId::new(0, 0, 200);
        let factory = store_factory(account_store_with(vec![
            Account::new(payer, ed25519(1)),
            Account::new(scheduled_payer, ed25519(2)),
        ]));
        let mut ctx = PreHandleContext::new(
            factory,
            txn_info(payer),
            payer,
            ResponseCode::InvalidPayerAccountId,
        )
        .unwrap();

        let inner = ctx
            .create_nested_context(
                txn_info(scheduled_payer),
                scheduled_payer,
                ResponseCode::InvalidPayerAccountId,
            )
            .unwrap();
        assert_eq!(inner.payer(), scheduled_payer);
        assert!(ctx.inner_context().is_some());
    }

    fn ctx_with_payer(payer: AccountId, payer_key: Key) -> PreHandleContext {
        let factory = store_factory(account_store_with(vec![Account::new(payer, payer_key)]));
        PreHandleContext::new(
            factory,
            txn_info(payer),
            payer,
            ResponseCode::InvalidPayerAccountId,
        )
        .unwrap()
    }

    #[test]
    fn require_key_for_account_or_throw_requires_the_looked_up_key() {
        let payer = AccountId::new(0, 0, 100);
        let other = AccountId::new(0, 0, 200);
        let other_key = ed25519(2);
        let factory = store_factory(account_store_with(vec![
            Account::new(payer, ed25519(1)),
            Account::new(other, other_key.clone()),
        ]));
        let mut ctx = PreHandleContext::new(
            factory,
            txn_info(payer),
            payer,
            ResponseCode::InvalidPayerAccountId,
        )
        .unwrap();

        ctx.require_key_for_account_or_throw(other, ResponseCode::InvalidAccountId)
            .unwrap();
        assert!(ctx.required_non_payer_keys().contains(&other_key));
    }

    #[test]
    fn require_key_for_account_or_throw_fails_on_missing_account() {
        let payer = AccountId::new(0, 0, 100);
        let mut ctx = ctx_with_payer(payer, ed25519(1));
        let err = ctx
            .require_key_for_account_or_throw(
                AccountId::new(0, 0, 999),
                ResponseCode::InvalidAccountId,
            )
            .unwrap_err();
        assert_eq!(err.response_code, ResponseCode::InvalidAccountId);
    }

    #[test]
    fn require_key_for_contract_or_throw_requires_the_looked_up_key() {
        let payer = AccountId::new(0, 0, 100);
        let contract_id = ContractId::new(0, 0, 300);
        let contract_key = ed25519(3);
        let accounts = account_store_with(vec![Account::new(payer, ed25519(1))]);
        let contracts = InMemoryContractStore::with_contracts(vec![(
            contract_id,
            Account::new(AccountId::default(), contract_key.clone()),
        )]);
        let factory = store_factory_with_contracts(accounts, contracts);
        let mut ctx = PreHandleContext::new(
            factory,
            txn_info(payer),
            payer,
            ResponseCode::InvalidPayerAccountId,
        )
        .unwrap();

        ctx.require_key_for_contract_or_throw(contract_id, ResponseCode::InvalidContractId)
            .unwrap();
        assert!(ctx.required_non_payer_keys().contains(&contract_key));
    }

    #[test]
    fn require_key_for_contract_or_throw_fails_on_missing_contract() {
        let payer = AccountId::new(0, 0, 100);
        let mut ctx = ctx_with_payer(payer, ed25519(1));
        let err = ctx
            .require_key_for_contract_or_throw(
                ContractId::new(0, 0, 999),
                ResponseCode::InvalidContractId,
            )
            .unwrap_err();
        assert_eq!(err.response_code, ResponseCode::InvalidContractId);
    }

    #[test]
    fn require_key_if_receiver_sig_required_for_account_is_noop_for_default_id() {
        let payer = AccountId::new(0, 0, 100);
        let mut ctx = ctx_with_payer(payer, ed25519(1));
        ctx.require_key_if_receiver_sig_required_for_account(
            AccountId::default(),
            ResponseCode::InvalidAccountId,
        )
        .unwrap();
        assert!(ctx.required_non_payer_keys().is_empty());
    }

    #[test]
    fn require_key_if_receiver_sig_required_for_account_requires_key_when_flag_set() {
        let payer = AccountId::new(0, 0, 100);
        let other = AccountId::new(0, 0, 200);
        let other_key = ed25519(2);
        let factory = store_factory(account_store_with(vec![
            Account::new(payer, ed25519(1)),
            Account::new(other, other_key.clone()).with_receiver_sig_required(true),
        ]));
        let mut ctx = PreHandleContext::new(
            factory,
            txn_info(payer),
            payer,
            ResponseCode::InvalidPayerAccountId,
        )
        .unwrap();

        ctx.require_key_if_receiver_sig_required_for_account(other, ResponseCode::InvalidAccountId)
            .unwrap();
        assert!(ctx.required_non_payer_keys().contains(&other_key));
    }

    #[test]
    fn require_key_if_receiver_sig_required_for_account_is_noop_when_flag_unset() {
        let payer = AccountId::new(0, 0, 100);
        let other = AccountId::new(0, 0, 200);
        let factory = store_factory(account_store_with(vec![
            Account::new(payer, ed25519(1)),
            Account::new(other, ed25519(2)),
        ]));
        let mut ctx = PreHandleContext::new(
            factory,
            txn_info(payer),
            payer,
            ResponseCode::InvalidPayerAccountId,
        )
        .unwrap();

        ctx.require_key_if_receiver_sig_required_for_account(other, ResponseCode::InvalidAccountId)
            .unwrap();
        assert!(ctx.required_non_payer_keys().is_empty());
    }

    #[test]
    fn require_key_if_receiver_sig_required_for_contract_is_noop_for_default_id() {
        let payer = AccountId::new(0, 0, 100);
        let mut ctx = ctx_with_payer(payer, ed25519(1));
        ctx.require_key_if_receiver_sig_required_for_contract(
            ContractId::default(),
            ResponseCode::InvalidContractId,
        )
        .unwrap();
        assert!(ctx.required_non_payer_keys().is_empty());
    }

    #[test]
    fn require_key_if_receiver_sig_required_for_contract_requires_key_when_flag_set() {
        let payer = AccountId::new(0, 0, 100);
        let contract_id = ContractId::new(0, 0, 300);
        let contract_key = ed25519(3);
        let accounts = account_store_with(vec![Account::new(payer, ed25519(1))]);
        let contracts = InMemoryContractStore::with_contracts(vec![(
            contract_id,
            Account::new(AccountId::default(), contract_key.clone())
                .with_receiver_sig_required(true),
        )]);
        let factory = store_factory_with_contracts(accounts, contracts);
        let mut ctx = PreHandleContext::new(
            factory,
            txn_info(payer),
            payer,
            ResponseCode::InvalidPayerAccountId,
        )
        .unwrap();

        ctx.require_key_if_receiver_sig_required_for_contract(
            contract_id,
            ResponseCode::InvalidContractId,
        )
        .unwrap();
        assert!(ctx.required_non_payer_keys().contains(&contract_key));
    }
}

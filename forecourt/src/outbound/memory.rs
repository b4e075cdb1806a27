//! In-memory account storage adapter.
//!
//! Demo-grade storage behind the repository port: the former module-level
//! user list, now owned by an injected adapter instance.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Account, AccountRepository, AccountStoreError, PasswordDigest};

/// Vec-backed account store guarded by a mutex.
///
/// A poisoned lock is reported as [`AccountStoreError::Unavailable`] rather
/// than propagating a panic into callers.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Account>>, AccountStoreError> {
        self.accounts
            .lock()
            .map_err(|_| AccountStoreError::Unavailable {
                message: "account store lock poisoned".to_owned(),
            })
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.lock()?;
        Ok(accounts
            .iter()
            .find(|account| account.username() == identifier || account.email() == identifier)
            .cloned())
    }

    async fn insert(&self, account: Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.lock()?;
        if accounts.iter().any(|existing| {
            existing.username() == account.username() || existing.email() == account.email()
        }) {
            return Err(AccountStoreError::Conflict {
                identifier: account.username().to_owned(),
            });
        }
        accounts.push(account);
        Ok(())
    }

    async fn update_password(
        &self,
        id: Uuid,
        digest: PasswordDigest,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.lock()?;
        match accounts.iter_mut().find(|account| account.id() == id) {
            Some(account) => {
                account.rotate_digest(digest, updated_at);
                Ok(())
            }
            None => Err(AccountStoreError::Missing { id }),
        }
    }

    async fn list(&self) -> Result<Vec<Account>, AccountStoreError> {
        let accounts = self.lock()?;
        Ok(accounts.clone())
    }
}

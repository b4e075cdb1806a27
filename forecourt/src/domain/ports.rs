//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning opaque reports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::account::{Account, PasswordDigest};

/// Errors surfaced by an account storage adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountStoreError {
    /// An account with the same username or email already exists.
    #[error("account already exists for {identifier}")]
    Conflict {
        /// Identifier that collided.
        identifier: String,
    },
    /// No stored account carries this id.
    #[error("account {id} not found")]
    Missing {
        /// Identifier that failed to resolve.
        id: Uuid,
    },
    /// The store could not be reached or is in a broken state.
    #[error("account store unavailable: {message}")]
    Unavailable {
        /// Adapter-provided failure description.
        message: String,
    },
}

/// Storage port for accounts.
///
/// Implementations own all account state; the domain never holds a
/// module-level registry of its own.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Look up an account whose username or email equals `identifier`.
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, AccountStoreError>;

    /// Persist a new account, rejecting identifier collisions.
    async fn insert(&self, account: Account) -> Result<(), AccountStoreError>;

    /// Replace the stored credential digest for `id`.
    async fn update_password(
        &self,
        id: Uuid,
        digest: PasswordDigest,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError>;

    /// All stored accounts.
    async fn list(&self) -> Result<Vec<Account>, AccountStoreError>;
}

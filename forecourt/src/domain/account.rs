//! Account entity and the service coordinating registration and login.
//!
//! Storage and time arrive through injected ports; nothing in this module
//! owns global state. Credential digests are demo-grade salted SHA-256
//! fingerprints, not a hardened KDF.

use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use mockable::Clock;
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::auth::Credentials;
use super::error::{ApiError, ErrorCode};
use super::ports::{AccountRepository, AccountStoreError};
use super::presets::common_rules;
use super::validation::{
    validate_field, validate_form, FieldValue, FormData, RuleSet, ValidationError, ValidationRule,
};

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Salted credential fingerprint stored in place of the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    salt: String,
    digest: String,
}

impl PasswordDigest {
    /// Derive a digest for `password` under a fresh random salt.
    pub fn derive(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = Self::digest_with(&salt, password);
        Self { salt, digest }
    }

    /// Whether `password` reproduces this digest under the stored salt.
    pub fn matches(&self, password: &str) -> bool {
        Self::digest_with(&self.salt, password) == self.digest
    }

    fn digest_with(salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Stored account.
///
/// ## Invariants
/// - Field values satisfy the registration presets; the service validates
///   before construction.
/// - The password digest never leaves this type except through
///   [`PasswordDigest::matches`].
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: Uuid,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    digest: PasswordDigest,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Assemble an account from validated parts.
    #[expect(clippy::too_many_arguments, reason = "flat constructor over validated parts")]
    pub fn new(
        id: Uuid,
        username: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: Option<String>,
        digest: PasswordDigest,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone,
            digest,
            created_at,
            updated_at: None,
        }
    }

    /// Stable account identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Unique contact address, also usable as a login identifier.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Optional contact number.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Stored credential digest.
    pub fn digest(&self) -> &PasswordDigest {
        &self.digest
    }

    /// Registration instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last credential rotation, if any.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Replace the credential digest, stamping the rotation instant.
    pub fn rotate_digest(&mut self, digest: PasswordDigest, at: DateTime<Utc>) {
        self.digest = digest;
        self.updated_at = Some(at);
    }

    /// Safe projection for responses; never carries the digest.
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            created_at: self.created_at,
        }
    }
}

/// Account projection returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    /// Stable account identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Registration instant.
    pub created_at: DateTime<Utc>,
}

/// Registration request accepted by [`AccountService::register`].
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Requested login name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional contact number.
    pub phone: Option<String>,
    password: Zeroizing<String>,
}

impl NewAccount {
    /// Build a registration request; validation happens in the service.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: &str,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: None,
            password: Zeroizing::new(password.to_owned()),
        }
    }

    /// Attach an optional contact number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Requested password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Failures produced by the account service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountError {
    /// A registration or reset input failed preset validation.
    #[error("{0}")]
    Rejected(ValidationError),
    /// Username or email is already registered.
    #[error("identifier is already registered")]
    DuplicateIdentifier,
    /// Unknown identifier or wrong password; deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// No account matches the supplied identifier.
    #[error("account not found")]
    UnknownAccount,
    /// The storage adapter reported itself broken.
    #[error("account store unavailable: {message}")]
    StoreUnavailable {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl AccountError {
    /// Taxonomy code the failure maps to.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Rejected(error) => error.code(),
            Self::DuplicateIdentifier => ErrorCode::AUTH_EMAIL_TAKEN,
            Self::InvalidCredentials => ErrorCode::AUTH_INVALID_CREDENTIALS,
            Self::UnknownAccount => ErrorCode::AUTH_USER_NOT_FOUND,
            Self::StoreUnavailable { .. } => ErrorCode::SYSTEM_DATABASE_ERROR,
        }
    }

    /// HTTP-equivalent status the failure maps to.
    pub fn status(&self) -> u16 {
        match self {
            Self::Rejected(_) | Self::DuplicateIdentifier => 400,
            Self::InvalidCredentials => 401,
            Self::UnknownAccount => 404,
            Self::StoreUnavailable { .. } => 500,
        }
    }

    /// Render as the canonical failure payload, stamped at `at`.
    pub fn into_api_error(self, at: DateTime<Utc>) -> ApiError {
        let status = self.status();
        let code = self.code();
        let message = match &self {
            Self::Rejected(error) => error.message().to_owned(),
            other => other.to_string(),
        };
        ApiError::new(status, code, message, at)
    }
}

impl From<AccountStoreError> for AccountError {
    fn from(value: AccountStoreError) -> Self {
        match value {
            AccountStoreError::Conflict { .. } => Self::DuplicateIdentifier,
            AccountStoreError::Missing { .. } => Self::UnknownAccount,
            AccountStoreError::Unavailable { message } => Self::StoreUnavailable { message },
        }
    }
}

/// Registration, login, and password-reset flows over an injected store.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use mockable::DefaultClock;
/// use forecourt::domain::AccountService;
/// use forecourt::outbound::InMemoryAccountRepository;
///
/// let service = AccountService::new(
///     Arc::new(InMemoryAccountRepository::new()),
///     Arc::new(DefaultClock),
/// );
/// # drop(service);
/// ```
pub struct AccountService {
    repo: Arc<dyn AccountRepository>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Service over the given storage and clock ports.
    pub fn new(repo: Arc<dyn AccountRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    fn registration_rules() -> RuleSet {
        let presets = common_rules();
        let mut phone = presets.phone;
        phone.required = false;
        RuleSet::new()
            .field(
                "username",
                ValidationRule::new()
                    .required()
                    .min_length(3)
                    .max_length(32)
                    .pattern(username_regex().clone()),
            )
            .field("email", presets.email)
            .field("password", presets.password)
            .field("firstName", presets.name.clone())
            .field("lastName", presets.name)
            .field("phone", phone)
    }

    /// Validate and store a new account.
    ///
    /// The first preset violation is reported; duplicate usernames and
    /// emails are rejected before anything is written.
    pub async fn register(&self, request: &NewAccount) -> Result<AccountSummary, AccountError> {
        let data = FormData::new()
            .set("username", request.username.as_str())
            .set("email", request.email.as_str())
            .set("password", request.password())
            .set("firstName", request.first_name.as_str())
            .set("lastName", request.last_name.as_str())
            .set(
                "phone",
                request
                    .phone
                    .as_deref()
                    .map_or(FieldValue::Missing, FieldValue::from),
            );
        let outcome = validate_form(&data, &Self::registration_rules());
        if let Some(error) = outcome.first_error() {
            return Err(AccountError::Rejected(error.clone()));
        }

        for identifier in [request.username.as_str(), request.email.as_str()] {
            if self.repo.find_by_identifier(identifier).await?.is_some() {
                return Err(AccountError::DuplicateIdentifier);
            }
        }

        let account = Account::new(
            Uuid::new_v4(),
            request.username.as_str(),
            request.email.as_str(),
            request.first_name.as_str(),
            request.last_name.as_str(),
            request.phone.clone(),
            PasswordDigest::derive(request.password()),
            self.clock.utc(),
        );
        let summary = account.summary();
        self.repo.insert(account).await?;
        info!(username = %summary.username, "account registered");
        Ok(summary)
    }

    /// Authenticate against a stored account.
    ///
    /// Unknown identifiers and wrong passwords produce the same error so a
    /// caller cannot probe which accounts exist.
    pub async fn login(&self, credentials: &Credentials) -> Result<AccountSummary, AccountError> {
        let Some(account) = self
            .repo
            .find_by_identifier(credentials.identifier())
            .await?
        else {
            return Err(AccountError::InvalidCredentials);
        };
        if !account.digest().matches(credentials.password()) {
            return Err(AccountError::InvalidCredentials);
        }
        info!(username = %account.username(), "account login");
        Ok(account.summary())
    }

    /// Rotate the password for an existing account.
    pub async fn reset_password(
        &self,
        identifier: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let Some(account) = self.repo.find_by_identifier(identifier).await? else {
            return Err(AccountError::UnknownAccount);
        };
        let presets = common_rules();
        if let Some(error) =
            validate_field(&FieldValue::from(new_password), &presets.password, "password")
        {
            return Err(AccountError::Rejected(error));
        }
        self.repo
            .update_password(
                account.id(),
                PasswordDigest::derive(new_password),
                self.clock.utc(),
            )
            .await?;
        info!(username = %account.username(), "password reset");
        Ok(())
    }

    /// Safe projections of every stored account.
    pub async fn list(&self) -> Result<Vec<AccountSummary>, AccountError> {
        let accounts = self.repo.list().await?;
        Ok(accounts.iter().map(Account::summary).collect())
    }
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

use std::sync::Arc;

use tokio::task;
use tracing::{debug, info, warn};

use crate::auth::password;
use crate::auth::token::TokenCodec;
use crate::models::{Account, NewAccount};
use crate::store::{AccountStore, StoreError};

/// Result of a registration attempt. Every expected case is a value here;
/// `Err` is reserved for unexpected store or hashing faults.
#[derive(Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    AlreadyExists,
    MissingCredentials,
}

/// Result of a login attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Success { token: String },
    NoSuchUser,
    InvalidCredentials,
}

/// Orchestrates registration, login, and identity resolution against the
/// account store.
///
/// The store handle and the signing secret are the only shared state, both
/// passed in at construction and read-only afterwards, so concurrent requests
/// need no coordination here.
pub struct AuthFlow {
    accounts: Arc<dyn AccountStore>,
    tokens: TokenCodec,
}

impl AuthFlow {
    pub fn new(accounts: Arc<dyn AccountStore>, tokens: TokenCodec) -> Self {
        AuthFlow { accounts, tokens }
    }

    /// Registers a new shop owner.
    ///
    /// A username that is already taken is an informational outcome, not an
    /// error. The store's uniqueness constraint backs the existence check, so
    /// a concurrent registration losing the race also lands on
    /// `AlreadyExists` instead of overwriting.
    pub async fn register(
        &self,
        username: Option<String>,
        password: Option<String>,
        shop: Option<String>,
        profile_image: Option<String>,
    ) -> Result<RegisterOutcome, String> {
        let (username, password) = match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => return Ok(RegisterOutcome::MissingCredentials),
        };

        // bcrypt is CPU-bound, keep it off the async workers.
        let password_hash = task::spawn_blocking(move || password::hash(&password))
            .await
            .map_err(|e| format!("Hashing task failed: {}", e))??;

        let existing = self
            .accounts
            .find_by_username(&username)
            .await
            .map_err(|e| format!("Account lookup failed: {}", e))?;
        if existing.is_some() {
            debug!("Registration for '{}' rejected: username taken.", username);
            return Ok(RegisterOutcome::AlreadyExists);
        }

        let new_account = NewAccount {
            username: username.clone(),
            password_hash,
            shop,
            profile_image,
        };
        match self.accounts.create(new_account).await {
            Ok(account) => {
                info!("Registered account '{}' ({}).", account.username, account.id);
                Ok(RegisterOutcome::Registered)
            }
            Err(StoreError::Conflict(_)) => {
                // Lost a race with a concurrent registration after the
                // existence check passed.
                warn!("Concurrent registration for '{}' hit the unique index.", username);
                Ok(RegisterOutcome::AlreadyExists)
            }
            Err(e) => Err(format!("Account creation failed: {}", e)),
        }
    }

    /// Verifies credentials and issues an identity token on success.
    ///
    /// Token issuance persists nothing; given the secret it is a pure
    /// function of the account id.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, String> {
        let account = match self
            .accounts
            .find_by_username(username)
            .await
            .map_err(|e| format!("Account lookup failed: {}", e))?
        {
            Some(account) => account,
            None => {
                debug!("Login for unknown username '{}'.", username);
                return Ok(LoginOutcome::NoSuchUser);
            }
        };

        let password = password.to_string();
        let password_hash = account.password_hash.clone();
        let verified = task::spawn_blocking(move || password::verify(&password, &password_hash))
            .await
            .map_err(|e| format!("Verification task failed: {}", e))??;

        if !verified {
            debug!("Login for '{}' rejected: password mismatch.", username);
            return Ok(LoginOutcome::InvalidCredentials);
        }

        let token = self.tokens.sign(&account.id)?;
        info!("Issued identity token for '{}'.", account.username);
        Ok(LoginOutcome::Success { token })
    }

    /// Resolves a bearer token back to the account it was issued for.
    ///
    /// Malformed or badly-signed tokens and ids with no matching account all
    /// resolve to None; only store faults are errors.
    pub async fn resolve_identity(&self, token: &str) -> Result<Option<Account>, String> {
        let account_id = match self.tokens.verify(token) {
            Some(id) => id,
            None => return Ok(None),
        };

        self.accounts
            .find_by_id(&account_id)
            .await
            .map_err(|e| format!("Account lookup failed: {}", e))
    }
}

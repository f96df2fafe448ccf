//! # Account Service
//!
//! Registration and login. Both answer with a freshly signed identity token.
//!
//! ## Flow
//!
//! ```text
//! register: validate → hash password → insert account → sign token
//! login:    find by username → verify password → sign token
//! ```
//!
//! Unknown usernames and wrong passwords both fail with
//! [`AppError::InvalidCredentials`] so callers cannot probe for accounts.

use std::time::Duration;

use lib_auth::{encode_jwt, hash_password, verify_password};
use lib_core::{bounded, Account, AppError, Config, DynStore, Result};
use lib_utils::validate_not_empty;
use once_cell::sync::Lazy;
use tracing::{debug, info, instrument, warn};

/// Hash verified against when the username is unknown.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("no-such-account-placeholder").ok());

/// Account operations over the injected store.
#[derive(Clone)]
pub struct AccountService {
    store: DynStore,
    jwt_secret: String,
    token_ttl: chrono::Duration,
    timeout: Duration,
}

impl AccountService {
    pub fn new(store: DynStore, config: &Config) -> Self {
        Self {
            store,
            jwt_secret: config.jwt_secret.clone(),
            token_ttl: config.token_ttl(),
            timeout: config.db_timeout(),
        }
    }

    /// Create an account and return a token for it.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if username or password is empty
    /// - [`AppError::UsernameTaken`] if the username exists
    /// - [`AppError::Hashing`], [`AppError::Signing`], storage errors
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<String> {
        info!("[REGISTER] New account request");
        validate_credentials(username, password)?;

        let password_hash = hash_in_background(password).await?;
        let account = Account::new(username, password_hash);

        bounded(self.timeout, self.store.insert_account(&account))
            .await
            .inspect_err(|e| warn!("[REGISTER] Could not create account: {}", e))?;

        info!("[REGISTER] Account created (id: {})", account.id);
        self.issue_token(&account)
    }

    /// Check credentials and return a token for the account.
    ///
    /// Empty input is not rejected up front; it simply fails to match.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidCredentials`] for an unknown user or a wrong password
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        info!("[LOGIN] Login request");

        let account = bounded(self.timeout, self.store.find_account_by_username(username)).await?;

        // Unknown usernames still pay for one verify so timing does not reveal them
        let hash = match &account {
            Some(account) => account.password_hash.clone(),
            None => (*DUMMY_HASH).clone().unwrap_or_default(),
        };
        let candidate = password.to_string();
        let verified = tokio::task::spawn_blocking(move || verify_password(&candidate, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?;

        match account {
            Some(account) if verified => {
                info!("[LOGIN] Login successful (id: {})", account.id);
                self.issue_token(&account)
            }
            Some(_) => {
                warn!("[LOGIN] Wrong password");
                Err(AppError::InvalidCredentials)
            }
            None => {
                warn!("[LOGIN] Unknown username");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn issue_token(&self, account: &Account) -> Result<String> {
        let token = encode_jwt(
            &account.id.to_string(),
            &account.username,
            &self.jwt_secret,
            self.token_ttl,
        )
        .map_err(|e| AppError::Signing(e.to_string()))?;

        debug!("Token issued for {}", account.username);
        Ok(token)
    }
}

fn validate_credentials(username: &str, password: &str) -> Result<()> {
    validate_not_empty(username, "Username").map_err(AppError::Validation)?;
    validate_not_empty(password, "Password").map_err(AppError::Validation)?;
    Ok(())
}

/// Argon2 is CPU-bound; keep it off the async workers.
async fn hash_in_background(password: &str) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Hashing(e.to_string()))?
        .map_err(|e| AppError::Hashing(e.to_string()))
}

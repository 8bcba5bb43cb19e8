//! Registration and login against the account store.
//!
//! Credential secrets are stored as Argon2id hashes with per-hash salts;
//! the hash never leaves this module. Login failures for unknown email
//! and wrong password are indistinguishable to the caller.

use anyhow::Context;
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tokio::task;

use crate::config::SecurityConfig;
use crate::db::{Account, Store};

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Email already in use")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for IdentityError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

pub struct IdentityService {
    store: Store,
    security: SecurityConfig,
}

impl IdentityService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    /// Create an account. The email must not already be registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, IdentityError> {
        if self.store.account_by_email(email).await?.is_some() {
            return Err(IdentityError::EmailTaken);
        }

        let password = password.to_string();
        let security = self.security.clone();

        // Argon2 hashing is CPU-bound; keep it off the async runtime.
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .context("Password hashing task panicked")
            .map_err(|e| IdentityError::Internal(e.to_string()))?
            .map_err(|e| IdentityError::Internal(e.to_string()))?;

        let account = self
            .store
            .create_account(name, email, &password_hash)
            .await?;

        Ok(account)
    }

    /// Verify credentials and return the account on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, IdentityError> {
        let Some((account, password_hash)) =
            self.store.account_by_email_with_hash(email).await?
        else {
            return Err(IdentityError::InvalidCredentials);
        };

        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")
        .map_err(|e| IdentityError::Internal(e.to_string()))?
        .map_err(|e| IdentityError::Internal(e.to_string()))?;

        if !is_valid {
            return Err(IdentityError::InvalidCredentials);
        }

        Ok(account)
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
fn hash_password(password: &str, config: &SecurityConfig) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

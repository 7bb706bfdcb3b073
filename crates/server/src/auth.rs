// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Auth service: register, login, refresh rotation, logout.

use std::collections::HashMap;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::directory::{Account, AccountDirectory};
use crate::error::ApiError;
use crate::registry::RefreshTokenRegistry;
use crate::token::{TokenCodec, TokenKind, TokenPair};

/// Result of a successful register or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub account: Account,
    pub tokens: TokenPair,
}

/// Orchestrates the account directory, refresh token registry, and token
/// codec. All state is constructor-injected; tests build isolated instances.
pub struct AuthService {
    directory: AccountDirectory,
    registry: RefreshTokenRegistry,
    codec: TokenCodec,
    /// Account id -> argon2 password hash. Kept apart from the directory so
    /// the secret can never ride along on a serialized account.
    credentials: RwLock<HashMap<String, String>>,
    argon2: Argon2<'static>,
}

impl AuthService {
    pub fn new(codec: TokenCodec) -> Self {
        Self {
            directory: AccountDirectory::new(),
            registry: RefreshTokenRegistry::new(),
            codec,
            credentials: RwLock::new(HashMap::new()),
            argon2: Argon2::default(),
        }
    }

    /// Create an account, store its credential, and issue a first session.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthSession, ApiError> {
        let account = self.directory.create(email, name).await?;
        let hash = self.hash_password(password)?;
        self.credentials.write().await.insert(account.id.clone(), hash);

        let tokens = self.issue_session(&account.id).await?;
        tracing::info!(account = %account.id, "account registered");
        Ok(AuthSession { account, tokens })
    }

    /// Authenticate by email + password and issue a fresh pair.
    ///
    /// Unknown email and wrong password are deliberately indistinguishable.
    /// Other live sessions for the account are left alone (multi-device).
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let account = self
            .directory
            .find_by_email(email)
            .await
            .ok_or(ApiError::InvalidCredentials)?;
        let hash = self
            .credentials
            .read()
            .await
            .get(&account.id)
            .cloned()
            .ok_or(ApiError::InvalidCredentials)?;
        self.verify_password(password, &hash)?;

        let tokens = self.issue_session(&account.id).await?;
        tracing::info!(account = %account.id, "login succeeded");
        Ok(AuthSession { account, tokens })
    }

    /// Exchange a live refresh token for a new pair, rotating atomically.
    ///
    /// Fails `InvalidToken` when the token does not verify as kind=refresh,
    /// is not registered, its account is gone, or a concurrent rotation of
    /// the same token already claimed it.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let claims = self.codec.verify(refresh_token).ok_or(ApiError::InvalidToken)?;
        if claims.kind != TokenKind::Refresh {
            return Err(ApiError::InvalidToken);
        }
        if self.registry.owner_of(refresh_token).await.is_none() {
            return Err(ApiError::InvalidToken);
        }
        if self.directory.find_by_id(&claims.sub).await.is_none() {
            return Err(ApiError::InvalidToken);
        }

        let pair = self.codec.issue_pair(&claims.sub).map_err(|_| ApiError::Internal)?;
        // Claim the old row and publish the new one in one step. A lost
        // race surfaces here, and the minted pair is simply dropped.
        if self.registry.rotate(refresh_token, &pair.refresh_token).await.is_none() {
            return Err(ApiError::InvalidToken);
        }
        tracing::debug!(account = %claims.sub, "refresh token rotated");
        Ok(pair)
    }

    /// Revoke a refresh token. Never fails — revoking garbage is a no-op.
    pub async fn logout(&self, refresh_token: &str) {
        self.registry.revoke(refresh_token).await;
    }

    pub async fn get_account_by_id(&self, account_id: &str) -> Option<Account> {
        self.directory.find_by_id(account_id).await
    }

    /// Resolve "who is calling" from a bearer access token.
    pub fn authenticate_access(&self, token: &str) -> Result<String, ApiError> {
        let claims = self.codec.verify(token).ok_or(ApiError::Unauthorized)?;
        if claims.kind != TokenKind::Access {
            return Err(ApiError::Unauthorized);
        }
        Ok(claims.sub)
    }

    async fn issue_session(&self, account_id: &str) -> Result<TokenPair, ApiError> {
        let pair = self.codec.issue_pair(account_id).map_err(|_| ApiError::Internal)?;
        self.registry.register(&pair.refresh_token, account_id).await;
        Ok(pair)
    }

    fn hash_password(&self, password: &str) -> Result<String, ApiError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| ApiError::Internal)?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<(), ApiError> {
        let parsed = PasswordHash::new(hash).map_err(|_| ApiError::Internal)?;
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| ApiError::InvalidCredentials)
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;

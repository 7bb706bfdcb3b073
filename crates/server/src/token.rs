// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token issue/verify: signed, expiring access and refresh tokens.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Discriminator claim so a refresh token can never be replayed as an
/// access token (and vice versa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Owning account id.
    pub sub: String,
    pub kind: TokenKind,
    pub iat: u64,
    pub exp: u64,
    /// Unique token id. Two tokens issued for the same account at any
    /// moment still differ, so they never collide in the registry.
    pub jti: String,
}

/// A freshly issued access + refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies signed tokens (HS256 over a shared secret).
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl TokenCodec {
    pub fn new(secret: &str, access_ttl_secs: u64, refresh_ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    /// Issue a short-lived access token and a long-lived refresh token for
    /// an account.
    pub fn issue_pair(&self, account_id: &str) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let access = self.issue(account_id, TokenKind::Access, self.access_ttl_secs)?;
        let refresh = self.issue(account_id, TokenKind::Refresh, self.refresh_ttl_secs)?;
        Ok(TokenPair { access_token: access, refresh_token: refresh })
    }

    fn issue(
        &self,
        account_id: &str,
        kind: TokenKind,
        ttl_secs: u64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = epoch_secs();
        let claims = TokenClaims {
            sub: account_id.to_owned(),
            kind,
            iat: now,
            exp: now.saturating_add(ttl_secs),
            jti: uuid::Uuid::new_v4().simple().to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Verify a token's signature and expiry. Returns `None` for anything
    /// that does not check out — expired, tampered, or plain garbage.
    pub fn verify(&self, token: &str) -> Option<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: an expired token is expired the second its claim says so.
        validation.leeway = 0;
        decode::<TokenClaims>(token, &self.decoding_key, &validation).ok().map(|data| data.claims)
    }
}

fn epoch_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;

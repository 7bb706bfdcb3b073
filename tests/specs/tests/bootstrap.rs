// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end bootstrap scenarios: a device session resuming against a real
//! in-process server.

use carelog::api::ApiClient;
use carelog::bootstrap::{BootstrapController, BootstrapState};
use carelog::session::{SessionClient, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use carelog::storage::SecureStorage;
use carelog_specs::{expired_access_token, SpecServer};

fn temp_storage() -> (tempfile::TempDir, SecureStorage) {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = SecureStorage::new(dir.path().join("session.json"));
    (dir, storage)
}

#[tokio::test]
async fn expired_access_with_valid_refresh_recovers() -> anyhow::Result<()> {
    let server = SpecServer::start().await?;
    let api = ApiClient::new(&server.base_url);
    let auth = api.register("resume@example.com", "hunter22", "Resume User").await?;
    let old_refresh = auth.tokens.refresh_token.clone();

    // A device that crashed with an expired access token but a live refresh
    // token in durable storage.
    let (_dir, storage) = temp_storage();
    let expired = expired_access_token(&auth.account.id)?;
    storage.set_many(&[
        (ACCESS_TOKEN_KEY, expired.as_str()),
        (REFRESH_TOKEN_KEY, old_refresh.as_str()),
    ])?;

    let mut controller =
        BootstrapController::new(ApiClient::new(&server.base_url), SessionClient::new(storage.clone()));
    assert_eq!(controller.run().await, BootstrapState::Authenticated);
    assert_eq!(
        controller.session().account().map(|a| a.email.as_str()),
        Some("resume@example.com")
    );

    // The rotated pair was persisted over the stale one.
    let stored_access = storage.get(ACCESS_TOKEN_KEY)?.unwrap_or_default();
    let stored_refresh = storage.get(REFRESH_TOKEN_KEY)?.unwrap_or_default();
    assert_ne!(stored_access, expired);
    assert_ne!(stored_refresh, old_refresh);

    // The old refresh token died in the rotation; the persisted one works.
    let replay = api.refresh(&old_refresh).await.unwrap_err();
    assert!(replay.is_unauthorized());
    api.refresh(&stored_refresh).await?;
    Ok(())
}

#[tokio::test]
async fn expired_access_with_garbage_refresh_fails_closed() -> anyhow::Result<()> {
    let server = SpecServer::start().await?;
    let api = ApiClient::new(&server.base_url);
    let auth = api.register("garbage@example.com", "hunter22", "Garbage User").await?;

    let (_dir, storage) = temp_storage();
    let expired = expired_access_token(&auth.account.id)?;
    storage.set_many(&[
        (ACCESS_TOKEN_KEY, expired.as_str()),
        (REFRESH_TOKEN_KEY, "definitely-not-a-token"),
    ])?;

    let mut controller =
        BootstrapController::new(ApiClient::new(&server.base_url), SessionClient::new(storage.clone()));
    assert_eq!(controller.run().await, BootstrapState::Unauthenticated);

    // Fail-closed wipes the stored session.
    assert_eq!(storage.get(ACCESS_TOKEN_KEY)?, None);
    assert_eq!(storage.get(REFRESH_TOKEN_KEY)?, None);
    Ok(())
}

#[tokio::test]
async fn revoked_refresh_token_cannot_resurrect_a_session() -> anyhow::Result<()> {
    let server = SpecServer::start().await?;
    let api = ApiClient::new(&server.base_url);
    let auth = api.register("revoked@example.com", "hunter22", "Revoked User").await?;

    // The device logged out elsewhere; its refresh token is signed and
    // unexpired but no longer registered.
    api.logout(&auth.tokens.refresh_token).await?;

    let (_dir, storage) = temp_storage();
    let expired = expired_access_token(&auth.account.id)?;
    storage.set_many(&[
        (ACCESS_TOKEN_KEY, expired.as_str()),
        (REFRESH_TOKEN_KEY, auth.tokens.refresh_token.as_str()),
    ])?;

    let mut controller =
        BootstrapController::new(ApiClient::new(&server.base_url), SessionClient::new(storage.clone()));
    assert_eq!(controller.run().await, BootstrapState::Unauthenticated);
    assert_eq!(storage.get(REFRESH_TOKEN_KEY)?, None);
    Ok(())
}

#[tokio::test]
async fn fresh_pair_authenticates_without_spending_the_refresh_token() -> anyhow::Result<()> {
    let server = SpecServer::start().await?;
    let api = ApiClient::new(&server.base_url);
    let auth = api.register("fresh@example.com", "hunter22", "Fresh User").await?;

    let (_dir, storage) = temp_storage();
    storage.set_many(&[
        (ACCESS_TOKEN_KEY, auth.tokens.access_token.as_str()),
        (REFRESH_TOKEN_KEY, auth.tokens.refresh_token.as_str()),
    ])?;

    let mut controller =
        BootstrapController::new(ApiClient::new(&server.base_url), SessionClient::new(storage));
    assert_eq!(controller.run().await, BootstrapState::Authenticated);

    // No refresh was needed, so the stored refresh token is still live.
    api.refresh(&auth.tokens.refresh_token).await?;
    Ok(())
}

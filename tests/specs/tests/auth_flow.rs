// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end auth flows exercised through the device client.

use carelog::api::ApiClient;
use carelog_specs::SpecServer;

#[tokio::test]
async fn register_me_logout_lifecycle() -> anyhow::Result<()> {
    let server = SpecServer::start().await?;
    let api = ApiClient::new(&server.base_url);

    let auth = api.register("life@example.com", "hunter22", "Life User").await?;
    let me = api.get_me(&auth.tokens.access_token).await?;
    assert_eq!(me.id, auth.account.id);

    api.logout(&auth.tokens.refresh_token).await?;
    let dead = api.refresh(&auth.tokens.refresh_token).await.unwrap_err();
    assert!(dead.is_unauthorized());
    assert_eq!(dead.code.as_deref(), Some("INVALID_TOKEN"));

    // Logout of an already-dead token still succeeds.
    api.logout(&auth.tokens.refresh_token).await?;
    Ok(())
}

#[tokio::test]
async fn two_devices_hold_independent_sessions() -> anyhow::Result<()> {
    let server = SpecServer::start().await?;
    let api = ApiClient::new(&server.base_url);

    let device_a = api.register("multi@example.com", "hunter22", "Multi User").await?;
    let device_b = api.login("multi@example.com", "hunter22").await?;
    assert_ne!(device_a.tokens.refresh_token, device_b.tokens.refresh_token);

    // Logging out device A leaves device B's session intact.
    api.logout(&device_a.tokens.refresh_token).await?;
    let rotated = api.refresh(&device_b.tokens.refresh_token).await?;
    api.get_me(&rotated.access_token).await?;
    Ok(())
}

#[tokio::test]
async fn login_failures_look_identical_to_the_device() -> anyhow::Result<()> {
    let server = SpecServer::start().await?;
    let api = ApiClient::new(&server.base_url);
    api.register("same@example.com", "hunter22", "Same User").await?;

    let wrong = api.login("same@example.com", "wrong-password").await.unwrap_err();
    let unknown = api.login("unknown@example.com", "hunter22").await.unwrap_err();
    assert_eq!(wrong.status, unknown.status);
    assert_eq!(wrong.code, unknown.code);
    assert_eq!(wrong.message, unknown.message);
    Ok(())
}

#[tokio::test]
async fn raw_rejection_carries_the_error_envelope() -> anyhow::Result<()> {
    let server = SpecServer::start().await?;

    let resp = reqwest::get(format!("{}/account/me", server.base_url)).await?;
    assert_eq!(resp.status().as_u16(), 401);
    assert!(resp.headers().get("x-request-id").is_some());

    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert!(body["error"]["requestId"].is_string());
    Ok(())
}

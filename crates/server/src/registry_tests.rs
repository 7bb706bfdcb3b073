// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use super::*;

#[tokio::test]
async fn register_and_owner_roundtrip() {
    let registry = RefreshTokenRegistry::new();
    registry.register("tok-1", "acc_a").await;

    assert_eq!(registry.owner_of("tok-1").await.as_deref(), Some("acc_a"));
    assert_eq!(registry.owner_of("tok-2").await, None);
}

#[tokio::test]
async fn revoke_is_idempotent() {
    let registry = RefreshTokenRegistry::new();
    registry.register("tok-1", "acc_a").await;

    registry.revoke("tok-1").await;
    assert_eq!(registry.owner_of("tok-1").await, None);

    // Revoking again (or revoking something never registered) is a no-op.
    registry.revoke("tok-1").await;
    registry.revoke("never-existed").await;
}

#[tokio::test]
async fn rotate_moves_ownership_to_the_new_token() {
    let registry = RefreshTokenRegistry::new();
    registry.register("old", "acc_a").await;

    let owner = registry.rotate("old", "new").await;
    assert_eq!(owner.as_deref(), Some("acc_a"));
    assert_eq!(registry.owner_of("old").await, None);
    assert_eq!(registry.owner_of("new").await.as_deref(), Some("acc_a"));
}

#[tokio::test]
async fn rotate_of_absent_token_fails() {
    let registry = RefreshTokenRegistry::new();
    assert_eq!(registry.rotate("ghost", "new").await, None);
    assert_eq!(registry.owner_of("new").await, None);
}

#[tokio::test]
async fn concurrent_rotations_of_one_token_have_exactly_one_winner() {
    let registry = Arc::new(RefreshTokenRegistry::new());
    registry.register("contested", "acc_a").await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let registry = Arc::clone(&registry);
        let new = format!("replacement-{i}");
        handles.push(tokio::spawn(async move { registry.rotate("contested", &new).await }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.expect("join").is_some() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(registry.owner_of("contested").await, None);
}

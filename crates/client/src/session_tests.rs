// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::api::TokenPair;
use crate::storage::SecureStorage;

fn temp_session() -> (tempfile::TempDir, SessionClient) {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = SecureStorage::new(dir.path().join("session.json"));
    (dir, SessionClient::new(storage))
}

fn pair(access: &str, refresh: &str) -> TokenPair {
    TokenPair { access_token: access.to_owned(), refresh_token: refresh.to_owned() }
}

#[test]
fn hydrate_of_empty_storage_yields_no_session() {
    let (_dir, mut session) = temp_session();
    assert!(!session.is_hydrated());

    session.hydrate();
    assert!(session.is_hydrated());
    assert!(session.access_token().is_none());
    assert!(session.token_pair().is_none());
}

#[test]
fn set_tokens_persists_before_publishing() {
    let (dir, mut session) = temp_session();
    session.set_tokens(&pair("a1", "r1")).expect("set_tokens");

    assert_eq!(session.access_token(), Some("a1"));
    assert_eq!(session.refresh_token(), Some("r1"));

    // A brand-new client over the same file sees the same pair — i.e. the
    // durable copy was written, not just memory.
    let mut fresh = SessionClient::new(SecureStorage::new(dir.path().join("session.json")));
    fresh.hydrate();
    assert_eq!(fresh.token_pair(), session.token_pair());
}

#[test]
fn set_tokens_failure_leaves_memory_untouched() {
    // Point storage at a path whose parent is a file, so writes must fail.
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"x").expect("write");
    let mut session = SessionClient::new(SecureStorage::new(blocker.join("session.json")));

    assert!(session.set_tokens(&pair("a1", "r1")).is_err());
    assert!(session.access_token().is_none());
    assert!(session.refresh_token().is_none());
}

#[test]
fn hydrate_degrades_to_no_session_on_corrupt_storage() {
    let (dir, mut session) = temp_session();
    std::fs::write(dir.path().join("session.json"), "{not json").expect("write");

    session.hydrate();
    assert!(session.is_hydrated());
    assert!(session.token_pair().is_none());
}

#[test]
fn partial_pair_is_not_a_session() {
    let (_dir, mut session) = temp_session();
    session.storage.set(ACCESS_TOKEN_KEY, "orphan-access").expect("set");

    session.hydrate();
    assert_eq!(session.access_token(), Some("orphan-access"));
    assert!(session.token_pair().is_none());
}

#[test]
fn clear_session_removes_everything_and_is_idempotent() {
    let (dir, mut session) = temp_session();
    session.set_tokens(&pair("a1", "r1")).expect("set_tokens");
    session.set_account(crate::api::Account {
        id: "acc_1".into(),
        email: "user@example.com".into(),
        name: "User".into(),
        settings: serde_json::Value::Null,
        created_at: 0,
    });

    session.clear_session();
    assert!(session.access_token().is_none());
    assert!(session.account().is_none());

    let mut fresh = SessionClient::new(SecureStorage::new(dir.path().join("session.json")));
    fresh.hydrate();
    assert!(fresh.token_pair().is_none());

    // Clearing an already-empty session is a no-op.
    session.clear_session();
}

// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access-control scenarios against a file-backed SQLite database.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use sshm_core::{CredentialStore, KdfParams, VaultError};
use sshm_storage::SqliteStore;
use sshm_vault::CredentialVault;
use tempfile::TempDir;

const FAST: KdfParams = KdfParams {
    memory_cost: 1024,
    iterations: 1,
    parallelism: 1,
};

fn pw(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

struct Harness {
    vault: CredentialVault,
    store: Arc<SqliteStore>,
    path: String,
    _dir: TempDir,
}

async fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sshm.db").to_str().unwrap().to_string();
    let store = Arc::new(SqliteStore::new(
        sshm_storage::Database::open(&path, true).await.unwrap(),
    ));
    let vault = CredentialVault::new(store.clone(), FAST);
    vault.initialize_storage().await.unwrap();
    Harness {
        vault,
        store,
        path,
        _dir: dir,
    }
}

#[tokio::test]
async fn duplicate_profile_keeps_the_first() {
    let h = harness().await;
    h.vault.create_profile("alice", &pw("first")).await.unwrap();

    let err = h.vault.create_profile("alice", &pw("second")).await.unwrap_err();
    assert!(matches!(err, VaultError::DuplicateProfile(ref n) if n == "alice"));

    h.vault.authenticate_profile("alice", &pw("first")).await.unwrap();
    assert!(matches!(
        h.vault.authenticate_profile("alice", &pw("second")).await,
        Err(VaultError::AuthenticationFailed)
    ));
}

#[tokio::test]
async fn wrong_password_fails_authentication() {
    let h = harness().await;
    h.vault.create_profile("alice", &pw("pw")).await.unwrap();
    assert!(matches!(
        h.vault.authenticate_profile("alice", &pw("wrong")).await,
        Err(VaultError::AuthenticationFailed)
    ));
}

#[tokio::test]
async fn end_to_end_secret_is_encrypted_at_rest() {
    let h = harness().await;
    h.vault.create_profile("alice", &pw("pw")).await.unwrap();
    let session = h.vault.authenticate_profile("alice", &pw("pw")).await.unwrap();
    h.vault
        .add_login(&session, "web", "bob", "example.com", Some(&pw("hunter2")))
        .await
        .unwrap();

    let revealed = h.vault.reveal_secret(&session, "web").await.unwrap().unwrap();
    assert_eq!(revealed.expose_secret(), "hunter2");

    let raw = h.store.login_by_name("web").await.unwrap().secret.unwrap();
    assert!(!raw.is_empty());
    assert_ne!(raw, b"hunter2");
    assert!(!raw.windows(7).any(|w| w == b"hunter2"));
}

#[tokio::test]
async fn other_profile_is_denied() {
    let h = harness().await;
    h.vault.create_profile("alice", &pw("a")).await.unwrap();
    h.vault.create_profile("bob", &pw("b")).await.unwrap();

    let alice = h.vault.authenticate_profile("alice", &pw("a")).await.unwrap();
    h.vault
        .add_login(&alice, "web", "bob", "example.com", Some(&pw("hunter2")))
        .await
        .unwrap();

    let bob = h.vault.authenticate_profile("bob", &pw("b")).await.unwrap();
    assert!(matches!(
        h.vault.reveal_secret(&bob, "web").await,
        Err(VaultError::AccessDenied)
    ));
    assert!(matches!(
        h.vault.connection_target(&bob, "web").await,
        Err(VaultError::AccessDenied)
    ));
}

#[tokio::test]
async fn foreign_ciphertext_fails_decryption() {
    let h = harness().await;
    h.vault.create_profile("alice", &pw("a")).await.unwrap();
    h.vault.create_profile("bob", &pw("b")).await.unwrap();
    let alice = h.vault.authenticate_profile("alice", &pw("a")).await.unwrap();
    let bob = h.vault.authenticate_profile("bob", &pw("b")).await.unwrap();
    h.vault
        .add_login(&alice, "alice-web", "u", "h", Some(&pw("hunter2")))
        .await
        .unwrap();
    h.vault.add_login(&bob, "bob-web", "u", "h", Some(&pw("x"))).await.unwrap();

    // Move alice's ciphertext onto bob's login behind the vault's back.
    let path = h.path.clone();
    let conn = rusqlite_connection(&path);
    conn.execute(
        "UPDATE logins SET secret = (SELECT secret FROM logins WHERE name = 'alice-web')
         WHERE name = 'bob-web'",
        [],
    )
    .unwrap();
    drop(conn);

    assert!(matches!(
        h.vault.reveal_secret(&bob, "bob-web").await,
        Err(VaultError::Decryption)
    ));
}

#[tokio::test]
async fn login_without_secret_reveals_none() {
    let h = harness().await;
    h.vault.create_profile("alice", &pw("pw")).await.unwrap();
    let session = h.vault.authenticate_profile("alice", &pw("pw")).await.unwrap();
    h.vault.add_login(&session, "db", "pg", "10.0.0.1", None).await.unwrap();

    assert!(h.vault.reveal_secret(&session, "db").await.unwrap().is_none());
}

#[tokio::test]
async fn reset_forgets_everything() {
    let h = harness().await;
    h.vault.create_profile("alice", &pw("pw")).await.unwrap();
    let session = h.vault.authenticate_profile("alice", &pw("pw")).await.unwrap();
    h.vault.add_login(&session, "web", "u", "h", None).await.unwrap();

    h.vault.reset_storage().await.unwrap();

    assert!(matches!(
        h.vault.authenticate_profile("alice", &pw("pw")).await,
        Err(VaultError::ProfileNotFound(_))
    ));
    assert!(matches!(
        h.vault.find_login("web").await,
        Err(VaultError::LoginNotFound(_))
    ));
}

#[tokio::test]
async fn data_persists_across_reopen() {
    let h = harness().await;
    h.vault.create_profile("alice", &pw("pw")).await.unwrap();
    let session = h.vault.authenticate_profile("alice", &pw("pw")).await.unwrap();
    h.vault
        .add_login(&session, "web", "bob", "example.com", Some(&pw("hunter2")))
        .await
        .unwrap();
    drop(session);

    let reopened = Arc::new(SqliteStore::new(
        sshm_storage::Database::open(&h.path, true).await.unwrap(),
    ));
    let vault = CredentialVault::new(reopened, FAST);
    let session = vault.authenticate_profile("alice", &pw("pw")).await.unwrap();
    let target = vault.connection_target(&session, "web").await.unwrap();
    assert_eq!(target.secret.unwrap().expose_secret(), "hunter2");
}

fn rusqlite_connection(path: &str) -> rusqlite::Connection {
    rusqlite::Connection::open(path).unwrap()
}

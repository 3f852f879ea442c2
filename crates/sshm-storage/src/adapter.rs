// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the CredentialStore trait.

use async_trait::async_trait;
use tracing::debug;

use sshm_config::model::StorageConfig;
use sshm_core::{
    CredentialStore, Login, NewLogin, NewProfile, ProfileId, StoreError, StoredProfile,
};

use crate::database::Database;
use crate::{migrations, queries};

/// SQLite-backed credential store.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the database named by `config`.
    pub async fn open(config: &StorageConfig) -> Result<Self, StoreError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite credential store opened");
        Ok(Self::new(db))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn create_schema(&self) -> Result<(), StoreError> {
        migrations::create_schema(&self.db).await
    }

    async fn reset_schema(&self) -> Result<(), StoreError> {
        migrations::reset_schema(&self.db).await
    }

    async fn insert_profile(&self, profile: NewProfile) -> Result<StoredProfile, StoreError> {
        let stored = queries::profiles::insert_profile(&self.db, profile).await?;
        debug!(profile = %stored.profile.name, id = %stored.profile.id, "profile inserted");
        Ok(stored)
    }

    async fn insert_login(&self, login: NewLogin) -> Result<Login, StoreError> {
        let login = queries::logins::insert_login(&self.db, login).await?;
        debug!(login = %login.name, owner = %login.profile_id, "login inserted");
        Ok(login)
    }

    async fn profile_by_name(&self, name: &str) -> Result<StoredProfile, StoreError> {
        queries::profiles::get_profile_by_name(&self.db, name).await
    }

    async fn profile_by_id(&self, id: ProfileId) -> Result<StoredProfile, StoreError> {
        queries::profiles::get_profile_by_id(&self.db, id).await
    }

    async fn login_by_name(&self, name: &str) -> Result<Login, StoreError> {
        queries::logins::get_login_by_name(&self.db, name).await
    }

    async fn logins_by_profile(&self, profile_id: ProfileId) -> Result<Vec<Login>, StoreError> {
        queries::logins::list_logins_for_profile(&self.db, profile_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sshm_core::{KdfParams, ProfileCredentials};
    use tempfile::tempdir;

    const PHC: &str = "$argon2id$v=19$m=32768,t=2,p=1$c2FsdHNhbHQ$ZGlnZXN0";

    async fn fresh_store() -> SqliteStore {
        let store = SqliteStore::new(Database::open_in_memory().await.unwrap());
        store.create_schema().await.unwrap();
        store
    }

    fn new_profile(name: &str) -> NewProfile {
        NewProfile {
            name: name.to_string(),
            credentials: ProfileCredentials {
                password_hash: PHC.to_string(),
                key_salt: [7u8; 16],
                kdf: KdfParams {
                    memory_cost: 32768,
                    iterations: 2,
                    parallelism: 1,
                },
            },
        }
    }

    fn new_login(name: &str, owner: ProfileId, secret: Option<Vec<u8>>) -> NewLogin {
        NewLogin {
            name: name.to_string(),
            username: "deploy".to_string(),
            host: "10.0.0.5".to_string(),
            secret,
            profile_id: owner,
        }
    }

    #[tokio::test]
    async fn open_uses_configured_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.db");
        let config = StorageConfig {
            database_path: path.to_str().unwrap().to_string(),
            wal_mode: true,
        };
        let store = SqliteStore::open(&config).await.unwrap();
        store.create_schema().await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn profile_round_trips_through_store() {
        let store = fresh_store().await;
        let inserted = store.insert_profile(new_profile("alice")).await.unwrap();

        let by_name = store.profile_by_name("alice").await.unwrap();
        assert_eq!(by_name.profile, inserted.profile);
        assert_eq!(by_name.credentials, inserted.credentials);

        let by_id = store.profile_by_id(inserted.profile.id).await.unwrap();
        assert_eq!(by_id.profile.name, "alice");
    }

    #[tokio::test]
    async fn duplicate_profile_name_conflicts() {
        let store = fresh_store().await;
        store.insert_profile(new_profile("alice")).await.unwrap();

        let err = store.insert_profile(new_profile("alice")).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Conflict { entity: "profile", ref key } if key == "alice"
        ));
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = fresh_store().await;
        assert!(matches!(
            store.profile_by_name("ghost").await,
            Err(StoreError::NotFound { entity: "profile", .. })
        ));
        assert!(matches!(
            store.profile_by_id(ProfileId(42)).await,
            Err(StoreError::NotFound { entity: "profile", .. })
        ));
        assert!(matches!(
            store.login_by_name("ghost").await,
            Err(StoreError::NotFound { entity: "login", .. })
        ));
    }

    #[tokio::test]
    async fn login_with_and_without_secret() {
        let store = fresh_store().await;
        let owner = store.insert_profile(new_profile("alice")).await.unwrap();

        store
            .insert_login(new_login("web", owner.profile.id, Some(vec![1, 2, 3])))
            .await
            .unwrap();
        store
            .insert_login(new_login("db", owner.profile.id, None))
            .await
            .unwrap();

        let web = store.login_by_name("web").await.unwrap();
        assert_eq!(web.secret.as_deref(), Some(&[1u8, 2, 3][..]));
        assert_eq!(web.profile_id, owner.profile.id);

        let db = store.login_by_name("db").await.unwrap();
        assert!(db.secret.is_none());
    }

    #[tokio::test]
    async fn login_names_are_unique_across_profiles() {
        let store = fresh_store().await;
        let alice = store.insert_profile(new_profile("alice")).await.unwrap();
        let bob = store.insert_profile(new_profile("bob")).await.unwrap();

        store
            .insert_login(new_login("web", alice.profile.id, None))
            .await
            .unwrap();
        let err = store
            .insert_login(new_login("web", bob.profile.id, None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { entity: "login", .. }));
    }

    #[tokio::test]
    async fn login_for_unknown_owner_is_rejected() {
        let store = fresh_store().await;
        let err = store
            .insert_login(new_login("web", ProfileId(99), None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "profile", .. }));
    }

    #[tokio::test]
    async fn logins_by_profile_are_sorted_and_scoped() {
        let store = fresh_store().await;
        let alice = store.insert_profile(new_profile("alice")).await.unwrap();
        let bob = store.insert_profile(new_profile("bob")).await.unwrap();

        for name in ["zeta", "alpha", "mid"] {
            store
                .insert_login(new_login(name, alice.profile.id, None))
                .await
                .unwrap();
        }
        store
            .insert_login(new_login("bobs", bob.profile.id, None))
            .await
            .unwrap();

        let names: Vec<String> = store
            .logins_by_profile(alice.profile.id)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);

        let none = store.logins_by_profile(ProfileId(1000)).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn corrupted_salt_surfaces_as_malformed_row() {
        let store = fresh_store().await;
        store
            .database()
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO profiles (name, password_hash, key_salt, kdf_memory_cost, kdf_iterations, kdf_parallelism)
                     VALUES ('broken', ?1, zeroblob(3), 32768, 2, 1)",
                    [PHC],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let err = store.profile_by_name("broken").await.unwrap_err();
        assert!(matches!(err, StoreError::MalformedRow { entity: "profile", .. }));
    }

    #[tokio::test]
    async fn wrongly_typed_column_surfaces_as_malformed_row() {
        let store = fresh_store().await;
        let owner = store.insert_profile(new_profile("alice")).await.unwrap();
        store
            .database()
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO logins (name, username, host, secret, profile_id)
                     VALUES ('odd', 'u', 'h', 12345, ?1)",
                    [owner.profile.id.0],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let err = store.login_by_name("odd").await.unwrap_err();
        assert!(matches!(err, StoreError::MalformedRow { entity: "login", .. }));
    }

    #[tokio::test]
    async fn reset_empties_the_store() {
        let store = fresh_store().await;
        store.insert_profile(new_profile("alice")).await.unwrap();

        store.reset_schema().await.unwrap();
        assert!(matches!(
            store.profile_by_name("alice").await,
            Err(StoreError::NotFound { .. })
        ));
        store.insert_profile(new_profile("alice")).await.unwrap();
    }
}

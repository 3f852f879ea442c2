// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage trait for profile and login persistence.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{Login, NewLogin, NewProfile, ProfileId, StoredProfile};

/// Persistence backend for profiles and logins.
///
/// Pure data access: implementations never encrypt, decrypt or hash.
/// Single-row selects fail with [`StoreError::NotFound`] when nothing
/// matches, and uniqueness violations on `name` columns surface as
/// [`StoreError::Conflict`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create the schema. Fails with [`StoreError::AlreadyInitialized`] if
    /// it is already present.
    async fn create_schema(&self) -> Result<(), StoreError>;

    /// Drop every table and recreate the schema. Destroys all data.
    async fn reset_schema(&self) -> Result<(), StoreError>;

    async fn insert_profile(&self, profile: NewProfile) -> Result<StoredProfile, StoreError>;

    async fn insert_login(&self, login: NewLogin) -> Result<Login, StoreError>;

    async fn profile_by_name(&self, name: &str) -> Result<StoredProfile, StoreError>;

    async fn profile_by_id(&self, id: ProfileId) -> Result<StoredProfile, StoreError>;

    async fn login_by_name(&self, name: &str) -> Result<Login, StoreError>;

    /// All logins owned by `profile_id`, ordered by name. Empty when the
    /// profile owns none.
    async fn logins_by_profile(&self, profile_id: ProfileId) -> Result<Vec<Login>, StoreError>;
}

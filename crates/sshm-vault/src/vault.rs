// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile creation, authentication and access-controlled secret handling.
//!
//! The vault keeps no state between calls. Every sensitive operation takes
//! an [`AuthenticatedSession`], which can only be obtained by presenting the
//! profile's master password. Secrets are sealed with the key derived from
//! that password and can only be opened by a session of the owning profile.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use sshm_core::{
    CredentialStore, KdfParams, Login, NewLogin, NewProfile, Profile, ProfileCredentials,
    StoreError, VaultError,
};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::crypto;
use crate::kdf;
use crate::session::AuthenticatedSession;

/// Everything needed to open an SSH connection to a login.
#[derive(Debug)]
pub struct ConnectionTarget {
    pub username: String,
    pub host: String,
    pub secret: Option<SecretString>,
}

/// Orchestrates identity, cipher and storage.
pub struct CredentialVault {
    store: Arc<dyn CredentialStore>,
    /// Cost parameters for newly created profiles. Existing profiles keep
    /// the parameters they were created with.
    kdf: KdfParams,
}

impl std::fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVault")
            .field("kdf", &self.kdf)
            .finish_non_exhaustive()
    }
}

impl CredentialVault {
    pub fn new(store: Arc<dyn CredentialStore>, kdf: KdfParams) -> Self {
        Self { store, kdf }
    }

    /// Create the storage schema.
    pub async fn initialize_storage(&self) -> Result<(), VaultError> {
        self.store.create_schema().await?;
        Ok(())
    }

    /// Drop and recreate the storage schema, destroying every profile and login.
    pub async fn reset_storage(&self) -> Result<(), VaultError> {
        self.store.reset_schema().await?;
        Ok(())
    }

    /// Create a profile protected by `password`.
    pub async fn create_profile(
        &self,
        name: &str,
        password: &SecretString,
    ) -> Result<Profile, VaultError> {
        let password = password.expose_secret().as_bytes();
        let auth_salt = kdf::generate_salt()?;
        let key_salt = kdf::generate_salt()?;
        let password_hash = kdf::hash_password(password, &auth_salt, self.kdf)?;

        let stored = self
            .store
            .insert_profile(NewProfile {
                name: name.to_string(),
                credentials: ProfileCredentials {
                    password_hash,
                    key_salt,
                    kdf: self.kdf,
                },
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict { .. } => VaultError::DuplicateProfile(name.to_string()),
                other => other.into(),
            })?;

        info!(profile = %stored.profile.name, id = %stored.profile.id, "profile created");
        Ok(stored.profile)
    }

    /// Verify `password` for profile `name` and derive its encryption key.
    ///
    /// Key derivation runs whether or not the password matches, so a
    /// rejection costs the same as an acceptance.
    pub async fn authenticate_profile(
        &self,
        name: &str,
        password: &SecretString,
    ) -> Result<AuthenticatedSession, VaultError> {
        let stored = self
            .store
            .profile_by_name(name)
            .await
            .map_err(|e| profile_not_found(e, name))?;

        let password = password.expose_secret().as_bytes();
        let accepted = kdf::authenticate(&stored.credentials, password);
        let key = kdf::derive_key(
            password,
            &stored.credentials.key_salt,
            stored.credentials.kdf,
        );

        if !accepted {
            warn!(profile = %name, "authentication rejected");
            return Err(VaultError::AuthenticationFailed);
        }
        let key = key?;

        debug!(profile = %name, "profile authenticated");
        Ok(AuthenticatedSession::new(stored.profile, key))
    }

    /// Store a login owned by the session's profile, sealing `secret` if given.
    pub async fn add_login(
        &self,
        session: &AuthenticatedSession,
        name: &str,
        username: &str,
        host: &str,
        secret: Option<&SecretString>,
    ) -> Result<Login, VaultError> {
        let sealed = secret
            .map(|s| crypto::seal(session.key(), s.expose_secret().as_bytes()))
            .transpose()?;

        let login = self
            .store
            .insert_login(NewLogin {
                name: name.to_string(),
                username: username.to_string(),
                host: host.to_string(),
                secret: sealed,
                profile_id: session.profile().id,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict { .. } => VaultError::DuplicateLogin(name.to_string()),
                StoreError::NotFound { .. } => {
                    VaultError::ProfileNotFound(session.profile().name.clone())
                }
                other => other.into(),
            })?;

        info!(
            login = %login.name,
            profile = %session.profile().name,
            with_secret = login.has_secret(),
            "login added"
        );
        Ok(login)
    }

    /// Decrypt the secret of login `login_name`.
    ///
    /// Ownership is checked before any decryption is attempted.
    pub async fn reveal_secret(
        &self,
        session: &AuthenticatedSession,
        login_name: &str,
    ) -> Result<Option<SecretString>, VaultError> {
        let login = self.login(login_name).await?;
        open_owned_secret(session, &login)
    }

    /// Resolve everything the launcher needs for `login_name`.
    pub async fn connection_target(
        &self,
        session: &AuthenticatedSession,
        login_name: &str,
    ) -> Result<ConnectionTarget, VaultError> {
        let login = self.login(login_name).await?;
        let secret = open_owned_secret(session, &login)?;
        Ok(ConnectionTarget {
            username: login.username,
            host: login.host,
            secret,
        })
    }

    /// Look up a login and its owner without decrypting anything.
    pub async fn find_login(&self, name: &str) -> Result<(Login, Profile), VaultError> {
        let login = self.login(name).await?;
        let owner = self
            .store
            .profile_by_id(login.profile_id)
            .await
            .map_err(|e| profile_not_found(e, &login.profile_id.to_string()))?;
        Ok((login, owner.profile))
    }

    /// Public fields of every login owned by profile `profile_name`.
    pub async fn list_logins(&self, profile_name: &str) -> Result<Vec<Login>, VaultError> {
        let owner = self
            .store
            .profile_by_name(profile_name)
            .await
            .map_err(|e| profile_not_found(e, profile_name))?;
        let logins = self.store.logins_by_profile(owner.profile.id).await?;
        debug!(profile = %profile_name, count = logins.len(), "logins listed");
        Ok(logins)
    }

    async fn login(&self, name: &str) -> Result<Login, VaultError> {
        self.store.login_by_name(name).await.map_err(|e| match e {
            StoreError::NotFound { .. } => VaultError::LoginNotFound(name.to_string()),
            other => other.into(),
        })
    }
}

/// Decrypt `login`'s secret if the session's profile owns it.
fn open_owned_secret(
    session: &AuthenticatedSession,
    login: &Login,
) -> Result<Option<SecretString>, VaultError> {
    if login.profile_id != session.profile().id {
        warn!(
            login = %login.name,
            profile = %session.profile().name,
            "access to another profile's login denied"
        );
        return Err(VaultError::AccessDenied);
    }

    let Some(blob) = login.secret.as_deref() else {
        return Ok(None);
    };
    let plaintext = Zeroizing::new(crypto::open(session.key(), blob)?);
    let text = std::str::from_utf8(&plaintext)
        .map_err(|_| VaultError::Crypto("decrypted secret is not valid UTF-8".to_string()))?;
    debug!(login = %login.name, "secret revealed");
    Ok(Some(SecretString::from(text.to_string())))
}

fn profile_not_found(err: StoreError, name: &str) -> VaultError {
    match err {
        StoreError::NotFound { .. } => VaultError::ProfileNotFound(name.to_string()),
        other => other.into(),
    }
}

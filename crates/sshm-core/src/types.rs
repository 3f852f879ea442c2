// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value types shared by the storage backend and the vault.

use std::fmt;

use serde::Serialize;

/// Storage-assigned identifier of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ProfileId(pub i64);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage-assigned identifier of a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LoginId(pub i64);

impl fmt::Display for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public view of a profile: what callers are allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Verification and key-derivation material of a profile.
///
/// Only the storage backend and the identity code read these fields.
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ProfileCredentials {
    /// Argon2id PHC string of the master password.
    pub password_hash: String,
    /// Salt for encryption-key derivation; independent of the salt inside
    /// `password_hash`.
    pub key_salt: [u8; 16],
    /// Parameters used for encryption-key derivation.
    pub kdf: KdfParams,
}

impl fmt::Debug for ProfileCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileCredentials")
            .field("password_hash", &"[REDACTED]")
            .field("key_salt", &"[REDACTED]")
            .field("kdf", &self.kdf)
            .finish()
    }
}

/// A profile as persisted: public fields plus credentials.
#[derive(Debug, Clone)]
pub struct StoredProfile {
    pub profile: Profile,
    pub credentials: ProfileCredentials,
}

/// Input for inserting a profile.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub name: String,
    pub credentials: ProfileCredentials,
}

/// A named SSH connection record.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Login {
    pub id: LoginId,
    pub name: String,
    pub username: String,
    pub host: String,
    /// Sealed secret (`nonce || ciphertext || tag`), if one is configured.
    #[serde(skip)]
    pub secret: Option<Vec<u8>>,
    pub profile_id: ProfileId,
}

impl Login {
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Login")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("host", &self.host)
            .field("secret", &self.secret.as_ref().map(|s| format!("<{} bytes>", s.len())))
            .field("profile_id", &self.profile_id)
            .finish()
    }
}

/// Input for inserting a login.
#[derive(Debug, Clone)]
pub struct NewLogin {
    pub name: String,
    pub username: String,
    pub host: String,
    pub secret: Option<Vec<u8>>,
    pub profile_id: ProfileId,
}

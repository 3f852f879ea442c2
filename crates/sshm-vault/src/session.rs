// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Proof that a master password was verified for one profile.

use sshm_core::Profile;
use zeroize::Zeroizing;

use crate::kdf::KEY_LEN;

/// An authenticated profile together with its derived encryption key.
///
/// Only [`CredentialVault::authenticate_profile`](crate::CredentialVault::authenticate_profile)
/// creates one. It is neither `Clone` nor serializable; the key is wiped
/// when the session is dropped and never appears in `Debug` output.
pub struct AuthenticatedSession {
    profile: Profile,
    key: Zeroizing<[u8; KEY_LEN]>,
}

impl AuthenticatedSession {
    pub(crate) fn new(profile: Profile, key: Zeroizing<[u8; KEY_LEN]>) -> Self {
        Self { profile, key }
    }

    /// The profile this session was opened for.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub(crate) fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for AuthenticatedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedSession")
            .field("profile", &self.profile)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

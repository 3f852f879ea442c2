// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master-password hashing and encryption-key derivation with Argon2id.
//!
//! A profile carries two independent salts. The authentication salt lives
//! inside the PHC string produced by [`hash_password`]; the key salt is
//! stored beside it and only ever fed to [`derive_key`]. The stored digest
//! therefore reveals nothing about the encryption key.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use ring::rand::{SecureRandom, SystemRandom};
use sshm_core::{KdfParams, ProfileCredentials, VaultError};
use zeroize::Zeroizing;

/// Length in bytes of both salts.
pub const SALT_LEN: usize = 16;

/// Length in bytes of the derived AES-256 key.
pub const KEY_LEN: usize = 32;

fn argon2(params: KdfParams) -> Result<Argon2<'static>, VaultError> {
    let params = Params::new(
        params.memory_cost,
        params.iterations,
        params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| VaultError::Crypto(format!("invalid Argon2id parameters: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a master password into an Argon2id PHC string.
///
/// Deterministic for a fixed password, salt and parameter set.
pub fn hash_password(
    password: &[u8],
    auth_salt: &[u8; SALT_LEN],
    params: KdfParams,
) -> Result<String, VaultError> {
    let salt = SaltString::encode_b64(auth_salt)
        .map_err(|e| VaultError::Crypto(format!("invalid salt: {e}")))?;
    let hash = argon2(params)?
        .hash_password(password, &salt)
        .map_err(|e| VaultError::Crypto(format!("Argon2id hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Derive the 32-byte encryption key from a master password.
///
/// The key is wrapped in [`Zeroizing`] and wiped on drop.
pub fn derive_key(
    password: &[u8],
    key_salt: &[u8; SALT_LEN],
    params: KdfParams,
) -> Result<Zeroizing<[u8; KEY_LEN]>, VaultError> {
    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    argon2(params)?
        .hash_password_into(password, key_salt, output.as_mut())
        .map_err(|e| VaultError::Crypto(format!("Argon2id key derivation failed: {e}")))?;
    Ok(output)
}

/// Check a candidate password against stored credentials.
///
/// Returns `false` on mismatch and on a digest that does not parse.
pub fn authenticate(credentials: &ProfileCredentials, candidate: &[u8]) -> bool {
    let Ok(parsed) = PasswordHash::new(&credentials.password_hash) else {
        return false;
    };
    Argon2::default().verify_password(candidate, &parsed).is_ok()
}

/// Generate a random salt from the system CSPRNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN], VaultError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| VaultError::Crypto("failed to generate random salt".to_string()))?;
    Ok(salt)
}

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{Salt, SaltString},
};
use rand_core::{OsRng, RngCore};

use crate::CryptoError;

/// Hash a password with Argon2id and a fresh random salt.
/// Returns the PHC string, which embeds the salt and parameters.
pub fn hash_password(plaintext: &str) -> Result<String, CryptoError> {
    hash_with_rng(plaintext, &mut OsRng)
}

fn hash_with_rng(plaintext: &str, rng: &mut impl RngCore) -> Result<String, CryptoError> {
    let mut salt_bytes = [0u8; Salt::RECOMMENDED_LENGTH];
    rng.try_fill_bytes(&mut salt_bytes)
        .map_err(|e| CryptoError::HashingFailure(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| CryptoError::HashingFailure(e.to_string()))?;

    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CryptoError::HashingFailure(e.to_string()))
}

/// Check a plaintext password against a stored PHC hash.
///
/// The comparison inside `argon2` is constant-time. A malformed stored hash
/// is reported the same way as a wrong password.
pub fn verify_password(hash: &str, plaintext: &str) -> Result<(), CryptoError> {
    let parsed = PasswordHash::new(hash).map_err(|_| CryptoError::CredentialMismatch)?;

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .map_err(|_| CryptoError::CredentialMismatch)
}

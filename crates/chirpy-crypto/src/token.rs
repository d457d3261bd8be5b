use rand_core::{OsRng, RngCore};

use crate::CryptoError;

/// Raw length of an opaque token before hex encoding.
pub const OPAQUE_TOKEN_BYTES: usize = 32;

/// Generate a 256-bit random token, hex-encoded (64 chars).
pub fn generate_opaque_token() -> Result<String, CryptoError> {
    let mut bytes = [0u8; OPAQUE_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::EntropyFailure(e.to_string()))?;
    Ok(hex::encode(bytes))
}

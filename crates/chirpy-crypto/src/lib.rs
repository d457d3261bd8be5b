//! Chirpy credential engine.
//!
//! Stateless helpers for the credential lifecycle:
//! - Argon2id password hashing and verification
//! - HS256 identity tokens (short-lived, issuer `Chirpy`)
//! - Opaque hex refresh tokens from the OS CSPRNG
//!
//! Nothing here holds state; every function is safe to call from any thread.

mod error;
pub mod jwt;
pub mod password;
pub mod token;

pub use error::CryptoError;
pub use jwt::{Claims, ISSUER, MAX_TTL_SECS, issue_identity_token, verify_identity_token};
pub use password::{hash_password, verify_password};
pub use token::generate_opaque_token;

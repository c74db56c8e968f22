//! Session token generation and hashing.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Session token prefix.
pub const SESSION_TOKEN_PREFIX: &str = "se_";

/// Number of random bytes encoded in a token.
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Generate a new random bearer token.
#[must_use]
pub fn generate_session_token() -> String {
    let mut secret = [0_u8; SESSION_TOKEN_BYTES];

    OsRng.fill_bytes(&mut secret);

    let token = format!("{SESSION_TOKEN_PREFIX}{}", URL_SAFE_NO_PAD.encode(secret));

    secret.zeroize();

    token
}

/// Whether `token` has the shape of a token produced by [`generate_session_token`].
pub fn is_well_formed(token: &str) -> bool {
    let Some(encoded) = token.strip_prefix(SESSION_TOKEN_PREFIX) else {
        return false;
    };

    URL_SAFE_NO_PAD.decode(encoded).is_ok_and(|mut secret| {
        let valid = secret.len() == SESSION_TOKEN_BYTES;

        secret.zeroize();

        valid
    })
}

/// Hex SHA-256 of the raw token, as stored in session documents.
#[must_use]
pub fn hash_session_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

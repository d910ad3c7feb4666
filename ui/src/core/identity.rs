//! Privacy-preserving identifier derived from the host user id.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the decimal form of `id`.
pub fn hash_user_id(id: u64) -> String {
    hex::encode(Sha256::digest(id.to_string().as_bytes()))
}

/// Leading characters shown to the user as a quotable reference.
pub fn short_id(hashed: &str) -> &str {
    hashed.get(..8).unwrap_or(hashed)
}

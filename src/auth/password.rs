// Password hashing utilities
// Uses bcrypt for secure password hashing

use bcrypt::{hash, verify, BcryptError};

/// Well-formed bcrypt hash compared against when a login names an unknown
/// user.
///
/// The comparison must run whether or not the user exists, so that a miss
/// and a mismatch take comparable wall-clock time and usernames cannot be
/// enumerated through response timing.
pub const DUMMY_HASH: &str = "$2b$12$Ck3sX9jD2p3h8UuJjv8bduRkq1Y0n1Trm4k1Y0n1Trm4k1Y0n1Trm";

/// Hashes a plaintext password with the given bcrypt cost factor
///
/// The cost comes from configuration (bounded there); tests use a low cost
/// to stay fast.
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// Verifies a plaintext password against a stored bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    verify(password, hash)
}

//! Password hashing.

use bcrypt::DEFAULT_COST;

/// Hash a plaintext password. Each call salts independently, so two
/// hashes of the same password never match as strings.
pub fn hash(plain: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plain, DEFAULT_COST)
}

/// Check a candidate password against a stored hash.
///
/// A stored value that is not a parseable bcrypt hash counts as a
/// mismatch, never an error.
pub fn verify(stored: &str, candidate: &str) -> bool {
    bcrypt::verify(candidate, stored).unwrap_or(false)
}

//! One-way salted password hashing.

/// Work factor for bcrypt. The stored hashes were all derived at cost 10, so
/// verification must stay compatible with it.
const BCRYPT_COST: u32 = 10;

/// Hashes a plaintext password. A fresh salt is generated per call and
/// embedded in the returned hash value.
pub fn hash(password: &str) -> Result<String, String> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|e| format!("Failed to hash password: {}", e))
}

/// Verifies a plaintext password against a stored hash. Never decrypts;
/// only compares derived hashes.
pub fn verify(password: &str, password_hash: &str) -> Result<bool, String> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| format!("Failed to verify password: {}", e))
}

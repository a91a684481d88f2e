//! Password hashing
//!
//! Slow, salted one-way hashing via bcrypt. The work factor comes from
//! configuration (default 10). These calls block for tens of milliseconds;
//! callers on an async runtime should wrap them in `spawn_blocking`.

use crate::types::Result;

/// Hash a plaintext password with the given bcrypt cost.
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(password, hash)?)
}

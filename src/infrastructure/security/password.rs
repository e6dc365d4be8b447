//! Password hash verification.

use tracing::warn;

/// Checks a plaintext password against a stored hash.
///
/// Implementations must be side-effect free and use a slow, salted,
/// constant-time comparison. Verification is CPU-bound, so callers on the
/// async runtime should run it on the blocking pool.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordVerifier: Send + Sync {
    /// Returns `true` only if `plaintext` matches `hash`.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// Verifies bcrypt (`$2a$`, `$2b$`, `$2y$`) hashes.
///
/// A malformed stored hash is logged and treated as a failed verification.
#[derive(Debug, Default, Clone, Copy)]
pub struct BcryptVerifier;

impl BcryptVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordVerifier for BcryptVerifier {
    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        if plaintext.is_empty() {
            return false;
        }

        match bcrypt::verify(plaintext, hash) {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Stored password hash could not be verified: {}", e);
                false
            }
        }
    }
}

//! Password verification for protected links.

mod password;

pub use password::{BcryptVerifier, PasswordVerifier};

#[cfg(test)]
pub use password::MockPasswordVerifier;

//! Password hashing
//!
//! Thin wrapper over `bcrypt` carrying the configured cost factor.

use bcrypt::BcryptError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, BcryptError> {
        bcrypt::hash(password, self.cost)
    }

    /// Check `password` against a stored hash
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, BcryptError> {
        bcrypt::verify(password, hash)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

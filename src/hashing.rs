// 🔐 Password Hashing - one-way transform for mock account passwords
//
// The generator only depends on the `PasswordHasher` trait. `BcryptHasher` is the
// production implementation.

use async_trait::async_trait;
use thiserror::Error;

/// Fixed plaintext shared by every generated account
pub const DEFAULT_MOCK_PASSWORD: &str = "coder123";

/// Default bcrypt cost for mock passwords
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Error, Debug)]
pub enum HashError {
    #[error("Hashing failed: {0}")]
    Failed(String),

    #[error("Hashing task aborted: {0}")]
    Aborted(String),
}

/// Hashing service consumed by the generator.
///
/// Output is opaque and must not be assumed reversible.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<String, HashError>;
}

/// bcrypt-backed hasher. Hashing runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        BcryptHasher { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let plaintext = plaintext.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| HashError::Aborted(e.to_string()))?
            .map_err(|e| HashError::Failed(e.to_string()))
    }
}

// 🗄️ Store Contracts - what the reconciler needs from a data-access layer
//
// A store creates one record at a time and reports failures as a typed
// `StoreError`, so callers can tell a uniqueness conflict apart from
// everything else without looking at backend error codes.

use crate::entities::{Account, NewAccount, NewPet, Pet};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A unique field (e.g. email) collides with an existing record
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Store could not be reached or is in an unusable state
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure
    #[error("Store error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::ConstraintViolation(_))
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist one account and return it with its store-assigned id
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError>;
}

#[async_trait]
pub trait PetStore: Send + Sync {
    /// Persist one pet and return it with its store-assigned id
    async fn create_pet(&self, pet: NewPet) -> Result<Pet, StoreError>;
}

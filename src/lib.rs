// Adoption Mocks - Core Library
// Mock account/pet generation and idempotent bulk insertion, shared by the CLI
// and the API server

pub mod config;
pub mod db;
pub mod entities;
pub mod generator;
pub mod hashing;
pub mod logging;
pub mod reconciler;
pub mod request;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::Config;
pub use db::{setup_database, SqliteStore};
pub use entities::{Account, AccountPreview, NewAccount, NewPet, Pet, PetPreview, Role};
pub use generator::{GenerateError, MockGenerator, MAX_EMAIL_ATTEMPTS};
pub use hashing::{BcryptHasher, HashError, PasswordHasher};
pub use reconciler::{
    generate_data, insert_accounts, insert_pets, GenerateSummary, InsertedBatch, MockError,
};
pub use request::{GenerateCounts, GenerateRequest};
pub use store::{AccountStore, PetStore, StoreError};

// ⚖️ Bulk Reconciler - persist generated candidates one at a time
//
// Accounts: a uniqueness conflict (the store already has that email) skips the
// candidate; any other failure aborts the batch. Pets: every failure aborts.
//
// Creates run strictly in order so each failure is attributed to its candidate.
// Nothing is rolled back: records created before an abort stay in the store.

use crate::entities::{Account, NewAccount, NewPet, Pet};
use crate::generator::{GenerateError, MockGenerator};
use crate::hashing::PasswordHasher;
use crate::request::GenerateCounts;
use crate::store::{AccountStore, PetStore, StoreError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// RESULTS
// ============================================================================

/// Records a store actually persisted in one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertedBatch<T> {
    pub inserted: usize,
    pub data: Vec<T>,
}

impl<T> InsertedBatch<T> {
    pub fn empty() -> Self {
        InsertedBatch {
            inserted: 0,
            data: Vec::new(),
        }
    }

    fn push(&mut self, record: T) {
        self.data.push(record);
        self.inserted = self.data.len();
    }
}

impl<T> Default for InsertedBatch<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Outcome of a generate-and-persist request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateSummary {
    pub users: InsertedBatch<Account>,
    pub pets: InsertedBatch<Pet>,
}

impl GenerateSummary {
    pub fn message(&self) -> String {
        format!(
            "Inserted {} users and {} pets. Check with GET /api/users and GET /api/pets",
            self.users.inserted, self.pets.inserted
        )
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Error, Debug)]
pub enum MockError {
    /// Request asked for nothing; no side effects were performed
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MockError {
    pub fn is_validation(&self) -> bool {
        matches!(self, MockError::Validation(_))
    }

    /// Failures caused by what the caller asked for rather than by a collaborator
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MockError::Validation(_) | MockError::Generate(GenerateError::EmailSpaceTooSmall { .. })
        )
    }
}

// ============================================================================
// INSERTION
// ============================================================================

/// Create each account in order, skipping candidates whose unique fields
/// already exist in the store
pub async fn insert_accounts<S>(
    store: &S,
    candidates: Vec<NewAccount>,
) -> Result<InsertedBatch<Account>, StoreError>
where
    S: AccountStore + ?Sized,
{
    let requested = candidates.len();
    let mut batch = InsertedBatch::empty();
    let mut duplicates = 0;

    for candidate in candidates {
        let email = candidate.email.clone();

        match store.create_account(candidate).await {
            Ok(account) => batch.push(account),
            Err(StoreError::ConstraintViolation(reason)) => {
                duplicates += 1;
                tracing::debug!(%email, %reason, "skipping account that already exists");
            }
            Err(e) => {
                tracing::warn!(
                    inserted = batch.inserted,
                    requested,
                    error = %e,
                    "account batch aborted"
                );
                return Err(e);
            }
        }
    }

    tracing::info!(inserted = batch.inserted, duplicates, requested, "account batch persisted");

    Ok(batch)
}

/// Create each pet in order; any failure aborts the batch
pub async fn insert_pets<S>(store: &S, candidates: Vec<NewPet>) -> Result<InsertedBatch<Pet>, StoreError>
where
    S: PetStore + ?Sized,
{
    let requested = candidates.len();
    let mut batch = InsertedBatch::empty();

    for candidate in candidates {
        match store.create_pet(candidate).await {
            Ok(pet) => batch.push(pet),
            Err(e) => {
                tracing::warn!(
                    inserted = batch.inserted,
                    requested,
                    error = %e,
                    "pet batch aborted"
                );
                return Err(e);
            }
        }
    }

    tracing::info!(inserted = batch.inserted, requested, "pet batch persisted");

    Ok(batch)
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Generate and persist the requested accounts, then the requested pets.
///
/// Both counts zero is a validation failure, checked before any hashing or
/// store call. The pets branch only starts once the accounts branch has
/// finished.
pub async fn generate_data<R, H, S>(
    generator: &mut MockGenerator<R>,
    hasher: &H,
    store: &S,
    counts: GenerateCounts,
) -> Result<GenerateSummary, MockError>
where
    R: Rng,
    H: PasswordHasher + ?Sized,
    S: AccountStore + PetStore + ?Sized,
{
    if counts.is_empty() {
        return Err(MockError::Validation(
            "At least one of users or pets must be greater than 0".to_string(),
        ));
    }

    let users = if counts.users > 0 {
        let candidates = generator.generate_accounts_for_insert(counts.users, hasher).await?;
        insert_accounts(store, candidates).await?
    } else {
        InsertedBatch::empty()
    };

    let pets = if counts.pets > 0 {
        let candidates = generator.generate_pets_for_insert(counts.pets);
        insert_pets(store, candidates).await?
    } else {
        InsertedBatch::empty()
    };

    tracing::info!(
        users_requested = counts.users,
        users_inserted = users.inserted,
        pets_requested = counts.pets,
        pets_inserted = pets.inserted,
        "mock data generated"
    );

    Ok(GenerateSummary { users, pets })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Role;
    use crate::hashing::HashError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Store whose n-th create call (1-based) can be scripted to fail
    #[derive(Default)]
    struct ScriptedStore {
        account_failures: HashMap<usize, StoreError>,
        pet_failures: HashMap<usize, StoreError>,
        account_calls: Mutex<usize>,
        pet_calls: Mutex<usize>,
        accounts: Mutex<Vec<Account>>,
        pets: Mutex<Vec<Pet>>,
    }

    impl ScriptedStore {
        fn fail_account(mut self, call: usize, err: StoreError) -> Self {
            self.account_failures.insert(call, err);
            self
        }

        fn fail_pet(mut self, call: usize, err: StoreError) -> Self {
            self.pet_failures.insert(call, err);
            self
        }

        fn account_calls(&self) -> usize {
            *self.account_calls.lock().unwrap()
        }

        fn pet_calls(&self) -> usize {
            *self.pet_calls.lock().unwrap()
        }

        fn stored_accounts(&self) -> usize {
            self.accounts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AccountStore for ScriptedStore {
        async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
            let call = {
                let mut calls = self.account_calls.lock().unwrap();
                *calls += 1;
                *calls
            };
            if let Some(err) = self.account_failures.get(&call) {
                return Err(err.clone());
            }
            let stored = Account::stored(format!("acc-{}", call), account);
            self.accounts.lock().unwrap().push(stored.clone());
            Ok(stored)
        }
    }

    #[async_trait]
    impl PetStore for ScriptedStore {
        async fn create_pet(&self, pet: NewPet) -> Result<Pet, StoreError> {
            let call = {
                let mut calls = self.pet_calls.lock().unwrap();
                *calls += 1;
                *calls
            };
            if let Some(err) = self.pet_failures.get(&call) {
                return Err(err.clone());
            }
            let stored = Pet::stored(format!("pet-{}", call), pet);
            self.pets.lock().unwrap().push(stored.clone());
            Ok(stored)
        }
    }

    struct PlainHasher;

    #[async_trait]
    impl PasswordHasher for PlainHasher {
        async fn hash(&self, plaintext: &str) -> Result<String, HashError> {
            Ok(format!("hashed:{}", plaintext))
        }
    }

    fn create_test_accounts(n: usize) -> Vec<NewAccount> {
        (1..=n)
            .map(|i| NewAccount {
                first_name: "Juan".to_string(),
                last_name: "Pérez".to_string(),
                email: format!("juan.{}@coder.com", i),
                password: "hashed".to_string(),
                role: Role::User,
                pets: vec![],
            })
            .collect()
    }

    fn create_test_pets(n: usize) -> Vec<NewPet> {
        (0..n)
            .map(|_| NewPet {
                name: "Rex".to_string(),
                specie: "Perro".to_string(),
                birth_date: NaiveDate::from_ymd_opt(2021, 2, 14).unwrap(),
                adopted: false,
            })
            .collect()
    }

    fn generator() -> MockGenerator<StdRng> {
        MockGenerator::new(StdRng::seed_from_u64(2024))
    }

    fn conflict() -> StoreError {
        StoreError::ConstraintViolation("UNIQUE constraint failed: accounts.email".to_string())
    }

    #[tokio::test]
    async fn test_conflicts_are_skipped() {
        let store = ScriptedStore::default()
            .fail_account(2, conflict())
            .fail_account(4, conflict());

        let batch = insert_accounts(&store, create_test_accounts(5)).await.unwrap();

        assert_eq!(batch.inserted, 3);
        assert_eq!(batch.data.len(), 3);
        let emails: Vec<&str> = batch.data.iter().map(|a| a.email.as_str()).collect();
        assert_eq!(emails, ["juan.1@coder.com", "juan.3@coder.com", "juan.5@coder.com"]);
        assert_eq!(store.account_calls(), 5);
    }

    #[tokio::test]
    async fn test_hard_failure_aborts_accounts() {
        let backend = StoreError::Backend("disk I/O error".to_string());
        let store = ScriptedStore::default().fail_account(3, backend.clone());

        let result = insert_accounts(&store, create_test_accounts(5)).await;

        assert_eq!(result.unwrap_err(), backend);
        assert_eq!(store.stored_accounts(), 2);
        // Nothing after the failing candidate was submitted
        assert_eq!(store.account_calls(), 3);
    }

    #[tokio::test]
    async fn test_pet_failures_always_propagate() {
        let store = ScriptedStore::default().fail_pet(2, conflict());

        let result = insert_pets(&store, create_test_pets(4)).await;

        assert!(result.unwrap_err().is_constraint_violation());
        assert_eq!(store.pet_calls(), 2);
    }

    #[tokio::test]
    async fn test_insert_pets_all_succeed() {
        let store = ScriptedStore::default();
        let batch = insert_pets(&store, create_test_pets(4)).await.unwrap();

        assert_eq!(batch.inserted, 4);
        assert!(batch.data.iter().all(|p| p.owner.is_none() && !p.adopted));
    }

    #[tokio::test]
    async fn test_empty_batches() {
        let store = ScriptedStore::default();

        assert_eq!(insert_accounts(&store, vec![]).await.unwrap(), InsertedBatch::empty());
        assert_eq!(insert_pets(&store, vec![]).await.unwrap(), InsertedBatch::empty());
        assert_eq!(store.account_calls() + store.pet_calls(), 0);
    }

    #[tokio::test]
    async fn test_validation_gate_makes_no_store_calls() {
        let store = ScriptedStore::default();

        let result = generate_data(&mut generator(), &PlainHasher, &store, GenerateCounts::from_signed(0, 0)).await;

        assert!(result.unwrap_err().is_validation());
        assert_eq!(store.account_calls(), 0);
        assert_eq!(store.pet_calls(), 0);
    }

    #[tokio::test]
    async fn test_oversized_user_count_touches_nothing() {
        let store = ScriptedStore::default();

        let counts = GenerateCounts::new(usize::MAX, 3);
        let err = generate_data(&mut generator(), &PlainHasher, &store, counts)
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert!(!err.is_validation());
        assert_eq!(store.account_calls(), 0);
        assert_eq!(store.pet_calls(), 0);
    }

    #[tokio::test]
    async fn test_negative_users_runs_pets_only() {
        let store = ScriptedStore::default();

        let summary = generate_data(&mut generator(), &PlainHasher, &store, GenerateCounts::from_signed(-5, 3))
            .await
            .unwrap();

        assert_eq!(summary.users, InsertedBatch::empty());
        assert_eq!(summary.pets.inserted, 3);
        assert_eq!(store.account_calls(), 0);
        assert_eq!(store.pet_calls(), 3);
    }

    #[tokio::test]
    async fn test_mixed_request_reports_under_counts() {
        let store = ScriptedStore::default().fail_account(1, conflict());

        let summary = generate_data(&mut generator(), &PlainHasher, &store, GenerateCounts::new(4, 2))
            .await
            .unwrap();

        assert_eq!(summary.users.inserted, 3);
        assert_eq!(summary.pets.inserted, 2);
        assert!(summary.users.data.iter().all(|a| a.password == "hashed:coder123"));
        assert_eq!(
            summary.message(),
            "Inserted 3 users and 2 pets. Check with GET /api/users and GET /api/pets"
        );
    }

    #[tokio::test]
    async fn test_account_failure_stops_before_pets() {
        let store = ScriptedStore::default().fail_account(1, StoreError::Unavailable("closed".into()));

        let result = generate_data(&mut generator(), &PlainHasher, &store, GenerateCounts::new(2, 2)).await;

        assert!(matches!(result, Err(MockError::Store(StoreError::Unavailable(_)))));
        assert_eq!(store.pet_calls(), 0);
    }

    #[tokio::test]
    async fn test_summary_serializes_like_payload() {
        let store = ScriptedStore::default();
        let summary = generate_data(&mut generator(), &PlainHasher, &store, GenerateCounts::new(1, 1))
            .await
            .unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["users"]["inserted"], 1);
        assert_eq!(json["pets"]["inserted"], 1);
        assert_eq!(json["users"]["data"][0]["_id"], "acc-1");
        assert_eq!(json["pets"]["data"][0]["_id"], "pet-1");
    }
}

// 🎲 Mock Generator - synthetic accounts and pets
//
// Produces candidate records in two shapes:
// - preview: fully formed with a synthesized `_id`, never touches a store
// - insert: only the fields a store needs to create the record
//
// Every account in one call shares a single password hash. Emails are unique
// within the call; the set used to enforce that lives only for the call.

use crate::entities::{new_object_id, AccountPreview, NewAccount, NewPet, PetPreview, Role};
use crate::hashing::{HashError, PasswordHasher, DEFAULT_MOCK_PASSWORD};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use thiserror::Error;

// ============================================================================
// WORD POOLS
// ============================================================================

pub static PET_NAMES: &[&str] = &[
    "Firulais", "Manchas", "Luna", "Max", "Toby", "Bella", "Rocky", "Coco", "Lola", "Simba",
    "Nala", "Thor", "Zeus", "Mia", "Charlie", "Duke", "Milo", "Oreo", "Pepper", "Rex",
];

pub static PET_SPECIES: &[&str] = &[
    "Perro", "Gato", "Conejo", "Hamster", "Pájaro", "Tortuga", "Pez",
];

pub static FIRST_NAMES: &[&str] = &[
    "Carlos", "María", "Juan", "Ana", "Pedro", "Laura", "Diego", "Sofía", "Miguel",
    "Valentina", "Luis", "Isabella", "José", "Emma", "Fernando", "Lucía",
];

pub static LAST_NAMES: &[&str] = &[
    "García", "Rodríguez", "Martínez", "López", "González", "Hernández", "Pérez", "Sánchez",
    "Ramírez", "Torres", "Flores", "Rivera", "Gómez", "Díaz", "Castro", "Romero",
];

pub const EMAIL_DOMAIN: &str = "coder.com";
pub const EMAIL_SUFFIX_MAX: u32 = 9999;

pub const BIRTH_YEAR_MIN: i32 = 2018;
pub const BIRTH_YEAR_MAX: i32 = 2023;

/// Day is capped at 28 so every sampled (year, month, day) is a real date
pub const BIRTH_DAY_MAX: u32 = 28;

/// Resamples allowed for a single email before the batch gives up
pub const MAX_EMAIL_ATTEMPTS: usize = 10_000;

/// Number of distinct emails the name pool and suffix range can produce
pub const EMAIL_SPACE: usize = FIRST_NAMES.len() * EMAIL_SUFFIX_MAX as usize;

/// Upper bound on up-front allocation; larger batches grow as they go
pub const MAX_PREALLOCATED: usize = 4_096;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Hashing(#[from] HashError),

    #[error("Could not find a unique email after {attempts} attempts ({generated} accounts generated)")]
    EmailSpaceExhausted { attempts: usize, generated: usize },

    #[error("Cannot generate {requested} accounts with unique emails (at most {available} exist)")]
    EmailSpaceTooSmall { requested: usize, available: usize },
}

// ============================================================================
// GENERATOR
// ============================================================================

/// Mock record generator over an injected random source
pub struct MockGenerator<R: Rng> {
    rng: R,
    password: String,
}

impl MockGenerator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> MockGenerator<R> {
    pub fn new(rng: R) -> Self {
        MockGenerator {
            rng,
            password: DEFAULT_MOCK_PASSWORD.to_string(),
        }
    }

    /// Override the plaintext every generated account shares
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    // ------------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------------

    /// Generate `count` preview accounts, each with a synthesized `_id`
    pub async fn generate_accounts_preview<H>(
        &mut self,
        count: usize,
        hasher: &H,
    ) -> Result<Vec<AccountPreview>, GenerateError>
    where
        H: PasswordHasher + ?Sized,
    {
        let candidates = self.generate_accounts_for_insert(count, hasher).await?;

        Ok(candidates
            .into_iter()
            .map(|candidate| AccountPreview::from_candidate(new_object_id(), candidate))
            .collect())
    }

    /// Generate `count` insert-shape accounts
    pub async fn generate_accounts_for_insert<H>(
        &mut self,
        count: usize,
        hasher: &H,
    ) -> Result<Vec<NewAccount>, GenerateError>
    where
        H: PasswordHasher + ?Sized,
    {
        if count > EMAIL_SPACE {
            return Err(GenerateError::EmailSpaceTooSmall {
                requested: count,
                available: EMAIL_SPACE,
            });
        }

        // One hash for the whole batch
        let password = hasher.hash(&self.password).await?;

        let mut used_emails = HashSet::with_capacity(capacity_hint(count));
        let mut accounts = Vec::with_capacity(capacity_hint(count));

        for _ in 0..count {
            let email = self.unique_email(&mut used_emails)?;

            accounts.push(NewAccount {
                first_name: self.pick(FIRST_NAMES),
                last_name: self.pick(LAST_NAMES),
                email,
                password: password.clone(),
                role: self.random_role(),
                pets: Vec::new(),
            });
        }

        tracing::debug!(count = accounts.len(), "generated account candidates");

        Ok(accounts)
    }

    // ------------------------------------------------------------------------
    // Pets
    // ------------------------------------------------------------------------

    /// Generate `count` preview pets, each with a synthesized `_id`
    pub fn generate_pets_preview(&mut self, count: usize) -> Vec<PetPreview> {
        self.generate_pets_for_insert(count)
            .into_iter()
            .map(|candidate| PetPreview::from_candidate(new_object_id(), candidate))
            .collect()
    }

    /// Generate `count` insert-shape pets
    pub fn generate_pets_for_insert(&mut self, count: usize) -> Vec<NewPet> {
        let mut pets = Vec::with_capacity(capacity_hint(count));

        for _ in 0..count {
            pets.push(NewPet {
                name: self.pick(PET_NAMES),
                specie: self.pick(PET_SPECIES),
                birth_date: self.random_birth_date(),
                adopted: false,
            });
        }

        tracing::debug!(count = pets.len(), "generated pet candidates");

        pets
    }

    // ------------------------------------------------------------------------
    // Sampling helpers
    // ------------------------------------------------------------------------

    /// Rejection-sample an email not yet in `used`, then record it
    fn unique_email(&mut self, used: &mut HashSet<String>) -> Result<String, GenerateError> {
        for _ in 0..MAX_EMAIL_ATTEMPTS {
            let email = self.random_email();
            if !used.contains(&email) {
                used.insert(email.clone());
                return Ok(email);
            }
        }

        Err(GenerateError::EmailSpaceExhausted {
            attempts: MAX_EMAIL_ATTEMPTS,
            generated: used.len(),
        })
    }

    fn random_email(&mut self) -> String {
        let name = self.pick(FIRST_NAMES).to_lowercase();
        let number = self.rng.gen_range(1..=EMAIL_SUFFIX_MAX);
        format!("{}.{}@{}", name, number, EMAIL_DOMAIN)
    }

    fn random_role(&mut self) -> Role {
        if self.rng.gen_bool(0.5) {
            Role::Admin
        } else {
            Role::User
        }
    }

    fn random_birth_date(&mut self) -> NaiveDate {
        let year = self.rng.gen_range(BIRTH_YEAR_MIN..=BIRTH_YEAR_MAX);
        let month = self.rng.gen_range(1..=12);
        let day = self.rng.gen_range(1..=BIRTH_DAY_MAX);

        NaiveDate::from_ymd_opt(year, month, day).expect("day <= 28 is valid in every month")
    }

    fn pick(&mut self, pool: &[&str]) -> String {
        pool.choose(&mut self.rng).copied().unwrap_or_default().to_string()
    }
}

fn capacity_hint(count: usize) -> usize {
    count.min(MAX_PREALLOCATED)
}

// ============================================================================
// TESTS
// ============================================================================

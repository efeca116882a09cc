// 👤 Account Entity - Mock user accounts
//
// A generated account has a first/last name from the fixed pools, a batch-unique
// email, the batch's shared password hash, a role and an empty pet list.
//
// The store assigns `_id`; preview records synthesize one so they look stored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ROLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator
    Admin,

    /// Regular user
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

// ============================================================================
// INSERT SHAPE
// ============================================================================

/// Account candidate ready for `AccountStore::create_account`.
///
/// No identifier: the store assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub pets: Vec<String>,
}

// ============================================================================
// PREVIEW SHAPE
// ============================================================================

/// Account as a client would see it after creation, synthesized without a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountPreview {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub pets: Vec<String>,
    #[serde(rename = "__v")]
    pub version: i64,
}

impl AccountPreview {
    /// Attach a synthesized identifier to an insert-shape candidate
    pub fn from_candidate(id: String, candidate: NewAccount) -> Self {
        AccountPreview {
            id,
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            email: candidate.email,
            password: candidate.password,
            role: candidate.role,
            pets: candidate.pets,
            version: 0,
        }
    }
}

// ============================================================================
// STORED SHAPE
// ============================================================================

/// Account returned by a store after a successful create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub pets: Vec<String>,
    #[serde(rename = "__v")]
    pub version: i64,
}

impl Account {
    /// Build the stored record from the candidate and the store-assigned id
    pub fn stored(id: String, candidate: NewAccount) -> Self {
        Account {
            id,
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            email: candidate.email,
            password: candidate.password,
            role: candidate.role,
            pets: candidate.pets,
            version: 0,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

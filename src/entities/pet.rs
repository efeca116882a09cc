// 🐾 Pet Entity - Mock pets awaiting adoption
//
// Generated pets are never adopted and have no owner or image yet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pet candidate ready for `PetStore::create_pet`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPet {
    pub name: String,
    pub specie: String,
    #[serde(rename = "birthDate")]
    pub birth_date: NaiveDate,
    pub adopted: bool,
}

/// Pet as a client would see it after creation, synthesized without a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetPreview {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub specie: String,
    #[serde(rename = "birthDate")]
    pub birth_date: NaiveDate,
    pub adopted: bool,
    pub owner: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "__v")]
    pub version: i64,
}

impl PetPreview {
    pub fn from_candidate(id: String, candidate: NewPet) -> Self {
        PetPreview {
            id,
            name: candidate.name,
            specie: candidate.specie,
            birth_date: candidate.birth_date,
            adopted: candidate.adopted,
            owner: None,
            image: None,
            version: 0,
        }
    }
}

/// Pet returned by a store after a successful create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub specie: String,
    #[serde(rename = "birthDate")]
    pub birth_date: NaiveDate,
    pub adopted: bool,
    pub owner: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "__v")]
    pub version: i64,
}

impl Pet {
    pub fn stored(id: String, candidate: NewPet) -> Self {
        Pet {
            id,
            name: candidate.name,
            specie: candidate.specie,
            birth_date: candidate.birth_date,
            adopted: candidate.adopted,
            owner: None,
            image: None,
            version: 0,
        }
    }
}

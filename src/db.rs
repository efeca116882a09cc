use crate::entities::{new_object_id, Account, NewAccount, NewPet, Pet, Role};
use crate::store::{AccountStore, PetStore, StoreError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::Mutex;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // ==========================================================================
    // Accounts Table (email is the unique key the reconciler relies on)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS accounts (
            id TEXT PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL,
            role TEXT NOT NULL,
            pets TEXT NOT NULL DEFAULT '[]',
            version INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Pets Table
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS pets (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            specie TEXT NOT NULL,
            birth_date TEXT NOT NULL,
            adopted INTEGER NOT NULL DEFAULT 0,
            owner TEXT,
            image TEXT,
            version INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_pets_specie ON pets(specie)",
        [],
    )?;

    Ok(())
}

// ============================================================================
// ROW MAPPING
// ============================================================================

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, err.into())
}

fn account_from_row(row: &Row) -> rusqlite::Result<Account> {
    let role: String = row.get(5)?;
    let pets_json: String = row.get(6)?;

    Ok(Account {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        password: row.get(4)?,
        role: role.parse::<Role>().map_err(|e| conversion_error(5, e))?,
        pets: serde_json::from_str(&pets_json).map_err(|e| conversion_error(6, e))?,
        version: row.get(7)?,
    })
}

fn pet_from_row(row: &Row) -> rusqlite::Result<Pet> {
    let birth_date: String = row.get(3)?;

    Ok(Pet {
        id: row.get(0)?,
        name: row.get(1)?,
        specie: row.get(2)?,
        birth_date: NaiveDate::parse_from_str(&birth_date, DATE_FORMAT)
            .map_err(|e| conversion_error(3, e))?,
        adopted: row.get(4)?,
        owner: row.get(5)?,
        image: row.get(6)?,
        version: row.get(7)?,
    })
}

/// Map a rusqlite failure onto the store error taxonomy.
///
/// Only UNIQUE / PRIMARY KEY collisions count as constraint violations; other
/// constraint failures (NOT NULL, CHECK) are backend errors.
fn map_sqlite_error(err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(e, msg)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            StoreError::ConstraintViolation(msg.unwrap_or_else(|| e.to_string()))
        }
        other => StoreError::Backend(other.to_string()),
    }
}

// ============================================================================
// SQLITE STORE
// ============================================================================

/// Account/pet store backed by a single SQLite connection
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file and make sure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        setup_database(&conn).context("Failed to set up database schema")?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    pub fn all_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let conn = self.conn.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, first_name, last_name, email, password, role, pets, version
                 FROM accounts
                 ORDER BY created_at, rowid",
            )
            .map_err(map_sqlite_error)?;

        let accounts = stmt
            .query_map([], account_from_row)
            .map_err(map_sqlite_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_sqlite_error)?;

        Ok(accounts)
    }

    pub fn all_pets(&self) -> Result<Vec<Pet>, StoreError> {
        let conn = self.conn.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, specie, birth_date, adopted, owner, image, version
                 FROM pets
                 ORDER BY created_at, rowid",
            )
            .map_err(map_sqlite_error)?;

        let pets = stmt
            .query_map([], pet_from_row)
            .map_err(map_sqlite_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_sqlite_error)?;

        Ok(pets)
    }

    pub fn count_accounts(&self) -> Result<i64, StoreError> {
        let conn = self.conn.lock()?;
        conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
            .map_err(map_sqlite_error)
    }

    pub fn count_pets(&self) -> Result<i64, StoreError> {
        let conn = self.conn.lock()?;
        conn.query_row("SELECT COUNT(*) FROM pets", [], |row| row.get(0))
            .map_err(map_sqlite_error)
    }
}

#[async_trait]
impl AccountStore for SqliteStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let conn = self.conn.lock()?;
        let id = new_object_id();
        let pets_json =
            serde_json::to_string(&account.pets).map_err(|e| StoreError::Backend(e.to_string()))?;

        conn.execute(
            "INSERT INTO accounts (id, first_name, last_name, email, password, role, pets)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                account.first_name,
                account.last_name,
                account.email,
                account.password,
                account.role.as_str(),
                pets_json,
            ],
        )
        .map_err(map_sqlite_error)?;

        Ok(Account::stored(id, account))
    }
}

#[async_trait]
impl PetStore for SqliteStore {
    async fn create_pet(&self, pet: NewPet) -> Result<Pet, StoreError> {
        let conn = self.conn.lock()?;
        let id = new_object_id();

        conn.execute(
            "INSERT INTO pets (id, name, specie, birth_date, adopted)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id,
                pet.name,
                pet.specie,
                pet.birth_date.format(DATE_FORMAT).to_string(),
                pet.adopted,
            ],
        )
        .map_err(map_sqlite_error)?;

        Ok(Pet::stored(id, pet))
    }
}

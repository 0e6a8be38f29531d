use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use super::domain::{Address, Letting, NewAddress, NewLetting};
use crate::storage::{Database, StorageError};

/// Read access used by the lettings pages.
#[async_trait]
pub trait LettingRepository: Send + Sync {
    /// Every letting, in storage order.
    async fn list(&self) -> Result<Vec<Letting>, StorageError>;
    /// Primary-key lookup; `None` when no letting has that id.
    async fn fetch(&self, id: i64) -> Result<Option<Letting>, StorageError>;
}

#[derive(sqlx::FromRow)]
struct LettingRow {
    id: i64,
    title: String,
    address_id: i64,
    number: u32,
    street: String,
    city: String,
    state: String,
    zip_code: u32,
    country_iso_code: String,
}

impl From<LettingRow> for Letting {
    fn from(row: LettingRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            address: Address {
                id: row.address_id,
                number: row.number,
                street: row.street,
                city: row.city,
                state: row.state,
                zip_code: row.zip_code,
                country_iso_code: row.country_iso_code,
            },
        }
    }
}

const SELECT_LETTING: &str = "SELECT l.id, l.title, a.id AS address_id, a.number, a.street, \
     a.city, a.state, a.zip_code, a.country_iso_code \
     FROM lettings_letting l JOIN lettings_address a ON a.id = l.address_id";

/// SQLite-backed lettings store.
#[derive(Debug, Clone)]
pub struct SqliteLettingRepository {
    pool: SqlitePool,
}

impl SqliteLettingRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            pool: database.pool().clone(),
        }
    }

    pub async fn insert_address(&self, address: NewAddress) -> Result<Address, StorageError> {
        address.validate()?;
        let id = sqlx::query(
            "INSERT INTO lettings_address (number, street, city, state, zip_code, country_iso_code) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(address.number)
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.state)
        .bind(address.zip_code)
        .bind(&address.country_iso_code)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        debug!(address_id = id, "address created");
        Ok(Address {
            id,
            number: address.number,
            street: address.street,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            country_iso_code: address.country_iso_code,
        })
    }

    /// Fails with an integrity violation if the address is missing or
    /// already taken by another letting.
    pub async fn insert_letting(&self, letting: NewLetting) -> Result<Letting, StorageError> {
        letting.validate()?;
        let id = sqlx::query("INSERT INTO lettings_letting (title, address_id) VALUES (?, ?)")
            .bind(&letting.title)
            .bind(letting.address_id)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        debug!(letting_id = id, address_id = letting.address_id, "letting created");
        self.fetch(id).await?.ok_or_else(|| {
            StorageError::Integrity(format!("letting {id} vanished after insert"))
        })
    }

    pub async fn fetch_address(&self, id: i64) -> Result<Option<Address>, StorageError> {
        let address = sqlx::query_as::<_, Address>(
            "SELECT id, number, street, city, state, zip_code, country_iso_code \
             FROM lettings_address WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(address)
    }

    /// Removes the address and, through the foreign key, its letting.
    /// Returns whether an address was deleted.
    pub async fn delete_address(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM lettings_address WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl LettingRepository for SqliteLettingRepository {
    async fn list(&self) -> Result<Vec<Letting>, StorageError> {
        let rows = sqlx::query_as::<_, LettingRow>(&format!("{SELECT_LETTING} ORDER BY l.id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Letting::from).collect())
    }

    async fn fetch(&self, id: i64) -> Result<Option<Letting>, StorageError> {
        let row = sqlx::query_as::<_, LettingRow>(&format!("{SELECT_LETTING} WHERE l.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Letting::from))
    }
}

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use tracing::debug;

use super::domain::{NewProfile, NewUser, Profile, User};
use crate::storage::{Database, StorageError};

/// Read access used by the profiles pages.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Profile>, StorageError>;
    /// Exact, case-sensitive username match. `None` when the user is unknown
    /// or has no profile.
    async fn fetch_by_username(&self, username: &str) -> Result<Option<Profile>, StorageError>;
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    favorite_city: String,
    user_id: i64,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    date_joined: NaiveDateTime,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            favorite_city: row.favorite_city,
            user: User {
                id: row.user_id,
                username: row.username,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                date_joined: row.date_joined,
            },
        }
    }
}

const SELECT_PROFILE: &str = "SELECT p.id, p.favorite_city, u.id AS user_id, u.username, \
     u.first_name, u.last_name, u.email, u.date_joined \
     FROM profiles_profile p JOIN auth_user u ON u.id = p.user_id";

/// SQLite-backed profiles store, including the identity table it hangs off.
#[derive(Debug, Clone)]
pub struct SqliteProfileRepository {
    pool: SqlitePool,
}

impl SqliteProfileRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            pool: database.pool().clone(),
        }
    }

    /// Fails with an integrity violation when the username is taken.
    pub async fn insert_user(&self, user: NewUser) -> Result<User, StorageError> {
        user.validate()?;
        let id = sqlx::query(
            "INSERT INTO auth_user (username, first_name, last_name, email) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        debug!(user_id = id, username = %user.username, "user created");
        self.fetch_user(id)
            .await?
            .ok_or_else(|| StorageError::Integrity(format!("user {id} vanished after insert")))
    }

    pub async fn fetch_user(&self, id: i64) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, first_name, last_name, email, date_joined \
             FROM auth_user WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Fails with an integrity violation when the user is missing or already
    /// has a profile.
    pub async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, StorageError> {
        profile.validate()?;
        let id = sqlx::query("INSERT INTO profiles_profile (user_id, favorite_city) VALUES (?, ?)")
            .bind(profile.user_id)
            .bind(&profile.favorite_city)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        debug!(profile_id = id, user_id = profile.user_id, "profile created");
        let row = sqlx::query_as::<_, ProfileRow>(&format!("{SELECT_PROFILE} WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Profile::from)
            .ok_or_else(|| StorageError::Integrity(format!("profile {id} vanished after insert")))
    }

    /// Removes the user and, through the foreign key, their profile.
    /// Returns whether a user was deleted.
    pub async fn delete_user(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM auth_user WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn list(&self) -> Result<Vec<Profile>, StorageError> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!("{SELECT_PROFILE} ORDER BY p.id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn fetch_by_username(&self, username: &str) -> Result<Option<Profile>, StorageError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!("{SELECT_PROFILE} WHERE u.username = ?"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Profile::from))
    }
}

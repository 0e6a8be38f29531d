use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::storage::{check_length, ValidationError};

/// Read model of an account in the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_joined: NaiveDateTime,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Account fields supplied when seeding the identity store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl NewUser {
    pub const MAX_USERNAME_LEN: usize = 150;

    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Usernames are letters, digits and `@ . + - _`, so they are always a
    /// single path segment.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length("username", &self.username, 1, Self::MAX_USERNAME_LEN)?;
        if let Some(bad) = self
            .username
            .chars()
            .find(|c| !(c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')))
        {
            return Err(ValidationError::new(
                "username",
                format!("may not contain {bad:?}"),
            ));
        }
        check_length("first_name", &self.first_name, 0, 150)?;
        check_length("last_name", &self.last_name, 0, 150)?;
        check_length("email", &self.email, 0, 254)?;
        Ok(())
    }
}

/// A user's profile with the owning account resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: i64,
    pub user: User,
    pub favorite_city: String,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user.username)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub user_id: i64,
    #[serde(default)]
    pub favorite_city: String,
}

impl NewProfile {
    pub const MAX_FAVORITE_CITY_LEN: usize = 64;

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length(
            "favorite_city",
            &self.favorite_city,
            0,
            Self::MAX_FAVORITE_CITY_LEN,
        )
    }
}

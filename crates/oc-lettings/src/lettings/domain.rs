use std::fmt;

use serde::{Deserialize, Serialize};

use crate::storage::{check_length, check_range, ValidationError};

/// Physical address as stored in `lettings_address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Address {
    pub id: i64,
    pub number: u32,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: u32,
    pub country_iso_code: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.street)
    }
}

impl Address {
    /// Second address line, e.g. `Springfield, IL 62704`.
    pub fn locality(&self) -> String {
        format!("{}, {} {}", self.city, self.state, self.zip_code)
    }
}

/// Address fields supplied by administrative tooling before an id exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
    pub number: u32,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: u32,
    pub country_iso_code: String,
}

impl NewAddress {
    pub const MAX_NUMBER: u32 = 9999;
    pub const MAX_ZIP_CODE: u32 = 99999;
    pub const MAX_STREET_LEN: usize = 64;
    pub const MAX_CITY_LEN: usize = 64;
    pub const STATE_LEN: usize = 2;
    pub const COUNTRY_ISO_CODE_LEN: usize = 3;

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("number", i64::from(self.number), 1, i64::from(Self::MAX_NUMBER))?;
        check_length("street", &self.street, 1, Self::MAX_STREET_LEN)?;
        check_length("city", &self.city, 1, Self::MAX_CITY_LEN)?;
        check_length("state", &self.state, Self::STATE_LEN, Self::STATE_LEN)?;
        check_range(
            "zip_code",
            i64::from(self.zip_code),
            1,
            i64::from(Self::MAX_ZIP_CODE),
        )?;
        check_length(
            "country_iso_code",
            &self.country_iso_code,
            Self::COUNTRY_ISO_CODE_LEN,
            Self::COUNTRY_ISO_CODE_LEN,
        )?;
        Ok(())
    }
}

/// Rental property with its address resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Letting {
    pub id: i64,
    pub title: String,
    pub address: Address,
}

impl fmt::Display for Letting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLetting {
    pub title: String,
    pub address_id: i64,
}

impl NewLetting {
    pub const MAX_TITLE_LEN: usize = 256;

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length("title", &self.title, 1, Self::MAX_TITLE_LEN)
    }
}

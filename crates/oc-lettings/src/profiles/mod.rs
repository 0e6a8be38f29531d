//! Per-user profile data keyed by the identity store's usernames.

pub mod domain;
pub(crate) mod handlers;
pub mod repository;
pub mod views;

pub use domain::{NewProfile, NewUser, Profile, User};
pub use repository::{ProfileRepository, SqliteProfileRepository};
pub use views::{ProfileDetailContext, ProfilesIndexContext};

//! Lettings and profiles site: storage, page handlers and rendering.

pub mod config;
pub mod error;
pub mod lettings;
pub mod profiles;
pub mod site;
pub mod storage;
pub mod telemetry;

pub use site::{site_router, SiteState};

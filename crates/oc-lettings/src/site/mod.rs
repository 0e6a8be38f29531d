//! Landing page, shared layout, error pages and the routing table.

pub mod client;
pub mod error;
pub mod extract;
pub(crate) mod handlers;
pub mod layout;
pub mod routes;
pub mod views;

use std::sync::Arc;

use axum::Router;

use crate::lettings::{LettingRepository, SqliteLettingRepository};
use crate::profiles::{ProfileRepository, SqliteProfileRepository};
use crate::storage::Database;

pub use client::ClientMeta;
pub use error::{with_error_pages, FailedRequest, SiteError, SiteFailure};
pub use extract::PageSegment;
pub use routes::{resolve, reverse, Endpoint, ResolvedRoute, Route, ROUTES};

/// Repositories shared by every page handler.
#[derive(Clone)]
pub struct SiteState {
    pub lettings: Arc<dyn LettingRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl SiteState {
    pub fn new(lettings: Arc<dyn LettingRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { lettings, profiles }
    }

    pub fn from_database(database: &Database) -> Self {
        Self::new(
            Arc::new(SqliteLettingRepository::new(database)),
            Arc::new(SqliteProfileRepository::new(database)),
        )
    }
}

/// The whole public site: table routes, 404 fallback and error pages.
pub fn site_router(state: SiteState) -> Router {
    with_error_pages(routes::table_router().fallback(error::fallback)).with_state(state)
}

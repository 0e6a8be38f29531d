//! Fixed-status error pages and the middleware that dispatches to them.
//!
//! Handlers never render failures themselves. They return [`SiteError`],
//! whose bare response carries a [`SiteFailure`] marker; [`error_pages`] swaps
//! any marked response for the matching page.

use std::any::Any;

use axum::extract::Request;
use axum::http::{header, Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{debug, error, warn};

use super::client::ClientMeta;
use super::layout::render;
use super::{routes, views};
use crate::storage::StorageError;

/// Request-level failure taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    Forbidden(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for SiteError {
    fn from(value: StorageError) -> Self {
        Self::Internal(value.to_string())
    }
}

/// Marker attached to responses built from a [`SiteError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteFailure {
    NotFound(String),
    Forbidden(String),
    Internal,
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let (status, failure) = match self {
            SiteError::NotFound(reason) => (StatusCode::NOT_FOUND, SiteFailure::NotFound(reason)),
            SiteError::Forbidden(reason) => (StatusCode::FORBIDDEN, SiteFailure::Forbidden(reason)),
            SiteError::Internal(detail) => {
                // Detail stays in the logs; the page is generic.
                error!(error = %detail, "unhandled error while serving request");
                (StatusCode::INTERNAL_SERVER_ERROR, SiteFailure::Internal)
            }
        };

        let mut response = status.into_response();
        response.extensions_mut().insert(failure);
        response
    }
}

/// What the error pages know about the request that failed.
#[derive(Debug, Clone, Default)]
pub struct FailedRequest {
    pub path: String,
    pub client: ClientMeta,
}

impl FailedRequest {
    pub fn new(path: impl Into<String>, client: ClientMeta) -> Self {
        Self {
            path: path.into(),
            client,
        }
    }
}

pub fn page_not_found(request: &FailedRequest, reason: &str) -> Response {
    warn!(
        path = %request.path,
        client.addr = %request.client.addr(),
        client.user_agent = %request.client.agent(),
        "page not found"
    );
    debug!(reason, "not found condition");
    (StatusCode::NOT_FOUND, render(views::not_found_page())).into_response()
}

pub fn server_error(request: &FailedRequest) -> Response {
    error!(
        path = %request.path,
        client.addr = %request.client.addr(),
        client.user_agent = %request.client.agent(),
        "server error"
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        render(views::server_error_page()),
    )
        .into_response()
}

pub fn permission_denied(request: &FailedRequest, reason: &str) -> Response {
    warn!(
        path = %request.path,
        client.addr = %request.client.addr(),
        client.user_agent = %request.client.agent(),
        reason,
        "permission denied"
    );
    (StatusCode::FORBIDDEN, render(views::forbidden_page())).into_response()
}

/// Replaces responses marked with a [`SiteFailure`] by the matching page.
pub async fn error_pages(request: Request, next: Next) -> Response {
    let failed = FailedRequest::new(
        request.uri().path(),
        ClientMeta::from_parts(request.headers(), request.extensions()),
    );

    let response = next.run(request).await;
    let Some(failure) = response.extensions().get::<SiteFailure>().cloned() else {
        return response;
    };

    match failure {
        SiteFailure::NotFound(reason) => page_not_found(&failed, &reason),
        SiteFailure::Forbidden(reason) => permission_denied(&failed, &reason),
        SiteFailure::Internal => server_error(&failed),
    }
}

/// Wraps `router` so every failure, panics included, ends on a fixed page.
pub fn with_error_pages<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(error_pages))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("handler panicked");
    SiteError::Internal(format!("panic: {detail}")).into_response()
}

/// Non-GET requests to a table route. Pages are read-only, so the method
/// names nothing here.
pub(crate) async fn unsupported_method(method: Method, uri: Uri) -> SiteError {
    SiteError::NotFound(format!("{method} is not served at {}", uri.path()))
}

/// Unmatched paths. A GET whose slash-terminated form is a known route is
/// redirected there permanently; anything else is a 404.
pub(crate) async fn fallback(method: Method, uri: Uri) -> Response {
    let path = uri.path();
    if (method == Method::GET || method == Method::HEAD) && !path.ends_with('/') {
        let slashed = format!("{path}/");
        if routes::resolve(&slashed).is_some() {
            let location = match uri.query() {
                Some(query) => format!("{slashed}?{query}"),
                None => slashed,
            };
            return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response();
        }
    }

    SiteError::NotFound(format!("no route matches {path}")).into_response()
}

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tracing::debug;

use super::error::SiteError;

/// The single capture of a table route, percent-decoded.
///
/// A segment axum cannot decode (invalid UTF-8 after unescaping) can never
/// name a letting or a user, so it is rejected as not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSegment(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for PageSegment
where
    S: Send + Sync,
{
    type Rejection = SiteError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(segment)) => Ok(Self(segment)),
            Err(rejection) => {
                debug!(path = %parts.uri.path(), %rejection, "undecodable path segment");
                Err(SiteError::NotFound(format!("no page at {}", parts.uri.path())))
            }
        }
    }
}

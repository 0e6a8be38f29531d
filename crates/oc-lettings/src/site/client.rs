use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, Extensions, HeaderMap};

const UNKNOWN: &str = "unknown";

/// Caller details recorded with every page request.
///
/// The remote address comes from `ConnectInfo`, so it is only known when the
/// server is started with connect info enabled; routers driven directly in
/// tests see `unknown`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMeta {
    pub remote_addr: Option<IpAddr>,
    pub user_agent: Option<String>,
}

impl ClientMeta {
    pub fn from_parts(headers: &HeaderMap, extensions: &Extensions) -> Self {
        let remote_addr = extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Self {
            remote_addr,
            user_agent,
        }
    }

    pub fn addr(&self) -> String {
        self.remote_addr
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(UNKNOWN)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(&parts.headers, &parts.extensions))
    }
}

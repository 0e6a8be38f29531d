//! Static routing table.
//!
//! Every page lives in [`ROUTES`], in match order. The axum router is built
//! from it, and the same table answers name-based URL reversal and path
//! resolution for trailing-slash redirects.

use axum::routing::{get, MethodRouter};
use axum::Router;
use tracing::warn;

use super::SiteState;
use crate::{lettings, profiles, site};

/// Page handlers the table can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    SiteIndex,
    LettingsIndex,
    Letting,
    ProfilesIndex,
    Profile,
}

impl Endpoint {
    fn method_router(self) -> MethodRouter<SiteState> {
        let router = match self {
            Endpoint::SiteIndex => get(site::handlers::index),
            Endpoint::LettingsIndex => get(lettings::handlers::index),
            Endpoint::Letting => get(lettings::handlers::letting),
            Endpoint::ProfilesIndex => get(profiles::handlers::index),
            Endpoint::Profile => get(profiles::handlers::profile),
        };
        router.fallback(site::error::unsupported_method)
    }
}

/// One row of the routing table.
///
/// Patterns use `<int:name>` (ASCII digits) and `<str:name>` (any non-empty
/// segment) captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub namespace: Option<&'static str>,
    pub name: &'static str,
    pub pattern: &'static str,
    pub endpoint: Endpoint,
}

impl Route {
    /// `namespace:name`, or the bare name for top-level routes.
    pub fn qualified_name(&self) -> String {
        match self.namespace {
            Some(namespace) => format!("{namespace}:{}", self.name),
            None => self.name.to_string(),
        }
    }

    /// The pattern rewritten in axum's `:name` capture syntax.
    pub fn axum_path(&self) -> String {
        self.pattern
            .split('/')
            .map(|segment| match Segment::parse(segment) {
                Segment::Capture { name, .. } => format!(":{name}"),
                Segment::Literal(literal) => literal.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

pub const ROUTES: &[Route] = &[
    Route {
        namespace: None,
        name: "index",
        pattern: "/",
        endpoint: Endpoint::SiteIndex,
    },
    Route {
        namespace: Some("lettings"),
        name: "index",
        pattern: "/lettings/",
        endpoint: Endpoint::LettingsIndex,
    },
    Route {
        namespace: Some("lettings"),
        name: "letting",
        pattern: "/lettings/<int:letting_id>/",
        endpoint: Endpoint::Letting,
    },
    Route {
        namespace: Some("profiles"),
        name: "index",
        pattern: "/profiles/",
        endpoint: Endpoint::ProfilesIndex,
    },
    Route {
        namespace: Some("profiles"),
        name: "profile",
        pattern: "/profiles/<str:username>/",
        endpoint: Endpoint::Profile,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Converter {
    Int,
    Str,
}

impl Converter {
    fn accepts(self, value: &str) -> bool {
        match self {
            Converter::Int => !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
            Converter::Str => !value.is_empty() && !value.contains('/'),
        }
    }
}

enum Segment<'a> {
    Literal(&'a str),
    Capture { name: &'a str, converter: Converter },
}

impl<'a> Segment<'a> {
    fn parse(segment: &'a str) -> Self {
        let capture = segment
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .and_then(|inner| inner.split_once(':'));
        match capture {
            Some(("int", name)) => Segment::Capture {
                name,
                converter: Converter::Int,
            },
            Some(("str", name)) => Segment::Capture {
                name,
                converter: Converter::Str,
            },
            _ => Segment::Literal(segment),
        }
    }
}

/// A path matched against the table, with its captured values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub route: &'static Route,
    pub kwargs: Vec<(&'static str, String)>,
}

impl ResolvedRoute {
    pub fn kwarg(&self, name: &str) -> Option<&str> {
        self.kwargs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// First route in table order whose pattern matches `path`.
pub fn resolve(path: &str) -> Option<ResolvedRoute> {
    ROUTES.iter().find_map(|route| {
        match_pattern(route.pattern, path).map(|kwargs| ResolvedRoute { route, kwargs })
    })
}

fn match_pattern(pattern: &'static str, path: &str) -> Option<Vec<(&'static str, String)>> {
    let expected: Vec<&'static str> = pattern.split('/').collect();
    let actual: Vec<&str> = path.split('/').collect();
    if expected.len() != actual.len() {
        return None;
    }

    let mut kwargs = Vec::new();
    for (segment, value) in expected.into_iter().zip(actual) {
        match Segment::parse(segment) {
            Segment::Literal(literal) if literal == value => {}
            Segment::Literal(_) => return None,
            Segment::Capture { name, converter } if converter.accepts(value) => {
                kwargs.push((name, value.to_string()));
            }
            Segment::Capture { .. } => return None,
        }
    }
    Some(kwargs)
}

/// Builds the path for a named route, or `None` when the name is unknown or
/// a capture is missing or malformed.
pub fn reverse(qualified_name: &str, kwargs: &[(&str, &str)]) -> Option<String> {
    let route = ROUTES
        .iter()
        .find(|route| route.qualified_name() == qualified_name)?;

    let mut segments = Vec::new();
    for segment in route.pattern.split('/') {
        match Segment::parse(segment) {
            Segment::Literal(literal) => segments.push(literal.to_string()),
            Segment::Capture { name, converter } => {
                let (_, value) = kwargs.iter().find(|(key, _)| *key == name)?;
                if !converter.accepts(value) {
                    return None;
                }
                segments.push(urlencoding::encode(value).into_owned());
            }
        }
    }
    Some(segments.join("/"))
}

/// [`reverse`] for templates: an unknown route degrades to `#` with a warning.
pub fn url(qualified_name: &str, kwargs: &[(&str, &str)]) -> String {
    reverse(qualified_name, kwargs).unwrap_or_else(|| {
        warn!(route = qualified_name, "no reverse match for route");
        "#".to_string()
    })
}

/// Registers every table row on a fresh router.
pub(crate) fn table_router() -> Router<SiteState> {
    ROUTES.iter().fold(Router::new(), |router, route| {
        router.route(&route.axum_path(), route.endpoint.method_router())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_top_level_and_namespaced_names() {
        assert_eq!(reverse("index", &[]).as_deref(), Some("/"));
        assert_eq!(reverse("lettings:index", &[]).as_deref(), Some("/lettings/"));
        assert_eq!(reverse("profiles:index", &[]).as_deref(), Some("/profiles/"));
        assert_eq!(
            reverse("lettings:letting", &[("letting_id", "999")]).as_deref(),
            Some("/lettings/999/")
        );
        assert_eq!(
            reverse("profiles:profile", &[("username", "HeadlinesGazer")]).as_deref(),
            Some("/profiles/HeadlinesGazer/")
        );
    }

    #[test]
    fn reverse_rejects_bad_captures() {
        assert_eq!(reverse("lettings:letting", &[]), None);
        assert_eq!(reverse("lettings:letting", &[("letting_id", "abc")]), None);
        assert_eq!(reverse("profiles:profile", &[("username", "")]), None);
        assert_eq!(reverse("lettings:missing", &[]), None);
    }

    #[test]
    fn reverse_escapes_usernames() {
        assert_eq!(
            reverse("profiles:profile", &[("username", "jane doe")]).as_deref(),
            Some("/profiles/jane%20doe/")
        );
    }

    #[test]
    fn resolves_paths_to_routes_and_kwargs() {
        let resolved = resolve("/lettings/123/").expect("detail route");
        assert_eq!(resolved.route.endpoint, Endpoint::Letting);
        assert_eq!(resolved.route.namespace, Some("lettings"));
        assert_eq!(resolved.route.name, "letting");
        assert_eq!(resolved.kwarg("letting_id"), Some("123"));

        let resolved = resolve("/profiles/DavWin/").expect("profile route");
        assert_eq!(resolved.route.qualified_name(), "profiles:profile");
        assert_eq!(resolved.kwarg("username"), Some("DavWin"));

        assert_eq!(resolve("/").expect("root").route.endpoint, Endpoint::SiteIndex);
    }

    #[test]
    fn int_captures_only_take_digits() {
        assert!(resolve("/lettings/abc/").is_none());
        assert!(resolve("/lettings/-1/").is_none());
        assert!(resolve("/lettings//").is_none());
    }

    #[test]
    fn unknown_and_unslashed_paths_do_not_resolve() {
        assert!(resolve("/nonexistent-url/").is_none());
        assert!(resolve("/lettings").is_none());
        assert!(resolve("/lettings/1/extra/").is_none());
    }

    #[test]
    fn axum_paths_use_colon_captures() {
        let paths: Vec<String> = ROUTES.iter().map(Route::axum_path).collect();
        assert_eq!(
            paths,
            vec![
                "/",
                "/lettings/",
                "/lettings/:letting_id/",
                "/profiles/",
                "/profiles/:username/",
            ]
        );
    }

    #[test]
    fn names_are_unique_within_namespaces() {
        let mut names: Vec<String> = ROUTES.iter().map(Route::qualified_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ROUTES.len());
    }

    #[test]
    fn url_falls_back_to_placeholder() {
        assert_eq!(url("profiles:unknown", &[]), "#");
        assert_eq!(url("lettings:letting", &[("letting_id", "7")]), "/lettings/7/");
    }
}

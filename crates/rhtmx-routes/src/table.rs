// File: src/table.rs
// Purpose: Ordered route table with name lookup, first-match and URL resolution

use crate::error::{RenderError, RouteError};
use crate::params::Params;
use crate::query::{merge_query, ParsedUrl};
use crate::route::{Route, RouteOptions, RouteUrls};

/// Ordered collection of named routes
///
/// Registration order is match priority: the first registered pattern that
/// matches a path wins, regardless of how specific later patterns are.
/// Names are unique.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{params, RouteTable};
///
/// let mut routes = RouteTable::new();
/// routes
///     .add(("new", "/users/new"))?
///     .add(("show", "/users/:id", "users/show"))?;
///
/// let matched = routes.match_url("/users/new");
/// assert_eq!(matched.route.map(|r| r.name()), Some("new"));
///
/// let resolved = routes.resolve("show", &params! { "id" => 5 })?;
/// assert_eq!(resolved.urls.as_path, "/users/5");
/// assert_eq!(resolved.urls.href, "/users/show?id=5");
/// # Ok::<(), rhtmx_routes::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

/// Outcome of matching a URL against the table
#[derive(Debug, Clone)]
pub struct MatchResult<'t> {
    pub parsed_url: ParsedUrl,
    pub route: Option<&'t Route>,
    /// Decoded path parameters of the matched route
    pub params: Option<Params>,
    /// Explicit query overlaid with the path parameters
    pub query: Params,
}

/// Outcome of resolving a route name or a literal URL
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'t> {
    pub route: Option<&'t Route>,
    pub urls: RouteUrls,
    /// Whether the input was a registered route name
    pub by_name: bool,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route and returns the table for chaining
    ///
    /// Accepts [`RouteOptions`] or the positional tuple forms
    /// `("name", "/pattern", "page")` and `("/pattern", "page")`.
    pub fn add(&mut self, options: impl Into<RouteOptions>) -> Result<&mut Self, RouteError> {
        let route = Route::new(options)?;

        if self.find_by_name(route.name()).is_some() {
            tracing::warn!("Rejected duplicate route name: {}", route.name());
            return Err(RouteError::DuplicateName {
                name: route.name().to_string(),
            });
        }

        tracing::debug!(
            "Registered route {} -> {}",
            route.name(),
            route.pattern().as_str()
        );
        self.routes.push(route);
        Ok(self)
    }

    /// Consuming variant of [`add`](Self::add)
    pub fn with_route(mut self, options: impl Into<RouteOptions>) -> Result<Self, RouteError> {
        self.add(options)?;
        Ok(self)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name() == name)
    }

    /// Registered routes in match order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Matches a URL against the routes in registration order
    ///
    /// No match is not an error: `route` and `params` are `None` and
    /// `query` is just the explicit query.
    pub fn match_url(&self, url: &str) -> MatchResult<'_> {
        let parsed_url = ParsedUrl::parse(url);

        let found = self.routes.iter().find_map(|route| {
            route
                .match_path(&parsed_url.pathname)
                .map(|params| (route, params))
        });

        match &found {
            Some((route, _)) => tracing::trace!("Matched {} to route {}", url, route.name()),
            None => tracing::trace!("No route matched {}", url),
        }

        let (route, params) = match found {
            Some((route, params)) => (Some(route), Some(params)),
            None => (None, None),
        };
        let query = merge_query(&parsed_url.query, params.as_ref());

        MatchResult {
            parsed_url,
            route,
            params,
            query,
        }
    }

    /// Produces `{href, as}` for a route name or a literal URL
    ///
    /// A registered name renders both URLs from `params`. Anything else is
    /// treated as a URL: if a route matches it, `href` comes from that
    /// route's page and the merged query while `as` stays the URL verbatim;
    /// otherwise both are the URL unchanged.
    pub fn resolve(&self, name_or_url: &str, params: &Params) -> Result<Resolved<'_>, RenderError> {
        if let Some(route) = self.find_by_name(name_or_url) {
            return Ok(Resolved {
                route: Some(route),
                urls: route.urls(params)?,
                by_name: true,
            });
        }

        let MatchResult { route, query, .. } = self.match_url(name_or_url);
        let href = match route {
            Some(route) => route.href(&query)?,
            None => name_or_url.to_string(),
        };

        Ok(Resolved {
            route,
            urls: RouteUrls {
                href,
                as_path: name_or_url.to_string(),
            },
            by_name: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use crate::query::to_querystring;
    use pretty_assertions::assert_eq;

    fn users() -> RouteTable {
        RouteTable::new()
            .with_route(("new", "/users/new"))
            .and_then(|t| t.with_route(("show", "/users/:id", "users/show")))
            .unwrap()
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut table = users();
        let err = table.add(("show", "/people/:id")).unwrap_err();
        assert_eq!(
            err,
            RouteError::DuplicateName {
                name: "show".to_string()
            }
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_same_pattern_under_two_names() {
        let mut table = RouteTable::new();
        table.add(("a", "/same")).unwrap().add(("b", "/same")).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.match_url("/same").route.map(Route::name), Some("a"));
    }

    #[test]
    fn test_first_match_wins() {
        let table = users();
        assert_eq!(table.match_url("/users/new").route.map(Route::name), Some("new"));
        assert_eq!(table.match_url("/users/7").route.map(Route::name), Some("show"));
    }

    #[test]
    fn test_registration_order_beats_specificity() {
        let mut table = RouteTable::new();
        table
            .add(("show", "/users/:id"))
            .unwrap()
            .add(("new", "/users/new"))
            .unwrap();
        assert_eq!(table.match_url("/users/new").route.map(Route::name), Some("show"));
    }

    #[test]
    fn test_match_merges_query_with_path_params_winning() {
        let table = users();
        let result = table.match_url("/users/7?id=99&tab=posts");
        assert_eq!(result.params, Some(params! { "id" => "7" }));
        assert_eq!(result.query, params! { "id" => "7", "tab" => "posts" });
        let keys: Vec<&str> = result.query.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "tab"]);
        assert_eq!(to_querystring(&result.query), "id=7&tab=posts");
        assert_eq!(result.parsed_url.pathname, "/users/7");
    }

    #[test]
    fn test_resolve_by_url_colliding_key_keeps_query_position() {
        let table = users();
        let resolved = table.resolve("/users/7?id=9&tab=x", &Params::new()).unwrap();
        assert_eq!(resolved.urls.href, "/users/show?id=7&tab=x");
        assert_eq!(resolved.urls.as_path, "/users/7?id=9&tab=x");
    }

    #[test]
    fn test_no_match_keeps_explicit_query() {
        let table = users();
        let result = table.match_url("/nowhere?x=1");
        assert!(result.route.is_none());
        assert!(result.params.is_none());
        assert_eq!(result.query, params! { "x" => "1" });
    }

    #[test]
    fn test_resolve_by_name() {
        let table = users();
        let resolved = table.resolve("show", &params! { "id" => 5 }).unwrap();
        assert!(resolved.by_name);
        assert_eq!(resolved.route.map(Route::name), Some("show"));
        assert_eq!(
            resolved.urls,
            RouteUrls {
                href: "/users/show?id=5".to_string(),
                as_path: "/users/5".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_by_url() {
        let table = users();
        let resolved = table.resolve("/users/5?tab=a", &Params::new()).unwrap();
        assert!(!resolved.by_name);
        assert_eq!(resolved.urls.href, "/users/show?tab=a&id=5");
        assert_eq!(resolved.urls.as_path, "/users/5?tab=a");
    }

    #[test]
    fn test_resolve_unmanaged_url_passes_through() {
        let table = users();
        let resolved = table.resolve("/some/unmanaged/path", &Params::new()).unwrap();
        assert!(resolved.route.is_none());
        assert_eq!(resolved.urls.href, "/some/unmanaged/path");
        assert_eq!(resolved.urls.as_path, "/some/unmanaged/path");
    }

    #[test]
    fn test_resolve_by_name_missing_param() {
        let table = users();
        assert_eq!(
            table.resolve("show", &Params::new()).unwrap_err(),
            RenderError::MissingParameter {
                name: "id".to_string()
            }
        );
    }
}

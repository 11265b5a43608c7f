// File: src/link.rs
// Purpose: Resolve link element props (route / to / params) into href and as

use crate::error::RenderError;
use crate::params::Params;
use crate::table::RouteTable;

/// Props of a navigation element before resolution
///
/// `route` takes precedence over `to`; everything in `props` is forwarded
/// to the anchor unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkProps {
    pub route: Option<String>,
    pub to: Option<String>,
    pub params: Params,
    pub props: Vec<(String, String)>,
}

/// Props ready for the underlying anchor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedLink {
    pub href: Option<String>,
    pub as_path: Option<String>,
    pub props: Vec<(String, String)>,
}

impl LinkProps {
    /// Link to a named route (or a URL, resolved the same way)
    pub fn route(route: impl Into<String>) -> Self {
        Self {
            route: Some(route.into()),
            ..Default::default()
        }
    }

    pub fn to(url: impl Into<String>) -> Self {
        Self {
            to: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.push((key.into(), value.into()));
        self
    }

    /// Injects `href` and `as` resolved through the table
    ///
    /// Without a `route` or `to`, the props pass through with no URLs.
    ///
    /// ```
    /// use rhtmx_routes::link::LinkProps;
    /// use rhtmx_routes::{params, RouteTable};
    ///
    /// let routes = RouteTable::new().with_route(("post", "/blog/:slug", "blog"))?;
    /// let link = LinkProps::route("post")
    ///     .params(params! { "slug" => "hi" })
    ///     .prop("class", "nav")
    ///     .resolve(&routes)?;
    /// assert_eq!(link.href.as_deref(), Some("/blog?slug=hi"));
    /// assert_eq!(link.as_path.as_deref(), Some("/blog/hi"));
    /// # Ok::<(), rhtmx_routes::Error>(())
    /// ```
    pub fn resolve(self, routes: &RouteTable) -> Result<ResolvedLink, RenderError> {
        let target = self
            .route
            .filter(|route| !route.is_empty())
            .or(self.to.filter(|to| !to.is_empty()));

        let Some(target) = target else {
            return Ok(ResolvedLink {
                props: self.props,
                ..Default::default()
            });
        };

        let urls = routes.resolve(&target, &self.params)?.urls;
        Ok(ResolvedLink {
            href: Some(urls.href),
            as_path: Some(urls.as_path),
            props: self.props,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use pretty_assertions::assert_eq;

    fn routes() -> RouteTable {
        RouteTable::new()
            .with_route(("user", "/user/:id", "user"))
            .unwrap()
    }

    #[test]
    fn test_route_wins_over_to() {
        let mut props = LinkProps::route("user").params(params! { "id" => 3 });
        props.to = Some("/ignored".to_string());
        let link = props.resolve(&routes()).unwrap();
        assert_eq!(link.as_path.as_deref(), Some("/user/3"));
    }

    #[test]
    fn test_to_url_is_matched() {
        let link = LinkProps::to("/user/3?ref=nav").resolve(&routes()).unwrap();
        assert_eq!(link.href.as_deref(), Some("/user?ref=nav&id=3"));
        assert_eq!(link.as_path.as_deref(), Some("/user/3?ref=nav"));
    }

    #[test]
    fn test_no_target_passes_props_through() {
        let link = LinkProps::default()
            .prop("href", "/raw")
            .resolve(&routes())
            .unwrap();
        assert_eq!(
            link,
            ResolvedLink {
                href: None,
                as_path: None,
                props: vec![("href".to_string(), "/raw".to_string())],
            }
        );
    }
}

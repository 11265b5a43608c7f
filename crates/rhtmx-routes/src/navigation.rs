// File: src/navigation.rs
// Purpose: Client navigation by route name or URL, composed over a plain navigator

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::params::Params;
use crate::table::RouteTable;

/// Which navigation primitive to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavMethod {
    Push,
    Replace,
    Prefetch,
}

/// Options forwarded to the navigator when navigating by route name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavOptions {
    #[serde(default)]
    pub shallow: bool,

    #[serde(default)]
    pub scroll: Option<bool>,

    #[serde(default)]
    pub locale: Option<String>,
}

/// Third argument handed to the navigator
///
/// Navigating by name forwards the caller's options; navigating by URL
/// forwards the caller's params instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavArgs<'a> {
    Options(&'a NavOptions),
    Params(&'a Params),
}

/// Underlying navigation primitives (history push/replace, prefetch)
pub trait Navigator {
    type Output;

    fn navigate(
        &self,
        method: NavMethod,
        href: &str,
        as_path: &str,
        args: NavArgs<'_>,
    ) -> Self::Output;
}

/// Navigator that accepts route names as well as URLs
///
/// Wraps a [`Navigator`] instead of extending it, so the wrapped value stays
/// untouched and several tables can drive separate navigators.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use rhtmx_routes::navigation::{NavArgs, NavMethod, NavOptions, Navigator, RouteNavigator};
/// use rhtmx_routes::{params, RouteTable};
///
/// struct History;
///
/// impl Navigator for History {
///     type Output = String;
///
///     fn navigate(&self, method: NavMethod, href: &str, as_path: &str, _: NavArgs<'_>) -> String {
///         format!("{method:?} {href} {as_path}")
///     }
/// }
///
/// let routes = RouteTable::new().with_route(("user", "/user/:id", "user"))?;
/// let nav = RouteNavigator::new(Arc::new(routes), History);
/// let out = nav.push_route("user", &params! { "id" => 1 }, &NavOptions::default())?;
/// assert_eq!(out, "Push /user?id=1 /user/1");
/// # Ok::<(), rhtmx_routes::Error>(())
/// ```
pub struct RouteNavigator<N> {
    routes: Arc<RouteTable>,
    navigator: N,
}

impl<N: Navigator> RouteNavigator<N> {
    pub fn new(routes: Arc<RouteTable>, navigator: N) -> Self {
        Self { routes, navigator }
    }

    /// The wrapped navigator, for plain href/as navigation
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn push_route(
        &self,
        route: &str,
        params: &Params,
        options: &NavOptions,
    ) -> Result<N::Output, RenderError> {
        self.navigate(NavMethod::Push, route, params, options)
    }

    pub fn replace_route(
        &self,
        route: &str,
        params: &Params,
        options: &NavOptions,
    ) -> Result<N::Output, RenderError> {
        self.navigate(NavMethod::Replace, route, params, options)
    }

    pub fn prefetch_route(
        &self,
        route: &str,
        params: &Params,
        options: &NavOptions,
    ) -> Result<N::Output, RenderError> {
        self.navigate(NavMethod::Prefetch, route, params, options)
    }

    fn navigate(
        &self,
        method: NavMethod,
        route: &str,
        params: &Params,
        options: &NavOptions,
    ) -> Result<N::Output, RenderError> {
        let resolved = self.routes.resolve(route, params)?;
        let args = if resolved.by_name {
            NavArgs::Options(options)
        } else {
            NavArgs::Params(params)
        };

        tracing::trace!(
            "{:?} {} as {}",
            method,
            resolved.urls.href,
            resolved.urls.as_path
        );
        Ok(self
            .navigator
            .navigate(method, &resolved.urls.href, &resolved.urls.as_path, args))
    }
}

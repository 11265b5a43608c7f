//! # RHTMX Routes
//!
//! A declarative table of named routes for page-based apps:
//! - Named routes with URL patterns (`/user/:id`, `/posts/:id?`, `/docs/:path+`)
//! - First-match-wins matching in registration order
//! - Two URL forms per route: `href` (page + full query) and `as` (public path)
//! - Page identifiers that are static, parameterized or computed
//! - Routes declared in code or loaded from `routes.toml`
//!
//! ## Adapters
//!
//! The table is plain data shared behind an `Arc`. Integrations compose over
//! it instead of patching framework objects:
//! - [`RequestHandler`] dispatches server requests to a [`PageApp`]
//! - [`RouteNavigator`] wraps a [`Navigator`] with push/replace/prefetch by name
//! - [`LinkProps`] resolves `route`/`to`/`params` into anchor props
//!
//! ## Example
//!
//! ```
//! use rhtmx_routes::{params, RouteTable};
//!
//! let mut routes = RouteTable::new();
//! routes
//!     .add(("about", "/about-us"))?
//!     .add(("user", "/user/:id", "profile"))?;
//!
//! let urls = routes.find_by_name("user").unwrap().urls(&params! { "id" => 5 })?;
//! assert_eq!(urls.as_path, "/user/5");
//! assert_eq!(urls.href, "/profile?id=5");
//!
//! let matched = routes.match_url("/user/5?tab=posts");
//! assert_eq!(matched.route.map(|r| r.name()), Some("user"));
//! assert_eq!(matched.query, params! { "tab" => "posts", "id" => "5" });
//! # Ok::<(), rhtmx_routes::Error>(())
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod config;
mod error;
pub mod handler;
pub mod link;
pub mod navigation;
mod params;
pub mod pattern;
mod query;
pub mod route;
mod table;

pub use config::{RouteConfig, RoutesConfig};
pub use error::{Error, RenderError, Result, RouteError};
pub use handler::{PageApp, RequestHandler};
pub use link::{LinkProps, ResolvedLink};
pub use navigation::{NavArgs, NavMethod, NavOptions, Navigator, RouteNavigator};
pub use params::{ParamValue, Params};
pub use pattern::PathPattern;
pub use query::{merge_query, parse_query, to_querystring, ParsedUrl};
pub use route::{Page, PageContext, PageFn, Route, RouteOptions, RouteUrls};
pub use table::{MatchResult, Resolved, RouteTable};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_table_is_shareable_across_threads() {
        assert_send_sync::<RouteTable>();
        assert_send_sync::<Route>();
    }
}

//! Page identifier resolution
//!
//! The `page` given at registration is turned into a [`PageResolver`] once,
//! so resolving the page for a set of params never re-inspects its shape.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{RenderError, RouteError};
use crate::params::Params;
use crate::pattern::PathPattern;

/// What a dynamic page function sees
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub params: &'a Params,
    pub name: &'a str,
    pub data: &'a Value,
}

/// Dynamic page resolution function
pub type PageFn = Arc<dyn Fn(&PageContext<'_>) -> String + Send + Sync>;

/// Page as supplied at registration time
#[derive(Clone)]
pub enum Page {
    /// `"users/index"`, or a page pattern such as `"/blog/[slug]"`
    Name(String),
    /// Computes the page from the matched params
    Dynamic(PageFn),
}

impl Page {
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&PageContext<'_>) -> String + Send + Sync + 'static,
    {
        Page::Dynamic(Arc::new(f))
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Page::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for Page {
    fn from(page: &str) -> Self {
        Page::Name(page.to_string())
    }
}

impl From<String> for Page {
    fn from(page: String) -> Self {
        Page::Name(page)
    }
}

/// Compiled page resolution
#[derive(Clone)]
pub enum PageResolver {
    Static(String),
    Pattern(PathPattern),
    Dynamic(PageFn),
}

impl PageResolver {
    pub fn new(page: Page) -> Result<Self, RouteError> {
        match page {
            Page::Name(page) if page.starts_with('/') => {
                PathPattern::compile(&page).map(PageResolver::Pattern)
            }
            Page::Name(page) => Ok(PageResolver::Static(clean_page(&page))),
            Page::Dynamic(f) => Ok(PageResolver::Dynamic(f)),
        }
    }

    pub fn resolve(&self, ctx: &PageContext<'_>) -> Result<String, RenderError> {
        match self {
            PageResolver::Static(page) => Ok(page.clone()),
            PageResolver::Pattern(pattern) => pattern.to_path(ctx.params),
            PageResolver::Dynamic(f) => Ok(f(ctx)),
        }
    }
}

impl fmt::Debug for PageResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageResolver::Static(page) => f.debug_tuple("Static").field(page).finish(),
            PageResolver::Pattern(pattern) => {
                f.debug_tuple("Pattern").field(&pattern.as_str()).finish()
            }
            PageResolver::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Normalizes a page name: drops a trailing `index` segment and forces a
/// single leading slash
///
/// ```
/// use rhtmx_routes::route::page::clean_page;
///
/// assert_eq!(clean_page("users/index"), "/users");
/// assert_eq!(clean_page("index"), "/");
/// assert_eq!(clean_page("about"), "/about");
/// ```
pub fn clean_page(page: &str) -> String {
    let without_index = if page == "index" {
        ""
    } else {
        page.strip_suffix("/index").unwrap_or(page)
    };
    format!(
        "/{}",
        without_index.strip_prefix('/').unwrap_or(without_index)
    )
}

/// Route name implied by a plain page name, for unnamed registrations
///
/// Page patterns and dynamic pages imply no name.
pub(crate) fn implied_name(page: &Page) -> Option<String> {
    match page {
        Page::Name(page) if !page.starts_with('/') => {
            let cleaned = clean_page(page);
            let name = match cleaned.trim_matches('/') {
                "" => "index",
                name => name,
            };
            Some(name.to_string())
        }
        _ => None,
    }
}

//! Named routes
//!
//! A [`Route`] ties a unique name to a compiled [`PathPattern`], a page
//! resolver and opaque metadata. It is immutable once built and knows how
//! to synthesize both URL forms:
//!
//! - `href`: the page identifier plus every param as a querystring
//! - `as`: the public path, plus only the params the path does not consume

use serde::Serialize;
use serde_json::Value;

use crate::error::{RenderError, RouteError};
use crate::params::{ParamValue, Params};
use crate::pattern::PathPattern;
use crate::query::to_querystring;

pub mod page;

use page::implied_name;

pub use page::{Page, PageContext, PageFn, PageResolver};

/// Registration options for a route
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{Route, RouteOptions};
///
/// let route = Route::new(
///     RouteOptions::new("user")
///         .pattern("/user/:id")
///         .page("profile"),
/// )
/// .unwrap();
/// assert_eq!(route.pattern().as_str(), "/user/:id");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    pub(crate) name: Option<String>,
    pub(crate) pattern: Option<String>,
    pub(crate) page: Option<Page>,
    pub(crate) data: Value,
}

impl RouteOptions {
    pub fn new(name: impl Into<String>) -> Self {
        RouteOptions {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Unnamed registration; the name is implied by the page
    pub fn unnamed(pattern: impl Into<String>) -> Self {
        RouteOptions {
            pattern: Some(pattern.into()),
            ..Default::default()
        }
    }

    /// Positional form of `add(name, pattern, page)`
    ///
    /// When `first` starts with `/` it is the pattern, the remaining
    /// arguments shift one place left and the name is implied by the page.
    ///
    /// ```
    /// use rhtmx_routes::{Route, RouteOptions};
    ///
    /// let route = Route::new(RouteOptions::positional("/blog/:slug", Some("blog"), None)).unwrap();
    /// assert_eq!(route.name(), "blog");
    /// ```
    pub fn positional(first: &str, second: Option<&str>, third: Option<&str>) -> Self {
        if first.starts_with('/') {
            let options = RouteOptions::unnamed(first);
            match second {
                Some(page) => options.page(page),
                None => options,
            }
        } else {
            let mut options = RouteOptions::new(first);
            if let Some(pattern) = second {
                options = options.pattern(pattern);
            }
            if let Some(page) = third {
                options = options.page(page);
            }
            options
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn page(mut self, page: impl Into<Page>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Resolves the page identifier from the matched params at request time
    pub fn page_fn<F>(self, f: F) -> Self
    where
        F: Fn(&PageContext<'_>) -> String + Send + Sync + 'static,
    {
        self.page(Page::dynamic(f))
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}

impl From<&str> for RouteOptions {
    fn from(first: &str) -> Self {
        RouteOptions::positional(first, None, None)
    }
}

impl From<(&str, &str)> for RouteOptions {
    fn from((first, second): (&str, &str)) -> Self {
        RouteOptions::positional(first, Some(second), None)
    }
}

impl From<(&str, &str, &str)> for RouteOptions {
    fn from((first, second, third): (&str, &str, &str)) -> Self {
        RouteOptions::positional(first, Some(second), Some(third))
    }
}

/// `(name, pattern, data)`, or `(pattern, page, data)` when the first
/// element starts with `/`
impl From<(&str, &str, Value)> for RouteOptions {
    fn from((first, second, data): (&str, &str, Value)) -> Self {
        RouteOptions::positional(first, Some(second), None).data(data)
    }
}

impl From<(&str, &str, &str, Value)> for RouteOptions {
    fn from((name, pattern, page, data): (&str, &str, &str, Value)) -> Self {
        RouteOptions::positional(name, Some(pattern), Some(page)).data(data)
    }
}

/// The two URL forms handed to navigation consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteUrls {
    /// Internal URL used to load the page implementation
    pub href: String,
    /// Address-bar URL
    #[serde(rename = "as")]
    pub as_path: String,
}

/// A registered route
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    pattern: PathPattern,
    page: PageResolver,
    data: Value,
}

impl Route {
    /// Builds a route, compiling its pattern and page resolver
    ///
    /// The pattern defaults to `/<name>` and the page defaults to the name.
    pub fn new(options: impl Into<RouteOptions>) -> Result<Self, RouteError> {
        let RouteOptions {
            name,
            pattern,
            page,
            data,
        } = options.into();

        let name = name
            .or_else(|| page.as_ref().and_then(implied_name))
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| RouteError::MissingName {
                pattern: pattern.clone().unwrap_or_default(),
            })?;

        let pattern = pattern.unwrap_or_else(|| format!("/{name}"));
        let page = page.unwrap_or_else(|| Page::Name(name.clone()));

        Ok(Route {
            pattern: PathPattern::compile(&pattern)?,
            page: PageResolver::new(page)?,
            name,
            data,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Parameter names in pattern order
    pub fn keys(&self) -> Vec<&str> {
        self.pattern.keys().map(|key| key.name.as_str()).collect()
    }

    /// Matches a path and returns its decoded parameters
    ///
    /// Absent optional captures are left out of the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_routes::{Route, ParamValue};
    ///
    /// let route = Route::new(("user", "/user/:id")).unwrap();
    /// let params = route.match_path("/user/jane%20doe").unwrap();
    /// assert_eq!(params.get("id"), Some(&ParamValue::from("jane doe")));
    /// ```
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let captures = self.pattern.match_path(path)?;
        Some(
            self.pattern
                .keys()
                .zip(captures)
                .filter_map(|(key, raw)| {
                    raw.map(|raw| (key.name.clone(), ParamValue::Str(decode(raw))))
                })
                .collect(),
        )
    }

    /// Resolves the page identifier for a set of params
    pub fn page(&self, params: &Params) -> Result<String, RenderError> {
        self.page.resolve(&PageContext {
            params,
            name: &self.name,
            data: &self.data,
        })
    }

    /// Internal URL: page identifier plus the full param set as a querystring
    pub fn href(&self, params: &Params) -> Result<String, RenderError> {
        Ok(format!("{}?{}", self.page(params)?, to_querystring(params)))
    }

    /// Public URL: the rendered pattern plus the params it does not consume
    pub fn as_path(&self, params: &Params) -> Result<String, RenderError> {
        let path = self.pattern.to_path(params)?;

        let unconsumed: Params = params
            .iter()
            .filter(|(key, _)| !self.pattern.has_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let querystring = to_querystring(&unconsumed);
        if querystring.is_empty() {
            Ok(path)
        } else {
            Ok(format!("{path}?{querystring}"))
        }
    }

    pub fn urls(&self, params: &Params) -> Result<RouteUrls, RenderError> {
        Ok(RouteUrls {
            as_path: self.as_path(params)?,
            href: self.href(params)?,
        })
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.pattern.as_str() == other.pattern.as_str()
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

// File: src/handler.rs
// Purpose: Server-side dispatch of request URLs through the route table

use std::sync::Arc;

use crate::error::RenderError;
use crate::params::Params;
use crate::query::ParsedUrl;
use crate::route::Route;
use crate::table::RouteTable;

/// The page-rendering application behind the route table
pub trait PageApp {
    type Output;

    /// Renders a page with the merged query
    fn render(&self, page: &str, query: &Params) -> Self::Output;

    /// Handles a request no route matched
    fn handle_default(&self, parsed_url: &ParsedUrl) -> Self::Output;
}

/// Replaces the default render for matched routes
pub type CustomHandler<O> = Box<dyn Fn(&Route, &Params) -> O + Send + Sync>;

/// Dispatches request URLs to an app
///
/// A matched route renders its resolved page with the merged query (or goes
/// to the custom handler when one is set). Anything else is forwarded to
/// [`PageApp::handle_default`] with the parsed URL untouched.
pub struct RequestHandler<A: PageApp> {
    routes: Arc<RouteTable>,
    app: A,
    custom: Option<CustomHandler<A::Output>>,
}

impl<A: PageApp> RequestHandler<A> {
    pub fn new(routes: Arc<RouteTable>, app: A) -> Self {
        Self {
            routes,
            app,
            custom: None,
        }
    }

    pub fn with_custom_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Route, &Params) -> A::Output + Send + Sync + 'static,
    {
        self.custom = Some(Box::new(handler));
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    /// Handles one request URL
    ///
    /// Fails only when a page pattern cannot be rendered from the params.
    pub fn handle(&self, url: &str) -> Result<A::Output, RenderError> {
        let matched = self.routes.match_url(url);

        let Some(route) = matched.route else {
            tracing::debug!("No route for {}, using default handler", url);
            return Ok(self.app.handle_default(&matched.parsed_url));
        };

        if let Some(custom) = &self.custom {
            tracing::debug!("Dispatching {} to custom handler for {}", url, route.name());
            return Ok(custom(route, &matched.query));
        }

        let params = matched.params.unwrap_or_default();
        let page = route.page(&params)?;
        tracing::debug!("Dispatching {} to page {} ({})", url, page, route.name());
        Ok(self.app.render(&page, &matched.query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use crate::route::RouteOptions;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    enum Outcome {
        Rendered(String, Params),
        Default(String),
    }

    struct App;

    impl PageApp for App {
        type Output = Outcome;

        fn render(&self, page: &str, query: &Params) -> Outcome {
            Outcome::Rendered(page.to_string(), query.clone())
        }

        fn handle_default(&self, parsed_url: &ParsedUrl) -> Outcome {
            Outcome::Default(parsed_url.href.clone())
        }
    }

    fn handler() -> RequestHandler<App> {
        let mut routes = RouteTable::new();
        routes
            .add(("post", "/blog/:slug", "blog"))
            .unwrap()
            .add(
                RouteOptions::new("account")
                    .pattern("/account/:section?")
                    .page_fn(|ctx| match ctx.params.get("section").and_then(|v| v.as_str()) {
                        Some(section) => format!("/account/{section}"),
                        None => "/account/overview".to_string(),
                    }),
            )
            .unwrap();
        RequestHandler::new(Arc::new(routes), App)
    }

    #[test]
    fn test_matched_route_renders_page_with_merged_query() {
        let outcome = handler().handle("/blog/hello?ref=home").unwrap();
        assert_eq!(
            outcome,
            Outcome::Rendered(
                "/blog".to_string(),
                params! { "ref" => "home", "slug" => "hello" }
            )
        );
    }

    #[test]
    fn test_dynamic_page_resolves_from_params() {
        let outcome = handler().handle("/account").unwrap();
        assert_eq!(
            outcome,
            Outcome::Rendered("/account/overview".to_string(), Params::new())
        );
        let outcome = handler().handle("/account/billing").unwrap();
        assert!(matches!(outcome, Outcome::Rendered(page, _) if page == "/account/billing"));
    }

    #[test]
    fn test_unmatched_falls_through_to_default() {
        let outcome = handler().handle("/static/app.js?v=3").unwrap();
        assert_eq!(outcome, Outcome::Default("/static/app.js?v=3".to_string()));
    }

    #[test]
    fn test_custom_handler_replaces_render() {
        let handler = handler().with_custom_handler(|route, query| {
            Outcome::Rendered(format!("custom:{}", route.name()), query.clone())
        });
        let outcome = handler.handle("/blog/x").unwrap();
        assert_eq!(
            outcome,
            Outcome::Rendered("custom:post".to_string(), params! { "slug" => "x" })
        );
    }
}

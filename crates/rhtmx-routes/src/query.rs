// File: src/query.rs
// Purpose: Querystring synthesis, URL splitting and query/param merging

use crate::params::{ParamValue, Params};

/// Renders a parameter set as a querystring (without the leading `?`)
///
/// Keys keep their enumeration order, `Null` values are dropped, lists are
/// joined with `/` before encoding, and both keys and values are
/// percent-encoded.
///
/// Everything outside `A-Z a-z 0-9 - _ . ~` is escaped, including `!'()*`
/// which `encodeURIComponent` leaves as is (`it's` becomes `it%27s`).
/// Decoding accepts either form.
///
/// ```
/// use rhtmx_routes::{params, to_querystring, ParamValue};
///
/// let qs = to_querystring(&params! {
///     "a" => vec!["1", "2"],
///     "b" => ParamValue::Null,
///     "c" => "x y",
/// });
/// assert_eq!(qs, "a=1%2F2&c=x%20y");
/// ```
pub fn to_querystring(params: &Params) -> String {
    params
        .iter()
        .filter_map(|(key, value)| {
            value.joined().map(|value| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(&value)
                )
            })
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Parses a raw querystring into an ordered parameter set
///
/// `+` decodes to a space, a key without `=` maps to the empty string and a
/// repeated key accumulates into a list.
pub fn parse_query(search: &str) -> Params {
    search
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .fold(Params::new(), |mut query, (key, value)| {
            match query.get_mut(&key) {
                Some(ParamValue::List(values)) => values.push(value),
                Some(existing) => {
                    let first = existing.joined().unwrap_or_default();
                    *existing = ParamValue::List(vec![first, value]);
                }
                None => {
                    query.insert(key, ParamValue::Str(value));
                }
            }
            query
        })
}

/// Overlays matched path parameters onto an explicit query
///
/// Path parameters win on key collision; a colliding key keeps the position
/// it had in the query.
pub fn merge_query(query: &Params, params: Option<&Params>) -> Params {
    let mut merged = query.clone();
    if let Some(params) = params {
        for (key, value) in params {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// A request URL split into the parts the route table cares about
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUrl {
    /// The URL exactly as given
    pub href: String,
    /// Path component, `/` when the URL has none
    pub pathname: String,
    /// Raw querystring without the leading `?`
    pub search: Option<String>,
    /// Decoded explicit query parameters
    pub query: Params,
}

impl ParsedUrl {
    /// Splits a URL into pathname and query
    ///
    /// Scheme and authority of absolute URLs are stripped and any
    /// `#fragment` is discarded.
    ///
    /// ```
    /// use rhtmx_routes::{ParsedUrl, ParamValue};
    ///
    /// let url = ParsedUrl::parse("https://example.com/blog/hello?tag=rust#top");
    /// assert_eq!(url.pathname, "/blog/hello");
    /// assert_eq!(url.query.get("tag"), Some(&ParamValue::from("rust")));
    /// ```
    pub fn parse(url: &str) -> Self {
        let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
        let relative = strip_origin(without_fragment);

        let (path, search) = match relative.split_once('?') {
            Some((path, search)) => (path, Some(search)),
            None => (relative, None),
        };

        let pathname = if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        };

        ParsedUrl {
            href: url.to_string(),
            pathname,
            search: search.map(str::to_string),
            query: search.map(parse_query).unwrap_or_default(),
        }
    }
}

fn strip_origin(url: &str) -> &str {
    let Some(scheme_end) = url.find("://") else {
        return url;
    };
    // A "://" after the path started belongs to the path or query
    if url[..scheme_end].contains(['/', '?']) {
        return url;
    }
    let rest = &url[scheme_end + 3..];
    rest.find(['/', '?']).map_or("", |start| &rest[start..])
}

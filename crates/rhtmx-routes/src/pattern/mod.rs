//! Route pattern compilation
//!
//! A [`PathPattern`] is compiled once from a string like `/user/:id` and
//! then used in both directions: matching a path to raw captures, and
//! rendering a parameter set back into a concrete path.
//!
//! Captures are returned undecoded; percent-decoding belongs to
//! [`Route`](crate::Route).

use regex::Regex;

use crate::error::{RenderError, RouteError};
use crate::params::{ParamValue, Params};

pub mod token;

pub use token::{tokenize, Modifier, ParamToken, Token, DEFAULT_CONSTRAINT};

/// A compiled route pattern
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    tokens: Vec<Token>,
    regex: Regex,
    groups: Vec<String>,
}

impl PathPattern {
    /// Compiles a pattern string
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_routes::PathPattern;
    ///
    /// let pattern = PathPattern::compile("/user/:id").unwrap();
    /// assert_eq!(pattern.match_path("/user/5"), Some(vec![Some("5")]));
    /// assert_eq!(pattern.match_path("/user/5/posts"), None);
    /// ```
    pub fn compile(pattern: &str) -> Result<Self, RouteError> {
        if !pattern.starts_with('/') {
            return Err(RouteError::invalid_pattern(pattern, "must start with \"/\""));
        }

        let tokens = tokenize(pattern)?;
        let (source, groups) = build_regex(&tokens);
        let regex = Regex::new(&source)
            .map_err(|err| RouteError::invalid_pattern(pattern, err.to_string()))?;

        tracing::trace!("Compiled pattern {} into {}", pattern, source);

        Ok(PathPattern {
            source: pattern.to_string(),
            tokens,
            regex,
            groups,
        })
    }

    /// The pattern string this was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parameter slots in pattern order
    pub fn keys(&self) -> impl Iterator<Item = &ParamToken> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Param(param) => Some(param),
            Token::Literal(_) => None,
        })
    }

    /// Whether a parameter of this name is consumed by the path
    pub fn has_key(&self, name: &str) -> bool {
        self.keys().any(|key| key.name == name)
    }

    /// Tests a path against the whole pattern
    ///
    /// Returns one entry per parameter slot, in pattern order; an absent
    /// optional capture is `None`. A single trailing `/` on the path is
    /// tolerated.
    pub fn match_path<'p>(&self, path: &'p str) -> Option<Vec<Option<&'p str>>> {
        let captures = self.regex.captures(path)?;
        Some(
            self.groups
                .iter()
                .map(|group| captures.name(group).map(|m| m.as_str()))
                .collect(),
        )
    }

    /// Renders the pattern with the given parameters
    ///
    /// Each substituted segment is percent-encoded and checked against the
    /// slot's constraint. Absent optional slots are omitted together with
    /// their `/` prefix; the shortest possible result is `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_routes::{params, PathPattern, RenderError};
    ///
    /// let pattern = PathPattern::compile("/docs/:section/:page*").unwrap();
    /// let path = pattern.to_path(&params! { "section" => "guide", "page" => vec!["a", "b c"] });
    /// assert_eq!(path.unwrap(), "/docs/guide/a/b%20c");
    ///
    /// let missing = pattern.to_path(&params! {});
    /// assert_eq!(missing, Err(RenderError::MissingParameter { name: "section".into() }));
    /// ```
    pub fn to_path(&self, params: &Params) -> Result<String, RenderError> {
        let mut path = String::new();

        for token in &self.tokens {
            let param = match token {
                Token::Literal(text) => {
                    path.push_str(text);
                    continue;
                }
                Token::Param(param) => param,
            };

            let segments = segments_for(param, params.get(&param.name))?;
            if segments.is_empty() {
                if param.modifier.is_optional() {
                    continue;
                }
                return Err(RenderError::EmptyList {
                    name: param.name.clone(),
                });
            }

            for (index, segment) in segments.iter().enumerate() {
                let encoded = urlencoding::encode(segment);
                if !param.accepts(&encoded) {
                    return Err(RenderError::InvalidParameter {
                        name: param.name.clone(),
                        value: segment.to_string(),
                        constraint: param.constraint.clone(),
                    });
                }
                path.push_str(if index == 0 { param.prefix.as_str() } else { "/" });
                path.push_str(&encoded);
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

/// Picks the raw segments a slot renders, before encoding
fn segments_for<'v>(
    param: &ParamToken,
    value: Option<&'v ParamValue>,
) -> Result<Vec<&'v str>, RenderError> {
    let missing = || {
        if param.modifier.is_optional() {
            Ok(Vec::new())
        } else {
            Err(RenderError::MissingParameter {
                name: param.name.clone(),
            })
        }
    };

    match value {
        None | Some(ParamValue::Null) => missing(),
        Some(ParamValue::Str(value)) if value.is_empty() && param.modifier.is_optional() => {
            Ok(Vec::new())
        }
        Some(ParamValue::Str(value)) if param.modifier.is_repeat() => {
            Ok(value.split('/').collect())
        }
        Some(ParamValue::Str(value)) => Ok(vec![value.as_str()]),
        Some(ParamValue::List(values)) if param.modifier.is_repeat() => {
            Ok(values.iter().map(String::as_str).collect())
        }
        Some(ParamValue::List(_)) => Err(RenderError::UnexpectedList {
            name: param.name.clone(),
        }),
    }
}

/// Builds the anchored matcher source and the capture group name per slot
fn build_regex(tokens: &[Token]) -> (String, Vec<String>) {
    let mut source = String::from("^");
    let mut groups = Vec::new();

    for token in tokens {
        match token {
            Token::Literal(text) => source.push_str(&regex::escape(text)),
            Token::Param(param) => {
                let group = format!("p{}", groups.len());
                let prefix = regex::escape(&param.prefix);
                let single = format!("(?:{})", param.constraint);
                let capture = if param.modifier.is_repeat() {
                    format!("(?P<{group}>{single}(?:/{single})*)")
                } else {
                    format!("(?P<{group}>{single})")
                };

                if !param.modifier.is_optional() {
                    source.push_str(&prefix);
                    source.push_str(&capture);
                } else if prefix.is_empty() {
                    source.push_str(&capture);
                    source.push('?');
                } else {
                    source.push_str(&format!("(?:{prefix}{capture})?"));
                }
                groups.push(group);
            }
        }
    }

    // Non-strict: one trailing slash is optional
    if source.ends_with('/') {
        source.pop();
    }
    source.push_str("/?$");

    (source, groups)
}

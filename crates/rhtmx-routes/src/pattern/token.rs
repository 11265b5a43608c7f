//! Tokenizer for route pattern strings
//!
//! Splits a pattern such as `/docs/:section(\w+)/:page*` into literal text
//! and named parameter slots. A `/` directly in front of a parameter becomes
//! that parameter's prefix, so it disappears together with an absent
//! optional parameter and separates repeated segments.

use regex::Regex;

use crate::error::RouteError;

/// Capture constraint used when a parameter declares none: one non-slash segment
pub const DEFAULT_CONSTRAINT: &str = "[^/]+?";

/// Arity of a parameter slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `:name`
    One,
    /// `:name?`
    Optional,
    /// `:name*`
    ZeroOrMore,
    /// `:name+`
    OneOrMore,
}

impl Modifier {
    pub fn is_optional(self) -> bool {
        matches!(self, Modifier::Optional | Modifier::ZeroOrMore)
    }

    pub fn is_repeat(self) -> bool {
        matches!(self, Modifier::ZeroOrMore | Modifier::OneOrMore)
    }
}

/// A named parameter slot
#[derive(Debug, Clone)]
pub struct ParamToken {
    pub name: String,
    pub prefix: String,
    pub constraint: String,
    pub modifier: Modifier,
    validator: Regex,
}

impl ParamToken {
    /// Checks an already-encoded segment against the capture constraint
    pub fn accepts(&self, segment: &str) -> bool {
        self.validator.is_match(segment)
    }
}

impl PartialEq for ParamToken {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.prefix == other.prefix
            && self.constraint == other.constraint
            && self.modifier == other.modifier
    }
}

/// One piece of a compiled pattern
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(String),
    Param(ParamToken),
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits a pattern into tokens
///
/// Fails on a `:` without a name, an unterminated constraint group, an
/// invalid constraint regex, a dangling `\` or a duplicated parameter name.
pub fn tokenize(pattern: &str) -> Result<Vec<Token>, RouteError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => literal.push(escaped),
                None => return Err(RouteError::invalid_pattern(pattern, "dangling escape")),
            },
            ':' => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if !is_name_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }

                if name.is_empty() {
                    return Err(RouteError::invalid_pattern(
                        pattern,
                        "\":\" must be followed by a parameter name",
                    ));
                }

                let constraint = if chars.peek() == Some(&'(') {
                    chars.next();
                    read_group(pattern, &name, &mut chars)?
                } else {
                    DEFAULT_CONSTRAINT.to_string()
                };

                let modifier = match chars.peek() {
                    Some('?') => Modifier::Optional,
                    Some('*') => Modifier::ZeroOrMore,
                    Some('+') => Modifier::OneOrMore,
                    _ => Modifier::One,
                };
                if modifier != Modifier::One {
                    chars.next();
                }

                if tokens
                    .iter()
                    .any(|token| matches!(token, Token::Param(p) if p.name == name))
                {
                    return Err(RouteError::invalid_pattern(
                        pattern,
                        format!("duplicate parameter name \"{name}\""),
                    ));
                }

                let prefix = if literal.ends_with('/') {
                    literal.pop();
                    "/".to_string()
                } else {
                    String::new()
                };
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }

                let validator = Regex::new(&format!("^(?:{constraint})$")).map_err(|err| {
                    RouteError::invalid_pattern(
                        pattern,
                        format!("invalid constraint for \"{name}\": {err}"),
                    )
                })?;

                tokens.push(Token::Param(ParamToken {
                    name,
                    prefix,
                    constraint,
                    modifier,
                    validator,
                }));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    Ok(tokens)
}

/// Reads a parenthesised constraint, the opening `(` already consumed
fn read_group(
    pattern: &str,
    name: &str,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<String, RouteError> {
    let mut depth = 1;
    let mut group = String::new();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                group.push(c);
                if let Some(escaped) = chars.next() {
                    group.push(escaped);
                }
            }
            '(' => {
                depth += 1;
                group.push(c);
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    if group.is_empty() {
                        return Err(RouteError::invalid_pattern(
                            pattern,
                            format!("empty constraint for \"{name}\""),
                        ));
                    }
                    return Ok(group);
                }
                group.push(c);
            }
            _ => group.push(c),
        }
    }

    Err(RouteError::invalid_pattern(
        pattern,
        format!("unbalanced constraint for \"{name}\""),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(token: &Token) -> &ParamToken {
        match token {
            Token::Param(p) => p,
            Token::Literal(text) => panic!("expected parameter, got literal {text:?}"),
        }
    }

    #[test]
    fn test_tokenize_static() {
        let tokens = tokenize("/about/team").unwrap();
        assert_eq!(tokens, vec![Token::Literal("/about/team".to_string())]);
    }

    #[test]
    fn test_tokenize_required_param_takes_slash_prefix() {
        let tokens = tokenize("/user/:id").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], Token::Literal("/user".to_string()));
        let id = param(&tokens[1]);
        assert_eq!(id.name, "id");
        assert_eq!(id.prefix, "/");
        assert_eq!(id.constraint, DEFAULT_CONSTRAINT);
        assert_eq!(id.modifier, Modifier::One);
    }

    #[test]
    fn test_tokenize_modifiers() {
        let tokens = tokenize("/:a?/:b*/:c+").unwrap();
        let modifiers: Vec<Modifier> = tokens.iter().map(|t| param(t).modifier).collect();
        assert_eq!(
            modifiers,
            vec![Modifier::Optional, Modifier::ZeroOrMore, Modifier::OneOrMore]
        );
    }

    #[test]
    fn test_tokenize_custom_constraint() {
        let tokens = tokenize("/:lang(en|es)/post/:id(\\d+)").unwrap();
        assert_eq!(param(&tokens[0]).constraint, "en|es");
        assert_eq!(param(&tokens[2]).constraint, "\\d+");
        assert!(param(&tokens[2]).accepts("42"));
        assert!(!param(&tokens[2]).accepts("4x"));
    }

    #[test]
    fn test_tokenize_nested_group() {
        let tokens = tokenize("/:file((?:[a-z]+)\\.txt)").unwrap();
        assert_eq!(param(&tokens[0]).constraint, "(?:[a-z]+)\\.txt");
    }

    #[test]
    fn test_tokenize_param_without_slash_prefix() {
        let tokens = tokenize("/files/:name.:ext").unwrap();
        assert_eq!(param(&tokens[1]).prefix, "/");
        assert_eq!(tokens[2], Token::Literal(".".to_string()));
        assert_eq!(param(&tokens[3]).prefix, "");
    }

    #[test]
    fn test_tokenize_escaped_colon() {
        let tokens = tokenize("/time/12\\:30").unwrap();
        assert_eq!(tokens, vec![Token::Literal("/time/12:30".to_string())]);
    }

    #[test]
    fn test_tokenize_errors() {
        assert!(matches!(
            tokenize("/user/:"),
            Err(RouteError::InvalidPattern { .. })
        ));
        assert!(matches!(
            tokenize("/user/:id(\\d+"),
            Err(RouteError::InvalidPattern { .. })
        ));
        assert!(matches!(
            tokenize("/user/:id()"),
            Err(RouteError::InvalidPattern { .. })
        ));
        assert!(matches!(
            tokenize("/user/:id([)"),
            Err(RouteError::InvalidPattern { .. })
        ));
        assert!(matches!(
            tokenize("/:id/posts/:id"),
            Err(RouteError::InvalidPattern { .. })
        ));
    }
}

// File: src/error.rs
// Purpose: Registration and URL rendering errors

use thiserror::Error;

/// Configuration errors, raised synchronously while the table is being built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Missing name to render for route \"{pattern}\"")]
    MissingName { pattern: String },

    #[error("Route \"{name}\" already exists")]
    DuplicateName { name: String },

    #[error("Invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Page for route \"{name}\" must be a string or a function, got {found}")]
    InvalidPage { name: String, found: String },
}

impl RouteError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while rendering a pattern back into a concrete path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Expected \"{name}\" to be defined")]
    MissingParameter { name: String },

    #[error("Expected \"{name}\" to match \"{constraint}\", got \"{value}\"")]
    InvalidParameter {
        name: String,
        value: String,
        constraint: String,
    },

    #[error("Expected \"{name}\" to not repeat, got a list")]
    UnexpectedList { name: String },

    #[error("Expected \"{name}\" to not be empty")]
    EmptyList { name: String },
}

/// Either kind of failure, for adapters that both register and render
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

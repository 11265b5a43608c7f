// File: src/config.rs
// Purpose: Declarative route tables from routes.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::RouteError;
use crate::route::{Page, RouteOptions};
use crate::table::RouteTable;

/// Route table file
///
/// ```toml
/// [[routes]]
/// name = "user"
/// pattern = "/user/:id"
/// page = "profile"
/// data = { title = "Profile" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// One `[[routes]]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub pattern: Option<String>,

    /// Kept untyped so a non-string page is reported as a route error
    #[serde(default)]
    pub page: Option<toml::Value>,

    #[serde(default)]
    pub data: Option<toml::Value>,
}

impl RouteConfig {
    fn into_options(self) -> Result<RouteOptions> {
        let page = match self.page {
            None => None,
            Some(toml::Value::String(page)) => Some(Page::Name(page)),
            Some(other) => {
                return Err(RouteError::InvalidPage {
                    name: self
                        .name
                        .or(self.pattern)
                        .unwrap_or_else(|| "<unnamed>".to_string()),
                    found: other.type_str().to_string(),
                }
                .into());
            }
        };

        let data = match self.data {
            Some(data) => serde_json::to_value(data).context("Failed to convert route data")?,
            None => serde_json::Value::Null,
        };

        Ok(RouteOptions {
            name: self.name,
            pattern: self.pattern,
            page,
            data,
        })
    }
}

impl RoutesConfig {
    /// Parses a routes file already read into memory
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse routes config")
    }

    /// Load route declarations from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // A missing or empty file declares no routes
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read routes file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse routes file: {:?}", path))
    }

    /// Load route declarations from ./routes.toml
    pub fn load_default() -> Result<Self> {
        Self::load("routes.toml")
    }

    /// Registers every declared route, in file order
    pub fn into_table(self) -> Result<RouteTable> {
        let mut table = RouteTable::new();
        for (index, route) in self.routes.into_iter().enumerate() {
            let options = route
                .into_options()
                .with_context(|| format!("Invalid route #{}", index + 1))?;
            table
                .add(options)
                .with_context(|| format!("Invalid route #{}", index + 1))?;
        }
        tracing::debug!("Loaded {} routes from config", table.len());
        Ok(table)
    }
}

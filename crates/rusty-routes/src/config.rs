// File: src/config.rs
// Purpose: Route table configuration parsed from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::router::{Router, DEFAULT_VALUE};

/// Route table configuration
///
/// ```toml
/// default_value = "default"
/// sort_rules = true
///
/// [[routes]]
/// name = "blogPost"
/// pattern = '/blog/post/:post_id?|^[0-9]+$'
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Literal used for unsupplied required parameters (default: "default")
    #[serde(default = "default_value")]
    pub default_value: String,

    /// Whether to sort rules by specificity after loading (default: false)
    #[serde(default = "default_false")]
    pub sort_rules: bool,

    /// Routes in registration order
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// One named route pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub name: String,
    pub pattern: String,
}

fn default_value() -> String {
    DEFAULT_VALUE.to_string()
}

fn default_false() -> bool {
    false
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_value: default_value(),
            sort_rules: false,
            routes: Vec::new(),
        }
    }
}

impl RouterConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read router config: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse router config: {:?}", path))
    }

    /// Parse configuration from TOML text; blank text yields the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: RouterConfig =
            toml::from_str(content).context("Invalid router config TOML")?;

        Ok(config)
    }

    /// Compile every route into a new router
    pub fn build_router(&self) -> Result<Router> {
        let mut router = Router::new().with_default_value(self.default_value.as_str());

        for entry in &self.routes {
            router
                .route(entry.name.as_str(), entry.pattern.as_str())
                .with_context(|| format!("Invalid route `{}`", entry.name))?;
        }

        if self.sort_rules {
            router.sort_rules();
        }

        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTES: &str = r#"
default_value = "none"
sort_rules = true

[[routes]]
name = "userShow"
pattern = "/users/:id"

[[routes]]
name = "userNew"
pattern = "/users/new"

[[routes]]
name = "blogPost"
pattern = '/blog/post/:post_id?|^[0-9]+$'
"#;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert_eq!(config.default_value, "default");
        assert!(!config.sort_rules);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_blank_toml_is_default() {
        let config = RouterConfig::from_toml_str("  \n").unwrap();
        assert_eq!(config.default_value, "default");
    }

    #[test]
    fn test_parse_routes() {
        let config = RouterConfig::from_toml_str(ROUTES).unwrap();
        assert_eq!(config.default_value, "none");
        assert!(config.sort_rules);
        assert_eq!(config.routes.len(), 3);
        assert_eq!(
            config.routes[2],
            RouteEntry {
                name: "blogPost".to_string(),
                pattern: "/blog/post/:post_id?|^[0-9]+$".to_string(),
            }
        );
    }

    #[test]
    fn test_build_router_sorts_and_uses_default_value() {
        let router = RouterConfig::from_toml_str(ROUTES)
            .unwrap()
            .build_router()
            .unwrap();

        assert_eq!(router.rules()[0].name(), "userNew");
        assert_eq!(router.default_value(), "none");
        assert_eq!(router.match_route("/users/new").unwrap().route_name(), "userNew");
        assert_eq!(router.url_for_params("userShow", &[]).as_deref(), Some("/users/none"));
    }

    #[test]
    fn test_build_router_reports_bad_route() {
        let config = RouterConfig::from_toml_str(
            r#"
[[routes]]
name = "files"
pattern = "/:a*/:b*"
"#,
        )
        .unwrap();

        let err = config.build_router().unwrap_err();
        assert!(err.to_string().contains("Invalid route `files`"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(RouterConfig::from_toml_str("routes = 5").is_err());
    }
}

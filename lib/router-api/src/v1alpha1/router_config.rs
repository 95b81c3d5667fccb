use super::{RouteSpec, API_GROUP, API_VERSION};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// RouterConfig is the declarative route table of the application together
/// with the history base path and path matching options
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterConfig {
    /// Configuration format version ("router.datum.net/v1alpha1")
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Application base path, stripped before matching
    #[serde(default = "default_base")]
    pub base: String,

    /// Reject a trailing slash on otherwise matching paths
    #[serde(default)]
    pub strict: bool,

    /// Compare static path segments case-sensitively
    #[serde(default)]
    pub sensitive: bool,

    /// Ordered route table; earlier routes win when patterns overlap
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteSpec>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            base: default_base(),
            strict: false,
            sensitive: false,
            routes: default_routes(),
        }
    }
}

impl RouterConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: RouterConfig =
            serde_yaml::from_str(contents).context("Failed to parse router configuration")?;

        if config.api_version != default_api_version() {
            bail!(
                "Unsupported apiVersion {:?}, expected {:?}",
                config.api_version,
                default_api_version()
            );
        }

        debug!("Parsed router configuration with {} routes", config.routes.len());
        Ok(config)
    }

    /// Load a configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read router configuration from {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Invalid router configuration in {}", path.display()))
    }

    /// Override the base path (e.g. from the environment)
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }
}

fn default_api_version() -> String {
    format!("{}/{}", API_GROUP, API_VERSION)
}

fn default_base() -> String {
    "/".to_string()
}

fn default_routes() -> Vec<RouteSpec> {
    vec![
        RouteSpec::new("/", "home", "HomeView"),
        RouteSpec::new("/room/:roomId", "room", "RoomView").with_props(),
    ]
}

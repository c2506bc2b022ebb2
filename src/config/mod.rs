// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::controller::RoutingDefaults;
use crate::route::template::{ModulePolicy, DEFAULT_BASE_TEMPLATE, USER_PATH};

pub const PROD: &str = "prod";
pub const DEV: &str = "dev";
pub const TEST: &str = "test";

const DEFAULT_API_NAME: &str = "routable";
const DEFAULT_PORT: &str = "8020";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Root {
    #[serde(rename = "routable")]
    pub routable: RoutableBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutableBox {
    pub env: String,
    pub logs: Option<Logs>,
    pub api: Option<Api>,
    pub server: Option<Server>,
    pub routing: Option<Routing>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Api {
    pub name: Option<String>,
    pub port: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Server {
    #[serde(rename = "request_timeout", default, with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
    #[serde(rename = "shutdown_timeout", default, with = "humantime_serde")]
    pub shutdown_timeout: Option<Duration>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Routing {
    #[serde(rename = "base_template")]
    pub base_template: Option<String>,
    #[serde(rename = "default_version")]
    pub default_version: Option<String>,
    #[serde(rename = "on_missing_module")]
    pub on_missing_module: Option<ModulePolicy>,
    pub separator: Option<char>,
}

/// Read access to the configuration.
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    fn is_dev(&self) -> bool;
    fn is_test(&self) -> bool;
    fn api(&self) -> Option<&Api>;
    fn api_name(&self) -> &str;
    fn port(&self) -> String;
    fn request_timeout(&self) -> Duration;
    fn shutdown_timeout(&self) -> Duration;
    fn routing(&self) -> Option<&Routing>;
    fn routing_defaults(&self) -> RoutingDefaults;
}

// Config type alias for convenience
pub type Config = Root;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.routable.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.routable.env == PROD
    }

    fn is_dev(&self) -> bool {
        self.routable.env == DEV
    }

    fn is_test(&self) -> bool {
        self.routable.env == TEST
    }

    fn api(&self) -> Option<&Api> {
        self.routable.api.as_ref()
    }

    fn api_name(&self) -> &str {
        self.api()
            .and_then(|api| api.name.as_deref())
            .unwrap_or(DEFAULT_API_NAME)
    }

    /// Port with a leading ':', as the listener address expects it.
    fn port(&self) -> String {
        let port = self
            .api()
            .and_then(|api| api.port.as_deref())
            .unwrap_or(DEFAULT_PORT);
        if port.starts_with(':') {
            port.to_string()
        } else {
            format!(":{}", port)
        }
    }

    fn request_timeout(&self) -> Duration {
        self.routable
            .server
            .as_ref()
            .and_then(|s| s.request_timeout)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    fn shutdown_timeout(&self) -> Duration {
        self.routable
            .server
            .as_ref()
            .and_then(|s| s.shutdown_timeout)
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT)
    }

    fn routing(&self) -> Option<&Routing> {
        self.routable.routing.as_ref()
    }

    fn routing_defaults(&self) -> RoutingDefaults {
        let mut defaults = RoutingDefaults::default();
        if let Some(routing) = self.routing() {
            if let Some(ref template) = routing.base_template {
                defaults.base_template = template.clone();
            }
            if let Some(ref version) = routing.default_version {
                defaults.version = version.clone();
            }
            if let Some(policy) = routing.on_missing_module {
                defaults.module_policy = policy;
            }
            if let Some(separator) = routing.separator {
                defaults.separator = separator;
            }
        }
        defaults
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        // Read file
        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::parse(&data).with_context(|| format!("load config from {:?}", abs_path))
    }

    /// Parses and validates a YAML document.
    pub fn parse(data: &str) -> Result<Self> {
        let cfg: Root = serde_yaml::from_str(data).context("unmarshal yaml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        match self.routable.env.as_str() {
            PROD | DEV | TEST => {}
            other => anyhow::bail!("unknown env {:?}, expected one of prod, dev, test", other),
        }

        if let Some(routing) = self.routing() {
            let template = routing
                .base_template
                .as_deref()
                .unwrap_or(DEFAULT_BASE_TEMPLATE);
            if !template.contains(USER_PATH) {
                anyhow::bail!(
                    "routing.base_template {:?} must contain {}",
                    template,
                    USER_PATH
                );
            }
            if let Some(ref version) = routing.default_version {
                if version.trim().is_empty() {
                    anyhow::bail!("routing.default_version must not be empty");
                }
            }
            if let Some(separator) = routing.separator {
                if separator == '/' || separator == '{' || separator == '}' {
                    anyhow::bail!("routing.separator {:?} would break path templates", separator);
                }
            }
        }

        self.port()
            .trim_start_matches(':')
            .parse::<u16>()
            .with_context(|| format!("api.port {:?} is not a valid port", self.port()))?;

        Ok(())
    }
}

// Test config is always available for integration tests
mod test_config;
pub use test_config::new_test_config;

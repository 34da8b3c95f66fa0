//! Configuration for the LocalStack container.
//!
//! Defaults match the LocalStack release whose per-service ports make up the
//! [`Service`] catalog. Every value can be overridden through environment
//! variables so CI can pin another image without code changes.

use std::env;

use crate::error::LocalStackResult;
use crate::service::{Service, parse_services};

/// Image repository of the LocalStack container.
pub const IMAGE_NAME: &str = "localstack/localstack";

/// Default image tag.
pub const DEFAULT_VERSION: &str = "0.9.6";

/// Docker socket bound into the container so LocalStack can launch sibling
/// containers (e.g. for Lambda).
pub const DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// LocalStack container configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStackConfig {
    /// Image repository.
    pub image: String,
    /// Image tag.
    pub version: String,
    /// Host path of the docker socket bound into the container.
    pub docker_socket: String,
    /// Whether to run LocalStack with `DEBUG=1`.
    pub debug: bool,
    /// Services selected before any `with_services` call.
    pub services: Vec<Service>,
}

impl Default for LocalStackConfig {
    fn default() -> Self {
        Self {
            image: IMAGE_NAME.to_owned(),
            version: DEFAULT_VERSION.to_owned(),
            docker_socket: DOCKER_SOCKET.to_owned(),
            debug: true,
            services: Vec::new(),
        }
    }
}

impl LocalStackConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `LOCALSTACK_IMAGE` | `localstack/localstack` |
    /// | `LOCALSTACK_VERSION` | `0.9.6` |
    /// | `LOCALSTACK_DOCKER_SOCKET` | `/var/run/docker.sock` |
    /// | `LOCALSTACK_DEBUG` | `true` |
    /// | `LOCALSTACK_SERVICES` | *(empty)* |
    ///
    /// # Errors
    /// Returns an error if `LOCALSTACK_SERVICES` names an unknown service.
    pub fn from_env() -> LocalStackResult<Self> {
        let mut config = Self::default();

        if let Some(v) = env_non_empty("LOCALSTACK_IMAGE") {
            config.image = v;
        }
        if let Some(v) = env_non_empty("LOCALSTACK_VERSION") {
            config.version = v;
        }
        if let Some(v) = env_non_empty("LOCALSTACK_DOCKER_SOCKET") {
            config.docker_socket = v;
        }
        config.debug = env_bool("LOCALSTACK_DEBUG", config.debug);
        if let Ok(v) = env::var("LOCALSTACK_SERVICES") {
            config.services = parse_services(&v)?;
        }

        Ok(config)
    }

    /// Same configuration with another image tag.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key).map_or(default, |v| {
        matches!(v.as_str(), "1" | "true" | "yes" | "TRUE" | "YES")
    })
}

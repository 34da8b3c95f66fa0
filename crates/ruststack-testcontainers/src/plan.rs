//! Container launch plan.
//!
//! [`ContainerPlan`] is the fully resolved description of the LocalStack
//! container for a given service selection: image, environment, exposed
//! ports, bind mounts and readiness condition. It is plain data so the launch
//! options can be inspected without a docker daemon; [`ContainerPlan::into_request`]
//! hands it to testcontainers.

use testcontainers::core::{IntoContainerPort, Mount, WaitFor};
use testcontainers::{ContainerRequest, GenericImage, ImageExt};

use crate::config::LocalStackConfig;
use crate::error::{LocalStackError, LocalStackResult};
use crate::service::Service;

/// Log line LocalStack prints once every requested service is up.
pub const READY_MESSAGE: &str = "Ready.";

/// A host path bound into the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindMount {
    /// Path on the docker host.
    pub host: String,
    /// Path inside the container.
    pub container: String,
}

/// Resolved launch options for a LocalStack container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerPlan {
    /// Image repository.
    pub image: String,
    /// Image tag.
    pub tag: String,
    /// Environment variables, in the order they are set.
    pub env: Vec<(String, String)>,
    /// Container ports to publish, one per selected service.
    pub exposed_ports: Vec<u16>,
    /// Bind mounts.
    pub binds: Vec<BindMount>,
    /// Stdout message that marks the container as ready.
    pub ready_message: &'static str,
}

impl ContainerPlan {
    /// Build the plan for `services` under `config`.
    ///
    /// Services keep their insertion order; repeated entries are collapsed to
    /// the first occurrence. `SERVICES` is the comma-joined list of their
    /// LocalStack names.
    ///
    /// # Errors
    /// Returns [`LocalStackError::Config`] if `services` is empty.
    pub fn new(config: &LocalStackConfig, services: &[Service]) -> LocalStackResult<Self> {
        let services = dedup_services(services);
        if services.is_empty() {
            return Err(LocalStackError::Config(
                "services list must not be empty".to_owned(),
            ));
        }

        let mut env = Vec::with_capacity(2);
        if config.debug {
            env.push(("DEBUG".to_owned(), "1".to_owned()));
        }
        env.push((
            "SERVICES".to_owned(),
            services
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(","),
        ));

        Ok(Self {
            image: config.image.clone(),
            tag: config.version.clone(),
            env,
            exposed_ports: services.iter().map(|s| s.port()).collect(),
            binds: vec![BindMount {
                host: config.docker_socket.clone(),
                container: crate::config::DOCKER_SOCKET.to_owned(),
            }],
            ready_message: READY_MESSAGE,
        })
    }

    /// Value of an environment variable in the plan.
    #[must_use]
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Translate the plan into a testcontainers request.
    #[must_use]
    pub fn into_request(self) -> ContainerRequest<GenericImage> {
        let Self {
            image,
            tag,
            env,
            exposed_ports,
            binds,
            ready_message,
        } = self;

        let image = exposed_ports.into_iter().fold(
            GenericImage::new(image, tag).with_wait_for(WaitFor::message_on_stdout(ready_message)),
            |image, port| image.with_exposed_port(port.tcp()),
        );

        let request = binds
            .into_iter()
            .fold(ContainerRequest::from(image), |request, bind| {
                request.with_mount(Mount::bind_mount(bind.host, bind.container))
            });

        env.into_iter()
            .fold(request, |request, (key, value)| request.with_env_var(key, value))
    }
}

fn dedup_services(services: &[Service]) -> Vec<Service> {
    let mut unique = Vec::with_capacity(services.len());
    for service in services {
        if !unique.contains(service) {
            unique.push(*service);
        }
    }
    unique
}

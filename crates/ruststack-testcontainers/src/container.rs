//! LocalStack container configuration and the started container handle.
//!
//! [`LocalStackContainer`] collects the services to emulate along with the
//! credentials and region clients should use. [`LocalStackContainer::start`]
//! validates the selection, launches the container and returns a
//! [`RunningLocalStack`], which resolves endpoints and builds clients.

use std::any::type_name;
use std::fmt;

use http::Uri;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};
use tracing::{debug, info};

use crate::config::LocalStackConfig;
use crate::endpoint::{ContainerEndpoint, resolve_endpoint_uri};
use crate::error::{LocalStackError, LocalStackResult};
use crate::plan::ContainerPlan;
use crate::registry::ClientRegistry;
use crate::sdk::SdkFlavor;
use crate::service::Service;

/// Configuration of a LocalStack container for SDK flavor `S`.
pub struct LocalStackContainer<S: SdkFlavor> {
    config: LocalStackConfig,
    services: Vec<Service>,
    credentials_provider: S::CredentialsProvider,
    region: S::Region,
    registry: ClientRegistry<S::Builder>,
}

impl<S: SdkFlavor> LocalStackContainer<S> {
    /// Container with the default image version.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(LocalStackConfig::default())
    }

    /// Container with the given image version.
    #[must_use]
    pub fn with_version(version: impl Into<String>) -> Self {
        Self::from_config(LocalStackConfig::default().with_version(version))
    }

    /// Container configured from `LOCALSTACK_*` environment variables.
    pub fn from_env() -> LocalStackResult<Self> {
        LocalStackConfig::from_env().map(Self::from_config)
    }

    /// Container with an explicit configuration.
    ///
    /// Services listed in `config.services` are preselected.
    #[must_use]
    pub fn from_config(mut config: LocalStackConfig) -> Self {
        let services = std::mem::take(&mut config.services);
        Self {
            config,
            services,
            credentials_provider: S::default_credentials_provider(),
            region: S::default_region(),
            registry: S::default_registry(),
        }
    }

    /// Declare services the container should emulate.
    #[must_use]
    pub fn with_services(mut self, services: impl IntoIterator<Item = Service>) -> Self {
        self.add_services(services);
        self
    }

    /// Append services to the selection. Validation happens at start.
    pub fn add_services(&mut self, services: impl IntoIterator<Item = Service>) {
        self.services.extend(services);
    }

    /// Credentials provider handed to clients.
    #[must_use]
    pub fn with_credentials_provider(mut self, provider: S::CredentialsProvider) -> Self {
        self.credentials_provider = provider;
        self
    }

    /// Region handed to clients.
    #[must_use]
    pub fn with_region(mut self, region: S::Region) -> Self {
        self.region = region;
        self
    }

    /// Register the builder factory for an additional client type `C`.
    #[must_use]
    pub fn with_client<C, F>(mut self, factory: F) -> Self
    where
        C: 'static,
        F: Fn() -> Box<S::Builder> + Send + Sync + 'static,
    {
        self.registry.register::<C, F>(factory);
        self
    }

    /// The selected services, in insertion order.
    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Whether `service` is part of the selection.
    #[must_use]
    pub fn is_active(&self, service: Service) -> bool {
        self.services.contains(&service)
    }

    /// Credentials provider handed to clients.
    #[must_use]
    pub fn credentials_provider(&self) -> &S::CredentialsProvider {
        &self.credentials_provider
    }

    /// Region handed to clients.
    #[must_use]
    pub fn region(&self) -> &S::Region {
        &self.region
    }

    /// The container configuration.
    #[must_use]
    pub fn config(&self) -> &LocalStackConfig {
        &self.config
    }

    /// Client builder registry.
    #[must_use]
    pub fn registry(&self) -> &ClientRegistry<S::Builder> {
        &self.registry
    }

    /// Resolve the launch options for the current selection.
    ///
    /// # Errors
    /// Returns [`LocalStackError::Config`] if no service is selected.
    pub fn container_plan(&self) -> LocalStackResult<ContainerPlan> {
        ContainerPlan::new(&self.config, &self.services)
    }

    /// Fail unless `service` is part of the selection.
    pub fn validate_service(&self, service: Service) -> LocalStackResult<()> {
        if self.is_active(service) {
            Ok(())
        } else {
            Err(LocalStackError::InactiveService(service))
        }
    }

    /// Fresh builder for client type `C`, talking to `service`.
    ///
    /// # Errors
    /// Returns [`LocalStackError::InactiveService`] if `service` is not selected
    /// and [`LocalStackError::UnsupportedBuilder`] if `C` is not registered.
    pub fn builder_for<C: 'static>(&self, service: Service) -> LocalStackResult<Box<S::Builder>> {
        self.validate_service(service)?;
        self.registry.builder::<C>()
    }

    /// Launch the container and wait until LocalStack reports readiness.
    ///
    /// The configuration is validated before docker is contacted.
    pub async fn start(self) -> LocalStackResult<RunningLocalStack<S>> {
        let plan = self.container_plan()?;
        info!(
            image = %plan.image,
            tag = %plan.tag,
            services = ?plan.env_var("SERVICES"),
            sdk = %S::VERSION,
            "starting LocalStack container",
        );

        let container = plan.into_request().start().await?;
        info!(id = %container.id(), "LocalStack container ready");

        Ok(RunningLocalStack {
            config: self,
            container,
        })
    }

    /// Bind this configuration to an already running container.
    ///
    /// The selection is validated as in [`start`](Self::start).
    pub fn attach<E: ContainerEndpoint>(
        self,
        container: E,
    ) -> LocalStackResult<RunningLocalStack<S, E>> {
        self.container_plan()?;
        Ok(RunningLocalStack {
            config: self,
            container,
        })
    }
}

impl<S: SdkFlavor> Default for LocalStackContainer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SdkFlavor> fmt::Debug for LocalStackContainer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStackContainer")
            .field("sdk", &S::VERSION)
            .field("config", &self.config)
            .field("services", &self.services)
            .field("credentials_provider", &self.credentials_provider)
            .field("region", &self.region)
            .field("registry", &self.registry)
            .finish()
    }
}

/// A started LocalStack container.
///
/// Dropping the handle stops and removes the container.
pub struct RunningLocalStack<S: SdkFlavor, E = ContainerAsync<GenericImage>> {
    config: LocalStackContainer<S>,
    container: E,
}

impl<S: SdkFlavor, E: ContainerEndpoint> RunningLocalStack<S, E> {
    /// The configuration the container was started with.
    #[must_use]
    pub fn config(&self) -> &LocalStackContainer<S> {
        &self.config
    }

    /// The underlying container.
    #[must_use]
    pub fn container(&self) -> &E {
        &self.container
    }

    /// Credentials provider handed to clients.
    #[must_use]
    pub fn credentials_provider(&self) -> &S::CredentialsProvider {
        self.config.credentials_provider()
    }

    /// Region handed to clients.
    #[must_use]
    pub fn region(&self) -> &S::Region {
        self.config.region()
    }

    /// Externally reachable URI of `service`.
    ///
    /// Recomputed on every call.
    ///
    /// # Errors
    /// Returns [`LocalStackError::InactiveService`] if `service` is not selected;
    /// the container is not queried in that case.
    pub async fn endpoint_uri(&self, service: Service) -> LocalStackResult<Uri> {
        self.config.validate_service(service)?;
        resolve_endpoint_uri(&self.container, service).await
    }

    /// A client of type `C` configured to talk to `service`.
    ///
    /// # Errors
    /// Fails if `service` is inactive, if no builder is registered for `C`, or
    /// if the registered builder produces another client type.
    pub async fn service_client<C>(&self, service: Service) -> LocalStackResult<C>
    where
        C: Send + Sync + 'static,
    {
        let mut builder = self.config.builder_for::<C>(service)?;
        let endpoint = self.endpoint_uri(service).await?;

        S::configure(
            &mut builder,
            &endpoint,
            self.config.region(),
            self.config.credentials_provider(),
        );

        let client = S::build_client(builder)?
            .downcast::<C>()
            .map_err(|_| LocalStackError::UnexpectedClientType {
                expected: type_name::<C>(),
            })?;

        debug!(%service, %endpoint, client = type_name::<C>(), "built service client");
        Ok(*client)
    }
}

impl<S: SdkFlavor, E> fmt::Debug for RunningLocalStack<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunningLocalStack")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

//! Integration with the legacy AWS SDK (`rusoto_*`).
//!
//! Rusoto clients take a request dispatcher, a credentials provider and a
//! region. The LocalStack endpoint travels inside [`Region::Custom`], named
//! after the signing region.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use http::Uri;
use rusoto_core::credential::{
    AwsCredentials, CredentialsError, ProvideAwsCredentials, StaticProvider,
};
use rusoto_core::{HttpClient, Region};
use rusoto_dynamodb::DynamoDbClient;
use rusoto_s3::S3Client;
use rusoto_sqs::SqsClient;

use super::{AnyClient, SdkFlavor, SdkVersion};
use crate::container::{LocalStackContainer, RunningLocalStack};
use crate::endpoint::{ContainerEndpoint, base_url};
use crate::error::{LocalStackError, LocalStackResult};
use crate::registry::ClientRegistry;
use crate::service::Service;

/// LocalStack container for the legacy SDK.
pub type RusotoLocalStack = LocalStackContainer<Rusoto>;

/// The legacy AWS SDK (`rusoto_*` crates).
#[derive(Debug, Clone, Copy, Default)]
pub struct Rusoto;

/// Shareable credentials provider for rusoto clients.
#[derive(Clone)]
pub struct RusotoCredentials(Arc<dyn ProvideAwsCredentials + Send + Sync>);

impl RusotoCredentials {
    /// Wrap any rusoto credentials provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: ProvideAwsCredentials + Send + Sync + 'static,
    {
        Self(Arc::new(provider))
    }

    /// Empty credentials. Requests are sent unsigned.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(StaticProvider::new_minimal(String::new(), String::new()))
    }

    /// Fixed access key and secret.
    #[must_use]
    pub fn static_keys(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self::new(StaticProvider::new_minimal(access_key.into(), secret_key.into()))
    }
}

impl fmt::Debug for RusotoCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RusotoCredentials").finish_non_exhaustive()
    }
}

#[async_trait]
impl ProvideAwsCredentials for RusotoCredentials {
    async fn credentials(&self) -> Result<AwsCredentials, CredentialsError> {
        self.0.credentials().await
    }
}

/// Service endpoint plus the region used for request signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfiguration {
    /// Base URL of the service, e.g. `http://127.0.0.1:32771`.
    pub service_endpoint: String,
    /// Region name used to sign requests.
    pub signing_region: String,
}

impl EndpointConfiguration {
    /// The custom region rusoto clients are constructed with.
    #[must_use]
    pub fn region(&self) -> Region {
        Region::Custom {
            name: self.signing_region.clone(),
            endpoint: self.service_endpoint.clone(),
        }
    }
}

/// Builder shape of the legacy SDK.
pub trait RusotoClientBuilder: Send {
    /// Set endpoint and signing region.
    fn endpoint_configuration(&mut self, endpoint: EndpointConfiguration);

    /// Set the credentials provider.
    fn credentials(&mut self, credentials: RusotoCredentials);

    /// Construct the client.
    fn build(self: Box<Self>) -> LocalStackResult<AnyClient>;
}

type RusotoConstructor<C> = fn(HttpClient, RusotoCredentials, Region) -> C;

/// [`RusotoClientBuilder`] backed by a `new_with` style constructor and a
/// fresh [`HttpClient`].
pub struct DispatchingBuilder<C> {
    endpoint: Option<EndpointConfiguration>,
    credentials: Option<RusotoCredentials>,
    constructor: RusotoConstructor<C>,
}

impl<C: Send + Sync + 'static> DispatchingBuilder<C> {
    /// Builder for the client produced by `constructor`.
    #[must_use]
    pub fn new(constructor: RusotoConstructor<C>) -> Self {
        Self {
            endpoint: None,
            credentials: None,
            constructor,
        }
    }

    /// Boxed builder, ready to be returned from a registry factory.
    #[must_use]
    pub fn boxed(constructor: RusotoConstructor<C>) -> Box<dyn RusotoClientBuilder> {
        Box::new(Self::new(constructor))
    }
}

impl<C: Send + Sync + 'static> RusotoClientBuilder for DispatchingBuilder<C> {
    fn endpoint_configuration(&mut self, endpoint: EndpointConfiguration) {
        self.endpoint = Some(endpoint);
    }

    fn credentials(&mut self, credentials: RusotoCredentials) {
        self.credentials = Some(credentials);
    }

    fn build(self: Box<Self>) -> LocalStackResult<AnyClient> {
        let endpoint = self.endpoint.ok_or_else(|| {
            LocalStackError::ClientConstruction("endpoint configuration is missing".to_owned())
        })?;
        let credentials = self.credentials.unwrap_or_else(RusotoCredentials::anonymous);
        let dispatcher = HttpClient::new().map_err(|e| {
            LocalStackError::ClientConstruction(format!("failed to create HTTP client: {e}"))
        })?;

        Ok(Box::new((self.constructor)(dispatcher, credentials, endpoint.region())))
    }
}

impl<C> fmt::Debug for DispatchingBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchingBuilder")
            .field("client", &std::any::type_name::<C>())
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

fn endpoint_configuration(endpoint: &Uri, region: &Region) -> EndpointConfiguration {
    EndpointConfiguration {
        service_endpoint: base_url(endpoint),
        signing_region: region.name().to_owned(),
    }
}

impl SdkFlavor for Rusoto {
    const VERSION: SdkVersion = SdkVersion::V1;

    type CredentialsProvider = RusotoCredentials;
    type Region = Region;
    type Builder = dyn RusotoClientBuilder;

    fn default_credentials_provider() -> RusotoCredentials {
        RusotoCredentials::anonymous()
    }

    fn default_region() -> Region {
        Region::UsWest1
    }

    fn default_registry() -> ClientRegistry<dyn RusotoClientBuilder> {
        ClientRegistry::new()
            .with::<S3Client, _>(|| {
                DispatchingBuilder::boxed(|dispatcher, credentials, region| {
                    S3Client::new_with(dispatcher, credentials, region)
                })
            })
            .with::<SqsClient, _>(|| {
                DispatchingBuilder::boxed(|dispatcher, credentials, region| {
                    SqsClient::new_with(dispatcher, credentials, region)
                })
            })
            .with::<DynamoDbClient, _>(|| {
                DispatchingBuilder::boxed(|dispatcher, credentials, region| {
                    DynamoDbClient::new_with(dispatcher, credentials, region)
                })
            })
    }

    fn configure(
        builder: &mut Self::Builder,
        endpoint: &Uri,
        region: &Region,
        credentials: &RusotoCredentials,
    ) {
        builder.credentials(credentials.clone());
        builder.endpoint_configuration(endpoint_configuration(endpoint, region));
    }

    fn build_client(builder: Box<dyn RusotoClientBuilder>) -> LocalStackResult<AnyClient> {
        builder.build()
    }
}

impl<E: ContainerEndpoint> RunningLocalStack<Rusoto, E> {
    /// Endpoint and signing region for `service`.
    ///
    /// Useful for clients that are not registered:
    /// `SnsClient::new_with(HttpClient::new()?, creds, cfg.region())`.
    pub async fn endpoint_configuration(
        &self,
        service: Service,
    ) -> LocalStackResult<EndpointConfiguration> {
        let endpoint = self.endpoint_uri(service).await?;
        Ok(endpoint_configuration(&endpoint, self.region()))
    }
}

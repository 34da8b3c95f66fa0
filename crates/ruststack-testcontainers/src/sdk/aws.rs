//! Integration with the current AWS SDK (`aws-sdk-*`).
//!
//! Clients are built from an [`SdkConfig`] carrying the LocalStack endpoint,
//! the configured region and credentials. Path-style addressing is forced for
//! S3 so bucket names never end up in the host name.

use std::fmt;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use aws_credential_types::provider::SharedCredentialsProvider;
use http::Uri;

use super::{AnyClient, SdkFlavor, SdkVersion};
use crate::container::{LocalStackContainer, RunningLocalStack};
use crate::endpoint::{ContainerEndpoint, base_url};
use crate::error::LocalStackResult;
use crate::registry::ClientRegistry;
use crate::service::Service;

/// Access key of the default credentials.
pub const DEFAULT_ACCESS_KEY: &str = "accesskey";

/// Secret key of the default credentials.
pub const DEFAULT_SECRET_KEY: &str = "secretkey";

/// Default region.
pub const DEFAULT_REGION: &str = "us-west-1";

/// LocalStack container for the current AWS SDK.
pub type AwsSdkLocalStack = LocalStackContainer<AwsSdk>;

/// The current AWS SDK (`aws-sdk-*` crates).
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsSdk;

/// Builder shape of the current SDK.
pub trait AwsClientBuilder: Send {
    /// Override the service endpoint.
    fn endpoint_url(&mut self, url: String);

    /// Set the signing region.
    fn region(&mut self, region: Region);

    /// Set the credentials provider.
    fn credentials_provider(&mut self, provider: SharedCredentialsProvider);

    /// Construct the client.
    fn build(self: Box<Self>) -> AnyClient;
}

/// [`AwsClientBuilder`] that assembles an [`SdkConfig`] and hands it to a
/// client constructor such as `aws_sdk_sqs::Client::new`.
pub struct SdkConfigBuilder<C> {
    endpoint_url: Option<String>,
    region: Option<Region>,
    credentials_provider: Option<SharedCredentialsProvider>,
    constructor: fn(&SdkConfig) -> C,
}

impl<C: Send + Sync + 'static> SdkConfigBuilder<C> {
    /// Builder for the client produced by `constructor`.
    #[must_use]
    pub fn new(constructor: fn(&SdkConfig) -> C) -> Self {
        Self {
            endpoint_url: None,
            region: None,
            credentials_provider: None,
            constructor,
        }
    }

    /// Boxed builder, ready to be returned from a registry factory.
    #[must_use]
    pub fn boxed(constructor: fn(&SdkConfig) -> C) -> Box<dyn AwsClientBuilder> {
        Box::new(Self::new(constructor))
    }

    /// The shared configuration collected so far.
    #[must_use]
    pub fn sdk_config(&self) -> SdkConfig {
        build_sdk_config(
            self.endpoint_url.clone(),
            self.region.clone(),
            self.credentials_provider.clone(),
        )
    }
}

impl<C: Send + Sync + 'static> AwsClientBuilder for SdkConfigBuilder<C> {
    fn endpoint_url(&mut self, url: String) {
        self.endpoint_url = Some(url);
    }

    fn region(&mut self, region: Region) {
        self.region = Some(region);
    }

    fn credentials_provider(&mut self, provider: SharedCredentialsProvider) {
        self.credentials_provider = Some(provider);
    }

    fn build(self: Box<Self>) -> AnyClient {
        Box::new((self.constructor)(&self.sdk_config()))
    }
}

impl<C> fmt::Debug for SdkConfigBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkConfigBuilder")
            .field("client", &std::any::type_name::<C>())
            .field("endpoint_url", &self.endpoint_url)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

fn build_sdk_config(
    endpoint_url: Option<String>,
    region: Option<Region>,
    credentials_provider: Option<SharedCredentialsProvider>,
) -> SdkConfig {
    let mut builder = SdkConfig::builder().behavior_version(BehaviorVersion::latest());
    builder.set_endpoint_url(endpoint_url);
    builder.set_region(region);
    builder.set_credentials_provider(credentials_provider);
    builder.build()
}

fn s3_client(config: &SdkConfig) -> aws_sdk_s3::Client {
    let config = aws_sdk_s3::config::Builder::from(config)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(config)
}

impl SdkFlavor for AwsSdk {
    const VERSION: SdkVersion = SdkVersion::V2;

    type CredentialsProvider = SharedCredentialsProvider;
    type Region = Region;
    type Builder = dyn AwsClientBuilder;

    fn default_credentials_provider() -> SharedCredentialsProvider {
        SharedCredentialsProvider::new(Credentials::new(
            DEFAULT_ACCESS_KEY,
            DEFAULT_SECRET_KEY,
            None,
            None,
            "localstack",
        ))
    }

    fn default_region() -> Region {
        Region::from_static(DEFAULT_REGION)
    }

    fn default_registry() -> ClientRegistry<dyn AwsClientBuilder> {
        ClientRegistry::new()
            .with::<aws_sdk_s3::Client, _>(|| SdkConfigBuilder::boxed(s3_client))
            .with::<aws_sdk_sqs::Client, _>(|| SdkConfigBuilder::boxed(aws_sdk_sqs::Client::new))
            .with::<aws_sdk_dynamodb::Client, _>(|| {
                SdkConfigBuilder::boxed(aws_sdk_dynamodb::Client::new)
            })
            .with::<aws_sdk_sns::Client, _>(|| SdkConfigBuilder::boxed(aws_sdk_sns::Client::new))
            .with::<aws_sdk_ssm::Client, _>(|| SdkConfigBuilder::boxed(aws_sdk_ssm::Client::new))
            .with::<aws_sdk_secretsmanager::Client, _>(|| {
                SdkConfigBuilder::boxed(aws_sdk_secretsmanager::Client::new)
            })
            .with::<aws_sdk_kinesis::Client, _>(|| {
                SdkConfigBuilder::boxed(aws_sdk_kinesis::Client::new)
            })
    }

    fn configure(
        builder: &mut Self::Builder,
        endpoint: &Uri,
        region: &Region,
        credentials: &SharedCredentialsProvider,
    ) {
        builder.credentials_provider(credentials.clone());
        builder.region(region.clone());
        builder.endpoint_url(base_url(endpoint));
    }

    fn build_client(builder: Box<dyn AwsClientBuilder>) -> LocalStackResult<AnyClient> {
        Ok(builder.build())
    }
}

impl<E: ContainerEndpoint> RunningLocalStack<AwsSdk, E> {
    /// Shared configuration pointing at `service`.
    ///
    /// Useful for clients that are not registered, e.g.
    /// `aws_sdk_sts::Client::new(&localstack.sdk_config(Service::Sts).await?)`.
    pub async fn sdk_config(&self, service: Service) -> LocalStackResult<SdkConfig> {
        let endpoint = self.endpoint_uri(service).await?;
        Ok(build_sdk_config(
            Some(base_url(&endpoint)),
            Some(self.region().clone()),
            Some(self.credentials_provider().clone()),
        ))
    }
}

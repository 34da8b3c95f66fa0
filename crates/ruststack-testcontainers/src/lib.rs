//! LocalStack test fixture for RustStack.
//!
//! Starts a `localstack/localstack` container through testcontainers with a
//! chosen set of emulated services, and hands out AWS clients already pointed
//! at those services. Both SDK generations are supported:
//!
//! - the current SDK (`aws-sdk-*`) via [`AwsSdk`], behind the `aws-sdk` feature;
//! - the legacy SDK (`rusoto_*`) via [`Rusoto`], behind the `rusoto` feature.
//!
//! # Examples
//!
//! ```no_run
//! use ruststack_testcontainers::{AwsSdkLocalStack, Service};
//!
//! # async fn run() -> ruststack_testcontainers::LocalStackResult<()> {
//! let localstack = AwsSdkLocalStack::new()
//!     .with_services([Service::S3, Service::Sqs])
//!     .start()
//!     .await?;
//!
//! let s3 = localstack
//!     .service_client::<aws_sdk_s3::Client>(Service::S3)
//!     .await?;
//! # let _ = s3;
//! # Ok(())
//! # }
//! ```

mod config;
mod container;
mod endpoint;
mod error;
mod plan;
mod provider;
mod registry;
pub mod sdk;
mod service;

pub use config::{DEFAULT_VERSION, DOCKER_SOCKET, IMAGE_NAME, LocalStackConfig};
pub use container::{LocalStackContainer, RunningLocalStack};
pub use endpoint::{ContainerEndpoint, base_url, resolve_endpoint_uri};
pub use error::{LocalStackError, LocalStackResult};
pub use plan::{BindMount, ContainerPlan, READY_MESSAGE};
pub use provider::{AnyLocalStack, new_instance};
pub use registry::ClientRegistry;
#[cfg(feature = "aws-sdk")]
pub use sdk::aws::{AwsSdk, AwsSdkLocalStack};
#[cfg(feature = "rusoto")]
pub use sdk::rusoto::{Rusoto, RusotoCredentials, RusotoLocalStack};
pub use sdk::{AnyClient, SdkFlavor, SdkVersion};
pub use service::{Service, parse_services};

//! SDK integrations.
//!
//! Each supported AWS SDK generation implements [`SdkFlavor`], which tells
//! [`LocalStackContainer`](crate::LocalStackContainer) what credentials and
//! region types it works with, which clients it can build, and how to point a
//! client builder at a LocalStack endpoint.
//!
//! | Flavor | Version | Crates | Default credentials |
//! |--------|---------|--------|---------------------|
//! | [`Rusoto`] | [`SdkVersion::V1`] | `rusoto_*` | anonymous |
//! | [`AwsSdk`] | [`SdkVersion::V2`] | `aws-sdk-*` | `accesskey` / `secretkey` |
//!
//! So `V1` defaults to anonymous credentials and `V2` to the static keys:
//! `aws-sdk-*` has no anonymous provider usable by every client.

#[cfg(feature = "aws-sdk")]
pub mod aws;
#[cfg(feature = "rusoto")]
pub mod rusoto;

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use http::Uri;

use crate::error::{LocalStackError, LocalStackResult};
use crate::registry::ClientRegistry;

#[cfg(feature = "aws-sdk")]
pub use aws::AwsSdk;
#[cfg(feature = "rusoto")]
pub use rusoto::Rusoto;

/// A type-erased client, as returned by [`SdkFlavor::build_client`].
pub type AnyClient = Box<dyn Any + Send + Sync>;

/// AWS SDK generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdkVersion {
    /// Legacy SDK (`rusoto_*`).
    V1,
    /// Current SDK (`aws-sdk-*`).
    V2,
}

impl SdkVersion {
    /// Whether support for this version was compiled in.
    #[must_use]
    pub const fn is_compiled_in(self) -> bool {
        match self {
            Self::V1 => cfg!(feature = "rusoto"),
            Self::V2 => cfg!(feature = "aws-sdk"),
        }
    }
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::V2 => f.write_str("v2"),
        }
    }
}

impl FromStr for SdkVersion {
    type Err = LocalStackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            _ => Err(LocalStackError::UnsupportedSdk(format!(
                "SDK value received is invalid: {s:?}, accepted values [V1, V2]"
            ))),
        }
    }
}

/// Capability interface of one SDK generation.
pub trait SdkFlavor: Sized + Send + Sync + 'static {
    /// Version tag of this flavor.
    const VERSION: SdkVersion;

    /// Credentials provider handed to every client.
    type CredentialsProvider: Clone + fmt::Debug + Send + Sync;

    /// Region handed to every client.
    type Region: Clone + fmt::Debug + Send + Sync;

    /// Builder shape of this SDK, usually a trait object.
    type Builder: ?Sized + Send;

    /// Credentials used until the caller sets others.
    fn default_credentials_provider() -> Self::CredentialsProvider;

    /// Region used until the caller sets another.
    fn default_region() -> Self::Region;

    /// Builders for the clients this integration supports out of the box.
    fn default_registry() -> ClientRegistry<Self::Builder>;

    /// Point `builder` at `endpoint` with the given region and credentials.
    fn configure(
        builder: &mut Self::Builder,
        endpoint: &Uri,
        region: &Self::Region,
        credentials: &Self::CredentialsProvider,
    );

    /// Construct the client.
    fn build_client(builder: Box<Self::Builder>) -> LocalStackResult<AnyClient>;
}

//! Runtime selection of the SDK flavor.
//!
//! Test suites parameterised over the SDK generation pick the container with
//! [`new_instance`], typically from a string such as `"v2"`.

#[cfg(feature = "rusoto")]
use crate::sdk::Rusoto;
#[cfg(feature = "aws-sdk")]
use crate::sdk::AwsSdk;
use crate::container::LocalStackContainer;
use crate::error::{LocalStackError, LocalStackResult};
use crate::sdk::SdkVersion;
use crate::service::Service;

/// A LocalStack container for either SDK generation.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyLocalStack {
    /// Legacy SDK container.
    #[cfg(feature = "rusoto")]
    V1(LocalStackContainer<Rusoto>),
    /// Current SDK container.
    #[cfg(feature = "aws-sdk")]
    V2(LocalStackContainer<AwsSdk>),
}

impl AnyLocalStack {
    /// SDK generation of the wrapped container.
    #[must_use]
    pub fn version(&self) -> SdkVersion {
        match self {
            #[cfg(feature = "rusoto")]
            Self::V1(_) => SdkVersion::V1,
            #[cfg(feature = "aws-sdk")]
            Self::V2(_) => SdkVersion::V2,
        }
    }

    /// Declare services the container should emulate.
    #[must_use]
    pub fn with_services(self, services: impl IntoIterator<Item = Service>) -> Self {
        match self {
            #[cfg(feature = "rusoto")]
            Self::V1(c) => Self::V1(c.with_services(services)),
            #[cfg(feature = "aws-sdk")]
            Self::V2(c) => Self::V2(c.with_services(services)),
        }
    }

    /// The selected services, in insertion order.
    #[must_use]
    pub fn services(&self) -> &[Service] {
        match self {
            #[cfg(feature = "rusoto")]
            Self::V1(c) => c.services(),
            #[cfg(feature = "aws-sdk")]
            Self::V2(c) => c.services(),
        }
    }

    /// Image tag the container will run.
    #[must_use]
    pub fn image_version(&self) -> &str {
        match self {
            #[cfg(feature = "rusoto")]
            Self::V1(c) => &c.config().version,
            #[cfg(feature = "aws-sdk")]
            Self::V2(c) => &c.config().version,
        }
    }

    /// The legacy SDK container, if that is what this is.
    #[cfg(feature = "rusoto")]
    #[must_use]
    pub fn into_v1(self) -> Option<LocalStackContainer<Rusoto>> {
        match self {
            Self::V1(c) => Some(c),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// The current SDK container, if that is what this is.
    #[cfg(feature = "aws-sdk")]
    #[must_use]
    pub fn into_v2(self) -> Option<LocalStackContainer<AwsSdk>> {
        match self {
            Self::V2(c) => Some(c),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

/// Create a container for `sdk`, running image tag `version`.
///
/// `None` or an empty tag selects the default version.
///
/// # Errors
/// Returns [`LocalStackError::UnsupportedSdk`] if support for `sdk` was not
/// compiled in.
pub fn new_instance(sdk: SdkVersion, version: Option<&str>) -> LocalStackResult<AnyLocalStack> {
    let version = version.map(str::trim).filter(|v| !v.is_empty());

    match sdk {
        #[cfg(feature = "rusoto")]
        SdkVersion::V1 => Ok(AnyLocalStack::V1(container(version))),
        #[cfg(feature = "aws-sdk")]
        SdkVersion::V2 => Ok(AnyLocalStack::V2(container(version))),
        #[allow(unreachable_patterns)]
        other => Err(LocalStackError::UnsupportedSdk(format!(
            "SDK {other} support is not compiled in"
        ))),
    }
}

#[cfg(any(feature = "rusoto", feature = "aws-sdk"))]
fn container<S: crate::sdk::SdkFlavor>(version: Option<&str>) -> LocalStackContainer<S> {
    match version {
        Some(v) => LocalStackContainer::with_version(v),
        None => LocalStackContainer::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_VERSION;

    #[cfg(feature = "aws-sdk")]
    #[test]
    fn test_should_create_v2_container_with_default_version() {
        let localstack = new_instance(SdkVersion::V2, None).unwrap();
        assert_eq!(localstack.version(), SdkVersion::V2);
        assert_eq!(localstack.image_version(), DEFAULT_VERSION);
        assert!(localstack.into_v2().is_some());
    }

    #[cfg(feature = "rusoto")]
    #[test]
    fn test_should_create_v1_container_with_given_version() {
        let localstack = new_instance(SdkVersion::V1, Some("0.10.0")).unwrap();
        assert_eq!(localstack.version(), SdkVersion::V1);
        assert_eq!(localstack.image_version(), "0.10.0");
    }

    #[cfg(feature = "rusoto")]
    #[test]
    fn test_should_treat_empty_version_as_default() {
        let localstack = new_instance(SdkVersion::V1, Some("  ")).unwrap();
        assert_eq!(localstack.image_version(), DEFAULT_VERSION);
    }

    #[cfg(feature = "aws-sdk")]
    #[test]
    fn test_should_forward_service_selection() {
        let localstack = new_instance("v2".parse().unwrap(), None)
            .unwrap()
            .with_services([Service::S3, Service::Sqs]);
        assert_eq!(localstack.services(), &[Service::S3, Service::Sqs]);
    }

    #[test]
    fn test_should_reject_versions_not_compiled_in() {
        for sdk in [SdkVersion::V1, SdkVersion::V2] {
            let result = new_instance(sdk, None);
            if sdk.is_compiled_in() {
                assert!(result.is_ok());
            } else {
                assert!(matches!(result, Err(LocalStackError::UnsupportedSdk(_))));
            }
        }
    }
}

//! Error types for the LocalStack fixture.

use crate::service::Service;

/// Errors raised while configuring a LocalStack container or building clients for it.
#[derive(Debug, thiserror::Error)]
pub enum LocalStackError {
    /// The container configuration is invalid (e.g. no services selected).
    #[error("configuration error: {0}")]
    Config(String),

    /// A client or endpoint was requested for a service the container does not run.
    #[error("requested service is not activated on this container: {0}")]
    InactiveService(Service),

    /// No builder factory is registered for the requested client type.
    #[error("no client builder registered for {client}")]
    UnsupportedBuilder {
        /// Type name of the requested client.
        client: &'static str,
    },

    /// The registered builder produced a client of another type.
    #[error("client built for {expected} has an unexpected type")]
    UnexpectedClientType {
        /// Type name of the requested client.
        expected: &'static str,
    },

    /// The computed endpoint is not a valid URI.
    #[error("invalid endpoint URI {uri}: {source}")]
    InvalidEndpoint {
        /// The rejected endpoint string.
        uri: String,
        /// Parse failure.
        #[source]
        source: http::uri::InvalidUri,
    },

    /// The SDK failed to construct a client.
    #[error("failed to construct client: {0}")]
    ClientConstruction(String),

    /// A service name is not part of the catalog.
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// The requested SDK version is unknown or not compiled in.
    #[error("unsupported SDK version: {0}")]
    UnsupportedSdk(String),

    /// Container start or port lookup failure.
    #[error(transparent)]
    Container(#[from] testcontainers::TestcontainersError),
}

/// Convenience result type for LocalStack fixture operations.
pub type LocalStackResult<T> = Result<T, LocalStackError>;

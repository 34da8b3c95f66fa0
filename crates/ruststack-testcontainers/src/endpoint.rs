//! Endpoint resolution for services running in the container.
//!
//! The externally reachable URI of a service combines the container's host
//! address with the host port docker published for the service's internal
//! port. The host is resolved to a literal IP when possible: S3 clients fall
//! back to path-style addressing for IP endpoints, which avoids virtual-host
//! DNS lookups for bucket subdomains.

use std::net::{IpAddr, SocketAddr};

use async_trait::async_trait;
use http::Uri;
use testcontainers::core::IntoContainerPort;
use testcontainers::{ContainerAsync, Image};
use tracing::{debug, warn};

use crate::error::{LocalStackError, LocalStackResult};
use crate::service::Service;

/// Address information of a started container.
#[async_trait]
pub trait ContainerEndpoint: Send + Sync {
    /// Host name or address the container is reachable at.
    async fn host(&self) -> LocalStackResult<String>;

    /// Host port published for the given container port.
    async fn host_port(&self, container_port: u16) -> LocalStackResult<u16>;
}

#[async_trait]
impl<I: Image> ContainerEndpoint for ContainerAsync<I> {
    async fn host(&self) -> LocalStackResult<String> {
        Ok(self.get_host().await?.to_string())
    }

    async fn host_port(&self, container_port: u16) -> LocalStackResult<u16> {
        Ok(self.get_host_port_ipv4(container_port.tcp()).await?)
    }
}

/// Compute the `http://host:port` URI for `service`.
///
/// Does not check whether the service is active; callers validate first.
pub async fn resolve_endpoint_uri<E>(container: &E, service: Service) -> LocalStackResult<Uri>
where
    E: ContainerEndpoint + ?Sized,
{
    let host = container.host().await?;
    let port = container.host_port(service.port()).await?;

    let authority = match resolve_ip(&host).await {
        Some(ip) => SocketAddr::new(ip, port).to_string(),
        None => format!("{host}:{port}"),
    };
    let uri = format!("http://{authority}");

    debug!(%service, %uri, "resolved service endpoint");

    uri.parse().map_err(|source| LocalStackError::InvalidEndpoint { uri, source })
}

/// `scheme://authority` of an endpoint URI, without the trailing path.
///
/// SDK endpoint overrides expect a bare base URL.
#[must_use]
pub fn base_url(uri: &Uri) -> String {
    let scheme = uri.scheme_str().unwrap_or("http");
    match uri.authority() {
        Some(authority) => format!("{scheme}://{authority}"),
        None => format!("{scheme}://"),
    }
}

/// Resolve `host` to a literal IP address, preferring IPv4.
///
/// Returns `None` when the lookup fails or yields nothing; the endpoint then
/// keeps the unresolved host.
async fn resolve_ip(host: &str) -> Option<IpAddr> {
    if let Ok(ip) = host.trim_matches(['[', ']']).parse::<IpAddr>() {
        return Some(ip);
    }

    match tokio::net::lookup_host((host, 0)).await {
        Ok(addrs) => {
            let addrs: Vec<IpAddr> = addrs.map(|addr| addr.ip()).collect();
            let ip = addrs
                .iter()
                .find(|ip| ip.is_ipv4())
                .or_else(|| addrs.first())
                .copied();
            if ip.is_none() {
                warn!(%host, "host lookup returned no addresses, using unresolved host");
            }
            ip
        }
        Err(e) => {
            warn!(%host, error = %e, "failed to resolve host, using unresolved host");
            None
        }
    }
}

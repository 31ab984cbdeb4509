use ferrous_rewrite_domain::{DomainError, UpstreamAddr};
use std::net::SocketAddr;
use std::time::Duration;

/// Turns a zone's upstream into a socket address. Hostnames go through the
/// system resolver on every call; the first address returned wins.
pub async fn resolve_upstream(
    upstream: &UpstreamAddr,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    let (hostname, port) = match upstream.unresolved_parts() {
        None => {
            return upstream
                .socket_addr()
                .ok_or_else(|| DomainError::UnresolvedUpstream(upstream.to_string()))
        }
        Some(parts) => parts,
    };

    let target = format!("{}:{}", hostname, port);

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: target.clone(),
        })?
        .map_err(|e| DomainError::UnresolvedUpstream(format!("{}: {}", target, e)))?;

    addrs
        .next()
        .ok_or_else(|| DomainError::UnresolvedUpstream(format!("No addresses found for {}", target)))
}

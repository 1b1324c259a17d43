//! Immutable configuration structs built once at process start.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use url::Url;

use crate::error::EchoChainError;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub service_name: String,
    pub host: String,
    pub port: u16,
}

impl ServiceConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr, EchoChainError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub service: ServiceConfig,
    /// Fully-resolved `<base>/echo` URL, without query.
    pub echo_endpoint: Url,
    /// Upper bound for the whole outbound exchange.
    pub echo_timeout: Duration,
}

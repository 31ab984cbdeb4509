use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// `host:port`; a bare `:port` listens on all IPv4 interfaces.
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
}

impl ServerConfig {
    pub fn listen_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = self.listen_address.trim();
        let addr = if addr.starts_with(':') {
            format!("0.0.0.0{}", addr)
        } else {
            addr.to_string()
        };
        addr.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid listen address '{}': {}",
                self.listen_address, e
            ))
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
        }
    }
}

fn default_listen_address() -> String {
    ":53".to_string()
}

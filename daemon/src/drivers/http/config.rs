use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniDriverConfig {
    pub port: u16,
    pub host: IpAddr,
}

impl Default for UniDriverConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 22055,
        }
    }
}

impl UniDriverConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpDriverConfig {
    pub uni_config: UniDriverConfig,

    /// Mount point of the status endpoint; deployments behind a proxy remap
    /// it, the other endpoint paths are fixed.
    pub status_path: String,
}

impl Default for HttpDriverConfig {
    fn default() -> Self {
        Self {
            uni_config: UniDriverConfig::default(),
            status_path: "/status".to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub refresh_interval_ms: u64,
    pub query: QueryConfig,
    /// Process name the memory sample is read from.
    pub process_name: String,
    pub event_bind: EventBindConfig,
    pub fallback: IdentityFallback,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 5000,
            query: QueryConfig::default(),
            process_name: "ragemp-server".to_string(),
            event_bind: EventBindConfig::default(),
            fallback: IdentityFallback::default(),
        }
    }
}

/// Where the game server's query endpoint answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub host: IpAddr,
    pub port: u16,
    pub timeout_ms: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 22006,
            timeout_ms: 1000,
        }
    }
}

impl QueryConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Where lifecycle packets from the game server are received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBindConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for EventBindConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 22010,
        }
    }
}

impl EventBindConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Identity served until the game server reports its real configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityFallback {
    pub name: String,
    pub gamemode: String,
    pub version: String,
    pub max_players: u32,
}

impl Default for IdentityFallback {
    fn default() -> Self {
        Self {
            name: "Rage Server".to_string(),
            gamemode: "freeroam".to_string(),
            version: "1.1".to_string(),
            max_players: 100,
        }
    }
}

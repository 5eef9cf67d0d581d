use crate::status::{RosterEntry, ServerIdentity, UNKNOWN_ADDRESS};
use serde::{Deserialize, Serialize};

/// `server` block of the status payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerReport {
    pub name: String,
    pub gamemode: String,
    pub version: String,
    pub uptime: u64,
    pub uptime_formatted: String,
    pub status: String,
}

/// `players` block of the status payload: counts plus display names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayersReport {
    pub online: u32,
    pub max: u32,
    pub list: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceReport {
    #[serde(rename = "memoryUsage")]
    pub memory_usage: f64,
    #[serde(rename = "ticksPerSecond")]
    pub ticks_per_second: u32,
}

/// Full `GET <status-path>` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub success: bool,
    pub timestamp: u64,
    pub server: ServerReport,
    pub players: PlayersReport,
    pub performance: PerformanceReport,
}

/// Wire form of a roster entry: missing latency becomes zero, a missing
/// address becomes a placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerEntry {
    pub id: u32,
    pub name: String,
    pub ping: u32,
    pub ip: String,
}

impl From<&RosterEntry> for PlayerEntry {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            ping: entry.ping.unwrap_or(0),
            ip: entry
                .ip
                .clone()
                .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
        }
    }
}

/// `GET /players` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayersResponse {
    pub success: bool,
    pub count: u32,
    pub max: u32,
    pub players: Vec<PlayerEntry>,
    pub timestamp: u64,
}

/// `GET /health` payload. Reports this monitoring service, not the observed
/// game server, so it is valid even in fully degraded operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub uptime: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiInfo {
    pub version: String,
    pub endpoints: Vec<String>,
}

/// `GET /info` payload: static identity plus the supported endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfoResponse {
    pub success: bool,
    pub server: ServerIdentity,
    pub api: ApiInfo,
}

/// Generic failure body for unexpected internal faults. Degraded data is
/// never reported through this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

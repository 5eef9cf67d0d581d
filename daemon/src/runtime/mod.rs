mod query;
mod rage;

pub use query::QueryClient;
pub use rage::RageRuntime;

use async_trait::async_trait;

/// A live-data facet of the observed game server that may be independently
/// present or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Config,
    Roster,
    Performance,
}

/// Configuration snapshot reported by the observed server.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub name: String,
    pub gamemode: String,
    pub version: String,
    pub max_players: u32,
}

/// One connected player as the observed server reports it.
#[derive(Debug, Clone)]
pub struct RuntimePlayer {
    pub id: u32,
    pub name: String,
    pub ping: Option<u32>,
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RuntimePerformance {
    pub memory_mb: f64,
    pub tick_rate: u32,
}

/// Seam to the observed game server.
///
/// Probe methods never fail: an absent or half-initialized server is an
/// expected state, not an error, and the answer is re-evaluated on every
/// call. Fetch methods may fail; callers treat a failure exactly as
/// "capability absent for this cycle".
#[async_trait]
pub trait GameRuntime: Send + Sync {
    async fn is_available(&self) -> bool;

    async fn has_capability(&self, cap: Capability) -> bool;

    async fn config(&self) -> anyhow::Result<RuntimeConfig>;

    async fn players(&self) -> anyhow::Result<Vec<RuntimePlayer>>;

    async fn performance(&self) -> anyhow::Result<RuntimePerformance>;
}

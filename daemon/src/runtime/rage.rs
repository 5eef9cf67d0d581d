use super::{
    Capability, GameRuntime, QueryClient, RuntimeConfig, RuntimePerformance, RuntimePlayer,
};
use crate::monitor::MonitorConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use sysinfo::{ProcessesToUpdate, System};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Production runtime adapter: status data comes from the game server's
/// query endpoint, memory from the game process itself. The game server is
/// a remote peer here, so every probe is a fresh short-timeout query and a
/// timeout counts as "unavailable".
pub struct RageRuntime {
    client: QueryClient,
    process_name: String,
}

impl RageRuntime {
    pub fn new(cfg: &MonitorConfig) -> Self {
        Self {
            client: QueryClient::new(
                cfg.query.addr(),
                Duration::from_millis(cfg.query.timeout_ms),
            ),
            process_name: cfg.process_name.clone(),
        }
    }

    fn process_memory_mb(&self) -> Option<f64> {
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::All, true);
        sys.processes()
            .values()
            .find(|process| process.name().to_string_lossy() == self.process_name)
            .map(|process| process.memory() as f64 / BYTES_PER_MB)
    }
}

#[async_trait]
impl GameRuntime for RageRuntime {
    async fn is_available(&self) -> bool {
        self.client.query().await.is_ok()
    }

    async fn has_capability(&self, cap: Capability) -> bool {
        match cap {
            // The query payload carries both identity and roster.
            Capability::Config | Capability::Roster => self.is_available().await,
            Capability::Performance => self.process_memory_mb().is_some(),
        }
    }

    async fn config(&self) -> Result<RuntimeConfig> {
        let payload = self.client.query().await?;
        Ok(RuntimeConfig {
            name: payload.name,
            gamemode: payload.gamemode,
            version: payload.version,
            max_players: payload.max_players,
        })
    }

    async fn players(&self) -> Result<Vec<RuntimePlayer>> {
        let payload = self.client.query().await?;
        Ok(payload
            .players
            .into_iter()
            .map(|player| RuntimePlayer {
                id: player.id,
                name: player.name,
                ping: player.ping,
                ip: player.ip,
            })
            .collect())
    }

    async fn performance(&self) -> Result<RuntimePerformance> {
        let memory_mb = self
            .process_memory_mb()
            .context("observed game process not found")?;
        let tick_rate = self
            .client
            .query()
            .await
            .map(|payload| payload.tick_rate)
            .unwrap_or(0);
        Ok(RuntimePerformance {
            memory_mb,
            tick_rate,
        })
    }
}

use crate::monitor::StatusCache;
use crate::runtime::{Capability, GameRuntime};
use log::{info, warn};
use ragemon_protocol::status::ServerIdentity;

/// One-shot identity seeding at process start. A single best-effort
/// attempt: the routine never waits for the game server to come up, and a
/// miss leaves the configured fallback identity in place.
pub async fn seed_identity(cache: &StatusCache, runtime: &dyn GameRuntime) {
    if runtime.is_available().await && runtime.has_capability(Capability::Config).await {
        match runtime.config().await {
            Ok(cfg) => {
                cache
                    .seed_identity(ServerIdentity {
                        name: cfg.name,
                        gamemode: cfg.gamemode,
                        version: cfg.version,
                        max_players: cfg.max_players,
                    })
                    .await;
                info!("server identity seeded from the live game server");
                return;
            }
            Err(err) => warn!("config read failed at startup: {err:#}"),
        }
    }
    warn!("game server unavailable at startup, serving fallback identity");
}

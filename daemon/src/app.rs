use chrono::{DateTime, Utc};
use log::{debug, info};
use std::ops::Deref;
use std::sync::{Arc, LazyLock};
use tokio::sync::Notify;

use crate::config::AppConfig;
use crate::drivers::GracefulShutdown;
use crate::intake;
use crate::monitor::{seed_identity, RefreshEngine, RefreshTrigger, StatusCache};
use crate::runtime::RageRuntime;
use crate::utils::event::ServerEvents;
use ragemon_protocol::status::ServerIdentity;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
static START_TIME: LazyLock<DateTime<Utc>> = LazyLock::new(Utc::now);

pub struct ApplicationState {
    pub stop_notify: Arc<Notify>,
    pub cache: StatusCache,
    pub endpoints: Vec<String>,
}
pub type AppState = Arc<ApplicationState>;

pub fn get_start_time() -> &'static DateTime<Utc> {
    START_TIME.deref()
}

fn init_app_state() -> AppState {
    let config = AppConfig::get();
    debug!(
        "config loaded: {}",
        serde_json::to_string_pretty(&config).unwrap()
    );

    let fallback = &config.monitor.fallback;
    let identity = ServerIdentity {
        name: fallback.name.clone(),
        gamemode: fallback.gamemode.clone(),
        version: fallback.version.clone(),
        max_players: fallback.max_players,
    };
    let cache = StatusCache::new(identity, get_start_time().timestamp_millis() as u64);

    let endpoints = vec![
        config.drivers.http_driver_config.status_path.clone(),
        "/players".to_string(),
        "/health".to_string(),
        "/info".to_string(),
    ];

    Arc::new(ApplicationState {
        stop_notify: Arc::new(Notify::new()),
        cache,
        endpoints,
    })
}

pub async fn run_app() -> anyhow::Result<()> {
    let _ = get_start_time();
    info!("ragemon daemon v{} starting", VERSION);

    let state = init_app_state();
    let config = AppConfig::get();

    let runtime = Arc::new(RageRuntime::new(&config.monitor));
    seed_identity(&state.cache, runtime.as_ref()).await;

    let engine = RefreshEngine::new(state.cache.clone(), runtime);
    let (refresh, _engine_task) = engine.spawn(
        config.monitor.refresh_interval_ms,
        state.stop_notify.clone(),
    );

    let events = Arc::new(ServerEvents::new());
    {
        let handle = refresh.clone();
        events.player_joined.add_listener(move |(id, name)| {
            handle.notify(RefreshTrigger::PlayerJoined {
                id: *id,
                name: name.clone(),
            });
        });
        let handle = refresh.clone();
        events.player_left.add_listener(move |(id, name)| {
            handle.notify(RefreshTrigger::PlayerLeft {
                id: *id,
                name: name.clone(),
            });
        });
    }
    let _intake_task = intake::spawn_event_intake(
        config.monitor.event_bind.addr(),
        events,
        state.stop_notify.clone(),
    );

    let mut gs = GracefulShutdown::new();
    config
        .drivers
        .enabled
        .iter()
        .for_each(|driver_type| gs.add_driver(driver_type.new_driver(state.clone())));

    gs.watch(state.stop_notify.clone()).await;
    info!("Bye.");
    Ok(())
}

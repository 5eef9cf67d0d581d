use crate::app::AppState;
use crate::monitor::epoch_ms;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use log::error;
use ragemon_protocol::status::{
    ApiInfo, ErrorResponse, HealthResponse, InfoResponse, PerformanceReport, PlayerEntry,
    PlayersReport, PlayersResponse, ServerReport, StatusResponse,
};
use ragemon_protocol::utils::format_uptime;
use serde::Serialize;
use thiserror::Error;

pub const API_VERSION: &str = "v1";

const STATUS_ONLINE: &str = "online";
const STATUS_DEGRADED: &str = "degraded";

/// Read-only query surface. Handlers only read the cache, never trigger a
/// refresh, so an answer is bounded in staleness by the refresh interval
/// and stays valid while the game server is gone.
pub fn router(status_path: &str) -> Router<AppState> {
    let status_path = if status_path.starts_with('/') {
        status_path.to_string()
    } else {
        format!("/{status_path}")
    };

    Router::new()
        .route(&status_path, get(status_handler))
        .route("/players", get(players_handler))
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
}

/// The only error class that surfaces: an unexpected internal fault in the
/// handler itself. Degraded monitoring data never maps here.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("internal error")]
    Internal,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response<Body> {
        let body = serde_json::to_string(&ErrorResponse {
            success: false,
            error: self.to_string(),
        })
        .unwrap_or_else(|_| r#"{"success":false,"error":"internal error"}"#.to_string());

        Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }
}

fn json_response<T: Serialize>(payload: &T) -> Result<Response<Body>, HandlerError> {
    let body = serde_json::to_string(payload).map_err(|err| {
        error!("response serialization failed: {err}");
        HandlerError::Internal
    })?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap())
}

async fn status_handler(State(state): State<AppState>) -> Result<Response<Body>, HandlerError> {
    let snapshot = state.cache.snapshot().await;
    let now = epoch_ms();
    let uptime = snapshot.uptime_ms(now);

    json_response(&StatusResponse {
        success: true,
        timestamp: now,
        server: ServerReport {
            name: snapshot.identity.name.clone(),
            gamemode: snapshot.identity.gamemode.clone(),
            version: snapshot.identity.version.clone(),
            uptime,
            uptime_formatted: format_uptime(uptime),
            status: if snapshot.available {
                STATUS_ONLINE
            } else {
                STATUS_DEGRADED
            }
            .to_string(),
        },
        players: PlayersReport {
            online: snapshot.online,
            max: snapshot.identity.max_players,
            list: snapshot
                .roster
                .iter()
                .map(|entry| entry.name.clone())
                .collect(),
        },
        performance: PerformanceReport {
            memory_usage: snapshot.performance.memory_mb,
            ticks_per_second: snapshot.performance.tick_rate,
        },
    })
}

/// Serves the last successfully enumerated roster; when the game server is
/// currently unreachable that is the cached one, never an empty list.
async fn players_handler(State(state): State<AppState>) -> Result<Response<Body>, HandlerError> {
    let snapshot = state.cache.snapshot().await;

    json_response(&PlayersResponse {
        success: true,
        count: snapshot.online,
        max: snapshot.identity.max_players,
        players: snapshot.roster.iter().map(PlayerEntry::from).collect(),
        timestamp: epoch_ms(),
    })
}

/// Answers "is this monitoring service alive", deliberately independent of
/// the game server's state.
async fn health_handler(State(state): State<AppState>) -> Result<Response<Body>, HandlerError> {
    let snapshot = state.cache.snapshot().await;
    let now = epoch_ms();

    json_response(&HealthResponse {
        status: "ok".to_string(),
        timestamp: now,
        uptime: snapshot.uptime_ms(now),
    })
}

async fn info_handler(State(state): State<AppState>) -> Result<Response<Body>, HandlerError> {
    let snapshot = state.cache.snapshot().await;

    json_response(&InfoResponse {
        success: true,
        server: snapshot.identity,
        api: ApiInfo {
            version: API_VERSION.to_string(),
            endpoints: state.endpoints.clone(),
        },
    })
}

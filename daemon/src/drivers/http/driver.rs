use crate::app::AppState;
use crate::config::AppConfig;
use crate::drivers::{Driver, Drivers};
use axum::http::Method;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use super::routes;

pub struct HttpDriver {
    app_state: AppState,
}

impl HttpDriver {
    pub fn new(app_state: AppState) -> Self {
        Self { app_state }
    }
}

#[async_trait::async_trait]
impl Driver for HttpDriver {
    async fn run(&self) {
        let cfg = &AppConfig::get().drivers.http_driver_config;
        let addr = cfg.uni_config.addr();

        let app = routes::router(&cfg.status_path)
            .with_state(self.app_state.clone())
            .layer(
                CorsLayer::new()
                    .allow_origin(tower_http::cors::Any)
                    .allow_methods([Method::GET]),
            );

        let listener = TcpListener::bind(addr).await.expect("Failed to bind");
        info!("status API listening on {}", addr);

        let stop_token = self.app_state.stop_notify.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                stop_token.notified().await;
                info!("shutdown signal received, closing status API");
            })
            .await
            .unwrap();
    }

    fn driver_type(&self) -> Drivers {
        Drivers::Http
    }
}

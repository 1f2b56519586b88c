use axum::{response::Json as ResponseJson, routing::get, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::{auth_router, AccountStore, AuthState, SecretHasher};
use crate::{CredentialGateError, Result};

#[derive(Serialize, Debug, Clone)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
}

// Configuration pour le serveur HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub port: u16,
    pub host: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

/// HTTP front for the login hook
pub struct HttpServer {
    config: HttpConfig,
    auth: Router,
}

impl HttpServer {
    pub fn new<S: AccountStore, H: SecretHasher>(
        config: HttpConfig,
        auth_state: Arc<AuthState<S, H>>,
    ) -> Self {
        Self {
            config,
            auth: auth_router(auth_state),
        }
    }

    pub async fn start(&self) -> Result<()> {
        let app = self.router();
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| CredentialGateError::Config(format!("invalid listen address: {}", e)))?;
        let listener = TcpListener::bind(addr).await?;

        log::info!("🌐 HTTP server listening on http://{}", addr);

        axum::serve(listener, app).await?;
        Ok(())
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(api_status))
            .nest("/auth", self.auth.clone())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
    }
}

async fn api_status() -> ResponseJson<ApiResponse> {
    ResponseJson(ApiResponse {
        status: "ready".to_string(),
        message: format!("{} {} is running", crate::NAME, crate::VERSION),
    })
}

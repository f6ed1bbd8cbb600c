//! Application startup and lifecycle management.

use crate::config::QuizgenConfig;
use crate::handlers::{generation, health};
use crate::services::providers::groq::{GroqConfig, GroqProvider};
use crate::services::providers::{CompletionParams, CompletionProvider};
use crate::services::QuizGenerator;
use axum::http::{header, HeaderName, Method, Request};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: QuizGenerator,
}

/// Build the HTTP router with its middleware stack.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/generate-mcq", post(generation::generate_mcq))
        .route("/generate-material", post(generation::generate_material))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer())
}

/// Browser clients call from arbitrary origins.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Groq provider described by `config`.
    pub async fn build(config: QuizgenConfig) -> Result<Self, AppError> {
        let provider = GroqProvider::new(GroqConfig {
            api_url: config.groq.api_url.clone(),
            api_key: config.groq.api_key.clone(),
            model: config.groq.model.clone(),
            timeout: config.groq.timeout(),
        })
        .map_err(|e| {
            tracing::error!("Failed to initialize Groq provider: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        tracing::info!(
            model = %config.groq.model,
            api_url = %config.groq.api_url,
            "Initialized Groq completion provider"
        );

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: QuizgenConfig,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        let mcq_params = CompletionParams {
            temperature: Some(config.generation.mcq_temperature),
            max_tokens: Some(config.generation.mcq_max_tokens),
        };
        let state = AppState {
            generator: QuizGenerator::new(provider, mcq_params),
        };

        // Port 0 = random port for testing
        let addr = config.common.listen_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Quizgen service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

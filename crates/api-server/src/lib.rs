use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use dashboard_core::DashboardError;
use dashboard_orchestrator::{DashboardOrchestrator, DashboardState};
use polygon_client::PolygonClient;
use serde::Serialize;
use std::sync::Arc;
use text_analytics_client::TextAnalyticsClient;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

pub mod config;
mod dashboard_routes;

pub use config::DashboardConfig;
pub use dashboard_routes::{dashboard_routes, DashboardView, SelectedArticleView};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<DashboardOrchestrator>,
    pub dashboard: Arc<DashboardState>,
}

impl AppState {
    pub fn new(orchestrator: DashboardOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            dashboard: Arc::new(DashboardState::new()),
        }
    }

    /// Wire the real upstream clients from configuration.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let polygon = PolygonClient::new(config.polygon_api_key.clone())
            .with_base_url(config.polygon_base_url.clone())
            .with_news_limit(config.news_limit)
            .with_timeout(config.http_timeout());

        let text_analytics = TextAnalyticsClient::with_timeout(
            config.text_analytics_endpoint.clone(),
            config.text_analytics_key.clone(),
            config.http_timeout(),
        );

        Self::new(DashboardOrchestrator::new(
            Arc::new(polygon),
            Arc::new(text_analytics),
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    /// An upstream service failed or rejected the request
    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Internal(String),
}

impl From<DashboardError> for AppError {
    fn from(error: DashboardError) -> Self {
        match error {
            DashboardError::InvalidTicker(_) => AppError::BadRequest(error.to_string()),
            DashboardError::ApiError(_) | DashboardError::Upstream(_) => {
                AppError::BadGateway(error.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(dashboard_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = DashboardConfig::from_env()?;
    tracing::info!(
        "Starting dashboard API (polygon: {}, news limit: {})",
        config.polygon_base_url,
        config.news_limit
    );

    let app = create_app(AppState::from_config(&config));

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

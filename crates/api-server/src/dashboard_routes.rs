//! Dashboard API Routes
//!
//! Ticker submission and the currently published dashboard.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use dashboard_core::{AnnotatedArticle, CompanyProfile, RelatedCompany, Ticker};
use dashboard_orchestrator::{Dashboard, SubmissionResult};
use sentiment_analysis::{breakdown, ChartSlice};
use serde::{Deserialize, Serialize};

use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub ticker: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectedArticleView {
    pub index: usize,
    pub article: AnnotatedArticle,
    /// Chart slices; absent when the article could not be scored
    pub breakdown: Option<[ChartSlice; 3]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub ticker: Ticker,
    pub profile: CompanyProfile,
    pub news: Vec<AnnotatedArticle>,
    pub selected: Option<SelectedArticleView>,
    pub related: Vec<RelatedCompany>,
    pub generated_at: DateTime<Utc>,
}

impl From<&Dashboard> for DashboardView {
    fn from(dashboard: &Dashboard) -> Self {
        let selected = dashboard.selected_index.and_then(|index| {
            dashboard.news.get(index).map(|article| SelectedArticleView {
                index,
                article: article.clone(),
                breakdown: article.sentiment.as_ref().map(breakdown),
            })
        });

        Self {
            ticker: dashboard.ticker.clone(),
            profile: dashboard.profile.clone(),
            news: dashboard.news.clone(),
            selected,
            related: dashboard.related.clone(),
            generated_at: dashboard.generated_at,
        }
    }
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard", get(current_dashboard).post(submit_dashboard))
        .route("/api/dashboard/:ticker", get(get_dashboard))
}

/// `None` while nothing has been submitted; failures become errors.
fn view_of(result: &SubmissionResult) -> Result<Option<DashboardView>, AppError> {
    match result {
        SubmissionResult::Empty => Ok(None),
        SubmissionResult::Ready(dashboard) => Ok(Some(DashboardView::from(dashboard))),
        SubmissionResult::Failed { error, .. } => Err(error.clone().into()),
    }
}

fn ready_view(result: &SubmissionResult) -> Result<DashboardView, AppError> {
    view_of(result)?.ok_or_else(|| AppError::Internal("Submission produced no result".to_string()))
}

/// Build a dashboard without touching the shared view state.
async fn get_dashboard(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let result = state.orchestrator.submit(&ticker).await;
    Ok(Json(ApiResponse::success(ready_view(&result)?)))
}

async fn submit_dashboard(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let result = state
        .orchestrator
        .submit_to(&state.dashboard, &request.ticker)
        .await;
    Ok(Json(ApiResponse::success(ready_view(&result)?)))
}

async fn current_dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<DashboardView>>>, AppError> {
    let current = state.dashboard.current().await;
    Ok(Json(ApiResponse::success(view_of(&current)?)))
}

use async_trait::async_trait;

use crate::{CompanyProfile, DashboardError, NewsArticle, RelatedCompany, SentimentScore, Ticker};

/// Read access to the reference-data service.
///
/// Each call is independent; the orchestrator decides how they are joined.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn company_profile(&self, ticker: &Ticker) -> Result<CompanyProfile, DashboardError>;

    async fn news(&self, ticker: &Ticker) -> Result<Vec<NewsArticle>, DashboardError>;

    async fn related_companies(&self, ticker: &Ticker) -> Result<Vec<RelatedCompany>, DashboardError>;
}

/// Per-article sentiment scoring.
///
/// Implementations never fail: any error is logged and reported as `None`.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    async fn score(&self, article_url: &str) -> Option<SentimentScore>;
}

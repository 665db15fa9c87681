use chrono::Utc;
use dashboard_core::{MarketDataSource, SentimentScorer, Ticker};
use std::sync::Arc;

pub mod joins;
pub mod state;

pub use joins::{join_all_or_nothing, join_all_settled};
pub use state::{Dashboard, DashboardState, SubmissionResult, SubmissionTicket};

/// Runs one ticker submission end to end: reference fetch, per-article
/// scoring, then aggregation.
#[derive(Clone)]
pub struct DashboardOrchestrator {
    market_data: Arc<dyn MarketDataSource>,
    scorer: Arc<dyn SentimentScorer>,
}

impl DashboardOrchestrator {
    pub fn new(market_data: Arc<dyn MarketDataSource>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self {
            market_data,
            scorer,
        }
    }

    /// Process a raw user-entered ticker into a complete result.
    pub async fn submit(&self, raw_ticker: &str) -> SubmissionResult {
        let ticker = match Ticker::parse(raw_ticker) {
            Ok(ticker) => ticker,
            Err(error) => {
                tracing::info!("Rejected submission {:?}: {}", raw_ticker, error);
                return SubmissionResult::Failed {
                    ticker: None,
                    error,
                };
            }
        };

        tracing::info!("Building dashboard for {}", ticker);

        let fetched = join_all_or_nothing(
            self.market_data.company_profile(&ticker),
            self.market_data.news(&ticker),
            self.market_data.related_companies(&ticker),
        )
        .await;

        let (profile, news, related) = match fetched {
            Ok(parts) => parts,
            Err(error) => {
                tracing::warn!("Reference data fetch failed for {}: {}", ticker, error);
                return SubmissionResult::Failed {
                    ticker: Some(ticker),
                    error,
                };
            }
        };

        let scores = join_all_settled(
            news.iter()
                .map(|article| self.scorer.score(&article.article_url)),
        )
        .await;

        let failed = scores.iter().filter(|s| s.is_none()).count();
        if failed > 0 {
            tracing::warn!("{} of {} sentiment lookups failed for {}", failed, scores.len(), ticker);
        }

        let aggregated = sentiment_analysis::aggregate(news, scores);

        tracing::info!(
            "Dashboard ready for {}: {} articles, {} related, selected {:?}",
            ticker,
            aggregated.articles.len(),
            related.len(),
            aggregated.selected().map(|a| a.article.title.as_str())
        );

        SubmissionResult::Ready(Dashboard {
            ticker,
            profile,
            news: aggregated.articles,
            selected_index: aggregated.selected_index,
            related,
            generated_at: Utc::now(),
        })
    }

    /// Submit and publish into shared view state, last submission wins.
    pub async fn submit_to(&self, state: &DashboardState, raw_ticker: &str) -> SubmissionResult {
        let ticket = state.begin();
        let result = self.submit(raw_ticker).await;
        state.publish(ticket, result.clone()).await;
        result
    }
}

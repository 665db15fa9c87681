use async_trait::async_trait;
use dashboard_core::{
    CompanyProfile, DashboardError, MarketDataSource, NewsArticle, RelatedCompany, Ticker,
};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const BASE_URL: &str = "https://api.polygon.io";

/// Polygon's own default page size for the news endpoint
pub const DEFAULT_NEWS_LIMIT: u32 = 10;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct PolygonClient {
    api_key: String,
    base_url: String,
    news_limit: u32,
    client: Client,
}

impl PolygonClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            news_limit: DEFAULT_NEWS_LIMIT,
            client: build_http_client(DEFAULT_TIMEOUT),
        }
    }

    /// Point the client at a different host (proxies, mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_news_limit(mut self, limit: u32) -> Self {
        self.news_limit = limit.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self
    }

    /// Get ticker details (company profile)
    pub async fn get_ticker_details(&self, ticker: &Ticker) -> Result<CompanyProfile, DashboardError> {
        let url = self.endpoint(&["v3", "reference", "tickers", ticker.as_str()])?;

        let details: TickerDetailsResult = self
            .fetch(url, &[])
            .await?
            .ok_or_else(|| {
                DashboardError::Upstream(format!("Ticker details response for {} missing results", ticker))
            })?;

        Ok(CompanyProfile {
            ticker: details.ticker,
            name: details.name,
            market_cap: details.market_cap,
            description: details.description.unwrap_or_default(),
            homepage_url: details.homepage_url,
            icon_url: details.branding.and_then(|b| b.icon_url),
        })
    }

    /// Get news articles mentioning the ticker, in upstream order
    pub async fn get_news(&self, ticker: &Ticker) -> Result<Vec<NewsArticle>, DashboardError> {
        let url = self.endpoint(&["v2", "reference", "news"])?;
        let limit = self.news_limit.to_string();

        let articles: Option<Vec<NewsArticle>> = self
            .fetch(url, &[("ticker", ticker.as_str()), ("limit", limit.as_str())])
            .await?;

        Ok(articles.unwrap_or_default())
    }

    /// Get companies Polygon considers related to the ticker
    pub async fn get_related_companies(&self, ticker: &Ticker) -> Result<Vec<RelatedCompany>, DashboardError> {
        let url = self.endpoint(&["v1", "related-companies", ticker.as_str()])?;

        let related: Option<Vec<RelatedCompany>> = self.fetch(url, &[]).await?;

        Ok(related.unwrap_or_default())
    }

    /// Build an endpoint URL, encoding each segment so free-text tickers
    /// cannot escape the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, DashboardError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| DashboardError::ApiError(format!("Invalid Polygon base URL '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| DashboardError::ApiError(format!("Invalid Polygon base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue a GET and unwrap the `{results, error}` envelope.
    ///
    /// An `error` field wins over the HTTP status; a non-2xx status without
    /// one falls back to `message` and then to the bare status line.
    async fn fetch<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, DashboardError> {
        tracing::debug!("Polygon GET {}", url.path());

        let response = self
            .client
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| DashboardError::ApiError(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::ApiError(e.without_url().to_string()))?;

        let envelope: Envelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(DashboardError::ApiError(format!("Invalid Polygon response: {}", e)));
            }
            Err(_) => return Err(DashboardError::Upstream(http_status_message(status, &body))),
        };

        if let Some(error) = envelope.error.filter(|e| !e.is_empty()) {
            return Err(DashboardError::Upstream(error));
        }

        if !status.is_success() {
            let message = envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| http_status_message(status, ""));
            return Err(DashboardError::Upstream(message));
        }

        match envelope.results {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(results) => serde_json::from_value(results)
                .map(Some)
                .map_err(|e| DashboardError::ApiError(format!("Invalid Polygon results: {}", e))),
        }
    }
}

#[async_trait]
impl MarketDataSource for PolygonClient {
    async fn company_profile(&self, ticker: &Ticker) -> Result<CompanyProfile, DashboardError> {
        self.get_ticker_details(ticker).await
    }

    async fn news(&self, ticker: &Ticker) -> Result<Vec<NewsArticle>, DashboardError> {
        self.get_news(ticker).await
    }

    async fn related_companies(&self, ticker: &Ticker) -> Result<Vec<RelatedCompany>, DashboardError> {
        self.get_related_companies(ticker).await
    }
}

fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

fn http_status_message(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body.trim())
    }
}

// Response structures
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    results: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TickerDetailsResult {
    ticker: String,
    name: String,
    market_cap: Option<f64>,
    description: Option<String>,
    homepage_url: Option<String>,
    branding: Option<Branding>,
}

#[derive(Debug, Deserialize)]
struct Branding {
    icon_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_ticker_segment() {
        let client = PolygonClient::new("k").with_base_url("http://localhost:9000/");
        let ticker = Ticker::parse("a/b?c").unwrap();
        let url = client.endpoint(&["v3", "reference", "tickers", ticker.as_str()]).unwrap();
        assert_eq!(url.path(), "/v3/reference/tickers/A%2FB%3FC");
    }

    #[test]
    fn test_endpoint_rejects_garbage_base_url() {
        let client = PolygonClient::new("k").with_base_url("not a url");
        assert!(matches!(client.endpoint(&["v2"]), Err(DashboardError::ApiError(_))));
    }

    #[test]
    fn test_news_limit_floor() {
        let client = PolygonClient::new("k").with_news_limit(0);
        assert_eq!(client.news_limit, 1);
    }
}

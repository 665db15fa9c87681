use async_trait::async_trait;
use dashboard_core::{SentimentScore, SentimentScorer};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{TextAnalyticsError, TextAnalyticsResult};

pub const SENTIMENT_PATH: &str = "text/analytics/v3.1/sentiment";
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

const DOCUMENT_LANGUAGE: &str = "en";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct SentimentRequest<'a> {
    documents: [RequestDocument<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestDocument<'a> {
    id: &'static str,
    language: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    #[serde(default)]
    documents: Vec<ResponseDocument>,
    #[serde(default)]
    errors: Vec<DocumentError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseDocument {
    confidence_scores: ConfidenceScores,
}

#[derive(Debug, Deserialize)]
struct ConfidenceScores {
    positive: f64,
    neutral: f64,
    negative: f64,
}

#[derive(Debug, Deserialize)]
struct DocumentError {
    #[serde(default)]
    id: String,
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl ErrorDetail {
    fn describe(&self) -> String {
        match (self.code.is_empty(), self.message.is_empty()) {
            (false, false) => format!("{}: {}", self.code, self.message),
            (true, false) => self.message.clone(),
            (false, true) => self.code.clone(),
            (true, true) => "unspecified error".to_string(),
        }
    }
}

/// Client for the text-analytics sentiment endpoint.
#[derive(Clone)]
pub struct TextAnalyticsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl TextAnalyticsClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Score a single English document.
    pub async fn analyze_sentiment(&self, text: &str) -> TextAnalyticsResult<SentimentScore> {
        let url = self.sentiment_url()?;
        let request = SentimentRequest {
            documents: [RequestDocument {
                id: "1",
                language: DOCUMENT_LANGUAGE,
                text,
            }],
        };

        let response = self
            .client
            .post(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.describe())
                .unwrap_or_else(|_| body.trim().to_string());
            return Err(TextAnalyticsError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SentimentResponse = serde_json::from_str(&body)
            .map_err(|e| TextAnalyticsError::InvalidResponse(e.to_string()))?;

        if let Some(rejected) = parsed.errors.first() {
            return Err(TextAnalyticsError::DocumentRejected(format!(
                "document {}: {}",
                rejected.id,
                rejected.error.describe()
            )));
        }

        let document = parsed
            .documents
            .into_iter()
            .next()
            .ok_or_else(|| TextAnalyticsError::InvalidResponse("no documents in response".to_string()))?;

        validate_scores(document.confidence_scores)
    }

    fn sentiment_url(&self) -> TextAnalyticsResult<Url> {
        let base = self.endpoint.trim();
        if base.is_empty() {
            return Err(TextAnalyticsError::InvalidEndpoint(String::new()));
        }
        // Url::join drops the last path segment unless it ends with '/'
        let base = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        Url::parse(&base)
            .and_then(|u| u.join(SENTIMENT_PATH))
            .map_err(|_| TextAnalyticsError::InvalidEndpoint(self.endpoint.clone()))
    }
}

fn validate_scores(scores: ConfidenceScores) -> TextAnalyticsResult<SentimentScore> {
    let in_range = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
    if !(in_range(scores.positive) && in_range(scores.neutral) && in_range(scores.negative)) {
        return Err(TextAnalyticsError::InvalidResponse(format!(
            "confidence scores out of range: {:?}",
            scores
        )));
    }
    Ok(SentimentScore::new(scores.positive, scores.neutral, scores.negative))
}

#[async_trait]
impl SentimentScorer for TextAnalyticsClient {
    /// The article URL itself is the document text.
    async fn score(&self, article_url: &str) -> Option<SentimentScore> {
        match self.analyze_sentiment(article_url).await {
            Ok(score) => Some(score),
            Err(e) => {
                tracing::warn!("Sentiment scoring failed for {}: {}", article_url, e);
                None
            }
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Company reference data for the summary panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub ticker: String,
    pub name: String,
    /// Absent for funds and some foreign listings
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub description: String,
    pub homepage_url: Option<String>,
    pub icon_url: Option<String>,
}

/// News article as returned by the news endpoint.
///
/// Known fields are typed; anything else the upstream sends is carried in
/// `extra` and serialized back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    pub published_utc: DateTime<Utc>,
    pub article_url: String,
    #[serde(rename = "description", default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tickers: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Upstream sometimes sends `null` for list fields it has nothing for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Confidence distribution over positive / neutral / negative.
///
/// Not guaranteed to sum to exactly 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentScore {
    pub fn new(positive: f64, neutral: f64, negative: f64) -> Self {
        Self {
            positive,
            neutral,
            negative,
        }
    }

    /// How emotionally extreme the article is, in either direction.
    pub fn significance(&self) -> f64 {
        self.positive.max(self.negative)
    }
}

/// A news article paired with its sentiment (`None` when scoring failed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedArticle {
    #[serde(flatten)]
    pub article: NewsArticle,
    pub sentiment: Option<SentimentScore>,
}

impl AnnotatedArticle {
    /// Significance of the attached sentiment; `None` for unscored articles
    /// and for scores that are not comparable (NaN).
    pub fn significance(&self) -> Option<f64> {
        self.sentiment
            .map(|s| s.significance())
            .filter(|sig| !sig.is_nan())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedCompany {
    pub ticker: String,
}

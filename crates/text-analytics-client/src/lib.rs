pub mod error;
pub mod sentiment;

pub use error::{TextAnalyticsError, TextAnalyticsResult};
pub use sentiment::{TextAnalyticsClient, SENTIMENT_PATH, SUBSCRIPTION_KEY_HEADER};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextAnalyticsError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("Service returned {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Document rejected: {0}")]
    DocumentRejected(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type TextAnalyticsResult<T> = Result<T, TextAnalyticsError>;

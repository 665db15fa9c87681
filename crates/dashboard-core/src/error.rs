use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    /// Transport-level failure talking to an upstream service.
    #[error("API error: {0}")]
    ApiError(String),

    /// Error reported by the upstream service in its response body.
    #[error("{0}")]
    Upstream(String),
}

impl DashboardError {
    /// The bare message carried by the error, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            DashboardError::InvalidTicker(msg)
            | DashboardError::ApiError(msg)
            | DashboardError::Upstream(msg) => msg,
        }
    }
}

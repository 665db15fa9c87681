use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DashboardError;

/// Uppercased, trimmed ticker symbol as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Normalize free-text user input into a ticker.
    pub fn parse(raw: &str) -> Result<Self, DashboardError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DashboardError::InvalidTicker(
                "ticker must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

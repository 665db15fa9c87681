//! Sentiment breakdown for the highlight chart.

use dashboard_core::SentimentScore;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceColor {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: f64,
    pub color: SliceColor,
}

/// Positive, Neutral, Negative slices, always in that order.
pub fn breakdown(score: &SentimentScore) -> [ChartSlice; 3] {
    [
        ChartSlice {
            label: "Positive",
            value: score.positive,
            color: SliceColor::Green,
        },
        ChartSlice {
            label: "Neutral",
            value: score.neutral,
            color: SliceColor::Yellow,
        },
        ChartSlice {
            label: "Negative",
            value: score.negative,
            color: SliceColor::Red,
        },
    ]
}

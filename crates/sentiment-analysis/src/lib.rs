use dashboard_core::{AnnotatedArticle, NewsArticle, SentimentScore};

pub mod breakdown;
pub use breakdown::{breakdown, ChartSlice, SliceColor};

/// Articles paired with their scores, plus the index of the one that
/// stands out most.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedNews {
    pub articles: Vec<AnnotatedArticle>,
    pub selected_index: Option<usize>,
}

impl AggregatedNews {
    pub fn selected(&self) -> Option<&AnnotatedArticle> {
        self.selected_index.and_then(|i| self.articles.get(i))
    }
}

/// Zip articles with their index-aligned scores, keeping upstream order.
///
/// Missing trailing scores are treated as failed lookups; surplus scores
/// are ignored.
pub fn annotate(news: Vec<NewsArticle>, scores: Vec<Option<SentimentScore>>) -> Vec<AnnotatedArticle> {
    if news.len() != scores.len() {
        tracing::warn!(
            "Sentiment results misaligned with news ({} articles, {} scores)",
            news.len(),
            scores.len()
        );
    }

    let mut scores = scores.into_iter();
    news.into_iter()
        .map(|article| AnnotatedArticle {
            article,
            sentiment: scores.next().flatten(),
        })
        .collect()
}

/// Index of the most sentiment-extreme article.
///
/// The first article is the initial candidate whether or not it was scored.
/// Unscored candidates rank below every scored article, and a later article
/// only replaces the candidate when strictly more significant, so the
/// earliest article wins ties. Returns `None` only for an empty slice.
pub fn select_most_significant(articles: &[AnnotatedArticle]) -> Option<usize> {
    let mut scan = articles.iter().enumerate();
    let (mut best_index, first) = scan.next()?;
    let mut best = first.significance().unwrap_or(f64::NEG_INFINITY);

    for (index, article) in scan {
        if let Some(significance) = article.significance() {
            if significance > best {
                best = significance;
                best_index = index;
            }
        }
    }

    Some(best_index)
}

/// Annotate and select in one pass over already-resolved data.
pub fn aggregate(news: Vec<NewsArticle>, scores: Vec<Option<SentimentScore>>) -> AggregatedNews {
    let articles = annotate(news, scores);
    let selected_index = select_most_significant(&articles);

    if let Some(selected) = selected_index.and_then(|i| articles.get(i)) {
        tracing::debug!(
            "Selected article '{}' (significance {:?})",
            selected.article.title,
            selected.significance()
        );
    }

    AggregatedNews {
        articles,
        selected_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn article(title: &str) -> NewsArticle {
        NewsArticle {
            id: title.to_lowercase(),
            title: title.to_string(),
            author: None,
            published_utc: Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap(),
            article_url: format!("https://example.com/{}", title.to_lowercase()),
            summary: None,
            image_url: None,
            keywords: vec![],
            tickers: vec!["AAPL".to_string()],
            extra: serde_json::Map::new(),
        }
    }

    fn score(positive: f64, neutral: f64, negative: f64) -> Option<SentimentScore> {
        Some(SentimentScore::new(positive, neutral, negative))
    }

    fn annotated(items: &[(&str, Option<SentimentScore>)]) -> Vec<AnnotatedArticle> {
        items
            .iter()
            .map(|(title, sentiment)| AnnotatedArticle {
                article: article(title),
                sentiment: *sentiment,
            })
            .collect()
    }

    #[test]
    fn test_positive_extreme_beats_negative() {
        let result = aggregate(
            vec![article("A"), article("B")],
            vec![score(0.9, 0.05, 0.05), score(0.1, 0.2, 0.7)],
        );
        assert_eq!(result.selected().unwrap().article.title, "A");
    }

    #[test]
    fn test_negative_extreme_can_win() {
        let articles = annotated(&[
            ("A", score(0.6, 0.3, 0.1)),
            ("B", score(0.02, 0.03, 0.95)),
        ]);
        assert_eq!(select_most_significant(&articles), Some(1));
    }

    #[test]
    fn test_null_first_candidate_is_replaced() {
        let result = aggregate(
            vec![article("X"), article("Y")],
            vec![None, score(0.6, 0.3, 0.1)],
        );
        assert_eq!(result.selected().unwrap().article.title, "Y");
    }

    #[test]
    fn test_all_null_keeps_first_article() {
        let result = aggregate(
            vec![article("X"), article("Y"), article("Z")],
            vec![None, None, None],
        );
        assert_eq!(result.selected_index, Some(0));
        assert!(result.selected().unwrap().sentiment.is_none());
    }

    #[test]
    fn test_empty_input_has_no_selection() {
        let result = aggregate(vec![], vec![]);
        assert!(result.articles.is_empty());
        assert_eq!(result.selected_index, None);
        assert!(result.selected().is_none());
    }

    #[test]
    fn test_ties_go_to_earliest() {
        let articles = annotated(&[
            ("A", score(0.2, 0.6, 0.2)),
            ("B", score(0.8, 0.1, 0.1)),
            ("C", score(0.1, 0.1, 0.8)),
            ("D", score(0.8, 0.2, 0.0)),
        ]);
        assert_eq!(select_most_significant(&articles), Some(1));
    }

    #[test]
    fn test_null_after_scored_candidate_is_skipped() {
        let articles = annotated(&[("A", score(0.3, 0.4, 0.3)), ("B", None), ("C", score(0.2, 0.7, 0.1))]);
        assert_eq!(select_most_significant(&articles), Some(0));
    }

    #[test]
    fn test_selected_dominates_every_scored_article() {
        let values = [0.31, 0.77, 0.12, 0.77, 0.5, 0.66, 0.05];
        let articles: Vec<AnnotatedArticle> = values
            .iter()
            .enumerate()
            .map(|(i, v)| AnnotatedArticle {
                article: article(&format!("T{}", i)),
                sentiment: if i % 3 == 2 { None } else { score(*v, 0.0, 1.0 - v) },
            })
            .collect();

        let selected = select_most_significant(&articles).unwrap();
        let best = articles[selected].significance().unwrap();
        for other in &articles {
            if let Some(sig) = other.significance() {
                assert!(best >= sig);
            }
        }
    }

    #[test]
    fn test_annotate_preserves_order_and_length() {
        let annotated = annotate(
            vec![article("A"), article("B"), article("C")],
            vec![score(0.5, 0.5, 0.0), None],
        );
        let titles: Vec<&str> = annotated.iter().map(|a| a.article.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert!(annotated[0].sentiment.is_some());
        assert!(annotated[1].sentiment.is_none());
        // No score arrived for C
        assert!(annotated[2].sentiment.is_none());
    }
}

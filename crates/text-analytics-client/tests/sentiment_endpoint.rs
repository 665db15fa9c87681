use dashboard_core::SentimentScorer;
use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;
use text_analytics_client::{TextAnalyticsClient, TextAnalyticsError};

const PATH: &str = "/text/analytics/v3.1/sentiment";

#[tokio::test]
async fn scores_article_url_as_english_document() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(PATH)
            .header("Ocp-Apim-Subscription-Key", "sub-key")
            .json_body(json!({
                "documents": [
                    {"id": "1", "language": "en", "text": "https://example.com/story"}
                ]
            }));
        then.status(200).json_body(json!({
            "documents": [{
                "id": "1",
                "sentiment": "positive",
                "confidenceScores": {"positive": 0.9, "neutral": 0.05, "negative": 0.05},
                "sentences": [],
                "warnings": []
            }],
            "errors": [],
            "modelVersion": "2022-11-01"
        }));
    });

    let client = TextAnalyticsClient::new(server.base_url(), "sub-key");
    let score = client.analyze_sentiment("https://example.com/story").await.unwrap();
    mock.assert();

    assert_eq!(score.positive, 0.9);
    assert_eq!(score.neutral, 0.05);
    assert_eq!(score.negative, 0.05);
}

#[tokio::test]
async fn document_error_is_reported() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(200).json_body(json!({
            "documents": [],
            "errors": [{
                "id": "1",
                "error": {"code": "InvalidArgument", "message": "Document text is empty."}
            }],
            "modelVersion": "2022-11-01"
        }));
    });

    let client = TextAnalyticsClient::new(server.base_url(), "sub-key");
    let err = client.analyze_sentiment("").await.unwrap_err();
    assert!(matches!(err, TextAnalyticsError::DocumentRejected(msg) if msg.contains("InvalidArgument")));
}

#[tokio::test]
async fn unauthorized_status_is_a_service_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(401).json_body(json!({
            "error": {"code": "401", "message": "Access denied due to invalid subscription key."}
        }));
    });

    let client = TextAnalyticsClient::new(server.base_url(), "wrong");
    let err = client.analyze_sentiment("https://example.com/a").await.unwrap_err();
    match err {
        TextAnalyticsError::ServiceError { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid subscription key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(200).body("<html>gateway</html>");
    });

    let client = TextAnalyticsClient::new(server.base_url(), "k");
    let err = client.analyze_sentiment("https://example.com/a").await.unwrap_err();
    assert!(matches!(err, TextAnalyticsError::InvalidResponse(_)));
}

#[tokio::test]
async fn scorer_degrades_failures_to_none() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(500).body("boom");
    });

    let client = TextAnalyticsClient::new(server.base_url(), "k");
    assert_eq!(client.score("https://example.com/a").await, None);

    // Missing endpoint configuration fails every call the same way
    let unconfigured = TextAnalyticsClient::new("", "k");
    assert_eq!(unconfigured.score("https://example.com/a").await, None);
}

#[tokio::test]
async fn scorer_returns_score_on_success() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(200).json_body(json!({
            "documents": [{
                "id": "1",
                "confidenceScores": {"positive": 0.1, "neutral": 0.2, "negative": 0.7}
            }],
            "errors": []
        }));
    });

    let client = TextAnalyticsClient::new(server.base_url(), "k");
    let score = client.score("https://example.com/b").await.unwrap();
    assert_eq!(score.significance(), 0.7);
}

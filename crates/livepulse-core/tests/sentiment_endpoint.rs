//! Tests for the sentiment provider boundary against a mocked endpoint.

use livepulse_core::{SentimentBias, SentimentClient};

#[tokio::test]
async fn well_formed_payload_is_returned() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/get-market-sentiment")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "aiAnxietyMultiplier": 1.2,
                "trainingInterestMultiplier": 1.1,
                "newsContext": "Recent layoffs increasing AI replacement concerns",
                "timestamp": 1741600000000
            }"#,
        )
        .create_async()
        .await;

    let client = SentimentClient::new(format!("{}/get-market-sentiment", server.url()));
    let bias = client.fetch().await.unwrap();
    assert_eq!(bias.ai_anxiety_multiplier, 1.2);
    assert_eq!(bias.training_interest_multiplier, 1.1);
    assert_eq!(
        bias.news_context,
        "Recent layoffs increasing AI replacement concerns"
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn out_of_range_multipliers_are_clamped() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/get-market-sentiment")
        .with_status(200)
        .with_body(r#"{"aiAnxietyMultiplier": 3.0, "trainingInterestMultiplier": 0.2}"#)
        .create_async()
        .await;

    let client = SentimentClient::new(format!("{}/get-market-sentiment", server.url()));
    let bias = client.fetch().await.unwrap();
    assert_eq!(bias.ai_anxiety_multiplier, 1.5);
    assert_eq!(bias.training_interest_multiplier, 0.8);
}

#[tokio::test]
async fn missing_keys_default_to_neutral_multipliers() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/get-market-sentiment")
        .with_status(200)
        .with_body(r#"{"newsContext": "quiet week"}"#)
        .create_async()
        .await;

    let client = SentimentClient::new(format!("{}/get-market-sentiment", server.url()));
    let bias = client.fetch().await.unwrap();
    assert_eq!(bias.ai_anxiety_multiplier, 1.0);
    assert_eq!(bias.training_interest_multiplier, 1.0);
    assert_eq!(bias.news_context, "quiet week");
}

#[tokio::test]
async fn malformed_payload_degrades_to_neutral() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/get-market-sentiment")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = SentimentClient::new(format!("{}/get-market-sentiment", server.url()));
    let bias = client.fetch_or_neutral().await;
    assert_eq!(bias, SentimentBias::neutral());
}

#[tokio::test]
async fn server_error_degrades_to_neutral() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/get-market-sentiment")
        .with_status(500)
        .create_async()
        .await;

    let client = SentimentClient::new(format!("{}/get-market-sentiment", server.url()));
    let bias = client.fetch_or_neutral().await;
    assert_eq!(bias, SentimentBias::neutral());
}

#[tokio::test]
async fn hung_endpoint_times_out_to_neutral() {
    // A listener that accepts connections into its backlog but never
    // answers; only the client timeout gets the fetch unstuck.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let client = SentimentClient::with_timeout(
        format!("http://{addr}/get-market-sentiment"),
        std::time::Duration::from_millis(200),
    );
    let bias = client.fetch_or_neutral().await;
    assert_eq!(bias, SentimentBias::neutral());
}

#[tokio::test]
async fn unconfigured_endpoint_degrades_to_neutral() {
    let client = SentimentClient::new("");
    let bias = client.fetch_or_neutral().await;
    assert_eq!(bias, SentimentBias::neutral());
}

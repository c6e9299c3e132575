use mockito::Matcher;
use serde_json::json;
use std::time::Duration;
use trip_planner::{
    Agent, ChatClient, Credential, ErrorKind, GenerationOptions, PlannerConfig, Provenance,
    RequestKind, TripRequest,
};

fn credential() -> Credential {
    Credential::new("hf_test_key").unwrap()
}

fn options() -> GenerationOptions {
    GenerationOptions::default()
        .with_model("test/model")
        .with_max_tokens(300)
}

fn completion_body(text: &str) -> String {
    json!({
        "id": "cmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_successful_completion_sends_single_user_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer hf_test_key")
        .match_body(Matcher::Json(json!({
            "model": "test/model",
            "messages": [{"role": "user", "content": "Plan three days in Kyoto"}],
            "max_tokens": 300
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("Day 1: Fushimi Inari"))
        .expect(1)
        .create_async()
        .await;

    let client = ChatClient::new().with_base_url(server.url());
    let text = client
        .chat_completion("Plan three days in Kyoto", &options(), &credential())
        .await
        .unwrap();

    assert_eq!(text, "Day 1: Fushimi Inari");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_temperature_is_sent_when_set() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({ "temperature": 0.5 })))
        .with_status(200)
        .with_body(completion_body("ok"))
        .create_async()
        .await;

    let client = ChatClient::new().with_base_url(server.url());
    let text = client
        .chat_completion("hi", &options().with_temperature(Some(0.5)), &credential())
        .await
        .unwrap();

    assert_eq!(text, "ok");
    mock.assert_async().await;
}

async fn error_kind_for(status: usize, body: &str) -> ErrorKind {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let client = ChatClient::new().with_base_url(server.url());
    let err = client
        .chat_completion("hello", &options(), &credential())
        .await
        .unwrap_err();

    // a single attempt regardless of the failure
    mock.assert_async().await;
    err.kind()
}

#[tokio::test]
async fn test_status_classification() {
    let error_body = r#"{"error":{"message":"nope"}}"#;

    assert_eq!(error_kind_for(401, error_body).await, ErrorKind::Unauthorized);
    assert_eq!(error_kind_for(403, error_body).await, ErrorKind::Unauthorized);
    assert_eq!(error_kind_for(429, error_body).await, ErrorKind::RateLimited);
    assert_eq!(error_kind_for(404, error_body).await, ErrorKind::ModelUnavailable);
    assert_eq!(error_kind_for(503, error_body).await, ErrorKind::ModelUnavailable);
    assert_eq!(error_kind_for(500, "internal").await, ErrorKind::ModelUnavailable);
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_header("retry-after", "17")
        .create_async()
        .await;

    let client = ChatClient::new().with_base_url(server.url());
    let err = client
        .chat_completion("hello", &options(), &credential())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        trip_planner::ChatError::RateLimited {
            retry_after: Some(17)
        }
    );
}

#[tokio::test]
async fn test_malformed_success_bodies() {
    let bodies = [
        "not json at all".to_string(),
        json!({ "choices": [] }).to_string(),
        json!({ "choices": [{"message": {"role": "assistant"}}] }).to_string(),
        json!({ "error": {"message": "upstream exploded"} }).to_string(),
    ];

    for body in bodies {
        assert_eq!(error_kind_for(200, &body).await, ErrorKind::MalformedResponse);
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ChatClient::new().with_base_url(format!("http://{}", addr));
    let err = client
        .chat_completion("hello", &options(), &credential())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkError);
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // accept the connection and never answer
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(socket);
    });

    let client = ChatClient::new()
        .with_base_url(format!("http://{}", addr))
        .with_timeout(Duration::from_millis(200));
    let err = client
        .chat_completion("hello", &options(), &credential())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkError);
    server.abort();
}

#[tokio::test]
async fn test_agent_falls_back_when_server_rejects_key() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":"Invalid credentials in Authorization header"}"#)
        .create_async()
        .await;

    let config = PlannerConfig::default()
        .with_base_url(server.url())
        .with_timeout(Duration::from_secs(5));
    let agent = Agent::from_config(&config);

    let trip = TripRequest::builder(
        "Tokyo, Japan",
        chrono::NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2025, 4, 3).unwrap(),
    )
    .build()
    .unwrap();

    let result = agent
        .run(RequestKind::Itinerary, &trip, Some(&credential()))
        .await;

    assert_eq!(result.provenance, Provenance::Offline);
    assert_eq!(result.error, Some(ErrorKind::Unauthorized));
    assert!(result
        .error_detail
        .as_deref()
        .unwrap()
        .contains("Invalid credentials in Authorization header"));
    assert!(result.text.contains("Tokyo, Japan"));
}

#[tokio::test]
async fn test_agent_returns_live_text_from_server() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("Tokyo, Japan".to_string()))
        .with_status(200)
        .with_body(completion_body("Day 1: Arrive..."))
        .create_async()
        .await;

    let agent = Agent::new(ChatClient::new().with_base_url(server.url()));
    let trip = TripRequest::builder(
        "Tokyo, Japan",
        chrono::NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2025, 4, 3).unwrap(),
    )
    .build()
    .unwrap();

    let result = agent
        .run(RequestKind::Research, &trip, Some(&credential()))
        .await;

    assert_eq!(result.provenance, Provenance::Live);
    assert_eq!(result.text, "Day 1: Arrive...");
}

#[tokio::test]
async fn test_null_error_field_keeps_live_text() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": "Day 1: Arrive..."}}],
                "error": null
            })
            .to_string(),
        )
        .create_async()
        .await;

    let agent = Agent::new(ChatClient::new().with_base_url(server.url()));
    let trip = TripRequest::builder(
        "Tokyo, Japan",
        chrono::NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2025, 4, 3).unwrap(),
    )
    .build()
    .unwrap();

    let result = agent
        .run(RequestKind::Itinerary, &trip, Some(&credential()))
        .await;

    assert_eq!(result.provenance, Provenance::Live);
    assert_eq!(result.text, "Day 1: Arrive...");
    assert!(result.error.is_none());
}

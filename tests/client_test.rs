use serde_json::json;
use vibenav::{Config, Location, Outcome, Request, VibeClient, VibeResult};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> VibeClient {
    let config = Config::from_sources(Some(server.uri()), None, None, Some(5), None).unwrap();
    VibeClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_locations() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "India Gate", "position": [28.6129, 77.2295]},
            {"name": "Lodhi Garden", "position": [28.5931, 77.2197]}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let locations = client_for(&mock_server).fetch_locations().await.unwrap();
    assert_eq!(
        locations,
        vec![
            Location::new("India Gate", 28.6129, 77.2295),
            Location::new("Lodhi Garden", 28.5931, 77.2197),
        ]
    );
}

#[tokio::test]
async fn test_fetch_vibe_encodes_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/vibe/India%20Gate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "found",
            "summary": "A grand arch with evening crowds.",
            "tags": ["monumental", "patriotic", "crowded"],
            "citations": ["Lovely at night"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).fetch_vibe("India Gate").await.unwrap();
    match result {
        VibeResult::Found(report) => {
            assert_eq!(report.summary, "A grand arch with evening crowds.");
            assert_eq!(report.tags.len(), 3);
            assert_eq!(report.citations, vec!["Lovely at night"]);
        }
        other => panic!("expected found vibe, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_vibe_not_found_and_error_shapes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/vibe/Atlantis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "not_found",
            "message": "I couldn't find specific reviews for 'Atlantis'.",
            "suggestions": ["India Gate", "Lodhi Garden"]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/vibe/Broken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Could not load vector store."
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    assert_eq!(
        client.fetch_vibe("Atlantis").await.unwrap(),
        VibeResult::NotFound {
            message: Some("I couldn't find specific reviews for 'Atlantis'.".to_string()),
            suggestions: vec!["India Gate".to_string(), "Lodhi Garden".to_string()],
        }
    );
    assert_eq!(
        client.fetch_vibe("Broken").await.unwrap(),
        VibeResult::error("Could not load vector store.")
    );
}

#[tokio::test]
async fn test_error_status_with_json_body_is_parsed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/vibe/Down"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Database offline"})))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).fetch_vibe("Down").await.unwrap();
    assert_eq!(result, VibeResult::error("Database offline"));
}

#[tokio::test]
async fn test_non_json_body_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/vibe/Crash"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    assert!(client_for(&mock_server).fetch_vibe("Crash").await.is_err());
}

#[tokio::test]
async fn test_fetch_locations_by_vibe() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/locations_by_vibe/cozy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["The Cozy Mug Cafe", "Perch"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = client_for(&mock_server)
        .execute(&Request::LocationsByVibe("cozy".to_string()))
        .await;

    match outcome {
        Outcome::LocationsByVibe(Ok(names)) => {
            assert_eq!(names, vec!["The Cozy Mug Cafe", "Perch"]);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_an_error() {
    // Bind then drop a listener so its port refuses connections
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let uri = format!("http://127.0.0.1:{}", port);
    let config = Config::from_sources(Some(uri), None, None, Some(2), None).unwrap();
    let client = VibeClient::new(&config).unwrap();

    assert!(client.fetch_locations().await.is_err());
    assert!(matches!(
        client.execute(&Request::Vibe("India Gate".to_string())).await,
        Outcome::Vibe(Err(_))
    ));
}

#[test]
fn test_endpoint_keeps_base_path() {
    let config = Config::from_sources(
        Some("http://example.com/backend/".to_string()),
        None,
        None,
        None,
        None,
    )
    .unwrap();
    let client = VibeClient::new(&config).unwrap();

    let url = client.endpoint(&["vibe", "Café 24/7"]).unwrap();
    assert_eq!(url.as_str(), "http://example.com/backend/api/vibe/Caf%C3%A9%2024%2F7");
}

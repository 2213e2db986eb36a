use serde_json::json;
use tinarelay_api::models::{Measurement, MediaPost, SenmlEnvelope, StatusPost};
use tinarelay_plugin::configs::Service;
use tinarelay_plugin::errors::DeliveryError;
use tinarelay_plugin::services::{Delivery, DeliveryService};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> Service {
    Service {
        account_name: "demo".to_string(),
        username: "user".to_string(),
        password: "pass".to_string(),
        domain: "tinamous.com".to_string(),
        base_url: Some(server.uri()),
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn post_status_sends_service_contract_body_with_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/Status"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .and(body_json(json!({ "Message": "Hello", "Lite": true })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let delivery = DeliveryService::new(service_for(&server)).unwrap();
    let result = delivery
        .post_status(StatusPost {
            message: "Hello".to_string(),
            lite: true,
        })
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn post_media_returns_the_service_assigned_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/media"))
        .and(body_json(json!({
            "ContentType": "image/jpeg",
            "Base64Media": "AAAA",
            "Caption": "Print finished successfully!",
            "Description": "",
            "UniqueMediaName": "printer-cam",
            "Tags": ["OctoPrint", "#TodayOnTheUltimaker"],
            "CreateStatusPost": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Id": "12345" })))
        .expect(1)
        .mount(&server)
        .await;

    let delivery = DeliveryService::new(service_for(&server)).unwrap();
    let id = delivery
        .post_media(MediaPost {
            content_type: "image/jpeg".to_string(),
            base64_media: "AAAA".to_string(),
            caption: "Print finished successfully!".to_string(),
            description: String::new(),
            unique_media_name: "printer-cam".to_string(),
            tags: vec!["OctoPrint".to_string(), "#TodayOnTheUltimaker".to_string()],
            create_status_post: true,
        })
        .await
        .unwrap();

    assert_eq!(id, "12345");
}

#[tokio::test]
async fn post_measurements_uses_senml_short_keys() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/senml"))
        .and(body_json(json!({
            "e": [
                { "n": "V", "u": "V", "v": 5.1 },
                { "n": "Fan1.State", "v": 1.0 },
            ]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let delivery = DeliveryService::new(service_for(&server)).unwrap();
    let envelope = SenmlEnvelope {
        entries: vec![
            Measurement::new("V", Some("V"), 5.1),
            Measurement::new("Fan1.State", None, 1.0),
        ],
    };

    assert!(delivery.post_measurements(envelope).await.is_ok());
}

#[tokio::test]
async fn empty_account_name_issues_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut service = service_for(&server);
    service.account_name = String::new();

    let delivery = DeliveryService::new(service).unwrap();

    let status = delivery
        .post_status(StatusPost {
            message: "Hello".to_string(),
            lite: true,
        })
        .await;
    assert!(matches!(status, Err(DeliveryError::Configuration)));

    let media = delivery
        .post_media(MediaPost {
            content_type: "image/jpeg".to_string(),
            base64_media: "AAAA".to_string(),
            caption: String::new(),
            description: String::new(),
            unique_media_name: String::new(),
            tags: Vec::new(),
            create_status_post: true,
        })
        .await;
    assert!(matches!(media, Err(DeliveryError::Configuration)));

    let measurements = delivery
        .post_measurements(SenmlEnvelope {
            entries: vec![Measurement::new("V", Some("V"), 5.1)],
        })
        .await;
    assert!(matches!(measurements, Err(DeliveryError::Configuration)));

    server.verify().await;
}

#[tokio::test]
async fn non_success_response_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/Status"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let delivery = DeliveryService::new(service_for(&server)).unwrap();
    let result = delivery
        .post_status(StatusPost {
            message: "Hello".to_string(),
            lite: true,
        })
        .await;

    match result {
        Err(DeliveryError::Service { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // Port 9 is discard; nothing listens there in the test environment.
    let service = Service {
        account_name: "demo".to_string(),
        username: "user".to_string(),
        password: "pass".to_string(),
        domain: "tinamous.com".to_string(),
        base_url: Some("http://127.0.0.1:9".to_string()),
        timeout_secs: 1,
    };

    let delivery = DeliveryService::new(service).unwrap();
    let result = delivery
        .post_status(StatusPost {
            message: "Hello".to_string(),
            lite: true,
        })
        .await;

    assert!(matches!(result, Err(DeliveryError::Transport(_))));
}

use serde_json::json;
use waba_adapters::{HttpApiClient, HttpClientConfig, RetryPolicy, TracingLogger};
use waba_core::prelude::*;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpApiClient {
    HttpApiClient::new(HttpClientConfig::new("test-token").with_base_url(server.uri())).unwrap()
}

#[tokio::test]
async fn test_get_sends_bearer_token_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v21.0/1234/message_templates"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"name": "hello_world"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let value = client_for(&server)
        .get("/1234/message_templates", &[("limit".into(), "20".into())])
        .await
        .unwrap();

    assert_eq!(value["data"][0]["name"], "hello_world");
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    let body = json!({"messaging_product": "whatsapp", "to": "1"});

    Mock::given(method("POST"))
        .and(path("/v21.0/1234/messages"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"messages": [{"id": "wamid.1"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let value = client_for(&server).post("/1234/messages", &body).await.unwrap();
    assert_eq!(value["messages"][0]["id"], "wamid.1");
}

#[tokio::test]
async fn test_empty_success_body_means_success() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v21.0/1234/message_templates"))
        .and(query_param("name", "old_promo"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let value = client_for(&server)
        .delete("/1234/message_templates", &[("name".into(), "old_promo".into())])
        .await
        .unwrap();

    assert_eq!(value, json!({"success": true}));
}

#[tokio::test]
async fn test_error_envelope_becomes_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "message": "(#131009) Parameter value is not valid",
                "type": "OAuthException",
                "code": 131009,
                "fbtrace_id": "A1b2"
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .post("/1234/messages", &json!({}))
        .await
        .unwrap_err();

    let ClientError::Api(api) = err else {
        panic!("expected api error");
    };
    assert_eq!(api.code, "131009");
    assert_eq!(api.http_status, Some(400));
    assert!(api.details.unwrap().contains("fbtrace_id=A1b2"));
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get("/1234/message_templates", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // bind then release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        HttpApiClient::new(HttpClientConfig::new("t").with_base_url(format!("http://{addr}")))
            .unwrap();
    let err = client.get("/1/message_templates", &[]).await.unwrap_err();

    let ClientError::Api(api) = err else {
        panic!("expected api error");
    };
    assert!(api.is_network());
    assert_eq!(api.code, "network_error");
}

#[tokio::test]
async fn test_retry_on_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"error": {"message": "throttled", "code": 4}})))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let client = HttpApiClient::new(
        HttpClientConfig::new("t")
            .with_base_url(server.uri())
            .with_retry(RetryPolicy::new(3, 10, 50)),
    )
    .unwrap();

    let value = client.get("/1/message_templates", &[]).await.unwrap();
    assert_eq!(value, json!({"data": []}));
}

#[tokio::test]
async fn test_no_retry_on_client_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": {"message": "bad", "code": 100}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpApiClient::new(
        HttpClientConfig::new("t")
            .with_base_url(server.uri())
            .with_retry(RetryPolicy::new(3, 10, 50)),
    )
    .unwrap();

    assert!(client.get("/1/message_templates", &[]).await.is_err());
}

#[tokio::test]
async fn test_service_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v21.0/1234/message_templates"))
        .and(query_param("name", "missing_one"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v21.0/1234/message_templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "777", "status": "PENDING"})))
        .mount(&server)
        .await;

    let service = TemplateService::new(Box::new(client_for(&server)), "1234", Box::new(TracingLogger));

    let err = service.get_template_details("missing_one").await.unwrap_err();
    assert!(matches!(err, MessageError::TemplateNotFound { .. }));

    let created = service
        .create_template("promo", "en_US", TemplateCategory::Marketing, &[])
        .await;
    assert_eq!(created.template_id(), Some("777"));
}

mod common;

use kitakita_client::config::ClientOptions;
use kitakita_client::error::Error;
use kitakita_client::fetch::Payload;
use kitakita_client::pagination::ListParams;
use kitakita_client::Kitakita;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[tokio::test]
async fn test_response_body_branches_on_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/text"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server);

    let json_payload = client.api().get("/json").send().await.unwrap();
    assert_eq!(json_payload, Payload::Json(json!({"ok": true})));

    let pdf = client.api().get("/pdf").execute_binary().await.unwrap();
    assert_eq!(&pdf[..], b"%PDF-1.4");

    let text = client.api().get("/text").send().await.unwrap();
    assert_eq!(text, Payload::Text("pong".to_string()));
}

#[tokio::test]
async fn test_json_error_message_is_surfaced_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "X"})))
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server);
    let err = client.products().list(&ListParams::new()).await.unwrap_err();

    assert_eq!(err.to_string(), "X");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
}

#[tokio::test]
async fn test_error_field_and_fallback_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/error-field"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Forbidden"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/no-message"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"status": 500})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/text-error"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad gateway"))
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server);

    let forbidden = client.api().get("/error-field").execute::<Value>().await.unwrap_err();
    assert_eq!(forbidden.to_string(), "Forbidden");
    assert!(forbidden.is_unauthorized());

    let fallback = client.api().get("/no-message").execute::<Value>().await.unwrap_err();
    assert_eq!(fallback.to_string(), "An unexpected error occurred");

    let text = client.api().get("/text-error").execute::<Value>().await.unwrap_err();
    assert!(matches!(text, Error::UnexpectedResponse { .. }));
    assert_eq!(text.to_string(), "Bad gateway");
}

#[tokio::test]
async fn test_blank_search_is_omitted_from_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .and(|request: &Request| !request.url.query_pairs().any(|(key, _)| key == "search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(json!([]), 0, 0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server);
    let page = client
        .products()
        .list(&ListParams::new().with_search(""))
        .await
        .unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_search_is_percent_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", "chippy small"))
        .and(query_param("categoryId", "3"))
        .and(|request: &Request| {
            request
                .url
                .query()
                .map(|query| query.starts_with("search=chippy%20small&categoryId=3&page=1"))
                .unwrap_or(false)
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(json!([]), 1, 2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server);
    let params = ListParams::new()
        .with_search("chippy small")
        .with_category(Some(3))
        .with_page(1);
    client.products().list(&params).await.unwrap();
}

#[tokio::test]
async fn test_bearer_token_and_client_info_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/summary"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("X-Client-Info", "kitakita-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = ClientOptions::default()
        .with_base_url(&mock_server.uri())
        .with_client_info("kitakita-test");
    let client = Kitakita::new(options).unwrap();
    let store = std::sync::Arc::new(kitakita_client::auth::MemoryStore::new());
    let mut manager = client.session_manager(store);
    manager
        .set_session(kitakita_client::auth::Session {
            token: common::TOKEN.to_string(),
            user: common::user(),
        })
        .unwrap();

    client.dashboard().summary().await.unwrap();
}

#[tokio::test]
async fn test_multipart_body_is_sent_as_is() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(|request: &Request| {
            let body = String::from_utf8_lossy(&request.body);
            body.contains("name=\"label\"") && body.contains("Snacks")
        })
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server);
    let form = reqwest::multipart::Form::new().text("label", "Snacks");
    client
        .api()
        .post("/upload")
        .multipart(form)
        .execute_unit()
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let options = ClientOptions::default().with_base_url("http://127.0.0.1:9");
    let client = Kitakita::new(options).unwrap();

    let err = client.categories().list().await.unwrap_err();
    assert!(err.is_network());
    assert!(err.to_string().contains("http://127.0.0.1:9/api/categories"));
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let options = ClientOptions::default().with_base_url("not a url");
    assert!(matches!(Kitakita::new(options), Err(Error::Url(_))));
}

//! Integration tests for the HTTP client against a mock server.
//!
//! These tests verify the headers and bodies the client sends and how raw
//! responses are turned into trees or typed errors.

use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_string, body_string_contains, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yahoo_shopping_api::clients::{BodyEncoding, FileUpload, HttpClient, HttpMethod, HttpRequest};
use yahoo_shopping_api::{AccessToken, ClientError, ConnectionConfig, HostUrl, Tree};

const ENDPOINT: &str = "https://circus.shopping.yahooapis.jp/ShoppingWebService/V1/getItem";

/// Creates a client whose requests all go to `server`.
fn create_client(server: &MockServer) -> HttpClient {
    let config = ConnectionConfig::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .api_host(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    HttpClient::new(&config)
}

fn xml_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "application/xml")
}

fn json_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "application/json")
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_get_sends_bearer_token_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ShoppingWebService/V1/getItem"))
        .and(header("Authorization", "Bearer test-token"))
        .and(query_param("seller_id", "store"))
        .and(query_param("item_code", "t shirt"))
        .respond_with(xml_response(
            r#"<?xml version="1.0" encoding="UTF-8"?><ResultSet><Result><ItemCode>t shirt</ItemCode></Result></ResultSet>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Get, ENDPOINT)
        .payload(Tree::from_pairs([("seller_id", "store"), ("item_code", "t shirt")]))
        .build()
        .unwrap();

    let tree = assert_ok!(client.request(request).await);
    assert_eq!(
        tree.pointer(&["Result", "ItemCode"]).and_then(Tree::as_str),
        Some("t shirt")
    );
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_regex("User-Agent", "^Yahoo Shopping API Library v"))
        .respond_with(json_response(r#"{"ok":"1"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Get, ENDPOINT).build().unwrap();

    assert_ok!(client.request(request).await);
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(json_response(r#"{"ok":"1"}"#))
        .mount(&server)
        .await;

    let config = ConnectionConfig::builder()
        .api_host(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let client = HttpClient::new(&config);
    let request = HttpRequest::builder(HttpMethod::Get, ENDPOINT).build().unwrap();

    let tree = assert_ok!(client.request(request).await);
    assert_eq!(tree.get("ok").and_then(Tree::as_str), Some("1"));
}

#[tokio::test]
async fn test_form_post_body_and_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string("seller_id=store&Search%5BResult%5D=10"))
        .respond_with(xml_response("<ResultSet><Status>OK</Status></ResultSet>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut params = Tree::from_pairs([("seller_id", "store")]);
    params.entry_map("Search").insert("Result", 10);
    let request = HttpRequest::builder(HttpMethod::Post, ENDPOINT)
        .encoding(BodyEncoding::Form)
        .payload(params)
        .build()
        .unwrap();

    let tree = assert_ok!(client.request(request).await);
    assert_eq!(tree.get("Status").and_then(Tree::as_str), Some("OK"));
}

#[tokio::test]
async fn test_form_text_is_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string("<Req><SellerId>store</SellerId></Req>"))
        .respond_with(xml_response("<ResultSet><Status>OK</Status></ResultSet>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Post, ENDPOINT)
        .encoding(BodyEncoding::Form)
        .text("<Req><SellerId>store</SellerId></Req>")
        .build()
        .unwrap();

    assert_ok!(client.request(request).await);
}

#[tokio::test]
async fn test_json_put_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(header("Content-Type", "application/json"))
        .and(body_string(r#"{"sellerId":"store","isRead":"true"}"#))
        .respond_with(json_response(r#"{"status":"ok"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Put, ENDPOINT)
        .payload(Tree::from_pairs([
            ("sellerId", Tree::leaf("store")),
            ("isRead", Tree::from(true)),
        ]))
        .build()
        .unwrap();

    assert_ok!(client.request(request).await);
}

#[tokio::test]
async fn test_multipart_upload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header_regex("Content-Type", "^multipart/form-data; boundary="))
        .and(body_string_contains(r#"name="note""#))
        .and(body_string_contains(r#"name="file"; filename="notes.txt""#))
        .and(body_string_contains("file contents"))
        .respond_with(json_response(r#"{"fileName":"notes.txt"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("notes.txt");
    std::fs::write(&file_path, "file contents").unwrap();
    let upload = FileUpload::from_path("file", &file_path, "text/plain")
        .await
        .unwrap();

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Post, ENDPOINT)
        .multipart(Tree::from_pairs([("note", "hello")]), vec![upload])
        .build()
        .unwrap();

    let tree = assert_ok!(client.request(request).await);
    assert_eq!(tree.get("fileName").and_then(Tree::as_str), Some("notes.txt"));
}

// ============================================================================
// Response Tests
// ============================================================================

#[tokio::test]
async fn test_www_authenticate_wins_over_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("WWW-Authenticate", r#"Bearer error="invalid_token""#)
                .set_body_raw(
                    b"<Error><Message>ignored</Message></Error>".to_vec(),
                    "application/xml",
                ),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Get, ENDPOINT).build().unwrap();

    let error = assert_err!(client.request(request).await);
    match error {
        ClientError::Auth(auth) => assert_eq!(auth.challenge, r#"Bearer error="invalid_token""#),
        other => panic!("expected an auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_message_envelope_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(xml_response(
            r#"<?xml version="1.0" encoding="UTF-8"?><Error><Message>Invalid SellerId</Message><Code>ed-00001</Code></Error>"#,
        ))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Get, ENDPOINT).build().unwrap();

    let error = assert_err!(client.request(request).await);
    match error {
        ClientError::Api(api) => {
            assert_eq!(api.message, "Invalid SellerId");
            assert_eq!(api.detail, "ed-00001: Invalid SellerId");
            assert_eq!(api.to_string(), "Invalid SellerId");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reason_envelope_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(json_response(r#"{"error":{"reason":"quota exceeded"}}"#))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Get, ENDPOINT).build().unwrap();

    let error = assert_err!(client.request(request).await);
    assert!(matches!(error, ClientError::Api(api) if api.message == "quota exceeded"));
}

#[tokio::test]
async fn test_empty_body_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Get, ENDPOINT).build().unwrap();

    let error = assert_err!(client.request(request).await);
    assert!(matches!(error, ClientError::EmptyResponse));
}

#[tokio::test]
async fn test_raw_response_keeps_header_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(json_response(r#"{"a":"1"}"#).insert_header("X-Trace", "abc"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Get, ENDPOINT).build().unwrap();

    let raw = assert_ok!(client.execute(&request).await);
    assert_eq!(raw.body(), br#"{"a":"1"}"#);
    assert!(raw.header_block().ends_with(b"\r\n\r\n"));
    assert_eq!(raw.header_size(), raw.header_block().len());
}

#[tokio::test]
async fn test_download_returns_file_bytes() {
    let server = MockServer::start().await;
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png.clone(), "image/png"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Get, ENDPOINT).build().unwrap();

    let file = assert_ok!(client.download(request).await);
    assert_eq!(file.content_type.as_deref(), Some("image/png"));
    assert_eq!(file.body, png);
}

#[tokio::test]
async fn test_download_detects_xml_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(xml_response(
            "<Error><Message>File not found</Message><Code>f-404</Code></Error>",
        ))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Get, ENDPOINT).build().unwrap();

    let error = assert_err!(client.download(request).await);
    assert!(matches!(error, ClientError::Api(api) if api.detail == "f-404: File not found"));
}

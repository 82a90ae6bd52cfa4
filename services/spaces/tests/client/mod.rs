use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use http::{header, HeaderMap, StatusCode, Uri};
use log::warn;
use pretty_assertions::assert_eq;
use spacesign_core::{Context, HttpSend, OsEnv, Result};
use spacesign_http_send_reqwest::ReqwestHttpSend;
use spacesign_spaces::{Client, Config, EnvCredentialProvider, ResponseErrorKind};

/// Replies with a canned response and records what it was asked to send.
#[derive(Debug, Clone)]
struct MockHttpSend {
    status: StatusCode,
    headers: Vec<(&'static str, &'static str)>,
    body: &'static str,
    sent: Arc<Mutex<Vec<(Uri, HeaderMap)>>>,
}

impl MockHttpSend {
    fn new(status: u16, body: &'static str) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("status must be valid"),
            headers: Vec::new(),
            body,
            sent: Arc::default(),
        }
    }

    fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    fn sent(&self) -> Vec<(Uri, HeaderMap)> {
        self.sent.lock().expect("lock must not be poisoned").clone()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.sent
            .lock()
            .expect("lock must not be poisoned")
            .push((req.uri().clone(), req.headers().clone()));

        let mut resp = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            resp = resp.header(*name, *value);
        }
        Ok(resp.body(Bytes::from_static(self.body.as_bytes()))?)
    }
}

fn config() -> Config {
    Config {
        region: Some("nyc3".to_string()),
        access_key_id: Some(super::signing::ACCESS_KEY.to_string()),
        secret_access_key: Some(super::signing::SECRET_KEY.to_string()),
        ..Default::default()
    }
}

fn client(http: impl HttpSend) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();
    Client::new(Context::new().with_http_send(http), &config())
        .expect("config must be complete")
        .with_signer(super::signing::signer())
}

const ACCESS_DENIED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
  <Code>AccessDenied</Code>
  <Message>Access Denied</Message>
  <RequestId>tx0000000000000a1b2c3-0065920000-nyc3a</RequestId>
</Error>"#;

#[tokio::test]
async fn test_forbidden_keeps_response() {
    let http = MockHttpSend::new(403, ACCESS_DENIED).with_header("x-amz-request-id", "tx0001");
    let client = client(http.clone());

    let err = client.list_buckets().await.unwrap_err();

    assert_eq!(err.kind(), ResponseErrorKind::Status);
    assert_eq!(err.status_code(), 403);
    assert_eq!(err.reason_phrase(), "Forbidden");
    assert_eq!(err.headers()["x-amz-request-id"], "tx0001");
    assert_eq!(err.body(), ACCESS_DENIED);
    assert!(err.message().contains("AccessDenied"));
    assert!(err.is_auth_failure());

    let sent = http.sent();
    assert_eq!(sent.len(), 1, "requests are never retried");
    assert!(sent[0].1.contains_key(header::AUTHORIZATION));
}

#[tokio::test]
async fn test_server_error_without_xml_body() {
    let client = client(MockHttpSend::new(503, "Slow Down"));

    let err = client.get_object("bucket", "a.txt").await.unwrap_err();

    assert_eq!(err.kind(), ResponseErrorKind::Status);
    assert_eq!(err.status_code(), 503);
    assert_eq!(err.reason_phrase(), "Service Unavailable");
    assert_eq!(err.body(), "Slow Down");
    assert!(!err.is_auth_failure());
}

#[tokio::test]
async fn test_unparsable_success_body() {
    const BODY: &str = "<ListBucketResult><MaxKeys>many</MaxKeys></ListBucketResult>";
    let client = client(MockHttpSend::new(200, BODY));

    let err = client.list_objects("bucket", None).await.unwrap_err();

    assert_eq!(err.kind(), ResponseErrorKind::Parse);
    assert_eq!(err.status_code(), 200);
    assert_eq!(err.body(), BODY);
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_success_with_foreign_document() {
    let bodies = [
        ACCESS_DENIED,
        "<html><body>captive portal</body></html>",
        "<ListBucketResult><Name>b</Name><IsTruncated>false</IsTruncated></ListBucketResult>",
        "captive portal",
    ];

    for body in bodies {
        let client = client(MockHttpSend::new(200, body));

        let err = client.list_buckets().await.unwrap_err();

        assert_eq!(err.kind(), ResponseErrorKind::Parse, "{body}");
        assert_eq!(err.status_code(), 200);
        assert_eq!(err.body(), body);
    }
}

#[tokio::test]
async fn test_listing_without_required_elements() {
    let client = client(MockHttpSend::new(
        200,
        "<ListBucketResult><MaxKeys>1000</MaxKeys></ListBucketResult>",
    ));

    let err = client.list_objects("bucket", None).await.unwrap_err();
    assert_eq!(err.kind(), ResponseErrorKind::Parse);
}

#[tokio::test]
async fn test_invalid_bucket_is_never_sent() {
    let http = MockHttpSend::new(200, "");
    let client = client(http.clone());

    let err = client.get_object("../other", "a.txt").await.unwrap_err();

    assert_eq!(err.kind(), ResponseErrorKind::Config);
    assert_eq!(err.status_code(), 0);
    assert!(http.sent().is_empty());
}

#[tokio::test]
async fn test_list_objects_with_prefix() {
    let http = MockHttpSend::new(
        200,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>static-images</Name>
  <Prefix>2024/</Prefix>
  <MaxKeys>1000</MaxKeys>
  <IsTruncated>false</IsTruncated>
  <Contents>
    <Key>2024/new year.png</Key>
    <LastModified>2024-01-01T00:00:00.000Z</LastModified>
    <ETag>"fb08934ef619f205f272b0adfd6c018c"</ETag>
    <Size>35369</Size>
    <StorageClass>STANDARD</StorageClass>
  </Contents>
</ListBucketResult>"#,
    );
    let client = client(http.clone());

    let result = client
        .list_objects("static-images", Some("2024/"))
        .await
        .expect("listing must succeed");

    assert_eq!(result.prefix, "2024/");
    assert_eq!(result.contents.len(), 1);
    assert_eq!(result.contents[0].key, "2024/new year.png");

    let sent = http.sent();
    assert_eq!(
        sent[0].0.to_string(),
        "https://nyc3.digitaloceanspaces.com/static-images?prefix=2024%2F"
    );
    assert_eq!(sent[0].1["x-amz-date"], "20240101T000000Z");
    assert_eq!(sent[0].1[header::HOST], "nyc3.digitaloceanspaces.com");
}

#[tokio::test]
async fn test_get_object_returns_body() {
    let http = MockHttpSend::new(200, "hello, spaces");
    let client = client(http.clone());

    let body = client
        .get_object("bucket", "notes/readme.txt")
        .await
        .expect("get must succeed");

    assert_eq!(body, "hello, spaces");
    assert_eq!(http.sent()[0].0.path(), "/bucket/notes/readme.txt");
}

#[tokio::test]
async fn test_connect_failure_has_no_response() {
    let client = Client::new(
        Context::new().with_http_send(ReqwestHttpSend::default()),
        &Config {
            endpoint: Some("http://127.0.0.1:1".to_string()),
            ..config()
        },
    )
    .expect("config must be complete");

    let err = client.list_buckets().await.unwrap_err();

    assert_eq!(err.kind(), ResponseErrorKind::Connect);
    assert_eq!(err.status_code(), 0);
    assert_eq!(err.reason_phrase(), "");
    assert!(err.headers().is_empty());
    assert_eq!(err.body(), "");
}

#[tokio::test]
async fn test_live_list_buckets() {
    let _ = env_logger::builder().is_test(true).try_init();

    if env::var("SPACESIGN_TEST").unwrap_or_default() != "on" {
        warn!("SPACESIGN_TEST is not set, skipped");
        return;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::default().from_env(&ctx);
    let client = Client::from_provider(ctx, &EnvCredentialProvider::new(), &config)
        .await
        .expect("credential must be loaded from env");

    let buckets = client.list_buckets().await.expect("list buckets must succeed");
    for bucket in buckets.buckets.bucket {
        let listing = client
            .list_objects(&bucket.name, None)
            .await
            .expect("list objects must succeed");
        assert_eq!(listing.name, bucket.name);
    }
}

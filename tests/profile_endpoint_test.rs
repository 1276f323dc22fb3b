use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use profile_func::core::{BlobLocation, BlobStore, StoreConnector};
use profile_func::{create_router, FuncError, ProfileHandler, ProfileSettings, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::util::ServiceExt;

const PROFILE_JSON: &str = r#"{"name":"M. Rodriguez","title":"Cloud Engineer","links":{"github":"https://github.com/example"}}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailAt {
    Connect,
    Exists,
    Download,
}

#[derive(Clone, Default)]
struct Calls {
    connect: Arc<AtomicUsize>,
    exists: Arc<AtomicUsize>,
    download: Arc<AtomicUsize>,
}

impl Calls {
    fn total(&self) -> usize {
        self.connect.load(Ordering::SeqCst)
            + self.exists.load(Ordering::SeqCst)
            + self.download.load(Ordering::SeqCst)
    }
}

fn transport_failure(step: &str) -> FuncError {
    FuncError::IoError(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        format!("simulated failure during {}", step),
    ))
}

#[derive(Clone)]
struct FakeStore {
    blobs: Arc<HashMap<BlobLocation, Vec<u8>>>,
    fail_at: Option<FailAt>,
    calls: Calls,
}

impl BlobStore for FakeStore {
    async fn exists(&self, location: &BlobLocation) -> Result<bool> {
        self.calls.exists.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(FailAt::Exists) {
            return Err(transport_failure("exists"));
        }
        Ok(self.blobs.contains_key(location))
    }

    async fn download(&self, location: &BlobLocation) -> Result<Vec<u8>> {
        self.calls.download.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(FailAt::Download) {
            return Err(transport_failure("download"));
        }
        self.blobs
            .get(location)
            .cloned()
            .ok_or_else(|| transport_failure("download"))
    }
}

#[derive(Clone)]
struct FakeConnector {
    store: FakeStore,
}

impl FakeConnector {
    fn new(blobs: Vec<(BlobLocation, Vec<u8>)>, fail_at: Option<FailAt>) -> Self {
        Self {
            store: FakeStore {
                blobs: Arc::new(blobs.into_iter().collect()),
                fail_at,
                calls: Calls::default(),
            },
        }
    }

    fn with_profile(body: &[u8]) -> Self {
        Self::new(vec![(BlobLocation::default(), body.to_vec())], None)
    }

    fn calls(&self) -> Calls {
        self.store.calls.clone()
    }
}

impl StoreConnector for FakeConnector {
    type Store = FakeStore;

    fn connect(&self, _connection_string: &str) -> Result<FakeStore> {
        self.store.calls.connect.fetch_add(1, Ordering::SeqCst);
        if self.store.fail_at == Some(FailAt::Connect) {
            return Err(FuncError::InvalidConnectionString {
                reason: "simulated".to_string(),
            });
        }
        Ok(self.store.clone())
    }
}

fn configured() -> ProfileSettings {
    ProfileSettings::new(Some(
        "DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=c2VjcmV0LWtleQ==".to_string(),
    ))
}

fn build_app(connector: FakeConnector, settings: ProfileSettings) -> Router {
    create_router(ProfileHandler::new(connector, settings))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, content_type, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_existing_blob_is_returned_verbatim_as_json() {
    let connector = FakeConnector::with_profile(PROFILE_JSON.as_bytes());
    let calls = connector.calls();
    let app = build_app(connector, configured());

    let (status, content_type, body) = send(&app, get("/profile")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, PROFILE_JSON.as_bytes());
    assert_eq!(calls.exists.load(Ordering::SeqCst), 1);
    assert_eq!(calls.download.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_body_is_not_reserialized() {
    // Whitespace, key order and a non-JSON-looking payload all pass through.
    let raw = "{\n  \"b\": 1,\n  \"a\":   [ ]\n}\n";
    let app = build_app(FakeConnector::with_profile(raw.as_bytes()), configured());

    let (status, _, body) = send(&app, get("/profile")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, raw.as_bytes());

    let plain = build_app(FakeConnector::with_profile(b"definitely not json"), configured());
    let (status, content_type, body) = send(&plain, get("/profile")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, b"definitely not json");
}

#[tokio::test]
async fn test_missing_blob_is_404_naming_container_and_key() {
    let connector = FakeConnector::new(vec![], None);
    let calls = connector.calls();
    let app = build_app(connector, configured());

    let (status, content_type, body) = send(&app, get("/profile")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.unwrap().starts_with("text/plain"));
    let body = String::from_utf8(body).unwrap();
    assert_eq!(body, "Blob site-content/profile.json not found.");
    assert!(body.contains("site-content/profile.json"));
    assert_eq!(calls.download.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unset_connection_string_never_touches_the_store() {
    for settings in [
        ProfileSettings::new(None),
        ProfileSettings::new(Some(String::new())),
    ] {
        let connector = FakeConnector::with_profile(PROFILE_JSON.as_bytes());
        let calls = connector.calls();
        let app = build_app(connector, settings);

        let (status, _, body) = send(&app, get("/profile")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, b"BlobConnectionString is not configured.");
        assert_eq!(calls.total(), 0);
    }
}

#[tokio::test]
async fn test_whitespace_connection_string_is_a_store_failure() {
    let connector = FakeConnector::new(
        vec![(BlobLocation::default(), PROFILE_JSON.as_bytes().to_vec())],
        Some(FailAt::Connect),
    );
    let calls = connector.calls();
    let app = build_app(connector, ProfileSettings::new(Some(" \t ".to_string())));

    let (status, _, body) = send(&app, get("/profile")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Internal server error.");
    assert_eq!(calls.connect.load(Ordering::SeqCst), 1);
    assert_eq!(calls.exists.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_any_store_failure_is_a_generic_500() {
    for fail_at in [FailAt::Connect, FailAt::Exists, FailAt::Download] {
        let connector = FakeConnector::new(
            vec![(BlobLocation::default(), PROFILE_JSON.as_bytes().to_vec())],
            Some(fail_at),
        );
        let app = build_app(connector, configured());

        let (status, _, body) = send(&app, get("/profile")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "failing at {:?}", fail_at);
        assert_eq!(body, b"Internal server error.", "failing at {:?}", fail_at);
    }
}

#[tokio::test]
async fn test_invalid_utf8_is_a_generic_500() {
    let app = build_app(FakeConnector::with_profile(&[0xff, 0xfe, 0x7b]), configured());

    let (status, _, body) = send(&app, get("/profile")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Internal server error.");
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let connector = FakeConnector::with_profile(PROFILE_JSON.as_bytes());
    let calls = connector.calls();
    let app = build_app(connector, configured());

    let first = send(&app, get("/profile")).await;
    let second = send(&app, get("/profile")).await;
    let third = send(&app, get("/profile")).await;

    assert_eq!(first, second);
    assert_eq!(second, third);
    // Nothing is cached between requests.
    assert_eq!(calls.download.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_request_input_does_not_change_the_blob() {
    let connector = FakeConnector::new(
        vec![
            (BlobLocation::default(), PROFILE_JSON.as_bytes().to_vec()),
            (BlobLocation::new("secrets", "keys.json"), b"{\"leak\":true}".to_vec()),
        ],
        None,
    );
    let app = build_app(connector, configured());

    let baseline = send(&app, get("/profile")).await;

    let with_query = send(
        &app,
        get("/profile?container=secrets&blob=keys.json&name=..%2F..%2Fkeys.json"),
    )
    .await;
    assert_eq!(with_query, baseline);

    let with_headers = send(
        &app,
        Request::builder()
            .uri("/profile")
            .header("x-ms-blob", "secrets/keys.json")
            .header("Accept", "text/html")
            .header("Authorization", "Bearer whatever")
            .body(Body::from("{\"container\":\"secrets\"}"))
            .unwrap(),
    )
    .await;
    assert_eq!(with_headers, baseline);
}

#[tokio::test]
async fn test_functions_route_prefix_is_served() {
    let app = build_app(FakeConnector::with_profile(PROFILE_JSON.as_bytes()), configured());

    let direct = send(&app, get("/profile")).await;
    let prefixed = send(&app, get("/api/profile")).await;

    assert_eq!(prefixed, direct);
}

#[tokio::test]
async fn test_only_get_is_routed() {
    let connector = FakeConnector::with_profile(PROFILE_JSON.as_bytes());
    let calls = connector.calls();
    let app = build_app(connector, configured());

    let (status, _, _) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/profile")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _, _) = send(&app, get("/profiles")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(calls.total(), 0);
}

#[tokio::test]
async fn test_configured_location_is_used() {
    let connector = FakeConnector::new(
        vec![(BlobLocation::new("portfolio", "about/me.json"), b"{\"v\":2}".to_vec())],
        None,
    );
    let app = build_app(connector, configured().with_location("portfolio", "about/me.json"));

    let (status, _, body) = send(&app, get("/profile")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"{\"v\":2}");
}

//! End-to-end tests for request building, transport and decoding.
//!
//! Canned payloads live in `tests/fixtures`. Most tests go through a
//! counting stub transport; the `http_` tests run the real HTTP transport
//! against a local mock server.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use rule34_client::error::TransportError;
use rule34_client::http::Transport;
use rule34_client::types::{FilterField, Operator, SortField};
use rule34_client::{Client, ClientConfig, ClientError, ValidationFailure};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE_URL: &str = "https://api.example.test/index.php?page=dapi&q=index";

/// Load fixture file content.
fn load_fixture(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Transport answering every request with the same body and recording URLs.
struct StubTransport {
    body: Vec<u8>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl StubTransport {
    fn new(body: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            body,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_url(&self) -> String {
        self.urls.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());
        Ok(self.body.clone())
    }
}

fn stub_client(fixture: &str) -> (Client, Arc<StubTransport>) {
    let transport = StubTransport::new(load_fixture(fixture));
    let config = ClientConfig::builder("5150", "test-key")
        .base_url(BASE_URL)
        .build();
    (Client::with_transport(config, transport.clone()), transport)
}

#[test]
fn test_posts_json_search() {
    let (client, transport) = stub_client("posts.json");

    let posts = client
        .posts()
        .tags(["cat_ears", "solo"])
        .exclude(["sketch"])
        .filter_ai()
        .rating("safe")
        .filter(FilterField::Score, Operator::GreaterEqual, 3)
        .sort_by(SortField::Score)
        .desc()
        .limit(2)
        .find()
        .expect("search should succeed");

    assert_eq!(transport.calls(), 1);
    assert_eq!(
        transport.last_url(),
        "https://api.example.test/index.php?api_key=test-key&json=1&limit=2&page=dapi&q=index\
         &s=post&tags=cat_ears+solo+-sketch+-ai_generated+rating%3Asafe+score%3A%3E%3D3\
         +sort%3Ascore%3Adesc+&user_id=5150"
    );

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, 9001001);
    assert_eq!(posts[0].tags, vec!["cat_ears", "original", "solo", "tagme"]);
    assert_eq!(posts[0].comment_count, 4);
    assert_eq!(posts[1].parent_id, 9001001);
    assert!(posts[1].has_notes);
}

#[test]
fn test_posts_xml_search() {
    let (client, transport) = stub_client("posts.xml");

    let posts = client
        .posts()
        .tags(["cat_ears"])
        .find_xml()
        .expect("search should succeed");

    assert!(!transport.last_url().contains("json=1"));
    assert_eq!(posts.len(), 2);

    let first = &posts[0];
    assert_eq!(first.id, 9001001);
    assert_eq!(first.parent_id, 0);
    assert!(first.has_children);
    assert_eq!(first.preview_width, 106);
    assert_eq!(
        first.created_at.map(|d| d.to_rfc3339()),
        Some("2024-10-12T21:08:24+02:00".to_string())
    );
    assert_eq!(posts[1].creator_id, 777);
}

#[test]
fn test_comments_listing() {
    let (client, transport) = stub_client("comments.xml");

    let comments = client
        .comments()
        .post_id(9001001)
        .find()
        .expect("listing should succeed");

    assert!(transport.last_url().contains("s=comment"));
    assert!(transport.last_url().contains("post_id=9001001"));
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].creator, "sketchbook");
    assert_eq!(
        comments[1].body,
        "Source is in the description & on their page."
    );
}

#[test]
fn test_tags_listing() {
    let (client, transport) = stub_client("tags.xml");

    let tags = client
        .tags()
        .name_pattern("cat%")
        .limit(3)
        .find()
        .expect("listing should succeed");

    assert!(transport.last_url().contains("name_pattern=cat%25"));
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["cat_ears", "cat_tail", "catherine_(example)"]);
    assert_eq!(tags[2].kind, 4);
    assert!(tags[2].ambiguous);
}

#[test]
fn test_validation_failures_send_nothing() {
    let (client, transport) = stub_client("posts.json");

    let err = client
        .posts()
        .limit(-1)
        .rating("spicy")
        .asc()
        .filter("rating", ">", 1)
        .sort_by("score")
        .sort_by("id")
        .find()
        .unwrap_err();

    assert_eq!(transport.calls(), 0);
    let errors = match err {
        ClientError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other}"),
    };
    assert_eq!(
        errors.failures(),
        &[
            ValidationFailure::NonPositiveLimit(-1),
            ValidationFailure::UnknownRating("spicy".to_string()),
            ValidationFailure::SortFieldNotSelected,
            ValidationFailure::UnknownFilterField("rating".to_string()),
            ValidationFailure::SortFieldSelectedTwice,
        ]
    );
}

#[test]
fn test_empty_response_is_empty_list() {
    let transport = StubTransport::new(Vec::new());
    let client = Client::with_transport(
        ClientConfig::builder("1", "k").base_url(BASE_URL).build(),
        transport.clone(),
    );

    assert!(client.posts().find().unwrap().is_empty());
    assert!(client.posts().find_xml().unwrap().is_empty());
    assert!(client.tags().find().unwrap().is_empty());
    assert_eq!(transport.calls(), 3);
}

#[test]
fn test_format_mismatch_is_decode_error() {
    let (client, _) = stub_client("posts.xml");
    let err = client.posts().find().unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

fn mock_config(server: &MockServer) -> ClientConfig {
    ClientConfig::builder("5150", "test-key")
        .base_url(format!("{}/index.php?page=dapi&q=index", server.uri()))
        .timeout_secs(5)
        .build()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_posts_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.php"))
        .and(query_param("page", "dapi"))
        .and(query_param("q", "index"))
        .and(query_param("s", "post"))
        .and(query_param("json", "1"))
        .and(query_param("tags", "cat_ears solo "))
        .and(query_param("user_id", "5150"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(load_fixture("posts.json")))
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server);
    let posts = tokio::task::spawn_blocking(move || {
        let client = Client::from_config(&config)?;
        client.posts().tags(["cat_ears", "solo"]).find()
    })
    .await
    .expect("task should not panic")
    .expect("search should succeed");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].owner, "inkwell");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_not_found_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = mock_config(&server);
    let result = tokio::task::spawn_blocking(move || {
        let client = Client::from_config(&config)?;
        client.tags().name("cat_ears").find()
    })
    .await
    .expect("task should not panic");

    match result {
        Err(ClientError::Transport(TransportError::Status { status, url })) => {
            assert_eq!(status, 404);
            assert!(!url.contains("test-key"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_validation_failure_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = mock_config(&server);
    let result = tokio::task::spawn_blocking(move || {
        let client = Client::from_config(&config)?;
        client.comments().post_id(0).find()
    })
    .await
    .expect("task should not panic");

    assert!(matches!(result, Err(ClientError::Validation(_))));
}

#[test]
fn test_http_connection_failure_hides_api_key() {
    let config = ClientConfig::builder("5150", "SUPERSECRET")
        .base_url("http://127.0.0.1:9/index.php?page=dapi&q=index")
        .timeout_secs(2)
        .build();
    let client = Client::from_config(&config).expect("client should build");

    let err = client.posts().tags(["cat_ears"]).find().unwrap_err();
    assert!(matches!(err, ClientError::Transport(TransportError::Request(_))));
    assert!(!err.to_string().contains("SUPERSECRET"));
}

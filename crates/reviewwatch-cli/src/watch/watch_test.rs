//! End-to-end reconciliation tests: mock feed host + on-disk seen store.

use reviewwatch_core::AppId;
use reviewwatch_feed::FeedClient;
use reviewwatch_store::SeenStore;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::find_new_reviews;

const MAX_CONCURRENT: usize = 8;

fn test_client(base_url: &str) -> FeedClient {
    FeedClient::with_base_url(30, "reviewwatch-tests", 0, 0, base_url)
        .expect("client construction should not fail")
}

fn app_id() -> AppId {
    AppId::parse("987").expect("fixture app id should parse")
}

fn feed_path(storefront: &str) -> String {
    format!("/{storefront}/rss/customerreviews/id=987/sortBy=mostRecent/json")
}

fn entry(id: i64, rating: u8, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": { "label": id.to_string() },
        "im:rating": { "label": rating.to_string() },
        "title": { "label": title },
        "author": { "name": { "label": "somebody" } },
        "content": { "label": "review body", "attributes": { "type": "text" } },
        "im:contentType": { "attributes": { "term": "Application", "label": "Application" } }
    })
}

/// Rebuilds the mock host so the given storefronts serve the given entries
/// and every other storefront serves an empty feed.
async fn mount_feeds(server: &MockServer, per_storefront: &[(&str, Vec<serde_json::Value>)]) {
    server.reset().await;
    for (code, entries) in per_storefront {
        Mock::given(method("GET"))
            .and(path(feed_path(code)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "feed": { "entry": entries } })),
            )
            .with_priority(1)
            .mount(server)
            .await;
    }
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "feed": {} })))
        .with_priority(10)
        .mount(server)
        .await;
}

#[tokio::test]
async fn reports_each_review_exactly_once_across_runs() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    let client = test_client(&server.uri());
    let app = app_id();
    let store = SeenStore::open_for_app(dir.path(), &app)
        .await
        .expect("store should open");

    // Run 1: the feed shows ids {1, 2}.
    mount_feeds(&server, &[("us", vec![entry(1, 5, "one"), entry(2, 4, "two")])]).await;
    let run1 = find_new_reviews(&client, &store, &app, MAX_CONCURRENT)
        .await
        .expect("run 1 should succeed");
    let ids1: Vec<i64> = run1.iter().map(|e| e.review.id).collect();
    assert_eq!(ids1, vec![1, 2]);

    // Run 2: id 3 appears alongside the old ones.
    mount_feeds(
        &server,
        &[("us", vec![entry(1, 5, "one"), entry(2, 4, "two"), entry(3, 1, "three")])],
    )
    .await;
    let run2 = find_new_reviews(&client, &store, &app, MAX_CONCURRENT)
        .await
        .expect("run 2 should succeed");
    let ids2: Vec<i64> = run2.iter().map(|e| e.review.id).collect();
    assert_eq!(ids2, vec![3], "only the unseen id may be reported");

    // Run 3: id 4 appears.
    mount_feeds(
        &server,
        &[(
            "us",
            vec![entry(1, 5, "one"), entry(2, 4, "two"), entry(3, 1, "three"), entry(4, 3, "four")],
        )],
    )
    .await;
    let run3 = find_new_reviews(&client, &store, &app, MAX_CONCURRENT)
        .await
        .expect("run 3 should succeed");
    let ids3: Vec<i64> = run3.iter().map(|e| e.review.id).collect();
    assert_eq!(ids3, vec![4]);
}

#[tokio::test]
async fn second_run_on_unchanged_feed_reports_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    let client = test_client(&server.uri());
    let app = app_id();
    let store = SeenStore::open_for_app(dir.path(), &app)
        .await
        .expect("store should open");

    mount_feeds(&server, &[("us", vec![entry(10, 2, "a"), entry(11, 5, "b")])]).await;

    let first = find_new_reviews(&client, &store, &app, MAX_CONCURRENT)
        .await
        .expect("first run should succeed");
    assert_eq!(first.len(), 2);

    let second = find_new_reviews(&client, &store, &app, MAX_CONCURRENT)
        .await
        .expect("second run should succeed");
    assert!(second.is_empty(), "unchanged feed must yield zero events");
}

#[tokio::test]
async fn duplicate_ids_across_storefronts_report_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    let client = test_client(&server.uri());
    let app = app_id();
    let store = SeenStore::open_for_app(dir.path(), &app)
        .await
        .expect("store should open");

    mount_feeds(
        &server,
        &[
            ("us", vec![entry(77, 5, "same review")]),
            ("gb", vec![entry(77, 5, "same review")]),
            ("de", vec![entry(77, 5, "same review")]),
        ],
    )
    .await;

    let events = find_new_reviews(&client, &store, &app, MAX_CONCURRENT)
        .await
        .expect("run should succeed");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].review.id, 77);
}

#[tokio::test]
async fn events_are_ordered_by_ascending_id() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    let client = test_client(&server.uri());
    let app = app_id();
    let store = SeenStore::open_for_app(dir.path(), &app)
        .await
        .expect("store should open");

    mount_feeds(
        &server,
        &[
            ("jp", vec![entry(30, 3, "c"), entry(5, 4, "a")]),
            ("fr", vec![entry(20, 1, "b")]),
        ],
    )
    .await;

    let events = find_new_reviews(&client, &store, &app, MAX_CONCURRENT)
        .await
        .expect("run should succeed");
    let ids: Vec<i64> = events.iter().map(|e| e.review.id).collect();
    assert_eq!(ids, vec![5, 20, 30]);
}

#[tokio::test]
async fn failing_storefront_aborts_before_any_id_is_marked() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    let client = test_client(&server.uri());
    let app = app_id();
    let store = SeenStore::open_for_app(dir.path(), &app)
        .await
        .expect("store should open");

    server.reset().await;
    Mock::given(method("GET"))
        .and(path(feed_path("it")))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "feed": { "entry": [entry(1, 5, "fine elsewhere")] } }),
            ),
        )
        .with_priority(10)
        .mount(&server)
        .await;

    let result = find_new_reviews(&client, &store, &app, MAX_CONCURRENT).await;
    assert!(result.is_err(), "one bad storefront must abort the run");
    assert_eq!(
        store.count().await.unwrap(),
        0,
        "an aborted run must not mark anything seen"
    );
}

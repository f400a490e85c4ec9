//! The HTTP executor adapter against a local stub executor.

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use backend::api::search::HttpSearchExecutor;
use common::{
    cursor::OpaqueCursor,
    error::TransportError,
    listing_session::ListingSession,
    search_executor::{fetch, Completion, SearchExecutor},
};

type SeenParams = Arc<Mutex<Vec<Vec<(String, String)>>>>;

async fn spawn_stub(status: StatusCode, body: &'static str) -> (String, SeenParams) {
    let seen: SeenParams = Arc::default();
    let app = Router::new()
        .route(
            "/venues/search",
            get(move |State(seen): State<SeenParams>, Query(params): Query<Vec<(String, String)>>| async move {
                seen.lock().unwrap().push(params);
                (status, body)
            }),
        )
        .with_state(seen.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), seen)
}

const PAGE_JSON: &str = r#"{
    "items": [
        {"id": "v1", "name": "粵菜館", "province": "ON", "categories": ["粵菜"]},
        {"id": "v2", "name": "Golden Dim Sum", "nameLatin": "golden dim sum", "seatingCapacity": 120}
    ],
    "nextCursor": "C1",
    "hasMore": true
}"#;

#[tokio::test]
async fn sends_descriptor_as_query_params() {
    let (url, seen) = spawn_stub(StatusCode::OK, PAGE_JSON).await;
    let executor = HttpSearchExecutor::new(url).unwrap();

    let mut session = ListingSession::default();
    let ticket = session
        .restore("province=ON&category=%E7%B2%B5%E8%8F%9C&category=Dim%20Sum&maxSeating=200&q=Golden")
        .unwrap();
    let completion = fetch(ticket, &executor).await;
    assert!(matches!(completion, Completion::Page { .. }));
    assert!(session.complete(completion));

    let view = session.view_state();
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.items[1].seating_capacity, Some(120));
    assert_eq!(session.controller().cursors().current(), Some(&OpaqueCursor::new("C1")));

    let params = seen.lock().unwrap()[0].clone();
    let expected = [
        ("province", "ON"),
        ("category", "Dim Sum"),
        ("category", "粵菜"),
        ("maxSeating", "200"),
        ("q", "golden"),
        ("script", "latin"),
    ];
    assert_eq!(
        params,
        expected.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn next_page_replays_the_cursor() {
    let (url, seen) = spawn_stub(StatusCode::OK, PAGE_JSON).await;
    let executor = HttpSearchExecutor::new(url).unwrap();

    let mut session = ListingSession::default();
    let first = session.restore("province=ON").unwrap();
    session.complete(fetch(first, &executor).await);
    let second = session.next_page().unwrap();
    session.complete(fetch(second, &executor).await);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].last(), Some(&("cursor".to_string(), "C1".to_string())));
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let (url, _seen) = spawn_stub(StatusCode::SERVICE_UNAVAILABLE, "overloaded").await;
    let executor = HttpSearchExecutor::new(url).unwrap();

    let mut session = ListingSession::default();
    let ticket = session.restore("").unwrap();
    let err = executor.execute(&ticket.descriptor).await.unwrap_err();
    assert_eq!(err, TransportError::Status { status: 503, body: "overloaded".to_string() });
}

#[tokio::test]
async fn malformed_body_is_an_invalid_response() {
    let (url, _seen) = spawn_stub(StatusCode::OK, "{\"items\": 12}").await;
    let executor = HttpSearchExecutor::new(url).unwrap();

    let mut session = ListingSession::default();
    let ticket = session.restore("").unwrap();
    let err = executor.execute(&ticket.descriptor).await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidResponse(_)));
}

#[tokio::test]
async fn unreachable_executor_is_a_request_error() {
    let executor = HttpSearchExecutor::new("http://127.0.0.1:9").unwrap();
    let mut session = ListingSession::default();
    let ticket = session.restore("").unwrap();
    let err = executor.execute(&ticket.descriptor).await.unwrap_err();
    assert!(matches!(err, TransportError::Request(_)));
}

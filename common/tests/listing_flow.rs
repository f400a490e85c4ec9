//! Listing session driven end to end through an in-memory executor.

use std::cell::RefCell;
use std::collections::VecDeque;

use common::{
    cursor::OpaqueCursor,
    error::{ErrorKind, TransportError},
    filter_codec::FacetChange,
    listing_controller::RequestKind,
    listing_session::ListingSession,
    search_executor::{fetch, Completion, SearchExecutor},
    search_query::QueryDescriptor,
    search_result::{PageResult, VenueSummary},
};
use futures::executor::block_on;

#[derive(Default)]
struct ScriptedExecutor {
    responses: RefCell<VecDeque<Result<PageResult, TransportError>>>,
    seen: RefCell<Vec<QueryDescriptor>>,
}

impl ScriptedExecutor {
    fn respond(&self, response: Result<PageResult, TransportError>) {
        self.responses.borrow_mut().push_back(response);
    }

    fn seen(&self) -> Vec<QueryDescriptor> {
        self.seen.borrow().clone()
    }
}

impl SearchExecutor for ScriptedExecutor {
    async fn execute(&self, descriptor: &QueryDescriptor) -> Result<PageResult, TransportError> {
        self.seen.borrow_mut().push(descriptor.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response".to_string())))
    }
}

fn venues(prefix: &str, count: usize) -> Vec<VenueSummary> {
    (0..count)
        .map(|i| VenueSummary {
            id: format!("{prefix}-{i}"),
            name: format!("{prefix} {i}"),
            name_latin: None,
            province: Some("ON".to_string()),
            city: Some("Toronto".to_string()),
            categories: vec!["粵菜".to_string()],
            seating_capacity: Some(40),
        })
        .collect()
}

fn page(prefix: &str, count: usize, next_cursor: Option<&str>, has_more: bool) -> PageResult {
    PageResult {
        items: venues(prefix, count),
        next_cursor: next_cursor.map(OpaqueCursor::new),
        has_more,
    }
}

#[test]
fn apply_then_page_then_supersede() {
    let executor = ScriptedExecutor::default();
    let mut session = ListingSession::default();

    let facets = session.codec().decode("province=ON&category=%E7%B2%B5%E8%8F%9C");
    let first = session.apply_filters(facets.clone()).unwrap();
    assert_eq!(first.descriptor.cursor(), None);
    assert_eq!(first.kind, RequestKind::FirstPage);

    executor.respond(Ok(page("first", 20, Some("C1"), true)));
    let completion = block_on(fetch(first, &executor));
    assert!(session.complete(completion));
    let view = session.view_state();
    assert_eq!(view.items.len(), 20);
    assert!(view.has_more);
    assert!(!view.loading);

    let second = session.next_page().unwrap();
    assert_eq!(second.descriptor.facets(), &facets);
    assert_eq!(second.descriptor.cursor(), Some(&OpaqueCursor::new("C1")));
    let second_stamp = second.stamp;

    // facet change before the second page resolves
    let third = session
        .apply_change(FacetChange::Toggle { key: "category".to_string(), item: "川菜".to_string() })
        .unwrap();
    assert!(third.stamp.epoch > second_stamp.epoch);

    // the canceled request never reaches the executor
    let canceled = block_on(fetch(second, &executor));
    assert_eq!(canceled, Completion::Aborted { stamp: second_stamp });
    assert!(!session.complete(canceled));

    // a transport that could not abort still delivers late; it is ignored
    let before = session.view_state();
    let late = Completion::Page { stamp: second_stamp, result: page("late", 20, Some("C2"), true) };
    assert!(!session.complete(late));
    assert_eq!(session.view_state(), before);

    executor.respond(Ok(page("third", 3, None, false)));
    assert!(session.complete(block_on(fetch(third, &executor))));
    let view = session.view_state();
    assert_eq!(view.items, venues("third", 3));
    assert!(!view.has_more);
    assert!(session.next_page().is_none());

    let seen = executor.seen();
    assert!(seen.iter().all(|descriptor| descriptor.cursor() != Some(&OpaqueCursor::new("C1"))));
}

#[test]
fn next_page_replaces_the_window() {
    let executor = ScriptedExecutor::default();
    let mut session = ListingSession::default();

    executor.respond(Ok(page("p1", 20, Some("C1"), true)));
    executor.respond(Ok(page("p2", 20, Some("C2"), true)));
    let first = session.restore("category=%E7%B2%B5%E8%8F%9C").unwrap();
    session.complete(block_on(fetch(first, &executor)));
    let second = session.next_page().unwrap();
    session.complete(block_on(fetch(second, &executor)));

    let view = session.view_state();
    assert_eq!(view.items, venues("p2", 20));
    assert_eq!(view.page_number, 2);

    let seen = executor.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].signature(), seen[1].signature());
    assert_eq!(seen[1].cursor(), Some(&OpaqueCursor::new("C1")));
}

#[test]
fn transport_failures_surface_as_fetch_failed() {
    let executor = ScriptedExecutor::default();
    let mut session = ListingSession::default();

    executor.respond(Ok(page("p1", 20, Some("C1"), true)));
    executor.respond(Err(TransportError::Status { status: 503, body: "busy".to_string() }));
    let first = session.restore("province=ON").unwrap();
    session.complete(block_on(fetch(first, &executor)));
    let second = session.next_page().unwrap();
    assert!(session.complete(block_on(fetch(second, &executor))));

    let view = session.view_state();
    assert_eq!(view.error, Some(ErrorKind::FetchFailed));
    assert_eq!(view.items, venues("p1", 20));
    assert!(!view.has_more);

    executor.respond(Err(TransportError::Request("refused".to_string())));
    let retry = session.retry().unwrap();
    session.complete(block_on(fetch(retry, &executor)));
    let view = session.view_state();
    assert_eq!(view.error, Some(ErrorKind::FetchFailed));
    assert!(view.items.is_empty());
}

#[test]
fn rapid_edits_only_apply_the_latest() {
    let executor = ScriptedExecutor::default();
    let mut session = ListingSession::default();
    let mut tickets = Vec::new();
    tickets.extend(session.restore(""));
    for seats in [10, 20, 30, 40] {
        tickets.extend(session.apply_change(FacetChange::SetNumber {
            key: "minSeating".to_string(),
            value: f64::from(seats),
        }));
    }
    assert_eq!(session.controller().epoch(), 5);

    let latest = tickets.pop().unwrap();
    for (n, ticket) in tickets.into_iter().enumerate() {
        let stale = Completion::Page { stamp: ticket.stamp, result: page(&format!("stale{n}"), 1, None, false) };
        assert!(!session.complete(stale));
    }
    executor.respond(Ok(page("latest", 2, None, false)));
    assert!(session.complete(block_on(fetch(latest, &executor))));
    assert_eq!(session.view_state().items, venues("latest", 2));
    assert_eq!(session.location(), "minSeating=40");
}

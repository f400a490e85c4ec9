//! Single source of truth for the listing's current, authoritative request.
//!
//! Every filter or search change bumps the epoch; every request and response
//! carries the epoch it was sent under. A response whose stamp is not the
//! current in-flight request is dropped untouched, however late it arrives.
//! Aborting the superseded request is only a courtesy to the transport.

use futures_util::future::{AbortHandle, AbortRegistration};
use tracing::{debug, warn};

use crate::{
    cursor::PaginationCursorManager,
    error::{ErrorKind, TransportError},
    filter_record::FilterRecord,
    query_plan,
    search_executor::Completion,
    search_query::{QueryDescriptor, QuerySignature},
    search_result::{PageResult, VenueSummary},
};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    FirstPage,
    NextPage,
}

/// Identifies an issued request: the query-signature generation it belongs
/// to, and its position among all issued requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestStamp {
    pub epoch: u64,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Idle,
    Requesting(RequestKind),
    Resolved,
    Canceled,
    Failed(ErrorKind),
}

/// An outgoing request, to be run with [`crate::search_executor::fetch`].
pub struct RequestTicket {
    pub stamp: RequestStamp,
    pub kind: RequestKind,
    pub descriptor: QueryDescriptor,
    pub(crate) abort: AbortRegistration,
}

impl std::fmt::Debug for RequestTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestTicket")
            .field("stamp", &self.stamp)
            .field("kind", &self.kind)
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// What the listing view renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub items: Vec<VenueSummary>,
    pub loading: bool,
    pub error: Option<ErrorKind>,
    pub has_more: bool,
    pub page_number: u32,
}

#[derive(Debug)]
struct InFlight {
    stamp: RequestStamp,
    kind: RequestKind,
    abort: AbortHandle,
}

#[derive(Debug)]
pub struct RequestLifecycleController {
    facets: FilterRecord,
    term: String,
    epoch: u64,
    next_seq: u64,
    cursors: PaginationCursorManager,
    phase: LifecyclePhase,
    in_flight: Option<InFlight>,
    items: Vec<VenueSummary>,
    error: Option<ErrorKind>,
}

impl Default for RequestLifecycleController {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLifecycleController {
    pub fn new() -> Self {
        Self {
            facets: FilterRecord::new(),
            term: String::new(),
            epoch: 0,
            next_seq: 0,
            cursors: PaginationCursorManager::new(),
            phase: LifecyclePhase::Idle,
            in_flight: None,
            items: Vec::new(),
            error: None,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn facets(&self) -> &FilterRecord {
        &self.facets
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn cursors(&self) -> &PaginationCursorManager {
        &self.cursors
    }

    pub fn items(&self) -> &[VenueSummary] {
        &self.items
    }

    pub fn signature(&self) -> QuerySignature {
        query_plan::signature(&self.facets, &self.term)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            items: self.items.clone(),
            loading: self.is_loading(),
            error: self.error,
            has_more: self.cursors.has_more(),
            page_number: self.cursors.page_number(),
        }
    }

    /// Starts a new query signature: new epoch, fresh cursor, first page.
    pub fn on_filter_or_search_change(&mut self, facets: FilterRecord, term: impl Into<String>) -> RequestTicket {
        self.epoch += 1;
        self.cancel_in_flight();
        self.cursors.reset();
        self.facets = facets;
        self.term = term.into();
        let descriptor = query_plan::build(&self.facets, &self.term, None);
        self.issue(RequestKind::FirstPage, descriptor)
    }

    /// Same epoch, current cursor attached. `None` without a cursor to replay.
    pub fn on_next_page_requested(&mut self) -> Option<RequestTicket> {
        let Some(cursor) = self.cursors.current().filter(|_| self.cursors.has_more()).cloned() else {
            debug!(epoch = self.epoch, "next page requested without a usable cursor");
            return None;
        };
        self.cancel_in_flight();
        let descriptor = query_plan::build(&self.facets, &self.term, Some(&cursor));
        Some(self.issue(RequestKind::NextPage, descriptor))
    }

    /// Applies a page if it answers the current in-flight request.
    ///
    /// Replaces the displayed items; a next page is a fresh window.
    pub fn on_response(&mut self, stamp: RequestStamp, result: PageResult) -> bool {
        let Some(in_flight) = self.take_current(stamp) else {
            return false;
        };
        debug!(
            epoch = stamp.epoch,
            items = result.items.len(),
            has_more = result.has_more,
            "page resolved"
        );
        self.items = result.items;
        self.cursors.advance(result.next_cursor, result.has_more);
        if in_flight.kind == RequestKind::NextPage {
            self.cursors.count_page();
        }
        self.error = None;
        self.phase = LifecyclePhase::Resolved;
        true
    }

    /// Keeps the previous window on a failed next page, clears it on a
    /// failed first page. Nothing is retried.
    pub fn on_error(&mut self, stamp: RequestStamp, error: TransportError) -> bool {
        let Some(in_flight) = self.take_current(stamp) else {
            return false;
        };
        warn!(epoch = stamp.epoch, kind = ?in_flight.kind, "search request failed: {error}");
        self.cursors.mark_exhausted();
        if in_flight.kind == RequestKind::FirstPage {
            self.items.clear();
        }
        self.error = Some(ErrorKind::FetchFailed);
        self.phase = LifecyclePhase::Failed(ErrorKind::FetchFailed);
        true
    }

    /// The transport gave up on the current request without an answer.
    pub fn on_aborted(&mut self, stamp: RequestStamp) -> bool {
        if self.take_current(stamp).is_none() {
            return false;
        }
        self.phase = LifecyclePhase::Canceled;
        true
    }

    /// Routes a finished fetch. Returns whether any state changed.
    pub fn complete(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Page { stamp, result } => self.on_response(stamp, result),
            Completion::Failed { stamp, error } => self.on_error(stamp, error),
            Completion::Aborted { stamp } => self.on_aborted(stamp),
        }
    }

    fn issue(&mut self, kind: RequestKind, descriptor: QueryDescriptor) -> RequestTicket {
        let stamp = RequestStamp {
            epoch: self.epoch,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let (abort, registration) = AbortHandle::new_pair();
        self.in_flight = Some(InFlight { stamp, kind, abort });
        self.error = None;
        self.phase = LifecyclePhase::Requesting(kind);
        debug!(epoch = stamp.epoch, seq = stamp.seq, ?kind, "requesting");
        RequestTicket {
            stamp,
            kind,
            descriptor,
            abort: registration,
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(epoch = in_flight.stamp.epoch, seq = in_flight.stamp.seq, "canceling in-flight request");
            in_flight.abort.abort();
            self.phase = LifecyclePhase::Canceled;
        }
    }

    fn take_current(&mut self, stamp: RequestStamp) -> Option<InFlight> {
        if stamp.epoch != self.epoch {
            debug!(stale = stamp.epoch, current = self.epoch, "discarding stale response");
            return None;
        }
        let is_current = self.in_flight.as_ref().is_some_and(|in_flight| in_flight.stamp == stamp);
        if !is_current {
            debug!(epoch = stamp.epoch, seq = stamp.seq, "discarding superseded response");
            return None;
        }
        self.in_flight.take()
    }
}

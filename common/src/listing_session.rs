//! The listing view's action surface and its shareable location string.
//!
//! Every state-changing action re-derives the location through the codec
//! and hands back the ticket the caller must run. An action that leaves the
//! query signature unchanged issues nothing.

use crate::{
    facet_registry::FacetRegistry,
    filter_codec::{FacetChange, FilterCodec},
    filter_record::FilterRecord,
    filter_tags::{FilterTag, FilterTagProjector, TagRemoval},
    listing_controller::{RequestLifecycleController, RequestTicket, ViewState},
    query_plan,
    search_executor::Completion,
};


#[derive(Debug)]
pub struct ListingSession {
    codec: FilterCodec,
    projector: FilterTagProjector,
    controller: RequestLifecycleController,
    location: String,
}

impl Default for ListingSession {
    fn default() -> Self {
        Self::new(FacetRegistry::venues())
    }
}

impl ListingSession {
    pub fn new(registry: FacetRegistry) -> Self {
        Self {
            codec: FilterCodec::new(registry),
            projector: FilterTagProjector::new(registry),
            controller: RequestLifecycleController::new(),
            location: String::new(),
        }
    }

    pub fn codec(&self) -> &FilterCodec {
        &self.codec
    }

    pub fn controller(&self) -> &RequestLifecycleController {
        &self.controller
    }

    pub fn facets(&self) -> &FilterRecord {
        self.controller.facets()
    }

    pub fn term(&self) -> &str {
        self.controller.term()
    }

    /// Query string reflecting the active filters, without a leading `?`.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn view_state(&self) -> ViewState {
        self.controller.view_state()
    }

    pub fn tags(&self) -> Vec<FilterTag> {
        let free_text = query_plan::free_text(self.term());
        self.projector.project_all(self.facets(), free_text.as_ref())
    }

    /// Initial load or history navigation. The first restore always issues
    /// a request; later ones only when the location means something new.
    pub fn restore(&mut self, location: &str) -> Option<RequestTicket> {
        let state = self.codec.decode_location(location);
        let force = self.controller.epoch() == 0;
        self.change(state.facets, state.term, force)
    }

    pub fn apply_filters(&mut self, facets: FilterRecord) -> Option<RequestTicket> {
        let term = self.term().to_string();
        self.change(facets, term, false)
    }

    pub fn apply_change(&mut self, change: FacetChange) -> Option<RequestTicket> {
        let facets = self.codec.apply_change(self.facets(), change);
        self.apply_filters(facets)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> Option<RequestTicket> {
        let facets = self.facets().clone();
        self.change(facets, term.into(), false)
    }

    pub fn remove_facet(&mut self, key: &str, item: Option<&str>) -> Option<RequestTicket> {
        let facets = self.codec.remove_facet(self.facets(), key, item);
        self.apply_filters(facets)
    }

    pub fn remove_tag(&mut self, removal: &TagRemoval) -> Option<RequestTicket> {
        match removal {
            TagRemoval::ClearAll => self.clear_all(),
            TagRemoval::Facet { key, item } => self.remove_facet(key, item.as_deref()),
        }
    }

    pub fn clear_all(&mut self) -> Option<RequestTicket> {
        self.change(FilterRecord::new(), String::new(), false)
    }

    pub fn next_page(&mut self) -> Option<RequestTicket> {
        self.controller.on_next_page_requested()
    }

    /// Asks again for the current query; only ever user-triggered.
    pub fn retry(&mut self) -> Option<RequestTicket> {
        let facets = self.facets().clone();
        let term = self.term().to_string();
        self.change(facets, term, true)
    }

    pub fn complete(&mut self, completion: Completion) -> bool {
        self.controller.complete(completion)
    }

    fn change(&mut self, facets: FilterRecord, term: String, force: bool) -> Option<RequestTicket> {
        if !force && query_plan::signature(&facets, &term) == self.controller.signature() {
            return None;
        }
        let ticket = self.controller.on_filter_or_search_change(facets, term);
        self.location = self
            .codec
            .encode(ticket.descriptor.facets(), ticket.descriptor.free_text());
        Some(ticket)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filter_record::FacetValue, search_query::Script};

    #[test]
    fn first_restore_always_requests() {
        let mut session = ListingSession::default();
        let ticket = session.restore("").unwrap();
        assert_eq!(ticket.stamp.epoch, 1);
        assert_eq!(session.location(), "");
        assert!(session.view_state().loading);
    }

    #[test]
    fn history_navigation_to_the_same_location_is_a_no_op() {
        let mut session = ListingSession::default();
        session.restore("province=ON").unwrap();
        let location = session.location().to_string();
        assert!(session.restore(&location).is_none());
        assert!(session.restore("?province=ON&page=2").is_none());
        assert!(session.restore("province=QC").is_some());
    }

    #[test]
    fn location_follows_every_change() {
        let mut session = ListingSession::default();
        session.restore("").unwrap();
        session.apply_change(FacetChange::Toggle { key: "category".to_string(), item: "粵菜".to_string() });
        session.apply_change(FacetChange::SetText { key: "province".to_string(), value: "ON".to_string() });
        session.set_search_term("Dim Sum");
        assert_eq!(
            session.location(),
            "province=ON&category=%E7%B2%B5%E8%8F%9C&q=dim%20sum&script=latin"
        );

        session.remove_facet("category", Some("粵菜"));
        assert_eq!(session.location(), "province=ON&q=dim%20sum&script=latin");
    }

    #[test]
    fn pushed_location_restores_without_a_second_request() {
        let mut session = ListingSession::default();
        session.restore("").unwrap();
        let ticket = session.set_search_term("\u{3000}Noodle House").unwrap();
        assert_eq!(session.location(), "q=noodle%20house&script=latin");
        assert_eq!(ticket.descriptor.free_text().unwrap().script, Script::Latin);

        let epoch = session.controller().epoch();
        let location = session.location().to_string();
        assert!(session.restore(&location).is_none());
        assert_eq!(session.controller().epoch(), epoch);
    }

    #[test]
    fn unchanged_signature_issues_nothing() {
        let mut session = ListingSession::default();
        session.restore("province=ON&q=bar").unwrap();
        let epoch = session.controller().epoch();
        assert!(session.set_search_term("  BAR ").is_none());
        assert!(session.apply_filters(session.facets().clone()).is_none());
        assert!(session.remove_facet("city", None).is_none());
        assert_eq!(session.controller().epoch(), epoch);
    }

    #[test]
    fn removing_tags() {
        let mut session = ListingSession::default();
        session.restore("category=a&category=b&minSeating=1&maxSeating=50&q=noodles").unwrap();
        let tags = session.tags();
        assert_eq!(tags.len(), 4);

        session.remove_tag(&tags[1].removal).unwrap();
        assert_eq!(session.facets().get("category"), Some(&FacetValue::set(["b"])));
        assert!(session.facets().contains_key("seating"));

        let seating = session.tags().into_iter().find(|tag| tag.text.starts_with("Seating")).unwrap();
        session.remove_tag(&seating.removal).unwrap();
        assert_eq!(session.facets(), &session.codec().decode("category=b"));
        assert_eq!(session.term(), "noodles");

        session.remove_tag(&TagRemoval::ClearAll).unwrap();
        assert!(!session.facets().is_active());
        assert_eq!(session.term(), "");
        assert_eq!(session.location(), "");
    }

    #[test]
    fn retry_reissues_the_same_query() {
        let mut session = ListingSession::default();
        let first = session.restore("province=ON").unwrap();
        let retry = session.retry().unwrap();
        assert_eq!(retry.stamp.epoch, first.stamp.epoch + 1);
        assert_eq!(retry.descriptor, first.descriptor);
    }
}

//! User actions on the venue listing.

use common::{
    filter_codec::FacetChange,
    filter_record::FilterRecord,
    filter_tags::TagRemoval,
    listing_controller::RequestTicket,
    listing_session::ListingSession,
};


#[derive(Debug, Clone, PartialEq)]
pub enum ListingAction {
    ApplyFilters(FilterRecord),
    ApplyChange(FacetChange),
    SetSearchTerm(String),
    RemoveTag(TagRemoval),
    ClearAll,
    NextPage,
    Retry,
}

impl ListingAction {
    /// Whether the action can move the shareable location.
    pub fn changes_location(&self) -> bool {
        !matches!(self, Self::NextPage | Self::Retry)
    }

    pub fn run(self, session: &mut ListingSession) -> Option<RequestTicket> {
        match self {
            Self::ApplyFilters(facets) => session.apply_filters(facets),
            Self::ApplyChange(change) => session.apply_change(change),
            Self::SetSearchTerm(term) => session.set_search_term(term),
            Self::RemoveTag(removal) => session.remove_tag(&removal),
            Self::ClearAll => session.clear_all(),
            Self::NextPage => session.next_page(),
            Self::Retry => session.retry(),
        }
    }
}

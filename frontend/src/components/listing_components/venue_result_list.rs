//! The current window of venues, or why there is none.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::MdRefresh};

use crate::{
    components::{
        error_boundary::ComponentErrorDisplay,
        listing_components::venue_item_card::VenueItemCard,
        loading_indicator::LoadingIndicator,
    },
    data_definitions::listing_action::ListingAction,
    pages::listing_page::ListingContext,
};

#[component]
pub fn VenueResultList() -> Element {
    let listing = use_context::<ListingContext>();
    let session = listing.session;
    let view = use_memo(move || session.read().view_state());
    let view = view.read();

    // a failed next page keeps the window it was paging from
    let error_display = view.error.map(|error| {
        rsx! {
            ComponentErrorDisplay {
                title: error.message().to_string(),
                error_txt: String::new(),
                RetryButton {}
            }
        }
    });

    if view.items.is_empty() {
        if let Some(error_display) = error_display {
            return error_display;
        }
        if view.loading {
            return rsx! { LoadingIndicator { label: "Loading venues...".to_string() } };
        }
        return rsx! {
            div {
                style: "font-size: 20px; color: rgba(0,0,0,0.6); padding: 20px;",
                "No venues match these filters."
            }
        };
    }

    let items = view.items.clone();
    let loading = view.loading;
    let list_opacity = if loading { "0.6" } else { "1" };
    rsx! {
        {error_display}
        if loading {
            LoadingIndicator { label: "Loading...".to_string() }
        }
        ul {
            id: "x-listing-results-wrapper",
            style: "
                width: 100%;
                height: 100%;
                overflow-y: auto;
                opacity: {list_opacity};
            ",
            for (index, venue) in items.into_iter().enumerate() {
                li {
                    key: "{venue.id}",
                    VenueItemCard { venue, item_index: index + 1 }
                }
            }
        }
    }
}

#[component]
fn RetryButton() -> Element {
    let listing = use_context::<ListingContext>();
    let act = listing.act;
    rsx! {
        button {
            style: "
                display: flex;
                align-items: center;
                gap: 8px;
                color:blue;
                font-size: 26px;
                border: 1px solid blue;
                background: white;
                padding: 10px;
                border-radius: 5px;
                margin: 15px;
                cursor: pointer;
            ",
            onclick: move |_| act(ListingAction::Retry),
            Icon { icon: MdRefresh, style: "width: 26px; height: 26px;" }
            "Try Again"
        }
    }
}

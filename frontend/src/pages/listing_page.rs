use dioxus::prelude::*;

use common::{
    filter_codec::FilterCodec,
    listing_controller::RequestTicket,
    listing_session::ListingSession,
    search_executor::fetch,
};
use crate::{
    api::listing_api::ServerSearchExecutor,
    components::{
        error_boundary::ComponentErrorBoundary,
        listing_components::{
            filter_tag_strip::FilterTagStrip,
            listing_controls::ListingControls,
            search_input_top_bar::SearchInputTopBar,
            venue_result_list::VenueResultList,
        },
    },
    data_definitions::{listing_action::ListingAction, listing_location::ListingLocation},
    routes::Route,
};


fn title_ellipsis(title: String) -> String {
    if title.chars().count() > 20 {
        title.chars().take(18).collect::<String>() + "..."
    } else {
        title
    }
}

/// Shared by every component of the listing view.
#[derive(Clone, Copy)]
pub struct ListingContext {
    pub session: Signal<ListingSession>,
    pub act: Callback<ListingAction>,
}

/// Venue listing page
#[component]
pub fn ListingPage(location: ListingLocation) -> Element {
    let term = FilterCodec::default().decode_location(&location.0).term;
    let title = if term.trim().is_empty() { "All venues".to_string() } else { term };

    rsx! {
        Title { "Venues: {title_ellipsis(title.clone())}" }
        ListingPageRootComponent { location }
    }
}

#[component]
fn ListingPageRootComponent(location: ReadSignal<ListingLocation>) -> Element {
    // one session per mounted listing view, never shared
    let mut session = use_signal(ListingSession::default);

    let run_request = use_callback(move |ticket: RequestTicket| {
        spawn(async move {
            let completion = fetch(ticket, &ServerSearchExecutor).await;
            session.write().complete(completion);
        });
    });

    // initial load and history navigation; the location we pushed ourselves restores to a no-op
    use_effect(move || {
        let location = location.read().clone();
        let ticket = session.write().restore(&location.0);
        if let Some(ticket) = ticket {
            run_request(ticket);
        }
    });

    let act = use_callback(move |action: ListingAction| {
        let changes_location = action.changes_location();
        let ticket = action.run(&mut session.write());
        let Some(ticket) = ticket else {
            return;
        };
        if changes_location {
            let route = Route::listing_page_from_location(session.peek().location());
            navigator().push(route);
        }
        run_request(ticket);
    });

    use_context_provider(move || ListingContext { session, act });

    rsx! {
        div {
            id: "x-listing-page-root-component",
            style: r#"
                height: 100%;
                width: 100%;
                display: flex;
                flex-direction: column;
            "#,
            div {
                id: "x-listing-input-top-bar",
                style: "
                    border-bottom: 1px solid rgb(164, 164, 164);
                    background-color: #F8FCFF;
                    flex-shrink: 0;
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    height: 76px;
                    width: 100%;
                ",

                SearchInputTopBar {}
            }

            FilterTagStrip {}

            div {
                id: "x-listing-results-panel",
                style: "
                    display: flex;
                    flex-direction: column;
                    flex-grow: 1;
                    min-height: 0;
                    background-color: #ECEEF2;
                    padding: 7px;
                    padding-top: 0px;
                ",
                ListingControls {}
                ComponentErrorBoundary {
                    VenueResultList {}
                }
            }
        }
    }
}

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdSearch};

use crate::{
    components::listing_components::facet_pickers::FacetButtonStrip,
    data_definitions::listing_action::ListingAction,
    pages::listing_page::ListingContext,
};


#[component]
pub fn SearchInputTopBar() -> Element {
    let listing = use_context::<ListingContext>();
    let session = listing.session;
    let act = listing.act;

    let committed_term = use_memo(move || session.read().term().to_string());
    let mut term_input = use_signal(|| committed_term.peek().clone());
    // clear-all and history navigation move the committed term under us
    use_effect(move || {
        let term = committed_term();
        term_input.set(term);
    });
    let term_has_changed = use_memo(move || term_input.read().trim() != committed_term.read().trim());
    let search_button_color = use_memo(move || if term_has_changed() { "blue" } else { "#6B7280" });
    let trigger_search = move |_: ()| {
        act(ListingAction::SetSearchTerm(term_input.read().clone()));
    };
    let search_oninput = move |event: Event<FormData>| {
        term_input.set(event.value());
    };
    let search_onkeydown = move |event: Event<KeyboardData>| {
        if event.key() == Key::Enter {
            trigger_search(());
        }
    };
    rsx! {
        div {
            id: "x-listing-input-search-box",
            style: "
                display:flex;
                align-items:center;
                gap: 16px;
                background-color: white;
                border-radius: 9999px;
                padding: 10px 14px;
                height: 44px;
                color: #111827;
                border: 1px solid rgba(101, 101, 101, 0.8);
                width: 500px;
                margin-left: 16px;
                flex-shrink: 0;
            ",

            button {
                style: "
                    border: none;
                    background: none;
                    cursor: pointer;
                ",
                onclick: move |_| {
                    trigger_search(())
                },
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:{search_button_color()};" }
            }
            input {
                r#type: "text",
                placeholder: "Search venues by name",
                style: "
                    flex:1;
                    border: none;
                    outline: none;
                    background: transparent;
                    color: #111827;
                    font-size: 20px;
                    font-weight: 400;
                    font-family: Roboto, sans-serif;
                ",
                value: "{term_input}",
                oninput: search_oninput,
                onkeydown: search_onkeydown,
            }
        }
        FacetButtonStrip {}
    }
}

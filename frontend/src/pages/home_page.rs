use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdSearch;
use dioxus_free_icons::Icon;

use common::{filter_codec::FilterCodec, filter_record::FilterRecord, query_plan};
use crate::routes::Route;


/// Home page
#[component]
pub fn HomePage() -> Element {
    rsx! {
        Title { "Venues - Home" }
        div {
            id: "x-home-container",
            style: "
                display:flex;
                flex-direction: column;
                gap: 20px;
                width: 100%;
                height: 100%;
                padding: 36px 40px;
                background: #F5F6F8;
                box-sizing: border-box;
                overflow: auto;
            ",

            MainTitle {}
            SubText {}
            VenueSearchCard {}
        }
    }
}


#[component]
fn MainTitle() -> Element {
    rsx! {
        div {
            style: "
                display:flex;
                align-items: center;
                gap: 8px;
                color: #0F172A;
                font-size: 46px;
                font-weight: 500;
                letter-spacing: -0.02em;
            ",
            span { "Find a" }
            span { style: "color:#4F46E5;", "venue" }
        }
    }
}

#[component]
fn SubText() -> Element {
    rsx! {
        div {
            style: "
                color: #111827;
                font-size: 30px;
                line-height: 1.6;
                max-width: 620px;
                font-weight: 500;
            ",
            "Search restaurants and event spaces by name in any script, then narrow down by category, seating and price."
        }
    }
}

#[component]
fn VenueSearchCard() -> Element {
    let mut term = use_signal(String::new);
    let start_search = move |_: ()| {
        // the home page has no filters yet, only the term
        let free_text = query_plan::free_text(&term.read());
        let location = FilterCodec::default().encode(&FilterRecord::new(), free_text.as_ref());
        navigator().push(Route::listing_page_from_location(&location));
    };

    rsx! {
        div {
            id: "x-card-venue-search",
            style: "
                display:flex;
                flex-direction: column;
                gap: 14px;
                width: 520px;
                border-radius: 22px;
                padding: 22px 22px 26px 22px;
                background: linear-gradient(135deg, #2D208A 0%, #5B3DF5 100%);
                color: white;
                box-shadow: 0 8px 24px rgba(0,0,0,0.12);
            ",
            div {
                style: "font-size: 26px; font-weight: 600;",
                "Venue Search"
            }
            div {
                style: "
                    display:flex;
                    align-items:center;
                    gap: 12px;
                    background-color: white;
                    border-radius: 9999px;
                    padding: 10px 14px;
                ",
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:#6B7280;" }
                input {
                    r#type: "text",
                    placeholder: "Noodle House, 刀削麵, ...",
                    style: "
                        flex:1;
                        border: none;
                        outline: none;
                        background: transparent;
                        color: #111827;
                        font-size: 18px;
                    ",
                    value: "{term}",
                    oninput: move |event: Event<FormData>| term.set(event.value()),
                    onkeydown: move |event: Event<KeyboardData>| {
                        if event.key() == Key::Enter {
                            start_search(());
                        }
                    },
                }
            }
            button {
                class: "x-hover-shadow",
                style: "
                    align-self: flex-start;
                    border: none;
                    border-radius: 9999px;
                    padding: 10px 18px;
                    background: white;
                    color: #2D208A;
                    font-size: 16px;
                    cursor: pointer;
                ",
                onclick: move |_| start_search(()),
                "Browse venues"
            }
        }
    }
}

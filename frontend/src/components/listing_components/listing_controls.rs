//! Page counter, next-page and share controls above the result list.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_editor_icons::MdInsertLink, md_navigation_icons::MdArrowForward}};

use crate::{data_definitions::listing_action::ListingAction, pages::listing_page::ListingContext};

#[component]
pub fn ListingControls() -> Element {
    rsx! {
        div {
            id: "x-listing-controls-row",
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 6px;
                padding: 7px;
                margin: 1px;
                height: 56px;
                width: 100%;
                box-sizing: border-box;
            ",
            h1 {
                style: "font-size: 20px; font-weight: 300; color:rgb(75, 87, 112);  border-bottom: 1px solid rgb(75, 87, 112);",
                ListingStatusString {}
            }
            div {
                style: "flex-grow: 1;"
            }
            PaginationControls {}
        }
    }
}

#[component]
fn ListingStatusString() -> Element {
    let listing = use_context::<ListingContext>();
    let session = listing.session;
    let view = use_memo(move || session.read().view_state());
    let view = view.read();

    if view.loading {
        return rsx! { "..." };
    }
    if view.error.is_some() {
        return rsx! { "! error" };
    }
    match view.items.len() {
        0 => rsx! { "No venues found" },
        1 => rsx! { "1 venue" },
        n => rsx! { "{n} venues" },
    }
}

#[component]
fn PaginationControls() -> Element {
    let listing = use_context::<ListingContext>();
    let session = listing.session;
    let act = listing.act;

    // cosmetic only; the cursor decides what the next page is
    let page_number = use_memo(move || session.read().controller().cursors().page_number());
    let can_go_to_next_page = use_memo(move || {
        let session = session.read();
        !session.controller().is_loading() && session.controller().cursors().can_advance()
    });

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                justify-content: center;
                gap: 16px;
            ",

            CopyLinkButton {}

            div {
                style: "
                    font-size: 16px;
                    line-height: 21px;
                    font-weight: 400;
                    background-color: white;
                    border-radius: 2px;
                    border-left: 1px solid rgba(0,0,0,0.1);
                    border-right: 1px solid rgba(0,0,0,0.1);
                    padding: 4px 16px;
                ",
                "Page {page_number}"
            }

            NavigationButton {
                icon: MdArrowForward,
                label: "Next Page",
                disabled: !can_go_to_next_page(),
                onclick: move |_| act(ListingAction::NextPage),
            }
        }
    }
}

#[component]
fn CopyLinkButton() -> Element {
    let do_copy_link = use_callback(move |_: ()| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(url) = window.location().href() else {
            return;
        };
        let promise = window.navigator().clipboard().write_text(&url);
        spawn(async move {
            match wasm_bindgen_futures::JsFuture::from(promise).await {
                Ok(_) => dioxus::logger::tracing::info!("Link copied to clipboard: {url}"),
                Err(err) => dioxus::logger::tracing::warn!("Copying link failed: {err:?}"),
            }
        });
    });

    rsx! {
        NavigationButton {
            icon: MdInsertLink,
            label: "Copy link to these results",
            disabled: false,
            onclick: do_copy_link,
        }
    }
}

#[component]
pub fn NavigationButton<I: dioxus_free_icons::IconShape + Clone + PartialEq + 'static>(icon: I, label: String, disabled: ReadSignal<bool>, onclick: Callback<()>) -> Element {
    let btn_color = use_memo(move || if *disabled.read() { "rgba(0,0,0,0.3)" } else { "rgba(0,0,0,1)" });
    let btn_cursor = use_memo(move || if *disabled.read() { "not-allowed" } else { "pointer" });
    rsx! {
        button {
            title: "{label}",
            disabled: *disabled.read(),
            style: "
                width: 32px;
                height: 32px;
                background: white;
                border-radius: 8px;
                padding: 4px;
                box-shadow: 0 2px 4px 0 rgba(0, 0, 0, 0.16);
                cursor: {btn_cursor};
            ",
            onclick: move |_| {
                if !*disabled.read() {
                    onclick(());
                }
            },
            Icon { icon: icon, style: "width: 24px; height: 24px; color: {btn_color};" }
        }
    }
}

//! Removable tags for the active filters.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::MdClose};

use common::filter_tags::{FilterTag, TagRemoval};
use crate::{data_definitions::listing_action::ListingAction, pages::listing_page::ListingContext};


#[component]
pub fn FilterTagStrip() -> Element {
    let listing = use_context::<ListingContext>();
    let session = listing.session;
    let tags = use_memo(move || session.read().tags());

    if tags.read().is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            id: "x-listing-filter-tag-strip",
            style: "
                display: flex;
                flex-direction: row;
                flex-wrap: wrap;
                gap: 8px;
                padding: 8px 16px;
                background-color: #F8FCFF;
                border-bottom: 1px solid rgba(0,0,0,0.1);
            ",
            for tag in tags() {
                FilterTagChip { key: "{tag.text}", tag }
            }
        }
    }
}

#[component]
fn FilterTagChip(tag: ReadSignal<FilterTag>) -> Element {
    let listing = use_context::<ListingContext>();
    let act = listing.act;
    let is_free_text = use_memo(move || tag.read().removal == TagRemoval::ClearAll);
    let background_color = use_memo(move || if is_free_text() { "#E0E7FF" } else { "white" });
    let close_label = use_memo(move || if is_free_text() { "Clear all filters" } else { "Remove filter" });

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 4px;
                border: 1px solid rgba(0,0,0,0.3);
                border-radius: 1000px;
                background-color: {background_color};
                padding: 2px 4px 2px 12px;
                font-size: 15px;
                line-height: 24px;
                white-space: nowrap;
            ",
            "{tag.read().text}"
            button {
                title: "{close_label}",
                style: "
                    border: none;
                    background: none;
                    cursor: pointer;
                    display: flex;
                    align-items: center;
                    padding: 2px;
                ",
                onclick: move |_| {
                    act(ListingAction::RemoveTag(tag.read().removal.clone()));
                },
                Icon { icon: MdClose, style: "width: 18px; height: 18px; color: rgba(0,0,0,0.7);" }
            }
        }
    }
}

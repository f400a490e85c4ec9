//! Venue result card component.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, IconShape, icons::{md_maps_icons::{MdPlace, MdRestaurant}, md_social_icons::MdPeople}};

use common::{filter_codec::FacetChange, search_result::VenueSummary};
use crate::{data_definitions::listing_action::ListingAction, pages::listing_page::ListingContext};

#[component]
pub fn VenueItemCard(venue: ReadSignal<VenueSummary>, item_index: usize) -> Element {
    let listing = use_context::<ListingContext>();
    let act = listing.act;
    let VenueSummary {
        name,
        name_latin,
        categories,
        seating_capacity,
        ..
    } = venue.read().clone();
    let location_line = venue.read().location_line();

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                align-items: stretch;
                gap: 7px;
                background: white;
                border: 3px solid #AAAAAA33;
                border-radius: 8px;
                padding: 12px 16px;
                margin: 8px 8px;
                width: calc(100% - 16px);
                box-sizing: border-box;
            ",
            // Row 1: INDEX - ICON - NAME - LATIN NAME
            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 12px;
                    width: 100%;
                ",
                span {
                    style: "font-size: 20px; font-weight: 200; color: rgba(0, 0, 0, 0.5); padding: 1px 4px;",
                    "{item_index}."
                }
                CardIcon { icon: MdRestaurant }
                div {
                    style: "
                        font-size: 20px;
                        line-height: 28px;
                        font-weight: 400;
                        color: rgb(0, 0, 0);
                        overflow: hidden;
                        text-overflow: ellipsis;
                        white-space: nowrap;
                        min-width: 0;
                    ",
                    "{name}"
                }
                if let Some(name_latin) = name_latin {
                    span {
                        style: "
                            font-size: 18px;
                            font-weight: 300;
                            color: rgba(0, 0, 0, 0.5);
                            font-style: italic;
                        ",
                        "{name_latin}"
                    }
                }
            }
            // Row 2: LOCATION - SEATING - CATEGORIES
            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 12px;
                    width: 100%;
                    font-size: 16px;
                    color: rgba(0, 0, 0, 0.7);
                ",
                if !location_line.is_empty() {
                    CardIcon { icon: MdPlace }
                    span { "{location_line}" }
                }
                if let Some(seating_capacity) = seating_capacity {
                    CardIcon { icon: MdPeople }
                    span { "{seating_capacity} seats" }
                }
                div { style: "flex: 1 1 auto;" }
                for category in categories {
                    button {
                        key: "{category}",
                        title: "Filter by this category",
                        style: "
                            border: 1px solid rgba(0,0,0,0.2);
                            border-radius: 1000px;
                            background: white;
                            padding: 0px 10px;
                            font-size: 14px;
                            cursor: pointer;
                        ",
                        onclick: {
                            let category = category.clone();
                            move |_| {
                                act(ListingAction::ApplyChange(FacetChange::Toggle {
                                    key: "category".to_string(),
                                    item: category.clone(),
                                }));
                            }
                        },
                        "{category}"
                    }
                }
            }
        }
    }
}

#[component]
fn CardIcon<I: IconShape + Clone + PartialEq + 'static>(icon: I) -> Element {
    rsx! {
        div {
            style: "
                width: 21px;
                height: 21px;
                color: rgba(0, 0, 0, 0.5);
                display: flex;
                align-items: center;
                justify-content: center;
                flex-shrink: 0;
            ",
            Icon { icon: icon, style: "width: 18px; height: 18px;" }
        }
    }
}

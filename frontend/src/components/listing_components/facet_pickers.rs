//! Facet dropdowns under the search box.
//!
//! Picks are staged in a local copy of the filter record and applied in one
//! go when the dropdown closes.

use dioxus::prelude::*;
use dioxus_free_icons::{
    Icon,
    icons::{
        md_editor_icons::MdAttachMoney,
        md_maps_icons::{MdLocalDining, MdLocalParking, MdPlace},
        md_navigation_icons::MdArrowDropDown,
        md_social_icons::{MdLocationCity, MdPeople},
        md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank, MdStar},
    },
};

use common::{
    facet_registry::FacetRegistry,
    filter_codec::{FacetChange, FilterCodec},
    filter_record::{FacetValue, FilterRecord, NumericRange},
};
use crate::{data_definitions::listing_action::ListingAction, pages::listing_page::ListingContext};


const PROVINCES: &[&str] = &["AB", "BC", "MB", "NB", "NL", "NS", "ON", "PE", "QC", "SK"];
const CATEGORIES: &[&str] = &[
    "Banquet Hall",
    "Café",
    "Dim Sum",
    "Korean BBQ",
    "Noodles",
    "Sushi",
    "粵菜",
    "川菜",
];
const AMENITIES: &[&str] = &["live music", "parking", "patio", "private room", "wheelchair access", "wifi"];
const SEATING_PRESETS: &[(Option<f64>, Option<f64>)] = &[
    (None, Some(20.0)),
    (Some(20.0), Some(50.0)),
    (Some(50.0), Some(100.0)),
    (Some(100.0), None),
];
const PRICE_PRESETS: &[(Option<f64>, Option<f64>)] = &[
    (None, Some(25.0)),
    (Some(25.0), Some(50.0)),
    (Some(50.0), Some(100.0)),
    (Some(100.0), None),
];
const RATING_PRESETS: &[f64] = &[3.0, 3.5, 4.0, 4.5];

#[derive(Debug, Clone, PartialEq)]
struct FacetOption {
    label: String,
    change: FacetChange,
}

fn facet_options(facet_key: &str) -> Vec<FacetOption> {
    let key = facet_key.to_string();
    let range_options = |presets: &[(Option<f64>, Option<f64>)]| {
        presets
            .iter()
            .map(|&(min, max)| FacetOption {
                label: range_label(min, max),
                change: FacetChange::SetRange {
                    key: key.clone(),
                    range: NumericRange::new(min, max),
                },
            })
            .collect::<Vec<_>>()
    };
    match facet_key {
        "province" => PROVINCES
            .iter()
            .map(|province| FacetOption {
                label: province.to_string(),
                change: FacetChange::SetText { key: key.clone(), value: province.to_string() },
            })
            .collect(),
        "category" | "amenity" => {
            let members = if facet_key == "category" { CATEGORIES } else { AMENITIES };
            members
                .iter()
                .map(|member| FacetOption {
                    label: member.to_string(),
                    change: FacetChange::Toggle { key: key.clone(), item: member.to_string() },
                })
                .collect()
        }
        "seating" => range_options(SEATING_PRESETS),
        "price" => range_options(PRICE_PRESETS),
        "rating" => RATING_PRESETS
            .iter()
            .map(|&rating| FacetOption {
                label: format!("{rating}+ stars"),
                change: FacetChange::SetNumber { key: key.clone(), value: rating },
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn range_label(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{min}–{max}"),
        (Some(min), None) => format!("{min}+"),
        (None, Some(max)) => format!("up to {max}"),
        (None, None) => "any".to_string(),
    }
}

/// Whether applying `change` to `record` would be a no-op.
fn is_selected(record: &FilterRecord, change: &FacetChange) -> bool {
    match change {
        FacetChange::Toggle { key, item } => {
            matches!(record.get(key), Some(FacetValue::Set(members)) if members.contains(item))
        }
        FacetChange::SetText { key, value } => {
            matches!(record.get(key), Some(FacetValue::Text(text)) if text == value)
        }
        FacetChange::SetNumber { key, value } => {
            matches!(record.get(key), Some(FacetValue::Number(number)) if number == value)
        }
        FacetChange::SetRange { key, range } => {
            matches!(record.get(key), Some(FacetValue::Range(current)) if current == range)
        }
        FacetChange::Clear { key } => !record.contains_key(key),
    }
}

fn facet_key_of(change: &FacetChange) -> &str {
    match change {
        FacetChange::Toggle { key, .. }
        | FacetChange::SetText { key, .. }
        | FacetChange::SetNumber { key, .. }
        | FacetChange::SetRange { key, .. }
        | FacetChange::Clear { key } => key,
    }
}

#[derive(Clone, Copy)]
struct FacetContext {
    staged_facets: Signal<FilterRecord>,
    expanded_facet: Signal<String>,
    set_expanded_facet: Callback<String>,
}

#[component]
pub fn FacetButtonStrip() -> Element {
    let listing = use_context::<ListingContext>();
    let session = listing.session;
    let act = listing.act;

    let committed_facets = use_memo(move || session.read().facets().clone());
    let mut staged_facets = use_signal(|| committed_facets.peek().clone());
    // tag removal and history navigation change the committed record under us
    use_effect(move || {
        let facets = committed_facets();
        staged_facets.set(facets);
    });

    let mut expanded_facet = use_signal(String::new);
    let set_expanded_facet: Callback<String> = Callback::new(move |facet: String| {
        expanded_facet.set(facet.clone());

        if facet.is_empty() {
            let staged = staged_facets.peek().clone();
            if staged != *committed_facets.peek() {
                act(ListingAction::ApplyFilters(staged));
            }
        }
    });
    use_context_provider(|| FacetContext {
        staged_facets,
        expanded_facet,
        set_expanded_facet,
    });

    rsx! {
        div {
            id: "x-listing-facet-chips-wrapper",
            style: "
                width: 100%;
                max-width: 100%;
                height: 100%;
                margin: 10px;
                display: flex;
                flex-direction:row;
                padding: 10px;
                align-items: center;
            ",

            FacetButton { facet_key: "province".to_string(), facet_icon: MdPlace }
            FacetButton { facet_key: "city".to_string(), facet_icon: MdLocationCity }
            FacetButton { facet_key: "category".to_string(), facet_icon: MdLocalDining }
            FacetButton { facet_key: "amenity".to_string(), facet_icon: MdLocalParking }
            FacetButton { facet_key: "seating".to_string(), facet_icon: MdPeople }
            FacetButton { facet_key: "price".to_string(), facet_icon: MdAttachMoney }
            FacetButton { facet_key: "rating".to_string(), facet_icon: MdStar }
        }
    }
}

#[component]
fn FacetButton<I: dioxus_free_icons::IconShape + 'static + Clone + PartialEq>(
    facet_key: ReadSignal<String>,
    facet_icon: I,
) -> Element {
    let facet_context = use_context::<FacetContext>();
    let expanded_facet = facet_context.expanded_facet;
    let set_expanded_facet = facet_context.set_expanded_facet;
    let staged_facets = facet_context.staged_facets;

    let facet_display_name = use_memo(move || {
        FacetRegistry::venues().display_name(&facet_key.read()).to_string()
    });
    let is_expanded = use_memo(move || *expanded_facet.read() == *facet_key.read());
    let button_z_level = use_memo(move || if is_expanded() { 1000 } else { 888 });
    let is_filtered = use_memo(move || staged_facets.read().contains_key(&facet_key.read()));
    let border_color = use_memo(move || if is_filtered() { "rgba(0,0,255,0.9)" } else { "rgba(0,0,0,0.5)" });

    rsx! {
        if is_expanded() {
            div {
                style: "position: relative; width: 0px; height: 0px; top: 0px; left: 0px;",
                div {
                    style: "
                        position: absolute;
                        top: 12px;
                        left: -60px;
                        background: white;
                        min-width: 260px;
                        max-width: 500px;
                        max-height: calc(100vh - 100px);
                        overflow-y: auto;
                        border: 1px solid rgba(0,0,0,0.5);
                        border-radius: 10px;
                        margin: 10px;
                        padding: 10px;
                        background-color: white;
                        box-shadow: 0 0 10px 0 rgba(0, 0, 0, 0.1);
                        z-index: 1000;
                    ",
                    if facet_key.read().as_str() == "city" {
                        FacetTextInput { facet_key }
                    } else {
                        FacetOptionList { facet_key }
                    }
                }
            }
            div {
                style: "
                position: absolute;
                top: 0px;
                left: 0px;
                z-index: 999;
                background-color: rgba(0,0,0,0.1);
                width: 100%;
                height: 100%;
                ",
                onclick: move |_| {
                    set_expanded_facet("".to_string());
                },
            }
        }

        button {
            onclick: move |_| {
                let currently_expanded = expanded_facet.read().clone();
                let our_key = facet_key.read().clone();
                if currently_expanded == our_key {
                    set_expanded_facet("".to_string());
                } else {
                    set_expanded_facet(our_key);
                }
            },
            style: "
                cursor: pointer;
                display: flex;
                align-items: center;
                justify-content: center;
                gap: 6px;
                flex-direction:row;
                border: 2px solid {border_color()};
                border-radius: 1000px;
                background-color: white;
                box-shadow: 0 0 10px 0 rgba(0, 0, 0, 0.1);
                position: relative;
                height: 28px;
                padding: 20px 5px;
                font-size: 15px;
                line-height: 24px;
                font-weight: 400;
                z-index: {button_z_level()};
                margin-right: 16px;
                overflow: hidden;
                text-overflow: ellipsis;
                white-space: nowrap;
                flex-shrink: 0;
            ",
            Icon {
                icon: facet_icon, style: "width: 20px; height: 20px; color:rgba(0,0,0,0.9); background:white;"
            }
            "{facet_display_name}"
            Icon { icon: MdArrowDropDown, style: "width: 20px; height: 20px; color:rgba(0,0,0,0.9);" }
        }
    }
}

#[component]
fn FacetOptionList(facet_key: ReadSignal<String>) -> Element {
    let options = use_memo(move || facet_options(&facet_key.read()));
    rsx! {
        ul {
            for option in options() {
                li {
                    key: "{option.label}",
                    FacetOptionCheckbox { option }
                }
            }
            li {
                FacetOptionCheckbox {
                    option: FacetOption {
                        label: "Any".to_string(),
                        change: FacetChange::Clear { key: facet_key.read().clone() },
                    },
                }
            }
        }
    }
}

#[component]
fn FacetOptionCheckbox(option: ReadSignal<FacetOption>) -> Element {
    let facet_context = use_context::<FacetContext>();
    let mut staged_facets = facet_context.staged_facets;
    let is_checked = use_memo(move || is_selected(&staged_facets.read(), &option.read().change));

    rsx! {
        div {
            class: "x-facet-list-item",
            style: "
                display: flex;
                flex-direction: row;
                gap: 10px;
                cursor: pointer;
                padding: 4px;
                margin: 4px;
                align-items: center;
            ",
            onclick: move |_e| {
                let change = option.read().change.clone();
                // a second click on a single-valued pick unselects it
                let change = match change {
                    FacetChange::Toggle { .. } | FacetChange::Clear { .. } => change,
                    _ if is_checked() => FacetChange::Clear { key: facet_key_of(&change).to_string() },
                    _ => change,
                };
                let next = FilterCodec::default().apply_change(&staged_facets.peek(), change);
                staged_facets.set(next);
            },

            if is_checked() {
                Icon { icon: MdCheckBox, style: "width: 26px; height: 26px; color: rgb(28, 33, 45); flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 26px; height: 26px; color: black; flex-shrink: 0;" }
            }
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
                "{option.read().label}"
            }
        }
    }
}

/// Free-form value for text facets without a fixed option list.
#[component]
fn FacetTextInput(facet_key: ReadSignal<String>) -> Element {
    let facet_context = use_context::<FacetContext>();
    let mut staged_facets = facet_context.staged_facets;
    let set_expanded_facet = facet_context.set_expanded_facet;
    let current_value = use_memo(move || match staged_facets.read().get(&facet_key.read()) {
        Some(FacetValue::Text(text)) => text.clone(),
        _ => String::new(),
    });

    rsx! {
        input {
            r#type: "text",
            placeholder: "Any",
            style: "
                width: 100%;
                border: 1px solid rgba(0,0,0,0.3);
                border-radius: 6px;
                padding: 6px 10px;
                font-size: 18px;
            ",
            value: "{current_value}",
            oninput: move |event: Event<FormData>| {
                let key = facet_key.read().clone();
                let change = if event.value().trim().is_empty() {
                    FacetChange::Clear { key }
                } else {
                    FacetChange::SetText { key, value: event.value() }
                };
                let next = FilterCodec::default().apply_change(&staged_facets.peek(), change);
                staged_facets.set(next);
            },
            onkeydown: move |event: Event<KeyboardData>| {
                if event.key() == Key::Enter {
                    set_expanded_facet("".to_string());
                }
            },
        }
    }
}

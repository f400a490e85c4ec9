//! Removable "active filter" tags derived from a filter record.
//!
//! Order is fixed so re-renders never shuffle visible tags: free text
//! first, then registered facets in declaration order, then unregistered
//! keys in record order.

use crate::{
    facet_registry::{FacetKind, FacetRegistry},
    filter_codec::format_number,
    filter_record::{FacetValue, FilterRecord, NumericRange},
    search_query::FreeText,
};


/// What removing a tag does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagRemoval {
    /// Clears the term and every facet.
    ClearAll,
    /// One member of a multi-valued facet, or the whole facet when `item` is `None`.
    Facet { key: String, item: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTag {
    pub text: String,
    pub removal: TagRemoval,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterTagProjector {
    registry: FacetRegistry,
}

impl FilterTagProjector {
    pub fn new(registry: FacetRegistry) -> Self {
        Self { registry }
    }

    pub fn project_all(&self, record: &FilterRecord, free_text: Option<&FreeText>) -> Vec<FilterTag> {
        let mut tags = Vec::new();
        if let Some(free_text) = free_text {
            tags.push(FilterTag {
                text: format!("“{}”", free_text.term),
                removal: TagRemoval::ClearAll,
            });
        }
        for spec in self.registry.iter() {
            if let Some(value) = record.get(spec.key) {
                let unbounded_from = match spec.kind {
                    FacetKind::LinkedRange { unbounded_from, .. } => unbounded_from,
                    _ => None,
                };
                project_value(&mut tags, spec.key, spec.display_name, unbounded_from, value);
            }
        }
        for (key, value) in record.iter() {
            if self.registry.get(key).is_none() {
                project_value(&mut tags, key, key, None, value);
            }
        }
        tags
    }
}

fn project_value(
    tags: &mut Vec<FilterTag>,
    key: &str,
    display_name: &str,
    unbounded_from: Option<f64>,
    value: &FacetValue,
) {
    let whole_facet = || TagRemoval::Facet {
        key: key.to_string(),
        item: None,
    };
    match value {
        FacetValue::Set(members) => {
            for member in members {
                tags.push(FilterTag {
                    text: format!("{display_name}: {member}"),
                    removal: TagRemoval::Facet {
                        key: key.to_string(),
                        item: Some(member.clone()),
                    },
                });
            }
        }
        FacetValue::Range(range) => tags.push(FilterTag {
            text: format!("{display_name}: {}", format_range(range, unbounded_from)),
            removal: whole_facet(),
        }),
        FacetValue::Text(text) => tags.push(FilterTag {
            text: format!("{display_name}: {text}"),
            removal: whole_facet(),
        }),
        FacetValue::Number(number) => tags.push(FilterTag {
            text: format!("{display_name}: {}", format_number(*number)),
            removal: whole_facet(),
        }),
    }
}

/// "1–50", "100+" when the top is open or past the open-ended mark, "≤ 50".
fn format_range(range: &NumericRange, unbounded_from: Option<f64>) -> String {
    let upper = range
        .max
        .filter(|max| unbounded_from.is_none_or(|ceiling| *max < ceiling));
    match (range.min, upper) {
        (Some(min), Some(max)) => format!("{}–{}", format_number(min), format_number(max)),
        (Some(min), None) => format!("{}+", format_number(min)),
        (None, Some(max)) => format!("≤ {}", format_number(max)),
        (None, None) => "any".to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filter_codec::FilterCodec, search_query::Script};

    fn texts(tags: &[FilterTag]) -> Vec<&str> {
        tags.iter().map(|tag| tag.text.as_str()).collect()
    }

    #[test]
    fn one_tag_per_member_and_one_per_range() {
        let record = FilterCodec::default().decode("category=a&category=b&minSeating=1&maxSeating=50");
        let tags = FilterTagProjector::default().project_all(&record, None);
        assert_eq!(texts(&tags), ["Category: a", "Category: b", "Seating: 1–50"]);
        assert_eq!(
            tags[0].removal,
            TagRemoval::Facet { key: "category".to_string(), item: Some("a".to_string()) }
        );
        assert_eq!(tags[2].removal, TagRemoval::Facet { key: "seating".to_string(), item: None });
    }

    #[test]
    fn free_text_comes_first_and_clears_everything() {
        let record = FilterCodec::default().decode("vibe=cozy&rating=4&province=ON");
        let free_text = FreeText { term: "刀削麵".to_string(), script: Script::Ideographic };
        let tags = FilterTagProjector::default().project_all(&record, Some(&free_text));
        assert_eq!(texts(&tags), ["“刀削麵”", "Province: ON", "Min. rating: 4", "vibe: cozy"]);
        assert_eq!(tags[0].removal, TagRemoval::ClearAll);
    }

    #[test]
    fn open_ended_ranges() {
        let codec = FilterCodec::default();
        let projector = FilterTagProjector::default();
        let cases = [
            ("minSeating=100", "Seating: 100+"),
            ("minSeating=100&maxSeating=500", "Seating: 100+"),
            ("minSeating=100&maxSeating=499", "Seating: 100–499"),
            ("maxSeating=50", "Seating: ≤ 50"),
            ("minPrice=10&maxPrice=5000", "Price: 10–5000"),
            ("minPrice=12.5", "Price: 12.5+"),
        ];
        for (query, expected) in cases {
            let tags = projector.project_all(&codec.decode(query), None);
            assert_eq!(texts(&tags), [expected], "{query}");
        }
    }

    #[test]
    fn order_is_stable_regardless_of_input_order() {
        let codec = FilterCodec::default();
        let projector = FilterTagProjector::default();
        let a = projector.project_all(&codec.decode("zone=2&amenity=wifi&city=Ottawa&category=x"), None);
        let b = projector.project_all(&codec.decode("category=x&city=Ottawa&zone=2&amenity=wifi"), None);
        assert_eq!(a, b);
        assert_eq!(texts(&a), ["City: Ottawa", "Category: x", "Amenities: wifi", "zone: 2"]);
    }

    #[test]
    fn empty_record_has_no_tags() {
        assert!(FilterTagProjector::default().project_all(&FilterRecord::new(), None).is_empty());
    }
}

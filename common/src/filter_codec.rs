//! Bidirectional mapping between the location query string and a [`FilterRecord`].
//!
//! Driven by the [`FacetRegistry`]: the registry, not the number of values
//! present, decides whether a key decodes to a set, a range or a scalar.
//! For every record built from registered facets `decode(encode(f)) == f`.

use std::collections::{BTreeMap, BTreeSet};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::debug;

use crate::{
    error::DecodeError,
    facet_registry::{FacetKind, FacetRegistry, FacetSpec, RangeBound, ScalarKind, SCRIPT_KEY, TERM_KEY},
    filter_record::{FacetValue, FilterRecord, NumericRange},
    search_query::FreeText,
};

/// Everything but unreserved characters gets escaped, spaces included.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A single user edit to the filter record.
#[derive(Debug, Clone, PartialEq)]
pub enum FacetChange {
    /// Adds the member to a multi-valued facet, or removes it if present.
    Toggle { key: String, item: String },
    SetText { key: String, value: String },
    SetNumber { key: String, value: f64 },
    /// Replaces both bounds of a linked range. `key` may be either bound key.
    SetRange { key: String, range: NumericRange },
    Clear { key: String },
}

/// What a location query string restores: facets and the free-text term.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationState {
    pub facets: FilterRecord,
    pub term: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterCodec {
    registry: FacetRegistry,
}

impl FilterCodec {
    pub fn new(registry: FacetRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FacetRegistry {
        &self.registry
    }

    pub fn decode(&self, query: &str) -> FilterRecord {
        self.decode_location(query).facets
    }

    /// Decodes facets plus the free-text term. The script tag is ignored, it
    /// is always derived again from the term.
    pub fn decode_location(&self, query: &str) -> LocationState {
        let mut facets = BTreeMap::new();
        let mut term = String::new();
        for (key, value) in parse_query_pairs(query) {
            if key == TERM_KEY {
                term = value;
                continue;
            }
            if FacetRegistry::is_reserved(&key) {
                continue;
            }
            if let Err(err) = self.decode_entry(&mut facets, &key, value) {
                debug!("dropping query value: {err}");
            }
        }
        LocationState {
            facets: FilterRecord::from(facets),
            term,
        }
    }

    fn decode_entry(
        &self,
        facets: &mut BTreeMap<String, FacetValue>,
        key: &str,
        value: String,
    ) -> Result<(), DecodeError> {
        let Some((spec, bound)) = self.registry.resolve(key) else {
            facets.insert(key.to_string(), unregistered_value(value));
            return Ok(());
        };

        if let Some(bound) = bound {
            // an unpaired bound stays open-ended on the other side
            let number = parse_number(key, &value)?;
            let entry = facets
                .entry(spec.key.to_string())
                .or_insert(FacetValue::Range(NumericRange::default()));
            if let FacetValue::Range(range) = entry {
                match bound {
                    RangeBound::Min => range.min = Some(number),
                    RangeBound::Max => range.max = Some(number),
                }
            }
            return Ok(());
        }

        match spec.kind {
            FacetKind::MultiValued => {
                let entry = facets
                    .entry(spec.key.to_string())
                    .or_insert_with(|| FacetValue::Set(BTreeSet::new()));
                if let FacetValue::Set(members) = entry {
                    members.insert(value);
                }
            }
            FacetKind::Scalar(ScalarKind::Text) => {
                facets.insert(spec.key.to_string(), FacetValue::Text(value));
            }
            FacetKind::Scalar(ScalarKind::Number) => {
                let number = parse_number(key, &value)?;
                facets.insert(spec.key.to_string(), FacetValue::Number(number));
            }
            FacetKind::LinkedRange { .. } => {
                return Err(DecodeError::BareRangeKey { key: key.to_string() });
            }
        }
        Ok(())
    }

    pub fn encode(&self, record: &FilterRecord, free_text: Option<&FreeText>) -> String {
        self.encode_pairs(record, free_text)
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_COMPONENT),
                    utf8_percent_encode(value, QUERY_COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Flat key/value pairs in a deterministic order: registered facets in
    /// declaration order, unregistered keys sorted, set members sorted, then
    /// the free-text term and its script.
    pub fn encode_pairs(&self, record: &FilterRecord, free_text: Option<&FreeText>) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for spec in self.registry.iter() {
            if let Some(value) = record.get(spec.key) {
                push_pairs(&mut pairs, spec.key, Some(spec), value);
            }
        }
        for (key, value) in record.iter() {
            if self.registry.get(key).is_none() {
                push_pairs(&mut pairs, key, None, value);
            }
        }
        if let Some(free_text) = free_text {
            pairs.push((TERM_KEY.to_string(), free_text.term.clone()));
            pairs.push((SCRIPT_KEY.to_string(), free_text.script.as_str().to_string()));
        }
        pairs
    }

    pub fn apply_change(&self, record: &FilterRecord, change: FacetChange) -> FilterRecord {
        let mut next = record.clone();
        match change {
            FacetChange::Toggle { key, item } => match self.registry.resolve(&key) {
                Some((spec, None)) if spec.kind == FacetKind::MultiValued => {
                    toggle_member(&mut next, spec.key, item);
                }
                // an unregistered key decodes as a scalar, never as a set
                _ => debug!("facet `{key}` is not multi-valued, toggle ignored"),
            },
            FacetChange::SetText { key, value } => match self.registry.resolve(&key) {
                Some((spec, None)) => match spec.kind {
                    FacetKind::Scalar(ScalarKind::Text) => next.insert(spec.key, FacetValue::Text(value)),
                    FacetKind::MultiValued => next.insert(spec.key, FacetValue::set([value])),
                    FacetKind::Scalar(ScalarKind::Number) => match parse_number(&key, &value) {
                        Ok(number) => next.insert(spec.key, FacetValue::Number(number)),
                        Err(err) => debug!("change ignored: {err}"),
                    },
                    FacetKind::LinkedRange { .. } => {
                        debug!("change ignored: {}", DecodeError::BareRangeKey { key })
                    }
                },
                Some((spec, Some(bound))) => match parse_number(&key, &value) {
                    Ok(number) => set_bound(&mut next, spec, bound, number),
                    Err(err) => debug!("change ignored: {err}"),
                },
                None => next.insert(key, unregistered_value(value)),
            },
            FacetChange::SetNumber { key, value } => match self.registry.resolve(&key) {
                Some((spec, None)) => match spec.kind {
                    FacetKind::Scalar(ScalarKind::Number) => next.insert(spec.key, FacetValue::Number(value)),
                    FacetKind::Scalar(ScalarKind::Text) => {
                        next.insert(spec.key, FacetValue::Text(format_number(value)))
                    }
                    FacetKind::MultiValued => next.insert(spec.key, FacetValue::set([format_number(value)])),
                    FacetKind::LinkedRange { .. } => {
                        debug!("change ignored: {}", DecodeError::BareRangeKey { key })
                    }
                },
                Some((spec, Some(bound))) => set_bound(&mut next, spec, bound, value),
                None => next.insert(key, FacetValue::Number(value)),
            },
            FacetChange::SetRange { key, range } => match self.registry.resolve(&key) {
                Some((spec, _)) if matches!(spec.kind, FacetKind::LinkedRange { .. }) => {
                    next.insert(spec.key, FacetValue::Range(range));
                }
                _ => debug!("facet `{key}` is not a linked range, change ignored"),
            },
            FacetChange::Clear { key } => return self.remove_facet(record, &key, None),
        }
        next
    }

    /// Removes one member of a multi-valued facet, or the whole facet.
    ///
    /// Either bound key of a linked range removes both bounds.
    pub fn remove_facet(&self, record: &FilterRecord, key: &str, item: Option<&str>) -> FilterRecord {
        let mut next = record.clone();
        let (key, multi_valued) = match self.registry.resolve(key) {
            Some((spec, _)) => (spec.key, spec.kind == FacetKind::MultiValued),
            None => (key, matches!(record.get(key), Some(FacetValue::Set(_)))),
        };
        match item {
            Some(item) if multi_valued => {
                if let Some(FacetValue::Set(mut members)) = next.remove(key) {
                    members.remove(item);
                    next.insert(key, FacetValue::Set(members));
                }
            }
            _ => {
                next.remove(key);
            }
        }
        next
    }
}

/// Unregistered keys try a number first and fall back to text.
fn unregistered_value(value: String) -> FacetValue {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => FacetValue::Number(number),
        _ => FacetValue::Text(value),
    }
}

fn push_pairs(pairs: &mut Vec<(String, String)>, key: &str, spec: Option<&FacetSpec>, value: &FacetValue) {
    match value {
        FacetValue::Text(text) => pairs.push((key.to_string(), text.clone())),
        FacetValue::Number(number) => pairs.push((key.to_string(), format_number(*number))),
        FacetValue::Set(members) => {
            for member in members {
                pairs.push((key.to_string(), member.clone()));
            }
        }
        FacetValue::Range(range) => match spec.map(|spec| spec.kind) {
            Some(FacetKind::LinkedRange { min_key, max_key, .. }) => {
                if let Some(min) = range.min {
                    pairs.push((min_key.to_string(), format_number(min)));
                }
                if let Some(max) = range.max {
                    pairs.push((max_key.to_string(), format_number(max)));
                }
            }
            _ => debug!("range under `{key}` has no bound keys, not encoded"),
        },
    }
}

fn toggle_member(record: &mut FilterRecord, key: &str, item: String) {
    let mut members = match record.remove(key) {
        Some(FacetValue::Set(members)) => members,
        _ => BTreeSet::new(),
    };
    if !members.remove(&item) {
        members.insert(item);
    }
    record.insert(key, FacetValue::Set(members));
}

fn set_bound(record: &mut FilterRecord, spec: &FacetSpec, bound: RangeBound, number: f64) {
    let mut range = match record.get(spec.key) {
        Some(FacetValue::Range(range)) => *range,
        _ => NumericRange::default(),
    };
    match bound {
        RangeBound::Min => range.min = Some(number),
        RangeBound::Max => range.max = Some(number),
    }
    record.insert(spec.key, FacetValue::Range(range));
}

fn parse_number(key: &str, value: &str) -> Result<f64, DecodeError> {
    let number = value.trim().parse::<f64>().map_err(|_| DecodeError::NotANumber {
        key: key.to_string(),
        value: value.to_string(),
    })?;
    if !number.is_finite() {
        return Err(DecodeError::NotFinite {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(number)
}

/// Shortest representation that parses back to the same number ("50", "4.5").
pub fn format_number(number: f64) -> String {
    number.to_string()
}

fn parse_query_pairs(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
}

fn decode_component(component: &str) -> String {
    let component = component.replace('+', " ");
    percent_decode_str(&component).decode_utf8_lossy().into_owned()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::search_query::Script;

    fn codec() -> FilterCodec {
        FilterCodec::new(FacetRegistry::venues())
    }

    fn sample_record() -> FilterRecord {
        codec().decode("category=a&category=b&minSeating=1&maxSeating=50")
    }

    #[test]
    fn single_multi_valued_occurrence_is_still_a_set() {
        let record = codec().decode("category=%E7%B2%B5%E8%8F%9C");
        assert_eq!(record.get("category"), Some(&FacetValue::set(["粵菜"])));
    }

    #[test]
    fn bounds_pair_into_one_range() {
        let record = sample_record();
        assert_eq!(
            record.get("seating"),
            Some(&FacetValue::Range(NumericRange::between(1.0, 50.0)))
        );
        assert!(!record.contains_key("minSeating"));
    }

    #[test]
    fn unpaired_bound_is_open_ended() {
        let record = codec().decode("minSeating=100");
        assert_eq!(
            record.get("seating"),
            Some(&FacetValue::Range(NumericRange::new(Some(100.0), None)))
        );
    }

    #[test]
    fn mistyped_value_is_dropped_not_fatal() {
        let record = codec().decode("minSeating=lots&maxSeating=50&rating=abc&province=ON");
        assert_eq!(
            record.get("seating"),
            Some(&FacetValue::Range(NumericRange::new(None, Some(50.0))))
        );
        assert!(!record.contains_key("rating"));
        assert_eq!(record.get("province"), Some(&FacetValue::Text("ON".to_string())));
    }

    #[test]
    fn non_finite_bound_is_dropped() {
        let record = codec().decode("minSeating=NaN&maxPrice=inf");
        assert!(record.is_empty());
    }

    #[test]
    fn unregistered_keys_try_numbers_first() {
        let record = codec().decode("capacity=12&vibe=cozy");
        assert_eq!(record.get("capacity"), Some(&FacetValue::Number(12.0)));
        assert_eq!(record.get("vibe"), Some(&FacetValue::Text("cozy".to_string())));
    }

    #[test]
    fn text_scalars_are_never_coerced() {
        let record = codec().decode("city=007");
        assert_eq!(record.get("city"), Some(&FacetValue::Text("007".to_string())));
    }

    #[test]
    fn reserved_keys_stay_out_of_the_record() {
        let state = codec().decode_location("q=Noodle+House&script=latin&cursor=C1&page=3&province=ON");
        assert_eq!(state.term, "Noodle House");
        assert_eq!(state.facets.len(), 1);
        assert!(state.facets.contains_key("province"));
    }

    #[test]
    fn empty_values_are_omitted() {
        let record = codec().decode("category=&province=&&city=Ottawa");
        assert_eq!(record.len(), 1);
        assert_eq!(codec().encode(&record, None), "city=Ottawa");
    }

    #[test]
    fn encode_follows_registry_order() {
        let record = codec().decode("vibe=cozy&rating=4.5&maxSeating=50&category=b&category=a&province=ON&minSeating=1");
        assert_eq!(
            codec().encode(&record, None),
            "province=ON&category=a&category=b&minSeating=1&maxSeating=50&rating=4.5&vibe=cozy"
        );
    }

    #[test]
    fn encode_escapes_and_appends_free_text() {
        let record = codec().decode("category=Dim+Sum%20%26+Tea");
        let free_text = FreeText {
            term: "刀削麵".to_string(),
            script: Script::Ideographic,
        };
        let encoded = codec().encode(&record, Some(&free_text));
        assert_eq!(
            encoded,
            "category=Dim%20Sum%20%26%20Tea&q=%E5%88%80%E5%89%8A%E9%BA%B5&script=ideographic"
        );
        let state = codec().decode_location(&encoded);
        assert_eq!(state.facets, record);
        assert_eq!(state.term, "刀削麵");
    }

    #[test]
    fn removing_a_member_keeps_the_rest() {
        let record = codec().remove_facet(&sample_record(), "category", Some("a"));
        assert_eq!(record, codec().decode("category=b&minSeating=1&maxSeating=50"));
    }

    #[test]
    fn removing_the_last_member_drops_the_key() {
        let record = codec().decode("category=a");
        let record = codec().remove_facet(&record, "category", Some("a"));
        assert!(record.is_empty());
    }

    #[test]
    fn removing_either_bound_removes_both() {
        for key in ["minSeating", "maxSeating", "seating"] {
            let record = codec().remove_facet(&sample_record(), key, None);
            assert_eq!(record, codec().decode("category=a&category=b"), "{key}");
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let codec = codec();
        let toggle = |record: &FilterRecord| {
            codec.apply_change(record, FacetChange::Toggle {
                key: "amenity".to_string(),
                item: "parking".to_string(),
            })
        };
        let added = toggle(&FilterRecord::new());
        assert_eq!(added.get("amenity"), Some(&FacetValue::set(["parking"])));
        assert!(toggle(&added).is_empty());
    }

    #[test]
    fn toggle_on_a_scalar_facet_is_ignored() {
        let record = codec().decode("province=ON");
        let next = codec().apply_change(&record, FacetChange::Toggle {
            key: "province".to_string(),
            item: "QC".to_string(),
        });
        assert_eq!(next, record);
    }

    #[test]
    fn edits_to_unregistered_keys_survive_the_location() {
        let codec = codec();
        let record = codec.apply_change(&FilterRecord::new(), FacetChange::Toggle {
            key: "zone".to_string(),
            item: "a".to_string(),
        });
        assert!(record.is_empty());

        let record = codec.apply_change(&record, FacetChange::SetText {
            key: "zone".to_string(),
            value: "12".to_string(),
        });
        let record = codec.apply_change(&record, FacetChange::SetText {
            key: "vibe".to_string(),
            value: "cozy".to_string(),
        });
        assert_eq!(record.get("zone"), Some(&FacetValue::Number(12.0)));
        assert_eq!(codec.decode(&codec.encode(&record, None)), record);
    }

    #[test]
    fn setting_one_bound_keeps_the_other() {
        let next = codec().apply_change(&sample_record(), FacetChange::SetNumber {
            key: "maxSeating".to_string(),
            value: 80.0,
        });
        assert_eq!(
            next.get("seating"),
            Some(&FacetValue::Range(NumericRange::between(1.0, 80.0)))
        );
    }

    #[test]
    fn set_text_follows_the_declared_shape() {
        let codec = codec();
        let record = codec.apply_change(&FilterRecord::new(), FacetChange::SetText {
            key: "category".to_string(),
            value: "Izakaya".to_string(),
        });
        let record = codec.apply_change(&record, FacetChange::SetText {
            key: "rating".to_string(),
            value: "4".to_string(),
        });
        assert_eq!(record.get("category"), Some(&FacetValue::set(["Izakaya"])));
        assert_eq!(record.get("rating"), Some(&FacetValue::Number(4.0)));
    }

    #[test]
    fn set_range_and_clear() {
        let codec = codec();
        let record = codec.apply_change(&FilterRecord::new(), FacetChange::SetRange {
            key: "minPrice".to_string(),
            range: NumericRange::between(10.0, 40.0),
        });
        assert_eq!(codec.encode(&record, None), "minPrice=10&maxPrice=40");
        let record = codec.apply_change(&record, FacetChange::Clear { key: "price".to_string() });
        assert!(record.is_empty());
    }
}

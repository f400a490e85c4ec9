//! In-memory representation of the active facets.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};


/// Numeric bounds of a linked-range facet. A missing bound is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub fn is_unset(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetValue {
    Text(String),
    Number(f64),
    Set(BTreeSet<String>),
    Range(NumericRange),
}

impl FacetValue {
    pub fn set<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Set(members.into_iter().map(Into::into).collect())
    }

    /// Applies the stripping rule; `None` means the value is effectively empty.
    pub fn sanitize(self) -> Option<Self> {
        match self {
            Self::Text(text) if text.trim().is_empty() => None,
            Self::Text(text) => Some(Self::Text(text)),
            Self::Number(number) if !number.is_finite() => None,
            Self::Number(number) => Some(Self::Number(number)),
            Self::Set(mut members) => {
                members.retain(|member| !member.trim().is_empty());
                if members.is_empty() { None } else { Some(Self::Set(members)) }
            }
            Self::Range(range) => {
                let range = NumericRange {
                    min: range.min.filter(|bound| bound.is_finite()),
                    max: range.max.filter(|bound| bound.is_finite()),
                };
                if range.is_unset() { None } else { Some(Self::Range(range)) }
            }
        }
    }
}

/// All active facets, keyed by facet key.
///
/// Never holds a key mapped to an empty set, empty text, a non-finite number
/// or a range without bounds. Mutation goes through
/// [`crate::filter_codec::FilterCodec`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, FacetValue>", into = "BTreeMap<String, FacetValue>")]
pub struct FilterRecord {
    facets: BTreeMap<String, FacetValue>,
}

impl FilterRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FacetValue> {
        self.facets.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.facets.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FacetValue)> {
        self.facets.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.facets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Whether any filter is applied. Stripping guarantees every key counts.
    pub fn is_active(&self) -> bool {
        !self.is_empty()
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: FacetValue) {
        let key = key.into();
        match value.sanitize() {
            Some(value) => {
                self.facets.insert(key, value);
            }
            None => {
                self.facets.remove(&key);
            }
        }
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<FacetValue> {
        self.facets.remove(key)
    }
}

impl From<BTreeMap<String, FacetValue>> for FilterRecord {
    fn from(facets: BTreeMap<String, FacetValue>) -> Self {
        let mut record = Self::new();
        for (key, value) in facets {
            record.insert(key, value);
        }
        record
    }
}

impl From<FilterRecord> for BTreeMap<String, FacetValue> {
    fn from(record: FilterRecord) -> Self {
        record.facets
    }
}

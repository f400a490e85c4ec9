//! Static registry of the facets a venue listing understands.
//!
//! The shape of every facet value is fixed here by declaration. A facet
//! declared multi-valued is always a set, even with one selected member.

/// Query-string key carrying the free-text term.
pub const TERM_KEY: &str = "q";
/// Query-string key carrying the script tag of the free-text term.
pub const SCRIPT_KEY: &str = "script";
/// Query-string key carrying the opaque pagination cursor.
pub const CURSOR_KEY: &str = "cursor";
/// Query-string key carrying the cosmetic page index.
pub const PAGE_KEY: &str = "page";

/// Keys that never end up in a filter record.
pub const RESERVED_KEYS: [&str; 4] = [TERM_KEY, SCRIPT_KEY, CURSOR_KEY, PAGE_KEY];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FacetKind {
    Scalar(ScalarKind),
    MultiValued,
    /// Two numeric bounds that always travel together.
    ///
    /// `unbounded_from` marks the upper bound value from which the range is
    /// displayed as open-ended ("100+").
    LinkedRange {
        min_key: &'static str,
        max_key: &'static str,
        unbounded_from: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetSpec {
    pub key: &'static str,
    pub display_name: &'static str,
    pub kind: FacetKind,
}

/// Which half of a linked range a query-string key names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Min,
    Max,
}

pub const VENUE_FACETS: &[FacetSpec] = &[
    FacetSpec {
        key: "province",
        display_name: "Province",
        kind: FacetKind::Scalar(ScalarKind::Text),
    },
    FacetSpec {
        key: "city",
        display_name: "City",
        kind: FacetKind::Scalar(ScalarKind::Text),
    },
    FacetSpec {
        key: "category",
        display_name: "Category",
        kind: FacetKind::MultiValued,
    },
    FacetSpec {
        key: "amenity",
        display_name: "Amenities",
        kind: FacetKind::MultiValued,
    },
    FacetSpec {
        key: "seating",
        display_name: "Seating",
        kind: FacetKind::LinkedRange {
            min_key: "minSeating",
            max_key: "maxSeating",
            unbounded_from: Some(500.0),
        },
    },
    FacetSpec {
        key: "price",
        display_name: "Price",
        kind: FacetKind::LinkedRange {
            min_key: "minPrice",
            max_key: "maxPrice",
            unbounded_from: None,
        },
    },
    FacetSpec {
        key: "rating",
        display_name: "Min. rating",
        kind: FacetKind::Scalar(ScalarKind::Number),
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetRegistry {
    facets: &'static [FacetSpec],
}

impl Default for FacetRegistry {
    fn default() -> Self {
        Self::venues()
    }
}

impl FacetRegistry {
    pub const fn new(facets: &'static [FacetSpec]) -> Self {
        Self { facets }
    }

    pub const fn venues() -> Self {
        Self::new(VENUE_FACETS)
    }

    /// Facets in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'static, FacetSpec> {
        self.facets.iter()
    }

    pub fn get(&self, key: &str) -> Option<&'static FacetSpec> {
        self.facets.iter().find(|spec| spec.key == key)
    }

    /// Resolves a query-string key to its facet.
    ///
    /// Matches the facet key itself, or either bound key of a linked range,
    /// in which case the bound is returned as well.
    pub fn resolve(&self, key: &str) -> Option<(&'static FacetSpec, Option<RangeBound>)> {
        for spec in self.facets {
            if spec.key == key {
                return Some((spec, None));
            }
            if let FacetKind::LinkedRange { min_key, max_key, .. } = spec.kind {
                if min_key == key {
                    return Some((spec, Some(RangeBound::Min)));
                }
                if max_key == key {
                    return Some((spec, Some(RangeBound::Max)));
                }
            }
        }
        None
    }

    pub fn is_reserved(key: &str) -> bool {
        RESERVED_KEYS.contains(&key)
    }

    /// Display name for a key, falling back to the raw key.
    pub fn display_name<'a>(&self, key: &'a str) -> &'a str {
        match self.resolve(key) {
            Some((spec, _)) => spec.display_name,
            None => key,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_resolve_to_their_facet() {
        let registry = FacetRegistry::venues();
        let (spec, bound) = registry.resolve("maxSeating").unwrap();
        assert_eq!(spec.key, "seating");
        assert_eq!(bound, Some(RangeBound::Max));

        let (spec, bound) = registry.resolve("category").unwrap();
        assert_eq!(spec.kind, FacetKind::MultiValued);
        assert_eq!(bound, None);

        assert!(registry.resolve("wifi").is_none());
    }

    #[test]
    fn unregistered_keys_display_raw() {
        let registry = FacetRegistry::venues();
        assert_eq!(registry.display_name("amenity"), "Amenities");
        assert_eq!(registry.display_name("minPrice"), "Price");
        assert_eq!(registry.display_name("parking"), "parking");
    }

    #[test]
    fn registry_keys_are_not_reserved() {
        for spec in FacetRegistry::venues().iter() {
            assert!(!FacetRegistry::is_reserved(spec.key), "{}", spec.key);
        }
    }
}

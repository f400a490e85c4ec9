use serde::{Deserialize, Serialize};

use crate::cursor::OpaqueCursor;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_latin: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub seating_capacity: Option<u32>,
}

impl VenueSummary {
    /// "City, Province" with whichever parts are known.
    pub fn location_line(&self) -> String {
        [self.city.as_deref(), self.province.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One window of results; `next_cursor` is absent once the results are exhausted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub items: Vec<VenueSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<OpaqueCursor>,
    pub has_more: bool,
}

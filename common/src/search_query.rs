//! Shared search query models and helpers.

use serde::{Deserialize, Serialize};

use crate::{
    cursor::OpaqueCursor,
    facet_registry::CURSOR_KEY,
    filter_codec::FilterCodec,
    filter_record::FilterRecord,
};


/// Which precomputed name field the executor matches free text against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    /// Native-case display name.
    Ideographic,
    /// Case-folded Latin name.
    Latin,
}

impl Script {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ideographic => "ideographic",
            Self::Latin => "latin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeText {
    pub term: String,
    pub script: Script,
}

/// Facets plus free text; two requests with equal signatures may share a cursor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuerySignature {
    pub facets: FilterRecord,
    pub free_text: Option<FreeText>,
}

/// Canonical request against the search executor.
///
/// Built only by [`crate::query_plan::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    facets: FilterRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    free_text: Option<FreeText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cursor: Option<OpaqueCursor>,
}

impl QueryDescriptor {
    pub(crate) fn new(facets: FilterRecord, free_text: Option<FreeText>, cursor: Option<OpaqueCursor>) -> Self {
        Self { facets, free_text, cursor }
    }

    pub fn facets(&self) -> &FilterRecord {
        &self.facets
    }

    pub fn free_text(&self) -> Option<&FreeText> {
        self.free_text.as_ref()
    }

    pub fn cursor(&self) -> Option<&OpaqueCursor> {
        self.cursor.as_ref()
    }

    pub fn signature(&self) -> QuerySignature {
        QuerySignature {
            facets: self.facets.clone(),
            free_text: self.free_text.clone(),
        }
    }

    /// Flattens the descriptor into executor request parameters.
    ///
    /// Set members become repeated parameters, ranges their two bound keys,
    /// followed by the term, its script and finally the cursor.
    pub fn to_request_params(&self, codec: &FilterCodec) -> Vec<(String, String)> {
        let mut params = codec.encode_pairs(&self.facets, self.free_text.as_ref());
        if let Some(cursor) = &self.cursor {
            params.push((CURSOR_KEY.to_string(), cursor.as_str().to_string()));
        }
        params
    }
}

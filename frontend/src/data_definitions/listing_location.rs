//! Shareable location of the venue listing.

use std::fmt::Display;


/// The listing's query string, as produced by the filter codec.
///
/// Parsing happens in the listing session, so this only carries the text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingLocation(pub String);

impl From<&str> for ListingLocation {
    fn from(query: &str) -> Self {
        ListingLocation(query.trim_start_matches('?').to_string())
    }
}

// Display the location in a way that can be parsed back by From<&str>
impl Display for ListingLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

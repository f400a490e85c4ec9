//! Search API route handlers and module exports.

mod search_venues;
pub use search_venues::{search_venues, into_transport_error, HttpSearchExecutor};

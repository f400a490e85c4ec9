//! Common library exports shared between frontend and backend.
//!
//! Holds the venue listing core: the facet registry, the filter codec that
//! maps a location query string to a [`filter_record::FilterRecord`], the
//! query plan builder, the forward cursor manager, the request lifecycle
//! controller and the filter tag projector.

extern crate serde;


pub mod error;
pub mod facet_registry;
pub mod filter_record;
pub mod filter_codec;
pub mod search_query;
pub mod query_plan;
pub mod search_result;
pub mod cursor;
pub mod search_executor;
pub mod listing_controller;
pub mod filter_tags;
pub mod listing_session;

pub mod listing_location;
pub mod listing_action;

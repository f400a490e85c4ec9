//! API entry points called from the frontend's server functions.

pub mod search;

//! Server-side adapter to the venue search executor.

pub mod api;
pub mod executor_utils;

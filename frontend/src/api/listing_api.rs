//! Client API calls for the venue search endpoint.

use common::{
    error::TransportError,
    search_executor::SearchExecutor,
    search_query::QueryDescriptor,
    search_result::PageResult,
};
use dioxus::prelude::*;



#[server]
pub async fn search_venues(descriptor: QueryDescriptor) -> Result<PageResult, ServerFnError> {
    let x = backend::api::search::search_venues(descriptor).await;
    x.map_err(|e| match backend::api::search::into_transport_error(e) {
        TransportError::Status { status, body } => ServerFnError::ServerError { message: body, code: status, details: None },
        e => ServerFnError::ServerError { message: e.to_string(), code: 502, details: None },
    })
}

/// Runs listing requests through the `search_venues` server function.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerSearchExecutor;

impl SearchExecutor for ServerSearchExecutor {
    async fn execute(&self, descriptor: &QueryDescriptor) -> Result<PageResult, TransportError> {
        search_venues(descriptor.clone()).await.map_err(|e| match e {
            ServerFnError::ServerError { message, code, .. } => TransportError::Status { status: code, body: message },
            e => TransportError::Request(e.to_string()),
        })
    }
}

//! Search endpoint for venue listing pages.

use common::{
    error::TransportError,
    filter_codec::FilterCodec,
    search_executor::SearchExecutor,
    search_query::QueryDescriptor,
    search_result::PageResult,
};
use tracing::debug;

use crate::executor_utils::http_executor::{executor_base_url, executor_get_json, get_executor_client};

pub const SEARCH_PATH: &str = "/venues/search";

/// Runs one descriptor against the executor configured in the environment.
pub async fn search_venues(descriptor: QueryDescriptor) -> anyhow::Result<PageResult> {
    HttpSearchExecutor::from_env()?.search(&descriptor).await
}

#[derive(Debug, Clone)]
pub struct HttpSearchExecutor {
    client: reqwest::Client,
    base_url: String,
    codec: FilterCodec,
}

impl HttpSearchExecutor {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: get_executor_client()?,
            base_url: base_url.into(),
            codec: FilterCodec::default(),
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(executor_base_url())
    }

    pub async fn search(&self, descriptor: &QueryDescriptor) -> anyhow::Result<PageResult> {
        let params = descriptor.to_request_params(&self.codec);
        debug!(
            params = params.len(),
            paged = descriptor.cursor().is_some(),
            "searching venues"
        );
        executor_get_json::<PageResult>(&self.client, &self.base_url, SEARCH_PATH, &params).await
    }
}

impl SearchExecutor for HttpSearchExecutor {
    async fn execute(&self, descriptor: &QueryDescriptor) -> Result<PageResult, TransportError> {
        self.search(descriptor).await.map_err(into_transport_error)
    }
}

pub fn into_transport_error(err: anyhow::Error) -> TransportError {
    match err.downcast::<TransportError>() {
        Ok(err) => err,
        Err(err) => TransportError::Request(format!("{err:#}")),
    }
}

//! Request/response contract with the backend search executor.

use std::future::Future;

use futures_util::future::{Abortable, Aborted};

use crate::{
    error::TransportError,
    listing_controller::{RequestStamp, RequestTicket},
    search_query::QueryDescriptor,
    search_result::PageResult,
};


pub trait SearchExecutor {
    fn execute(&self, descriptor: &QueryDescriptor) -> impl Future<Output = Result<PageResult, TransportError>>;
}

/// How an issued request ended, still stamped with the epoch it was sent under.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Page { stamp: RequestStamp, result: PageResult },
    Failed { stamp: RequestStamp, error: TransportError },
    Aborted { stamp: RequestStamp },
}

impl Completion {
    pub fn stamp(&self) -> RequestStamp {
        match self {
            Self::Page { stamp, .. } | Self::Failed { stamp, .. } | Self::Aborted { stamp } => *stamp,
        }
    }
}

/// Runs the ticket's request, stopping early if the controller aborts it.
///
/// Aborting is best-effort: a transport that cannot stop still completes,
/// and the controller drops the late result by its stamp.
pub async fn fetch<E: SearchExecutor>(ticket: RequestTicket, executor: &E) -> Completion {
    let RequestTicket { stamp, descriptor, abort, .. } = ticket;
    match Abortable::new(executor.execute(&descriptor), abort).await {
        Ok(Ok(result)) => Completion::Page { stamp, result },
        Ok(Err(error)) => Completion::Failed { stamp, error },
        Err(Aborted) => Completion::Aborted { stamp },
    }
}

//! Row source abstraction the controller fetches pages from

use async_trait::async_trait;
use tavola_core::{ListRequest, Page};

use crate::error::FetchError;

/// Fetches one page of rows for a list request
///
/// This is the boundary to whatever talks to the backend. The controller hands
/// it a [`ListRequest`] and consumes the resulting page or error; retries,
/// de-duplication and transport concerns stay on the implementor's side.
#[async_trait]
pub trait RowSource<T: Send>: Send + Sync {
    async fn fetch(&self, request: &ListRequest) -> Result<Page<T>, FetchError>;
}

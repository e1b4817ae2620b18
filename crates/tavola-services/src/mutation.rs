//! Create, update and delete operations with list invalidation
//!
//! A [`Mutation`] wraps a caller-supplied async write. While it runs the
//! mutation reports itself pending (submit buttons disable on that). On
//! success every configured resource is invalidated and a success notice is
//! queued; on failure an error notice carries the server's message or the
//! generic fallback. The result is always handed back to the caller.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ServiceResult;
use crate::invalidation::QueryInvalidator;
use crate::notice::{Notice, NoticeQueue};

pub struct Mutation {
    name: String,
    invalidates: Vec<String>,
    success_message: Option<String>,
    invalidator: QueryInvalidator,
    notices: NoticeQueue,
    in_flight: Arc<AtomicUsize>,
}

struct PendingGuard(Arc<AtomicUsize>);

impl PendingGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter.clone())
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Mutation {
    pub fn new(name: impl Into<String>, invalidator: QueryInvalidator, notices: NoticeQueue) -> Self {
        Self {
            name: name.into(),
            invalidates: Vec::new(),
            success_message: None,
            invalidator,
            notices,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Invalidate `resource` after every successful run
    pub fn invalidates(mut self, resource: impl Into<String>) -> Self {
        self.invalidates.push(resource.into());
        self
    }

    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn run<T, Fut>(&self, operation: Fut) -> ServiceResult<T>
    where
        Fut: Future<Output = ServiceResult<T>>,
    {
        let _pending = PendingGuard::enter(&self.in_flight);

        match operation.await {
            Ok(value) => {
                for resource in &self.invalidates {
                    self.invalidator.invalidate(resource);
                }
                tracing::info!(mutation = %self.name, "Mutation succeeded");
                if let Some(message) = &self.success_message {
                    self.notices.push(Notice::success(message.clone()));
                }
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(mutation = %self.name, "Mutation failed: {}", err);
                self.notices.push(Notice::error(err.user_message()));
                Err(err)
            }
        }
    }
}

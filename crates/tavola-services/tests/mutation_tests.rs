//! Integration tests for Mutation
//!
//! Covers pending tracking, invalidation of list queries and the notices
//! raised for successes and failures.

mod common;

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tavola_core::GENERIC_ERROR_MESSAGE;
use tavola_services::{
    ListQuery, Mutation, Notice, NoticeQueue, QueryInvalidator, ServiceError, ServiceResult,
};
use tavola_table::RowSource;

use common::{Booking, MockRowSource, bookings, bookings_table};

fn confirm_booking(invalidator: &QueryInvalidator, notices: &NoticeQueue) -> Mutation {
    Mutation::new("confirm-booking", invalidator.clone(), notices.clone())
        .invalidates("bookings")
        .success_message("Booking confirmed")
}

#[tokio::test]
async fn success_invalidates_and_notifies() {
    let invalidator = QueryInvalidator::new();
    let notices = NoticeQueue::new();
    let mutation = confirm_booking(&invalidator, &notices);

    let result: ServiceResult<u32> = mutation.run(async { Ok::<_, ServiceError>(7) }).await;

    assert_eq!(result.unwrap(), 7);
    assert_eq!(invalidator.generation("bookings"), 1);
    assert_eq!(notices.drain(), vec![Notice::success("Booking confirmed")]);
    assert!(notices.is_empty());
}

#[tokio::test]
async fn failure_reports_server_message() {
    let invalidator = QueryInvalidator::new();
    let notices = NoticeQueue::new();
    let mutation = confirm_booking(&invalidator, &notices);

    let result: ServiceResult<()> = mutation
        .run(async {
            Err::<(), _>(ServiceError::Api {
                status: 409,
                message: Some("Table 4 is already booked at 19:00".into()),
            })
        })
        .await;

    assert!(result.is_err());
    assert_eq!(invalidator.generation("bookings"), 0);
    let notices = notices.drain();
    assert_eq!(notices, vec![Notice::error("Table 4 is already booked at 19:00")]);
    assert!(notices[0].is_error());
}

#[tokio::test]
async fn failure_without_message_uses_fallback() {
    let invalidator = QueryInvalidator::new();
    let notices = NoticeQueue::new();
    let mutation = confirm_booking(&invalidator, &notices);

    let _ = mutation
        .run(async {
            Err::<(), _>(ServiceError::Api {
                status: 500,
                message: None,
            })
        })
        .await;

    assert_eq!(notices.drain(), vec![Notice::error(GENERIC_ERROR_MESSAGE)]);
}

#[tokio::test]
async fn pending_while_running() {
    let invalidator = QueryInvalidator::new();
    let notices = NoticeQueue::new();
    let mutation = confirm_booking(&invalidator, &notices);
    assert!(!mutation.is_pending());

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let watched = &mutation;
    let run = mutation.run(async move {
        rx.await.ok();
        Ok::<_, ServiceError>(())
    });
    let observe = async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let pending = watched.is_pending();
        tx.send(()).ok();
        pending
    };

    let (result, was_pending) = futures::join!(run, observe);
    assert!(result.is_ok());
    assert!(was_pending);
    assert!(!mutation.is_pending());
}

#[tokio::test]
async fn mutation_refreshes_bound_list() {
    let source = Arc::new(MockRowSource::new().with_rows(bookings(4)));
    let invalidator = QueryInvalidator::new();
    let notices = NoticeQueue::new();
    let mut query: ListQuery<Booking> = ListQuery::new(
        bookings_table(),
        source.clone() as Arc<dyn RowSource<Booking>>,
        invalidator.clone(),
    );
    query.sync().await;

    let mutation = confirm_booking(&invalidator, &notices);
    mutation
        .run(async { Ok::<_, ServiceError>(()) })
        .await
        .unwrap();

    assert!(query.sync().await);
    assert_eq!(source.fetch_count(), 2);
}

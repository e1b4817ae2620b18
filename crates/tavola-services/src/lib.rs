//! Tavola Services Layer
//!
//! Connects headless table controllers to the remote REST API.
//!
//! # Architecture
//!
//! ```text
//! Admin pages (tavola-admin)
//!     ↓
//! Service Layer (tavola-services) ← This crate
//!     ↓
//! Table controller (tavola-table) ── RowSource ──▶ ApiClient ──▶ REST API
//! ```
//!
//! # Services
//!
//! - [`ApiClient`] - REST client for list, create, update and delete calls
//! - [`ApiRowSource`] - [`RowSource`](tavola_table::RowSource) backed by one resource
//! - [`ListQuery`] - Binds a table controller to a row source and refetches
//!   when its request or its resource's cache generation moves
//! - [`Mutation`] - Runs a write, invalidates list queries, reports a [`Notice`]
//! - [`QueryInvalidator`] - Per-resource cache generations
//!
//! All business rules stay on the server. Every successful mutation
//! invalidates the affected resources and the lists showing them refetch.

mod api_client;
mod error;
mod invalidation;
mod list_query;
mod mutation;
mod notice;

pub use api_client::{ApiClient, ApiRowSource};
pub use error::{ServiceError, ServiceResult};
pub use invalidation::QueryInvalidator;
pub use list_query::ListQuery;
pub use mutation::Mutation;
pub use notice::{Notice, NoticeLevel, NoticeQueue};

//! Tavola Admin - list pages of the restaurant admin dashboard
//!
//! Each page module declares what its table shows and how it can be filtered:
//! - Row type as returned by the API
//! - Column descriptors
//! - Filter registry
//! - Resource path of the list endpoint
//!
//! `table(settings)` builds a ready [`TableController`](tavola_table::TableController)
//! for the page. Nothing here talks to the network.

mod common;
mod page;

pub mod booking;
pub mod branch;
pub mod employee;
pub mod menu;
pub mod role;
pub mod schedule;

pub use booking::Booking;
pub use branch::Branch;
pub use common::{format_money, option_label};
pub use employee::Employee;
pub use menu::MenuItem;
pub use page::{AdminPage, UnknownPage};
pub use role::Role;
pub use schedule::Schedule;

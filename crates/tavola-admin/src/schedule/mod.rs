//! Work schedules page
//!
//! Shifts assigned to employees, usually viewed per branch.

mod page;


pub use page::*;

//! Roles page
//!
//! Permission roles assigned to employees. System roles ship with the
//! platform and cannot be deleted.

mod page;


pub use page::*;

//! Table bookings page
//!
//! Lists reservations across branches, or for a single branch when scoped with
//! [`table_for_branch`]. Booking rules (availability, conflicts) are enforced
//! by the server; this page only lists and filters.

mod page;


pub use page::*;

//! Menu items page
//!
//! Dishes and drinks offered across all branches, filterable by category,
//! availability, name and price range.

mod page;

#[cfg(test)]
mod tests;

pub use page::*;

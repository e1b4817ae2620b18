//! Branches page

mod page;


pub use page::*;

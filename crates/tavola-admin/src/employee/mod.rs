//! Employees page

mod page;


pub use page::*;

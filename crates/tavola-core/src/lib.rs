//! Tavola core types
//!
//! Shared vocabulary between the table controller, the REST services and the
//! admin pages:
//!
//! - [`SortDescriptor`] - the single active `field:direction` sort
//! - [`FilterCondition`] / [`FilterValue`] - typed filter expressions
//! - [`ListRequest`] - the request object handed to a list endpoint
//! - [`Page`] / [`PageEnvelope`] - normalized list responses
//! - [`CellValue`] - a displayable table cell

mod error;
mod filter;
mod page;
mod request;
mod sort;
mod value;

pub use error::{GENERIC_ERROR_MESSAGE, TavolaError};
pub use filter::{DateRange, FilterCondition, FilterValue, NumberRange, OperandType};
pub use page::{Page, PageEnvelope};
pub use request::ListRequest;
pub use sort::{SortDescriptor, SortDirection};
pub use value::CellValue;

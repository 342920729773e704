//! Search module.
//!
//! In-memory name search, filters and price sorting over a product list.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{SearchQuery, SortOption};

//! Product catalog module.
//!
//! Contains the product type, inferred categories, the seed data and the
//! in-memory catalog store.

mod category;
mod product;
mod seed;
mod store;

pub use category::Category;
pub use product::Product;
pub use seed::{seed_products, seed_promotions};
pub use store::{CatalogStore, ProductList};

//! Shopping cart module.
//!
//! Contains the cart engine, variant configuration and checkout selection.

#[allow(clippy::module_inception)]
mod cart;
mod selection;
mod variant;

pub use cart::{AddOutcome, BatchOutcome, Cart, LineItem, LineKey, RejectedLine};
pub use selection::Selection;
pub use variant::VariantSelection;

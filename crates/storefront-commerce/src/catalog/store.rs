//! In-memory catalog of regular and promotional products.

use crate::catalog::{seed, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which list a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductList {
    Products,
    Promotions,
}

/// The product catalog.
///
/// Holds the regular product list and the separate "Shop Now" promotions.
/// Ids are unique within each list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogStore {
    products: Vec<Product>,
    promotions: Vec<Product>,
}

impl CatalogStore {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the shop's seed products and promotions.
    pub fn seeded(currency: Currency) -> Self {
        Self {
            products: seed::seed_products(currency),
            promotions: seed::seed_promotions(currency),
        }
    }

    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    pub fn list_promotions(&self) -> &[Product] {
        &self.promotions
    }

    pub fn list(&self, kind: ProductList) -> &[Product] {
        match kind {
            ProductList::Products => &self.products,
            ProductList::Promotions => &self.promotions,
        }
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn promotion(&self, id: &ProductId) -> Option<&Product> {
        self.promotions.iter().find(|p| &p.id == id)
    }

    /// Look a product up in either list, regular products first.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.product(id).or_else(|| self.promotion(id))
    }

    pub fn add_product(&mut self, product: Product) -> Result<(), CommerceError> {
        Self::insert(&mut self.products, product, ProductList::Products)
    }

    pub fn add_promotion(&mut self, product: Product) -> Result<(), CommerceError> {
        Self::insert(&mut self.promotions, product, ProductList::Promotions)
    }

    /// Remove a product by id. Returns the removed product, if any.
    pub fn remove_product(&mut self, id: &ProductId) -> Option<Product> {
        Self::take(&mut self.products, id)
    }

    /// Remove a promotion by id. Returns the removed product, if any.
    pub fn remove_promotion(&mut self, id: &ProductId) -> Option<Product> {
        Self::take(&mut self.promotions, id)
    }

    fn insert(
        list: &mut Vec<Product>,
        product: Product,
        kind: ProductList,
    ) -> Result<(), CommerceError> {
        product.validate()?;
        if list.iter().any(|p| p.id == product.id) {
            return Err(CommerceError::DuplicateProduct(product.id.into_inner()));
        }
        debug!(product_id = %product.id, list = ?kind, "product added");
        list.push(product);
        Ok(())
    }

    fn take(list: &mut Vec<Product>, id: &ProductId) -> Option<Product> {
        let index = list.iter().position(|p| &p.id == id)?;
        Some(list.remove(index))
    }
}

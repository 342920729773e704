//! Product configuration before adding to cart.

use crate::cart::LineItem;
use crate::catalog::Product;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// The shopper's in-progress choice of size, color and quantity for one
/// product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSelection {
    product: Product,
    size: Option<String>,
    color: Option<String>,
    image: String,
    quantity: i64,
}

impl VariantSelection {
    /// Open a product with its first size and color chosen and quantity one.
    pub fn open(product: &Product) -> Self {
        let color = product.default_color().map(str::to_string);
        let image = match &color {
            Some(c) => product.image_for(c).to_string(),
            None => product.thumbnail.clone(),
        };
        Self {
            product: product.clone(),
            size: product.default_size().map(str::to_string),
            color,
            image,
            quantity: 1,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Image currently shown.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn choose_size(&mut self, size: impl Into<String>) {
        self.size = Some(size.into());
    }

    /// Choose a color. The shown image changes only if the color has its own.
    pub fn choose_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        if let Some(image) = self.product.color_image(&color) {
            self.image = image.to_string();
        }
        self.color = Some(color);
    }

    pub fn clear_size(&mut self) {
        self.size = None;
    }

    pub fn clear_color(&mut self) {
        self.color = None;
    }

    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Turn the selection into a cart line.
    pub fn to_line_item(&self) -> Result<LineItem, CommerceError> {
        let (size, color) = match (&self.size, &self.color) {
            (Some(size), Some(color)) => (size, color),
            (None, None) => return Err(CommerceError::MissingVariant("size and color")),
            (None, Some(_)) => return Err(CommerceError::MissingVariant("size")),
            (Some(_), None) => return Err(CommerceError::MissingVariant("color")),
        };

        let unavailable = |option: &'static str, value: &str| CommerceError::VariantUnavailable {
            product: self.product.name.clone(),
            option,
            value: value.to_string(),
        };
        if !self.product.offers_size(size) {
            return Err(unavailable("size", size));
        }
        if !self.product.offers_color(color) {
            return Err(unavailable("color", color));
        }

        Ok(LineItem {
            product_id: self.product.id.clone(),
            name: self.product.name.clone(),
            unit_price: self.product.price,
            size: size.clone(),
            color: color.clone(),
            image: self.image.clone(),
            quantity: self.quantity,
        })
    }
}

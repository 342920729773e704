//! Product type.

use crate::catalog::Category;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A product in the catalog.
///
/// Products are immutable once listed; the catalog only adds and removes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Identifier, unique within its list.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Offered sizes; the first is the default.
    pub sizes: Vec<String>,
    /// Offered colors as hex codes; the first is the default.
    pub colors: Vec<String>,
    /// Per-color display images. Colors without an entry use the thumbnail.
    #[serde(default)]
    pub images_by_color: BTreeMap<String, String>,
    /// Listing image.
    pub thumbnail: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
}

impl Product {
    /// Create a product with no variants or images yet.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            sizes: Vec::new(),
            colors: Vec::new(),
            images_by_color: BTreeMap::new(),
            thumbnail: String::new(),
            description: None,
            rating: None,
        }
    }

    pub fn with_sizes<S: Into<String>>(mut self, sizes: impl IntoIterator<Item = S>) -> Self {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_colors<S: Into<String>>(mut self, colors: impl IntoIterator<Item = S>) -> Self {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = url.into();
        self
    }

    pub fn with_color_image(mut self, color: impl Into<String>, url: impl Into<String>) -> Self {
        self.images_by_color.insert(color.into(), url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Default size (first listed).
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    /// Default color (first listed).
    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }

    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Image for a color, if the product has one.
    pub fn color_image(&self, color: &str) -> Option<&str> {
        self.images_by_color.get(color).map(String::as_str)
    }

    /// Image to show for a color, falling back to the thumbnail.
    pub fn image_for(&self, color: &str) -> &str {
        self.color_image(color).unwrap_or(&self.thumbnail)
    }

    /// Category inferred from the name.
    pub fn category(&self) -> Category {
        Category::infer(&self.name)
    }

    /// Check the product can be listed.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let invalid = |reason: &str| CommerceError::InvalidProduct {
            id: self.id.to_string(),
            reason: reason.to_string(),
        };

        if self.id.as_str().trim().is_empty() {
            return Err(invalid("id is empty"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.price.is_negative() {
            return Err(invalid("price is negative"));
        }
        if self.sizes.is_empty() {
            return Err(invalid("no sizes offered"));
        }
        if self.colors.is_empty() {
            return Err(invalid("no colors offered"));
        }
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(invalid("rating must be between 0 and 5"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn dress() -> Product {
        Product::new("1", "Floral Maxi Dress", Money::new(450000, Currency::PKR))
            .with_sizes(["S", "M", "L"])
            .with_colors(["#FFC0CB", "#000000"])
            .with_thumbnail("thumb.jpg")
            .with_color_image("#FFC0CB", "pink.jpg")
    }

    #[test]
    fn test_defaults_are_first_entries() {
        let p = dress();
        assert_eq!(p.default_size(), Some("S"));
        assert_eq!(p.default_color(), Some("#FFC0CB"));
    }

    #[test]
    fn test_image_falls_back_to_thumbnail() {
        let p = dress();
        assert_eq!(p.image_for("#FFC0CB"), "pink.jpg");
        assert_eq!(p.image_for("#000000"), "thumb.jpg");
    }

    #[test]
    fn test_validate() {
        assert!(dress().validate().is_ok());

        let no_sizes = dress().with_sizes(Vec::<String>::new());
        assert!(matches!(
            no_sizes.validate(),
            Err(CommerceError::InvalidProduct { .. })
        ));

        let negative = Product {
            price: Money::new(-1, Currency::PKR),
            ..dress()
        };
        assert!(negative.validate().is_err());
    }
}

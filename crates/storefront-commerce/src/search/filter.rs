//! Search filter types.

use crate::catalog::{Category, Product};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A search filter, evaluated against one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Case-insensitive substring of the name.
    Text(String),
    /// Inferred category.
    Category(Category),
    /// Price range, both ends inclusive.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Minimum rating. Unrated products never match.
    Rating { min: f32 },
    /// Offered in this size.
    Size(String),
    /// Offered in this color.
    Color(String),
}

impl Filter {
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    pub fn category(category: Category) -> Self {
        Filter::Category(category)
    }

    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    pub fn min_rating(min: f32) -> Self {
        Filter::Rating { min }
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Text(query) => {
                let query = query.trim().to_lowercase();
                query.is_empty() || product.name.to_lowercase().contains(&query)
            }
            Filter::Category(category) => product.category() == *category,
            Filter::PriceRange { min, max } => {
                let price = product.price.amount_minor;
                min.map_or(true, |m| price >= m.amount_minor)
                    && max.map_or(true, |m| price <= m.amount_minor)
            }
            Filter::Rating { min } => product.rating.is_some_and(|r| r >= *min),
            Filter::Size(size) => product.offers_size(size),
            Filter::Color(color) => product.offers_color(color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_products;
    use crate::money::Currency;

    fn names(filter: &Filter) -> Vec<String> {
        seed_products(Currency::PKR)
            .into_iter()
            .filter(|p| filter.matches(p))
            .map(|p| p.name)
            .collect()
    }

    #[test]
    fn test_text_is_case_insensitive() {
        assert_eq!(names(&Filter::text("DRESS")), vec!["Floral Maxi Dress"]);
        assert_eq!(names(&Filter::text("")).len(), 8);
    }

    #[test]
    fn test_category() {
        assert_eq!(
            names(&Filter::category(Category::Dresses)),
            vec!["Floral Maxi Dress", "Chic Jumpsuit"]
        );
        assert_eq!(names(&Filter::category(Category::Uncategorized)), vec!["Leather Jacket"]);
    }

    #[test]
    fn test_price_and_rating() {
        let cheap = Filter::price_range(None, Some(Money::from_decimal(4900.99, Currency::PKR)));
        assert_eq!(
            names(&cheap),
            vec!["Floral Maxi Dress", "Denim Skirt", "Graphic Tee"]
        );
        assert_eq!(
            names(&Filter::min_rating(4.8)),
            vec!["Silk Blouse", "Leather Jacket"]
        );
    }
}

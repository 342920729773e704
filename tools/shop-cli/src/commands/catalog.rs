//! Catalog listing command.

use anyhow::{anyhow, Result};
use storefront_commerce::catalog::{Category, ProductList};
use storefront_commerce::search::{Filter, SearchQuery, SortOption};

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store();
    let kind = if args.promotions {
        ProductList::Promotions
    } else {
        ProductList::Products
    };

    let mut query = SearchQuery::new().with_sort(parse_sort(&args.sort)?);
    if let Some(name) = &args.category {
        let category = Category::parse(name).ok_or_else(|| {
            anyhow!(
                "Unknown category: {} (expected one of {})",
                name,
                Category::ALL.map(|c| c.as_str()).join(", ")
            )
        })?;
        query = query.with_filter(Filter::category(category));
    }

    let products = query.run(store.catalog().list(kind));

    ctx.output.header(match kind {
        ProductList::Products => "Products",
        ProductList::Promotions => "Shop Now",
    });
    ctx.output.debug(&format!("Sort: {}", query.sort.display_name()));
    ctx.output.products(&products);

    if products.is_empty() {
        ctx.output.info("No products match");
    }

    Ok(())
}

/// Parse a `--sort` value.
pub fn parse_sort(value: &str) -> Result<SortOption> {
    SortOption::parse(value)
        .ok_or_else(|| anyhow!("Unknown sort: {} (expected default, price-asc or price-desc)", value))
}

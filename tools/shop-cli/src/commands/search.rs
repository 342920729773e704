//! Product search command.

use anyhow::{bail, Result};
use storefront_commerce::search::{Filter, SearchQuery};
use storefront_commerce::Money;

use super::catalog::parse_sort;
use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store();
    let currency = store.config().currency;

    let mut query = SearchQuery::new()
        .with_query(args.query.as_str())
        .with_sort(parse_sort(&args.sort)?);

    if args.min_price.is_some() || args.max_price.is_some() {
        if let (Some(min), Some(max)) = (args.min_price, args.max_price) {
            if min > max {
                bail!("--min-price {} is above --max-price {}", min, max);
            }
        }
        query = query.with_filter(Filter::price_range(
            args.min_price.map(|v| Money::from_decimal(v, currency)),
            args.max_price.map(|v| Money::from_decimal(v, currency)),
        ));
    }
    if let Some(rating) = args.min_rating {
        query = query.with_filter(Filter::min_rating(rating));
    }

    let results = store.search(&query);

    ctx.output.header(&format!("Results for \"{}\"", args.query));
    ctx.output.products(&results);
    ctx.output.info(&format!("{} product(s) found", results.len()));

    Ok(())
}

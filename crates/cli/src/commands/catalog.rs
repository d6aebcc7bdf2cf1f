//! Catalog inspection.
//!
//! Uses the same `CREDSHOP_CATALOG_*` variables as the storefront.

use std::io::Write;

use credshop_storefront::catalog::{Catalog, CatalogSource, HttpCatalogSource, Product};
use credshop_storefront::config::StorefrontConfig;
use credshop_storefront::filter::{CategoryFilter, ProductFilter};

use super::CliError;

/// Fetch the catalog and print the products matching `query` and `category`.
///
/// Unlike the storefront, a failed fetch is an error here.
pub async fn list(query: &str, category: &str) -> Result<(), CliError> {
    let config = StorefrontConfig::from_env()?;
    let source = HttpCatalogSource::new(&config.catalog)?;

    tracing::info!(url = %source.endpoint(), "Fetching catalog...");
    let catalog = Catalog::from_products(source.fetch_products().await?);

    let filter = ProductFilter::new(query, CategoryFilter::from_param(category));
    write_listing(&mut std::io::stdout().lock(), &catalog, &filter)?;
    Ok(())
}

fn write_listing(
    out: &mut impl Write,
    catalog: &Catalog,
    filter: &ProductFilter,
) -> std::io::Result<()> {
    let products = filter.apply(catalog.products());
    for product in &products {
        write_product(out, product)?;
    }
    writeln!(
        out,
        "{} of {} products ({} categories: {})",
        products.len(),
        catalog.products().len(),
        catalog.categories().len(),
        catalog.categories().join(", ")
    )
}

fn write_product(out: &mut impl Write, product: &Product) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>4}  {:<10}  {}  [{}]",
        product.id,
        product.price.display_inr(),
        product.title,
        product.category
    )
}

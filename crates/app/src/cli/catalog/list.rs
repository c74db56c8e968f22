use std::sync::Arc;

use clap::Args;
use shopease_app::{
    database,
    documents::PgDocumentStore,
    domain::catalog::{CatalogService, DocumentCatalogService},
};

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListProductsArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let catalog = DocumentCatalogService::new(Arc::new(PgDocumentStore::new(pool)));

    let products = catalog
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    if products.is_empty() {
        println!("no products");
        return Ok(());
    }

    for product in products {
        let discount = product
            .discount
            .map_or_else(|| "-".to_string(), |discount| format!("{discount}%"));
        let stock = if product.in_stock { "in stock" } else { "out of stock" };

        println!(
            "{}\t{}\t{}\t{discount}\t{stock}",
            product.id, product.name, product.price
        );
    }

    Ok(())
}

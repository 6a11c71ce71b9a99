//! Terminal entry point: fetch the catalog once and print the listing.

use std::io::Write;

use anyhow::Context;
use clap::Parser;

use storefront_client::{ClientConfig, HttpCatalogSource, ProductListView, TextRenderer};

/// Browse the product catalog from the terminal.
///
/// Selections take the same values as the listing's controls; anything
/// unrecognized leaves that selection unset.
#[derive(Debug, Parser)]
#[command(name = "storefront", version)]
struct Args {
    /// Price ceiling, e.g. `50` or `19.99`.
    #[arg(long)]
    max_price: Option<String>,

    /// Category, e.g. `electronics` or `"men's clothing"`; `all` for any.
    #[arg(long)]
    category: Option<String>,

    /// Rating bucket, e.g. `3-3.9`; `all` for any.
    #[arg(long)]
    min_rating: Option<String>,

    /// Sort key: title_asc, title_desc, price_asc, price_desc, rating_asc, rating_desc.
    #[arg(long)]
    sort: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let args = Args::parse();
    let config = ClientConfig::from_env();
    tracing::info!(url = %config.catalog_url, timeout = ?config.fetch_timeout, "starting storefront");

    let source = HttpCatalogSource::new(&config).context("failed to build HTTP client")?;
    let mut listing = ProductListView::new(source);
    let updates = listing.controller().subscribe();
    listing.initialize().await;

    let controller = listing.controller_mut();
    if let Some(raw) = &args.max_price {
        controller.price_input(raw);
    }
    if let Some(raw) = &args.category {
        controller.category_input(raw);
    }
    if let Some(raw) = &args.min_rating {
        controller.rating_input(raw);
    }
    if let Some(raw) = &args.sort {
        controller.sort_input(raw);
    }

    let view = updates.latest().unwrap_or_else(|| listing.view());
    let text = TextRenderer::default().render(&view);
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .context("failed to write listing to stdout")?;
    stdout.flush().context("failed to flush stdout")?;

    Ok(())
}

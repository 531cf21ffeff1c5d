//! Smoke Screen Unit tests for cart store components
//!
//! Happy-path checks that span the public surface: opening a session from a
//! config, the tracing sink, and the cart summaries the UI reads.

use cart_store::{
    CartConfig, CartService, InMemoryCatalog, NotificationSink, Product, ProductId, TracingSink,
    UpdateProductAmount,
};
use std::sync::Arc;
use tempfile::tempdir;

fn catalog() -> Arc<InMemoryCatalog> {
    Arc::new(
        InMemoryCatalog::new()
            .with_product(Product::new(1, "Tênis de Caminhada Leve Confortável", 17990, "img1"), 3)
            .with_product(Product::new(2, "Tênis VR Caminhada Confortável", 13990, "img2"), 5),
    )
}

/// Opening by config creates the database and reloads it on the next open
#[tokio::test]
async fn open_from_config_and_reopen() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let config = CartConfig::new(temp_dir.path().join("open.db"));

    {
        let service = CartService::open(&config, catalog(), TracingSink)?;
        assert!(service.cart().is_empty());

        service.add_product(ProductId(2)).await;
        service.add_product(ProductId(1)).await;
    }

    let service = CartService::open(&config, catalog(), TracingSink)?;
    let ids: Vec<ProductId> = service.cart().entries().iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec![ProductId(2), ProductId(1)]);
    Ok(())
}

/// Summaries follow the committed lines
#[tokio::test]
async fn summaries_track_mutations() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let db = Arc::new(sled::open(temp_dir.path().join("summary.db"))?);
    let service = CartService::new(db, catalog(), TracingSink)?;

    service.add_product(ProductId(1)).await;
    service.add_product(ProductId(2)).await;
    service
        .update_product_amount(UpdateProductAmount::new(ProductId(2), 2))
        .await;

    let cart = service.cart();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.subtotal(), 17990 + 3 * 13990);
    assert_eq!(cart.find(ProductId(2)).map(|e| e.line_total()), Some(3 * 13990));
    Ok(())
}

/// The tracing sink accepts messages without a subscriber installed
#[test]
fn tracing_sink_is_silent_without_subscriber() {
    TracingSink.notify("Requested quantity is out of stock");
}

use cart_store::{
    CartConfig, CartService, InMemoryCatalog, Product, ProductId, TracingSink,
    UpdateProductAmount,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn catalog() -> Arc<InMemoryCatalog> {
    Arc::new(
        InMemoryCatalog::new()
            .with_product(
                Product::new(1, "Tênis de Caminhada Leve Confortável", 17990, "https://cdn/1.jpg"),
                3,
            )
            .with_product(
                Product::new(2, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 13990, "https://cdn/2.jpg"),
                5,
            )
            .with_product(Product::new(3, "Tênis Adidas Duramo Lite 2.0", 21990, "https://cdn/3.jpg"), 0),
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = CartConfig::from_env()?;

    {
        let service = CartService::open(&config, catalog(), TracingSink)?;
        service.add_product(ProductId(1)).await;
        service.add_product(ProductId(2)).await;
        service.add_product(ProductId(3)).await; // out of stock, notified
        service
            .update_product_amount(UpdateProductAmount::new(ProductId(2), 2))
            .await;
    }

    // a new session over the same database picks the cart back up
    let service = CartService::open(&config, catalog(), TracingSink)?;
    let cart = service.cart();
    for entry in cart.entries() {
        println!(
            "{:>3} x {:<60} {:>10}",
            entry.amount,
            entry.product.title,
            entry.line_total()
        );
    }
    println!("items: {}  subtotal: {}", cart.item_count(), cart.subtotal());

    Ok(())
}

//! Product and stock lookup collaborator
use super::product::{Product, ProductId, StockLevel};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Remote catalog queried by product id. Failures are opaque to the cart.
#[async_trait]
pub trait StockOracle: Send + Sync {
    async fn product(&self, product_id: ProductId) -> anyhow::Result<Product>;
    async fn stock(&self, product_id: ProductId) -> anyhow::Result<StockLevel>;
}

#[async_trait]
impl<T: StockOracle + ?Sized> StockOracle for Arc<T> {
    async fn product(&self, product_id: ProductId) -> anyhow::Result<Product> {
        (**self).product(product_id).await
    }
    async fn stock(&self, product_id: ProductId) -> anyhow::Result<StockLevel> {
        (**self).stock(product_id).await
    }
}

/// Map backed catalog for tests and local runs.
///
/// Stock levels can be changed between calls and ids can be marked as
/// unreachable to simulate a failing lookup service.
#[derive(Default)]
pub struct InMemoryCatalog {
    inner: Mutex<CatalogState>,
}

#[derive(Default)]
struct CatalogState {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, u32>,
    unreachable: HashSet<ProductId>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_product(self, product: Product, stock: u32) -> Self {
        self.insert(product, stock);
        self
    }
    pub fn insert(&self, product: Product, stock: u32) {
        let mut state = self.lock();
        state.stock.insert(product.id, stock);
        state.products.insert(product.id, product);
    }
    pub fn set_stock(&self, product_id: ProductId, amount: u32) {
        self.lock().stock.insert(product_id, amount);
    }
    pub fn set_unreachable(&self, product_id: ProductId, unreachable: bool) {
        let mut state = self.lock();
        if unreachable {
            state.unreachable.insert(product_id);
        } else {
            state.unreachable.remove(&product_id);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CatalogState> {
        // a poisoned map is still a usable map
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
    fn check_reachable(state: &CatalogState, product_id: ProductId) -> anyhow::Result<()> {
        if state.unreachable.contains(&product_id) {
            return Err(anyhow::anyhow!("catalog unreachable for product {product_id}"));
        }
        Ok(())
    }
}

#[async_trait]
impl StockOracle for InMemoryCatalog {
    async fn product(&self, product_id: ProductId) -> anyhow::Result<Product> {
        let state = self.lock();
        Self::check_reachable(&state, product_id)?;

        state
            .products
            .get(&product_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("product {product_id} not found"))
    }

    async fn stock(&self, product_id: ProductId) -> anyhow::Result<StockLevel> {
        let state = self.lock();
        Self::check_reachable(&state, product_id)?;

        state
            .stock
            .get(&product_id)
            .map(|amount| StockLevel::new(product_id, *amount))
            .ok_or_else(|| anyhow::anyhow!("no stock record for product {product_id}"))
    }
}

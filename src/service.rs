//! Service layer API for cart mutations
use super::cart::Cart;
use super::config::{CartConfig, Messages};
use super::error::CartError;
use super::notify::NotificationSink;
use super::oracle::StockOracle;
use super::product::{ProductId, UpdateProductAmount};
use super::storage::{CartStorage, DurableStore};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// Owns the cart for one session.
///
/// Every mutation validates against the stock oracle, writes the new cart
/// through to the durable store and only then publishes it. Failures never
/// reach the caller: they go to the notification sink and the published
/// snapshot stays the same `Arc` it was before the call.
pub struct CartService<O, N, S = CartStorage> {
    storage: S,
    oracle: O,
    sink: N,
    messages: Messages,
    // held for the whole validate -> commit sequence of a mutation
    current: Mutex<Arc<Cart>>,
    published: watch::Sender<Arc<Cart>>,
}

impl<O: StockOracle, N: NotificationSink> CartService<O, N> {
    /// Open a service over an existing database using the default key and messages
    pub fn new(instance: Arc<sled::Db>, oracle: O, sink: N) -> Result<Self, CartError> {
        Self::with_config(instance, &CartConfig::default(), oracle, sink)
    }

    /// Open the database at `config.db_path` and load the session's cart from it
    pub fn open(config: &CartConfig, oracle: O, sink: N) -> Result<Self, CartError> {
        let instance = Arc::new(sled::open(&config.db_path)?);
        Self::with_config(instance, config, oracle, sink)
    }

    pub fn with_config(
        instance: Arc<sled::Db>,
        config: &CartConfig,
        oracle: O,
        sink: N,
    ) -> Result<Self, CartError> {
        let storage = CartStorage::new(instance, &config.storage_key);
        tracing::debug!(key = storage.key(), "opening cart storage");
        CartService::with_storage(storage, config.messages.clone(), oracle, sink)
    }
}

impl<O: StockOracle, N: NotificationSink, S: DurableStore> CartService<O, N, S> {
    /// Load the session's cart from any durable store
    pub fn with_storage(
        storage: S,
        messages: Messages,
        oracle: O,
        sink: N,
    ) -> Result<Self, CartError> {
        let cart = Arc::new(storage.load()?);
        tracing::info!(lines = cart.len(), "cart session opened");

        let (published, _) = watch::channel(cart.clone());

        Ok(Self {
            storage,
            oracle,
            sink,
            messages,
            current: Mutex::new(cart),
            published,
        })
    }

    /// Current snapshot of the cart
    pub fn cart(&self) -> Arc<Cart> {
        self.published.borrow().clone()
    }

    /// Receiver that sees every snapshot published after a committed mutation
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.published.subscribe()
    }

    /// Add one unit of `product_id`, appending a new line when it isn't in the cart yet
    #[tracing::instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) {
        let mut current = self.current.lock().await;

        if let Err(err) = self.try_add_product(&mut current, product_id).await {
            self.reject(err, &self.messages.add_failed);
        }
    }

    /// Drop the line for `product_id`. Absent ids leave the lines as they are.
    #[tracing::instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) {
        let mut current = self.current.lock().await;

        let next = current.without(product_id);
        if let Err(err) = self.commit(&mut current, next) {
            self.reject(err, &self.messages.remove_failed);
        }
    }

    /// Add `amount` units to an existing line once the stock covers `amount`
    #[tracing::instrument(skip_all, fields(product_id = %request.product_id, amount = request.amount))]
    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        let mut current = self.current.lock().await;

        if let Err(err) = self.try_update_product_amount(&mut current, request).await {
            self.reject(err, &self.messages.update_failed);
        }
    }

    async fn try_add_product(
        &self,
        current: &mut Arc<Cart>,
        product_id: ProductId,
    ) -> Result<(), CartError> {
        let product = self
            .oracle
            .product(product_id)
            .await
            .map_err(|source| CartError::LookupFailure { product_id, source })?;
        let stock = self
            .oracle
            .stock(product_id)
            .await
            .map_err(|source| CartError::LookupFailure { product_id, source })?;
        tracing::debug!(available = stock.amount, "stock fetched");

        // Only checks that a unit exists at all, an existing line is not
        // compared against the stock after its increment.
        if !stock.covers(1) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: 1,
                available: stock.amount,
            });
        }

        let next = current.with_unit_added(product);
        self.commit(current, next)
    }

    async fn try_update_product_amount(
        &self,
        current: &mut Arc<Cart>,
        request: UpdateProductAmount,
    ) -> Result<(), CartError> {
        let UpdateProductAmount { product_id, amount } = request;

        let Some(held) = current.held_amount(product_id) else {
            tracing::debug!("no line held for product, ignoring update");
            return Ok(());
        };

        let stock = self
            .oracle
            .stock(product_id)
            .await
            .map_err(|source| CartError::LookupFailure { product_id, source })?;
        tracing::debug!(held, available = stock.amount, "stock fetched");

        // The requested amount is checked on its own, not the total after merging.
        if !stock.covers(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let next = current.with_amount_added(product_id, amount);
        self.commit(current, next)
    }

    // write-through first, the in-memory cart only moves once the store accepted it
    fn commit(&self, current: &mut Arc<Cart>, next: Cart) -> Result<(), CartError> {
        self.storage.save(&next)?;

        *current = Arc::new(next);
        self.published.send_replace(current.clone());
        tracing::info!(
            lines = current.len(),
            items = current.item_count(),
            "cart committed"
        );
        Ok(())
    }

    fn reject(&self, err: CartError, fallback: &str) {
        tracing::warn!(error = %err, "cart mutation rejected");

        let message: &str = match err {
            CartError::OutOfStock { .. } => &self.messages.out_of_stock,
            _ => fallback,
        };
        self.sink.notify(message);
    }
}

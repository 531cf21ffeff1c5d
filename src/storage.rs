//! Durable store for the serialized cart
use super::cart::Cart;
use super::error::CartError;
use super::product::CartEntry;
use std::sync::Arc;

/// Where a session's cart is read from at open and written through to on commit
pub trait DurableStore: Send + Sync {
    fn load(&self) -> Result<Cart, CartError>;
    fn save(&self, cart: &Cart) -> Result<(), CartError>;
}

/// The whole cart lives under a single key, encoded as a CBOR array of entries.
/// It is read once when a session opens and overwritten wholesale on every
/// accepted mutation.
#[derive(Debug, Clone)]
pub struct CartStorage {
    instance: Arc<sled::Db>,
    key: String,
}

impl CartStorage {
    pub fn new(instance: Arc<sled::Db>, key: &str) -> Self {
        Self {
            instance,
            key: key.to_string(),
        }
    }
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl DurableStore for CartStorage {
    /// Load the persisted cart, or an empty one when nothing was stored yet
    fn load(&self) -> Result<Cart, CartError> {
        match self.instance.get(self.key.as_bytes())? {
            Some(bytes) => {
                let entries: Vec<CartEntry> = minicbor::decode(bytes.as_ref())?;
                tracing::debug!(key = %self.key, lines = entries.len(), "loaded persisted cart");
                Ok(Cart::from(entries))
            }
            None => {
                tracing::debug!(key = %self.key, "no persisted cart, starting empty");
                Ok(Cart::new())
            }
        }
    }

    /// Overwrite the stored cart and flush before returning
    fn save(&self, cart: &Cart) -> Result<(), CartError> {
        let cbor = minicbor::to_vec(cart.entries())?;
        self.instance.insert(self.key.as_bytes(), cbor)?;
        self.instance.flush()?;
        Ok(())
    }
}

use crate::product::ProductId;

#[derive(thiserror::Error, Debug)]
pub enum CartError {
    #[error("Product {product_id} is out of stock: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },
    #[error("Lookup for product {product_id} failed: {source}")]
    LookupFailure {
        product_id: ProductId,
        #[source]
        source: anyhow::Error,
    },
    #[error("Durable store failed: {0}")]
    Storage(#[from] sled::Error),
    #[error("Failed to encode cart: {0}")]
    Encode(#[from] minicbor::encode::Error<std::convert::Infallible>),
    #[error("Failed to decode persisted cart: {0}")]
    Decode(#[from] minicbor::decode::Error),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

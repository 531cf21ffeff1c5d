pub mod cart;
pub mod config;
pub mod error;
pub mod notify;
pub mod oracle;
pub mod product;
pub mod service;
pub mod storage;

pub use cart::Cart;
pub use config::{CartConfig, Messages};
pub use error::{CartError, ConfigError};
pub use notify::{NotificationSink, RecordingSink, TracingSink};
pub use oracle::{InMemoryCatalog, StockOracle};
pub use product::{CartEntry, Product, ProductId, StockLevel, UpdateProductAmount};
pub use service::CartService;
pub use storage::{CartStorage, DurableStore};

//! Product, stock and cart entry types
use std::fmt;

/// Catalog id of a product, kept apart from plain amounts
#[derive(
    minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[cbor(array)]
pub struct ProductId(#[n(0)] pub u64);

/// Product record as returned by the catalog lookup
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq, Eq)]
pub struct Product {
    #[n(0)]
    pub id: ProductId,
    #[n(1)]
    pub title: String,
    #[n(2)]
    pub price: u64, // minor currency units, integers only
    #[n(3)]
    pub image: String, // url
}

// Transient, fetched on every validation and never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub id: ProductId,
    pub amount: u32,
}

/// One product line in the cart with the quantity currently held
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    #[n(0)]
    pub product: Product,
    #[n(1)]
    pub amount: u32, // always >= 1 while in a cart
}

/// Request for [`crate::service::CartService::update_product_amount`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: u32,
}

impl ProductId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Product {
    pub fn new(id: u64, title: &str, price: u64, image: &str) -> Self {
        Self {
            id: ProductId::new(id),
            title: title.to_string(),
            price,
            image: image.to_string(),
        }
    }
}

impl StockLevel {
    pub fn new(id: ProductId, amount: u32) -> Self {
        Self { id, amount }
    }
    /// True when at least `requested` units can be handed out
    pub fn covers(&self, requested: u32) -> bool {
        self.amount >= requested
    }
}

impl CartEntry {
    /// A fresh line holding a single unit of `product`
    pub fn first_unit(product: Product) -> Self {
        Self { product, amount: 1 }
    }
    pub fn id(&self) -> ProductId {
        self.product.id
    }
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.amount))
    }
    /// Copy of this entry holding `extra` more units, product fields unchanged
    pub fn with_extra(&self, extra: u32) -> Self {
        Self {
            product: self.product.clone(),
            amount: self.amount.saturating_add(extra),
        }
    }
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: u32) -> Self {
        Self { product_id, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_entry_encoding() {
        let original = CartEntry {
            product: Product::new(3, "Tênis Adidas Duramo Lite 2.0", 21990, "https://cdn/3.jpg"),
            amount: 4,
        };

        let encoding = minicbor::to_vec(&original).unwrap();
        let decode: CartEntry = minicbor::decode(&encoding).unwrap();

        assert_eq!(original, decode);
    }

    #[test]
    fn with_extra_keeps_product_fields() {
        let entry = CartEntry::first_unit(Product::new(1, "Tênis", 17990, "img"));
        let more = entry.with_extra(2);

        assert_eq!(more.amount, 3);
        assert_eq!(more.product, entry.product);
        assert_eq!(more.line_total(), 3 * 17990);
    }

    #[test]
    fn stock_covers_boundary() {
        let stock = StockLevel::new(ProductId::new(1), 3);
        assert!(stock.covers(3));
        assert!(!stock.covers(4));
        assert!(!StockLevel::new(ProductId(1), 0).covers(1));
    }
}

//! The ordered cart collection and its pure merge rules
use super::product::{CartEntry, Product, ProductId};

/// Ordered sequence of cart entries, one per product id, in insertion order.
///
/// Every mutation returns a new `Cart` and leaves `self` untouched, so a
/// rejected operation can simply drop the candidate.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }
    pub fn find(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.id() == product_id)
    }
    /// Amount held for `product_id`, only when the line exists and holds at least one unit
    pub fn held_amount(&self, product_id: ProductId) -> Option<u32> {
        self.find(product_id)
            .map(|entry| entry.amount)
            .filter(|amount| *amount > 0)
    }
    /// Number of distinct product lines
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Total units across every line
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.amount)).sum()
    }
    pub fn subtotal(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.line_total()))
    }

    /// Adds one unit of `product`. An existing line accumulates, otherwise a
    /// new line with a single unit goes to the end.
    pub fn with_unit_added(&self, product: Product) -> Self {
        if self.find(product.id).is_some() {
            return self.with_amount_added(product.id, 1);
        }

        let mut entries = self.entries.clone();
        entries.push(CartEntry::first_unit(product));
        Self { entries }
    }

    /// Adds `amount` to the line for `product_id`; every other line is copied as is
    pub fn with_amount_added(&self, product_id: ProductId, amount: u32) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|entry| {
                if entry.id() == product_id {
                    entry.with_extra(amount)
                } else {
                    entry.clone()
                }
            })
            .collect();

        Self { entries }
    }

    /// Drops the line for `product_id`, absent ids are ignored
    pub fn without(&self, product_id: ProductId) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|entry| entry.id() != product_id)
            .cloned()
            .collect();

        Self { entries }
    }
}

impl From<Vec<CartEntry>> for Cart {
    // later duplicates fold into the first occurrence so ids stay unique,
    // empty lines are dropped
    fn from(value: Vec<CartEntry>) -> Self {
        let mut entries: Vec<CartEntry> = Vec::with_capacity(value.len());
        for entry in value.into_iter().filter(|e| e.amount > 0) {
            match entries.iter_mut().find(|e| e.id() == entry.id()) {
                Some(existing) => *existing = existing.with_extra(entry.amount),
                None => entries.push(entry),
            }
        }
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64) -> Product {
        Product::new(id, &format!("Tênis {id}"), 100 * id, "img")
    }

    #[test]
    fn new_products_append_in_order() {
        let cart = Cart::new()
            .with_unit_added(product(2))
            .with_unit_added(product(1))
            .with_unit_added(product(3));

        let ids: Vec<u64> = cart.entries().iter().map(|e| e.id().0).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert!(cart.entries().iter().all(|e| e.amount == 1));
    }

    #[test]
    fn repeated_add_accumulates() {
        let cart = Cart::new()
            .with_unit_added(product(1))
            .with_unit_added(product(2))
            .with_unit_added(product(1));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.held_amount(ProductId(1)), Some(2));
        assert_eq!(cart.entries()[0].id(), ProductId(1));
    }

    #[test]
    fn amount_added_is_additive() {
        let cart = Cart::new().with_unit_added(product(1)).with_amount_added(ProductId(1), 3);
        assert_eq!(cart.held_amount(ProductId(1)), Some(4));
    }

    #[test]
    fn without_absent_id_is_identity() {
        let cart = Cart::new().with_unit_added(product(1));
        assert_eq!(cart.without(ProductId(9)), cart);
        assert!(cart.without(ProductId(1)).is_empty());
    }

    #[test]
    fn summaries() {
        let cart = Cart::new()
            .with_unit_added(product(1))
            .with_unit_added(product(1))
            .with_unit_added(product(2));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), 2 * 100 + 200);
    }

    #[test]
    fn from_vec_folds_duplicates() {
        let a = CartEntry::first_unit(product(1));
        let b = CartEntry::first_unit(product(2));
        let cart = Cart::from(vec![a.clone(), b, a]);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.held_amount(ProductId(1)), Some(2));
    }
}

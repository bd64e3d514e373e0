//! Custom actions for the Cart actor.

use crate::model::{Cart, ProductId};
use crate::pricing::CartTotals;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Adds `quantity` units, summing with any existing line for the product.
    AddItem { product_id: ProductId, quantity: u32 },
    RemoveItem(ProductId),
    /// Empties the cart. The cart itself stays.
    Clear,
    /// Takes the given quantities off their lines, dropping lines that reach zero.
    /// Units added after `lines` was read stay in the cart.
    RemoveLines(BTreeMap<ProductId, u32>),
    /// Prices every line at the current catalog price. Read-only.
    Totals,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    /// The cart after the change.
    Updated(Cart),
    Totals(CartTotals),
}

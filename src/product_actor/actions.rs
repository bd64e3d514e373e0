//! Custom actions for the Product actor.
//!
//! These are the stock ledger operations. They run inside the product actor, so a
//! reservation's check and decrement cannot interleave with another request on
//! the same product.

/// Custom actions for Product entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    /// Reads the current stock level. Read-only, so it never hits the store.
    CheckStock,
    /// Takes units out of stock.
    ///
    /// # Errors
    /// Fails with `InsufficientStock` if the amount exceeds available stock.
    Reserve(u32),
    /// Puts units back into stock. Never fails on the entity side.
    Release(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductActionResult {
    /// Current stock level.
    CheckStock(u32),
    /// Stock left after the reservation.
    Reserve(u32),
    /// Stock after the release.
    Release(u32),
}

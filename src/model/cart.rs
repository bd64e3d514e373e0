use crate::model::{ProductId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user's shopping cart. Keyed by its owner, so each user has at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: UserId,
    /// Product → quantity. Quantities are always at least one.
    pub lines: BTreeMap<ProductId, u32>,
}

impl Cart {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            lines: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.lines.get(&product_id).copied()
    }
}

/// Payload for creating a cart. Carts always start empty.
#[derive(Debug, Clone, Copy)]
pub struct CartCreate;

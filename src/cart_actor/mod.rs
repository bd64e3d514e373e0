//! # Cart Actor
//!
//! One cart per user, keyed by the owner's [`UserId`](crate::model::UserId) and
//! created lazily on first use. Adding an item checks the product's current stock
//! and the cart limits from [`CartLimits`]; stock is only taken at checkout.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::config::CartLimits;
use crate::model::Cart;
use actor_framework::{EntityStore, ResourceActor, ResourceClient};

/// Everything the cart actor needs at runtime.
#[derive(Clone)]
pub struct CartContext {
    pub products: ProductClient,
    pub limits: CartLimits,
}

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}

/// Creates a Cart actor backed by the given store.
pub fn with_store<S: EntityStore<Cart>>(
    buffer_size: usize,
    store: S,
) -> (ResourceActor<Cart, S>, ResourceClient<Cart>) {
    ResourceActor::with_store(buffer_size, store)
}

//! Error types for the Cart actor.

use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found: {0}")]
    NotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// More units requested than the product has in stock.
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    /// The line would hold more units than a cart line may.
    #[error("Quantity for {product} would be {requested}, the maximum is {max}")]
    QuantityExceeded {
        product: String,
        requested: u32,
        max: u32,
    },

    /// A new product would exceed the number of distinct lines a cart may hold.
    #[error("Cart is full: at most {max} different products")]
    CartFull { max: usize },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Product {0} is not in the cart")]
    ItemNotFound(String),

    #[error("Cart could not be saved: {0}")]
    PersistenceFailed(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<ProductError> for CartError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => CartError::ProductNotFound(id),
            ProductError::InsufficientStock {
                product,
                requested,
                available,
            } => CartError::InsufficientStock {
                product,
                requested,
                available,
            },
            ProductError::InvalidQuantity(q) => CartError::InvalidQuantity(q),
            ProductError::Persistence(msg) => CartError::PersistenceFailed(msg),
            ProductError::ActorCommunicationError(msg) => CartError::ActorCommunicationError(msg),
        }
    }
}

//! Error types for the Solicitud actor.

use crate::product_actor::ProductError;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur while creating, approving or deleting a solicitud.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SolicitudError {
    /// The requested solicitud was not found.
    #[error("Solicitud not found: {0}")]
    NotFound(String),

    /// The product the solicitud refers to does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The product has an availability window but no reservation time was given.
    #[error("A reservation date and time is required for {0}")]
    ReservationRequired(String),

    /// The reservation time falls outside the product's availability window.
    #[error("No availability for {product} at {at}")]
    ReservationOutOfRange { product: String, at: NaiveDateTime },

    /// The new solicitud could not be saved. Any stock it reserved was returned.
    #[error("Solicitud could not be saved: {0}")]
    PersistenceFailed(String),

    /// The approval could not be saved. The status is unchanged.
    #[error("Solicitud could not be updated: {0}")]
    UpdateFailed(String),

    /// The solicitud could not be removed. Both it and the product's stock are unchanged.
    #[error("Solicitud could not be deleted: {0}")]
    DeleteFailed(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<ProductError> for SolicitudError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => SolicitudError::ProductNotFound(id),
            ProductError::InsufficientStock {
                product,
                requested,
                available,
            } => SolicitudError::InsufficientStock {
                product,
                requested,
                available,
            },
            ProductError::InvalidQuantity(q) => SolicitudError::InvalidQuantity(q),
            ProductError::Persistence(msg) => SolicitudError::PersistenceFailed(msg),
            ProductError::ActorCommunicationError(msg) => {
                SolicitudError::ActorCommunicationError(msg)
            }
        }
    }
}

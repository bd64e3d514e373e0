//! # Checkout
//!
//! Turns a cart into one pending solicitud per line, all or nothing. Stock is
//! checked for every line before anything is written. If a create still fails
//! (stock raced away, a reservation is missing, a write was rejected) every
//! solicitud created so far is deleted again, which returns its stock. The checked
//! out lines are taken off the cart last, so anything added meanwhile stays; if
//! that fails the solicitudes are rolled back too.

use crate::cart_actor::CartError;
use crate::clients::{CartClient, ProductClient, SolicitudClient};
use crate::model::{Cart, ProductId, Solicitud, SolicitudCreate, SolicitudId, User};
use crate::product_actor::ProductError;
use crate::solicitud_actor::SolicitudError;
use actor_framework::ActorClient;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("The cart is empty")]
    EmptyCart,

    #[error("Checkout requires a signed-in user")]
    NotAuthenticated,

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientProductStock {
        product: String,
        requested: u32,
        available: u32,
    },

    /// Creating the solicitud for one line failed; nothing was kept.
    #[error("Could not create solicitud for {product}: {source}")]
    Solicitud {
        product: String,
        #[source]
        source: SolicitudError,
    },

    #[error("Catalog error: {0}")]
    Product(ProductError),

    #[error(transparent)]
    Cart(#[from] CartError),
}

impl From<ProductError> for CheckoutError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => CheckoutError::ProductNotFound(id),
            other => CheckoutError::Product(other),
        }
    }
}

/// Runs checkouts against the three actors.
#[derive(Clone)]
pub struct CheckoutOrchestrator {
    products: ProductClient,
    solicitudes: SolicitudClient,
    carts: CartClient,
}

impl CheckoutOrchestrator {
    pub fn new(products: ProductClient, solicitudes: SolicitudClient, carts: CartClient) -> Self {
        Self {
            products,
            solicitudes,
            carts,
        }
    }

    /// Checks out `cart` for `user`.
    ///
    /// `reservations` carries the requested date and time for lines whose product
    /// has an availability window; other lines ignore it unless an entry is present,
    /// in which case it becomes a free-form reservation.
    #[instrument(skip(self, cart, user, reservations), fields(user_id = %cart.user_id, lines = cart.len()))]
    pub async fn checkout(
        &self,
        cart: &Cart,
        user: Option<&User>,
        reservations: &HashMap<ProductId, NaiveDateTime>,
    ) -> Result<Vec<Solicitud>, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let Some(user) = user else {
            return Err(CheckoutError::NotAuthenticated);
        };

        let mut names = HashMap::with_capacity(cart.len());
        for (&product_id, &quantity) in &cart.lines {
            let product = self.products.product(product_id).await?;
            if quantity > product.stock {
                warn!(%product_id, quantity, stock = product.stock, "Checkout rejected");
                return Err(CheckoutError::InsufficientProductStock {
                    product: product.name,
                    requested: quantity,
                    available: product.stock,
                });
            }
            names.insert(product_id, product.name);
        }

        let mut created: Vec<SolicitudId> = Vec::with_capacity(cart.len());
        for (&product_id, &quantity) in &cart.lines {
            let params = SolicitudCreate {
                product_id,
                user_id: user.id,
                quantity,
                reservation: reservations.get(&product_id).copied(),
            };
            match self.solicitudes.create_solicitud(params).await {
                Ok(id) => created.push(id),
                Err(source) => {
                    self.rollback(&created).await;
                    return Err(CheckoutError::Solicitud {
                        product: names.remove(&product_id).unwrap_or_else(|| product_id.to_string()),
                        source,
                    });
                }
            }
        }

        if let Err(e) = self
            .carts
            .remove_lines(cart.user_id, cart.lines.clone())
            .await
        {
            self.rollback(&created).await;
            return Err(e.into());
        }

        let mut solicitudes = Vec::with_capacity(created.len());
        for id in &created {
            match self.solicitudes.get(*id).await {
                Ok(Some(solicitud)) => solicitudes.push(solicitud),
                Ok(None) => warn!(%id, "Solicitud vanished right after checkout"),
                Err(e) => warn!(%id, error = %e, "Could not read back solicitud"),
            }
        }

        info!(count = solicitudes.len(), "Checkout complete");
        Ok(solicitudes)
    }

    async fn rollback(&self, created: &[SolicitudId]) {
        for id in created.iter().rev() {
            if let Err(e) = self.solicitudes.delete_solicitud(*id).await {
                error!(%id, error = %e, "Rollback failed, solicitud and its stock are still held");
            }
        }
        if !created.is_empty() {
            warn!(count = created.len(), "Checkout rolled back");
        }
    }
}

//! [`ActorEntity`] implementation for [`Solicitud`].
//!
//! The stock side of a solicitud lives in its hooks:
//!
//! - `on_create` validates the reservation and reserves stock on the product actor.
//! - `on_discard` gives the stock back when the new solicitud cannot be saved.
//! - `on_delete` gives the stock back after the solicitud has been removed. If the
//!   product actor refuses, the framework restores the solicitud.

use super::actions::SolicitudAction;
use super::error::SolicitudError;
use crate::availability::reservation_info;
use crate::clients::ProductClient;
use crate::model::{Solicitud, SolicitudCreate, SolicitudId, SolicitudStatus};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
impl ActorEntity for Solicitud {
    type Id = SolicitudId;
    type Create = SolicitudCreate;
    type Update = ();
    type Action = SolicitudAction;
    type ActionResult = Solicitud;
    type Context = ProductClient;
    type Error = SolicitudError;

    fn from_create_params(id: SolicitudId, params: SolicitudCreate) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(SolicitudError::InvalidQuantity(0));
        }
        Ok(Self::new(id, params))
    }

    fn is_read_only(&self, action: &SolicitudAction) -> bool {
        match action {
            SolicitudAction::Approve => self.status == SolicitudStatus::Approved,
        }
    }

    async fn on_create(&mut self, products: &ProductClient) -> Result<(), Self::Error> {
        let product = products.product(self.product_id).await?;

        if self.quantity > product.stock {
            return Err(SolicitudError::InsufficientStock {
                product: product.name,
                requested: self.quantity,
                available: product.stock,
            });
        }

        match (product.availability, self.reservation_datetime) {
            (Some(_), None) => return Err(SolicitudError::ReservationRequired(product.name)),
            (Some(window), Some(at)) if !window.contains(at) => {
                return Err(SolicitudError::ReservationOutOfRange {
                    product: product.name,
                    at,
                });
            }
            (_, Some(at)) => self.reservation_info = Some(reservation_info(at)),
            (None, None) => {}
        }

        let left = products.reserve_stock(self.product_id, self.quantity).await?;
        debug!(product_id = %self.product_id, reserved = self.quantity, left, "Stock reserved");
        Ok(())
    }

    async fn on_discard(&self, products: &ProductClient) -> Result<(), Self::Error> {
        warn!(product_id = %self.product_id, quantity = self.quantity, "Returning stock of unsaved solicitud");
        products
            .release_stock(self.product_id, self.quantity)
            .await?;
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &ProductClient) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_delete(&self, products: &ProductClient) -> Result<(), Self::Error> {
        products
            .release_stock(self.product_id, self.quantity)
            .await
            .map_err(|e| SolicitudError::DeleteFailed(e.to_string()))?;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: SolicitudAction,
        _ctx: &ProductClient,
    ) -> Result<Solicitud, Self::Error> {
        match action {
            SolicitudAction::Approve => {
                self.status = SolicitudStatus::Approved;
                Ok(self.clone())
            }
        }
    }
}

//! # Outcomes
//!
//! What the facade hands back to the presentation layer. A successful call yields
//! an [`Outcome`] carrying the value and, for mutations, a [`Notice`]. A failed
//! call yields a [`TiendaError`], which knows its [`MessageCategory`] and the
//! Spanish text shown to the user.

use crate::cart_actor::CartError;
use crate::checkout::CheckoutError;
use crate::product_actor::ProductError;
use crate::solicitud_actor::SolicitudError;
use std::fmt::Display;
use thiserror::Error;

/// How the presentation layer should style a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Success,
    ValidationError,
    AuthorizationError,
}

/// Success messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SolicitudCreated,
    SolicitudDeleted,
    SolicitudApproved,
    CartItemAdded,
    CartItemRemoved,
    CartCleared,
    CheckoutCompleted,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::SolicitudCreated => "Solicitud de compra creada correctamente!",
            Notice::SolicitudDeleted => "Solicitud eliminada correctamente!",
            Notice::SolicitudApproved => "Solicitud aprobada correctamente!",
            Notice::CartItemAdded => "Producto agregado al carro de compras",
            Notice::CartItemRemoved => "Producto eliminado del carro de compras",
            Notice::CartCleared => "Carro de compras vaciado",
            Notice::CheckoutCompleted => "Solicitudes de compra creadas correctamente!",
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// A successful facade call.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub notice: Option<Notice>,
}

impl<T> Outcome<T> {
    /// A read with nothing to announce.
    pub fn quiet(value: T) -> Self {
        Self {
            value,
            notice: None,
        }
    }

    pub fn with_notice(value: T, notice: Notice) -> Self {
        Self {
            value,
            notice: Some(notice),
        }
    }

    pub fn category(&self) -> MessageCategory {
        MessageCategory::Success
    }
}

/// Every way a facade call can fail.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TiendaError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Not authorized")]
    NotAuthorized,

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Solicitud(#[from] SolicitudError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

impl TiendaError {
    pub fn category(&self) -> MessageCategory {
        match self {
            TiendaError::NotAuthenticated
            | TiendaError::NotAuthorized
            | TiendaError::Checkout(CheckoutError::NotAuthenticated) => {
                MessageCategory::AuthorizationError
            }
            _ => MessageCategory::ValidationError,
        }
    }

    /// The text shown to the user.
    pub fn message(&self) -> String {
        match self {
            TiendaError::NotAuthenticated => "Debes iniciar sesión para continuar.".into(),
            TiendaError::NotAuthorized => "No tienes permiso para realizar esta acción.".into(),
            TiendaError::Product(e) => product_message(e),
            TiendaError::Solicitud(e) => solicitud_message(e),
            TiendaError::Cart(e) => cart_message(e),
            TiendaError::Checkout(e) => checkout_message(e),
        }
    }
}

fn product_message(e: &ProductError) -> String {
    match e {
        ProductError::NotFound(_) => "El producto no existe.".into(),
        ProductError::InsufficientStock { product, .. } => {
            format!("No hay suficiente stock de {product}.")
        }
        ProductError::InvalidQuantity(_) => "La cantidad debe ser mayor a cero.".into(),
        ProductError::Persistence(_) | ProductError::ActorCommunicationError(_) => {
            "Hubo un error al actualizar el producto.".into()
        }
    }
}

fn solicitud_message(e: &SolicitudError) -> String {
    match e {
        SolicitudError::NotFound(_) => "La solicitud no existe.".into(),
        SolicitudError::ProductNotFound(_) => "El producto no existe.".into(),
        SolicitudError::InsufficientStock { .. } => {
            "No hay suficiente stock para realizar la solicitud!".into()
        }
        SolicitudError::InvalidQuantity(_) => "La cantidad debe ser mayor a cero.".into(),
        SolicitudError::ReservationRequired(_) => {
            "Debe seleccionar una fecha y hora para la reserva!".into()
        }
        SolicitudError::ReservationOutOfRange { .. } => {
            "No hay reservas disponibles en el día y hora seleccionada!".into()
        }
        SolicitudError::PersistenceFailed(_) | SolicitudError::ActorCommunicationError(_) => {
            "Hubo un error al guardar la solicitud!".into()
        }
        SolicitudError::UpdateFailed(_) => "Hubo un error al aprobar la solicitud!".into(),
        SolicitudError::DeleteFailed(_) => "Hubo un error al eliminar la solicitud!".into(),
    }
}

fn cart_message(e: &CartError) -> String {
    match e {
        CartError::ProductNotFound(_) => "El producto no existe.".into(),
        CartError::InsufficientStock { product, .. } => {
            format!("No hay suficiente stock de {product}.")
        }
        CartError::QuantityExceeded { product, max, .. } => {
            format!("No puedes agregar más de {max} unidades de {product}.")
        }
        CartError::CartFull { max } => {
            format!("El carro de compras no puede tener más de {max} productos distintos.")
        }
        CartError::InvalidQuantity(_) => "La cantidad debe ser mayor a cero.".into(),
        CartError::ItemNotFound(_) => "El producto no existe en el carro de compras".into(),
        CartError::NotFound(_)
        | CartError::PersistenceFailed(_)
        | CartError::ActorCommunicationError(_) => {
            "Hubo un error al eliminar el producto del carro de compras".into()
        }
    }
}

fn checkout_message(e: &CheckoutError) -> String {
    match e {
        CheckoutError::EmptyCart => "No tienes productos que comprar.".into(),
        CheckoutError::NotAuthenticated => "Debes iniciar sesión para comprar.".into(),
        CheckoutError::ProductNotFound(_) => "El producto no existe.".into(),
        CheckoutError::InsufficientProductStock { product, .. } => {
            format!("No hay suficiente stock de {product}.")
        }
        CheckoutError::Solicitud { source, .. } => solicitud_message(source),
        CheckoutError::Product(e) => product_message(e),
        CheckoutError::Cart(e) => cart_message(e),
    }
}

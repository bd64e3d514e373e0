//! A purchase or reservation request ("solicitud") for one product.
//!
//! # Actor Framework
//! Managed by the solicitud actor, see
//! its `ActorEntity` impl. Creating one
//! reserves stock on the product actor and deleting one gives it back.
use crate::model::{ProductId, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Solicitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SolicitudId(pub u32);

impl From<u32> for SolicitudId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for SolicitudId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "solicitud_{}", self.0)
    }
}

/// `Pending → Approved` is the only transition; deletion removes the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolicitudStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Aprobada")]
    Approved,
}

impl Display for SolicitudStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolicitudStatus::Pending => f.write_str("Pendiente"),
            SolicitudStatus::Approved => f.write_str("Aprobada"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solicitud {
    pub id: SolicitudId,
    pub product_id: ProductId,
    pub user_id: UserId,
    /// Units taken from the product's stock while this request exists.
    pub quantity: u32,
    pub status: SolicitudStatus,
    pub reservation_info: Option<String>,
    pub reservation_datetime: Option<NaiveDateTime>,
}

impl Solicitud {
    pub fn new(id: SolicitudId, params: SolicitudCreate) -> Self {
        Self {
            id,
            product_id: params.product_id,
            user_id: params.user_id,
            quantity: params.quantity,
            status: SolicitudStatus::Pending,
            reservation_info: None,
            reservation_datetime: params.reservation,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == SolicitudStatus::Pending
    }
}

/// Payload for creating a new solicitud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolicitudCreate {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub quantity: u32,
    pub reservation: Option<NaiveDateTime>,
}

impl SolicitudCreate {
    pub fn purchase(product_id: ProductId, user_id: UserId, quantity: u32) -> Self {
        Self {
            product_id,
            user_id,
            quantity,
            reservation: None,
        }
    }

    pub fn reservation(
        product_id: ProductId,
        user_id: UserId,
        quantity: u32,
        at: NaiveDateTime,
    ) -> Self {
        Self {
            reservation: Some(at),
            ..Self::purchase(product_id, user_id, quantity)
        }
    }
}

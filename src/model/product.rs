//! Represents a product in the catalog.
//!
//! # Actor Framework
//! [`Product`] implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! See its `ActorEntity` impl for details on:
//! - Creation parameters ([`ProductCreate`])
//! - Update parameters ([`ProductUpdate`])
//! - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
use crate::availability::AvailabilityWindow;
use crate::model::UserId;
use crate::product_actor::ProductError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Catalog categories. `Cancha` (courts and fields) is the one that usually carries
/// an availability window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Cancha")]
    Cancha,
    #[serde(rename = "Accesorio tecnologico")]
    AccesorioTecnologico,
    #[serde(rename = "Accesorio deportivo")]
    AccesorioDeportivo,
    #[serde(rename = "Accesorio de vestir")]
    AccesorioDeVestir,
    #[serde(rename = "Accesorio de entrenamiento")]
    AccesorioDeEntrenamiento,
    #[serde(rename = "Suplementos")]
    Suplementos,
    #[serde(rename = "Equipamiento")]
    Equipamiento,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Cancha,
        Category::AccesorioTecnologico,
        Category::AccesorioDeportivo,
        Category::AccesorioDeVestir,
        Category::AccesorioDeEntrenamiento,
        Category::Suplementos,
        Category::Equipamiento,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Cancha => "Cancha",
            Category::AccesorioTecnologico => "Accesorio tecnologico",
            Category::AccesorioDeportivo => "Accesorio deportivo",
            Category::AccesorioDeVestir => "Accesorio de vestir",
            Category::AccesorioDeEntrenamiento => "Accesorio de entrenamiento",
            Category::Suplementos => "Suplementos",
            Category::Equipamiento => "Equipamiento",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    pub stock: u32,
    pub category: Category,
    pub owner_id: UserId,
    pub availability: Option<AvailabilityWindow>,
}

impl Product {
    pub fn new(id: ProductId, params: ProductCreate) -> Self {
        Self {
            id,
            name: params.name,
            price: params.price,
            stock: params.stock,
            category: params.category,
            owner_id: params.owner_id,
            availability: params.availability,
        }
    }

    /// Takes `amount` units out of stock. Stock never goes below zero: asking for
    /// more than is available fails and leaves the stock as it was.
    pub fn reserve(&mut self, amount: u32) -> Result<u32, ProductError> {
        if amount == 0 {
            return Err(ProductError::InvalidQuantity(amount));
        }
        if amount > self.stock {
            return Err(ProductError::InsufficientStock {
                product: self.name.clone(),
                requested: amount,
                available: self.stock,
            });
        }
        self.stock -= amount;
        Ok(self.stock)
    }

    /// Puts `amount` units back. There is no ceiling; the stock only saturates at `u32::MAX`.
    pub fn release(&mut self, amount: u32) -> u32 {
        self.stock = self.stock.saturating_add(amount);
        self.stock
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: u64,
    pub stock: u32,
    pub category: Category,
    pub owner_id: UserId,
    pub availability: Option<AvailabilityWindow>,
}

// DTOs for Product updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<u64>,
    pub stock: Option<u32>,
    pub availability: Option<AvailabilityWindow>,
}

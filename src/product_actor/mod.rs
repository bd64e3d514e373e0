//! # Product Actor
//!
//! Owns the product catalog and is the single writer of every product's stock
//! counter (the stock ledger). Other actors never touch stock directly; they send
//! `Reserve` / `Release` actions through a [`ProductClient`](crate::clients::ProductClient).
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`]
//!
//! ## Usage
//!
//! ```rust
//! use tienda::clients::ProductClient;
//! use tienda::model::{Category, ProductCreate, UserId};
//! use tienda::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_product(ProductCreate {
//!             name: "Cancha de pádel".to_string(),
//!             price: 12000,
//!             stock: 4,
//!             category: Category::Cancha,
//!             owner_id: UserId(1),
//!             availability: Some("Friday,10:00,Monday,22:00".parse()?),
//!         })
//!         .await?;
//!
//!     assert_eq!(client.reserve_stock(id, 3).await?, 1);
//!     assert!(client.reserve_stock(id, 3).await.is_err());
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use actor_framework::{EntityStore, ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}

/// Creates a Product actor backed by the given store.
pub fn with_store<S: EntityStore<Product>>(
    buffer_size: usize,
    store: S,
) -> (ResourceActor<Product, S>, ResourceClient<Product>) {
    ResourceActor::with_store(buffer_size, store)
}

//! # Actor Framework
//!
//! Building blocks for type-safe, concurrent actor systems. Every record family
//! (products, purchase requests, carts) is a *resource* owned by one actor task;
//! other code talks to it through a cloneable client.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]): your domain model, its DTOs and its hooks.
//! 2. **Runtime Layer** ([`ResourceActor`]): message processing, ID generation and
//!    the storage write.
//! 3. **Storage Layer** ([`EntityStore`]): where records live. [`MemoryStore`] for
//!    production in-process use, [`mock::FlakyStore`] for failure tests.
//! 4. **Interface Layer** ([`ResourceClient`], [`ActorClient`]): type-safe communication.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task.
//! - Messages are processed **sequentially** within an actor, so a check and the
//!   mutation that depends on it cannot be interleaved with another request.
//! - Multiple actors run in parallel and only share data through messages.
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected when the actor starts (`run(context)`) rather than when
//! it is built. All actors can be created first and wired afterwards, which keeps
//! dependency cycles out of construction:
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Shelf { id: u32 }
//! #[derive(Debug)] struct ShelfCreate;
//! #[derive(Debug)] struct ShelfUpdate;
//! #[derive(Debug)] enum ShelfAction {}
//! #[derive(Debug, thiserror::Error)] #[error("shelf")] struct ShelfError;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32; type Create = ShelfCreate; type Update = ShelfUpdate; type Action = ShelfAction;
//!     type ActionResult = (); type Context = (); type Error = ShelfError;
//!     fn from_create_params(id: u32, _: ShelfCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: ShelfUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: ShelfAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[derive(Clone, Debug)] struct Picking { id: u32, shelf: u32 }
//! #[derive(Debug)] struct PickingCreate { shelf: u32 }
//! #[derive(Debug)] struct PickingUpdate;
//! #[derive(Debug)] enum PickingAction {}
//! #[derive(Debug, thiserror::Error)] #[error("no such shelf")] struct PickingError;
//!
//! #[async_trait]
//! impl ActorEntity for Picking {
//!     type Id = u32; type Create = PickingCreate; type Update = PickingUpdate; type Action = PickingAction;
//!     type ActionResult = (); type Context = ResourceClient<Shelf>; type Error = PickingError;
//!
//!     fn from_create_params(id: u32, p: PickingCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, shelf: p.shelf })
//!     }
//!     async fn on_create(&mut self, shelves: &ResourceClient<Shelf>) -> Result<(), Self::Error> {
//!         match shelves.get(self.shelf).await {
//!             Ok(Some(_)) => Ok(()),
//!             _ => Err(PickingError),
//!         }
//!     }
//!     async fn on_update(&mut self, _: PickingUpdate, _: &ResourceClient<Shelf>) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: PickingAction, _: &ResourceClient<Shelf>) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (shelf_actor, shelves) = ResourceActor::<Shelf>::new(10);
//!     let (picking_actor, pickings) = ResourceActor::<Picking>::new(10);
//!
//!     tokio::spawn(shelf_actor.run(()));
//!     tokio::spawn(picking_actor.run(shelves.clone()));
//!
//!     let shelf = shelves.create(ShelfCreate).await.unwrap();
//!     assert!(pickings.create(PickingCreate { shelf }).await.is_ok());
//!     assert!(pickings.create(PickingCreate { shelf: 99 }).await.is_err());
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from queued expectations so an actor's hooks
//! can be tested without the actors they call. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod store;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use store::{EntityStore, MemoryStore, StoreError};

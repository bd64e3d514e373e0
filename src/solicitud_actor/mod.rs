//! # Solicitud Actor
//!
//! Purchase and reservation requests. A solicitud holds stock for as long as it
//! exists: creating one reserves units on the product actor, deleting one gives
//! exactly those units back, and approving one only changes its status.
//!
//! The actor's context is a [`ProductClient`](crate::clients::ProductClient), injected
//! when the actor starts.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Solicitud;
use actor_framework::{EntityStore, ResourceActor, ResourceClient};

/// Creates a new Solicitud actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Solicitud>, ResourceClient<Solicitud>) {
    ResourceActor::new(buffer_size)
}

/// Creates a Solicitud actor backed by the given store.
pub fn with_store<S: EntityStore<Solicitud>>(
    buffer_size: usize,
    store: S,
) -> (ResourceActor<Solicitud, S>, ResourceClient<Solicitud>) {
    ResourceActor::with_store(buffer_size, store)
}

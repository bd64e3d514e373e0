//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every record family (products, purchase
//! requests, carts) implements so a generic [`ResourceActor`](crate::ResourceActor)
//! can own it. It fixes the associated types for IDs, DTOs, actions, context and
//! errors, and exposes the lifecycle hooks the actor calls around each storage write.
//!
//! # Hooks and the storage write
//!
//! The actor never mutates a stored record in place. Every mutating operation
//! runs against a clone, and the clone only replaces the stored record once the
//! [`EntityStore`](crate::EntityStore) write succeeds. Hooks that reach out to other
//! actors (for example reserving stock) get a matching compensation hook so the
//! two sides can be kept consistent when the write fails:
//!
//! | Operation | Hook before write | Write | On write failure |
//! |-----------|-------------------|-------|------------------|
//! | Create    | [`ActorEntity::on_create`] | `save` | [`ActorEntity::on_discard`] |
//! | Update    | [`ActorEntity::on_update`] | `save` | clone dropped |
//! | Action    | [`ActorEntity::handle_action`] | `save` (skipped when read-only) | clone dropped |
//! | Delete    | none | `remove` | nothing to undo |
//!
//! Delete is the mirror image: the record is removed first and
//! [`ActorEntity::on_delete`] runs afterwards. If the hook fails the actor writes
//! the record back, so either both sides change or neither does.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks (e.g. calling
/// the product actor from a purchase request hook). The `Context` type is injected into
/// every hook when the actor starts, so dependencies are bound late (passed to `run()`
/// instead of `new()`).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `Reserve`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum for the whole entity. Errors cross the actor boundary boxed
    /// inside [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) and
    /// can be recovered with
    /// [`FrameworkError::into_entity_error`](crate::FrameworkError::into_entity_error).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether `action` leaves this entity untouched. Read-only actions skip the
    /// storage write, so a failing store cannot reject them. Checked against the
    /// stored state before the action runs.
    fn is_read_only(&self, _action: &Self::Action) -> bool {
        false
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is persisted.
    /// An error aborts the create and nothing is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when `on_create` succeeded but the store refused the new record.
    /// Undo any side effect `on_create` had on other actors here.
    async fn on_discard(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called after the entity has been removed from the store.
    /// An error puts the record back and fails the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

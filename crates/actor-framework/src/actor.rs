//! # Generic Actor Server
//!
//! `ResourceActor` is the server half of the actor model: it owns the receiver end of
//! the channel and the [`EntityStore`] for one record family, and processes requests
//! strictly one at a time. Anything that must not interleave for a given record
//! family (checking stock and decrementing it, for instance) is therefore safe as
//! long as it happens inside a single request.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::store::{EntityStore, MemoryStore};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` (in-memory store) or
///     `ResourceActor::with_store()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop on a Tokio task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Shelf { id: u32, stock: u32 }
/// #[derive(Debug)] struct ShelfCreate { stock: u32 }
/// #[derive(Debug)] struct ShelfUpdate;
/// #[derive(Debug)] enum ShelfAction { Take(u32) }
/// #[derive(Debug, thiserror::Error)] #[error("empty shelf")] struct ShelfError;
///
/// #[async_trait]
/// impl ActorEntity for Shelf {
///     type Id = u32;
///     type Create = ShelfCreate;
///     type Update = ShelfUpdate;
///     type Action = ShelfAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = ShelfError;
///
///     fn from_create_params(id: u32, p: ShelfCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, stock: p.stock })
///     }
///     async fn on_update(&mut self, _: ShelfUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, action: ShelfAction, _: &()) -> Result<u32, Self::Error> {
///         match action {
///             ShelfAction::Take(n) if n <= self.stock => { self.stock -= n; Ok(self.stock) }
///             ShelfAction::Take(_) => Err(ShelfError),
///         }
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Shelf>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(ShelfCreate { stock: 3 }).await.unwrap();
///     assert_eq!(client.perform_action(id, ShelfAction::Take(2)).await.unwrap(), 1);
///     assert!(client.perform_action(id, ShelfAction::Take(2)).await.is_err());
/// }
/// ```
pub struct ResourceActor<T: ActorEntity, S: EntityStore<T> = MemoryStore<T>> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: S,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates an actor backed by a [`MemoryStore`] together with its client.
    ///
    /// `buffer_size` is the capacity of the mailbox; when it is full, client calls
    /// wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::with_store(buffer_size, MemoryStore::new())
    }
}

impl<T: ActorEntity, S: EntityStore<T>> ResourceActor<T, S> {
    /// Creates an actor backed by the given store together with its client.
    pub fn with_store(buffer_size: usize, store: S) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store,
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    fn generate_id(&mut self) -> T::Id {
        loop {
            let id = T::Id::from(self.next_id);
            self.next_id += 1;
            if !self.store.contains(&id) {
                return id;
            }
        }
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Product" instead of "tienda::model::product::Product"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = self.generate_id();
                    let result = self.create(entity_type, id, params, &context).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::CreateWithId {
                    id,
                    params,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?params, "CreateWithId");
                    let result = if self.store.contains(&id) {
                        warn!(entity_type, %id, "Already exists");
                        Err(FrameworkError::AlreadyExists(id.to_string()))
                    } else {
                        self.create(entity_type, id, params, &context).await
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.load(&id);
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.store.all();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(entity_type, id, update, &context).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(entity_type, id, &context).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(entity_type, id, action, &context).await;
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        entity_type: &str,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;

        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, %id, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }

        if let Err(store_err) = self.store.save(id.clone(), item.clone()) {
            warn!(entity_type, %id, error = %store_err, "Save failed, discarding");
            if let Err(e) = item.on_discard(context).await {
                error!(entity_type, %id, error = %e, "on_discard failed");
            }
            return Err(store_err.into());
        }

        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok(id)
    }

    async fn update(
        &mut self,
        entity_type: &str,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let Some(mut draft) = self.store.load(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        if let Err(e) = draft.on_update(update, context).await {
            warn!(entity_type, %id, error = %e, "Update failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }

        self.store.save(id.clone(), draft.clone()).map_err(|e| {
            warn!(entity_type, %id, error = %e, "Update not persisted");
            FrameworkError::Store(e)
        })?;

        info!(entity_type, %id, "Updated");
        Ok(draft)
    }

    async fn delete(
        &mut self,
        entity_type: &str,
        id: T::Id,
        context: &T::Context,
    ) -> Result<(), FrameworkError> {
        let Some(item) = self.store.load(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        self.store.remove(&id).map_err(|e| {
            warn!(entity_type, %id, error = %e, "Remove failed");
            FrameworkError::Store(e)
        })?;

        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed, restoring");
            if let Err(store_err) = self.store.save(id.clone(), item) {
                error!(entity_type, %id, error = %store_err, "Restore after failed delete lost the record");
            }
            return Err(FrameworkError::EntityError(Box::new(e)));
        }

        info!(entity_type, %id, size = self.store.len(), "Deleted");
        Ok(())
    }

    async fn action(
        &mut self,
        entity_type: &str,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let Some(mut draft) = self.store.load(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let read_only = draft.is_read_only(&action);
        let outcome = match draft.handle_action(action, context).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(entity_type, %id, error = %e, "Action failed");
                return Err(FrameworkError::EntityError(Box::new(e)));
            }
        };

        if !read_only {
            self.store.save(id.clone(), draft).map_err(|e| {
                warn!(entity_type, %id, error = %e, "Action not persisted");
                FrameworkError::Store(e)
            })?;
        }

        info!(entity_type, %id, "Action ok");
        Ok(outcome)
    }
}

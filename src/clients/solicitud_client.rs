//! # Solicitud Client
//!
//! High-level API for the `Solicitud` actor. Storage failures are reported per
//! operation: a failed create is `PersistenceFailed`, a failed approval is
//! `UpdateFailed` and a failed delete is `DeleteFailed`.
use crate::model::{Solicitud, SolicitudCreate, SolicitudId, UserId};
use crate::solicitud_actor::{SolicitudAction, SolicitudError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Solicitud actor.
///
/// Validation and stock reservation happen in the actor's `on_create` hook.
#[derive(Clone)]
pub struct SolicitudClient {
    inner: ResourceClient<Solicitud>,
}

impl SolicitudClient {
    pub fn new(inner: ResourceClient<Solicitud>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_solicitud(
        &self,
        params: SolicitudCreate,
    ) -> Result<SolicitudId, SolicitudError> {
        info!("Sending create_solicitud to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn approve(&self, id: SolicitudId) -> Result<Solicitud, SolicitudError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, SolicitudAction::Approve)
            .await
            .map_err(|e| match e {
                FrameworkError::Store(store) => SolicitudError::UpdateFailed(store.to_string()),
                other => Self::map_error(other),
            })
    }

    /// Deletes the solicitud and returns its stock to the product.
    #[instrument(skip(self))]
    pub async fn delete_solicitud(&self, id: SolicitudId) -> Result<(), SolicitudError> {
        debug!("Sending request");
        self.inner.delete(id).await.map_err(|e| match e {
            FrameworkError::Store(store) => SolicitudError::DeleteFailed(store.to_string()),
            other => match Self::map_error(other) {
                e @ (SolicitudError::NotFound(_) | SolicitudError::DeleteFailed(_)) => e,
                e => SolicitudError::DeleteFailed(e.to_string()),
            },
        })
    }

    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Solicitud>, SolicitudError> {
        let mut mine: Vec<Solicitud> = self
            .list()
            .await?
            .into_iter()
            .filter(|s| s.user_id == user_id)
            .collect();
        mine.sort_by_key(|s| s.id);
        Ok(mine)
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Solicitud>, SolicitudError> {
        let mut all = self.list().await?;
        all.sort_by_key(|s| s.id);
        Ok(all)
    }
}

#[async_trait]
impl ActorClient<Solicitud> for SolicitudClient {
    type Error = SolicitudError;

    fn inner(&self) -> &ResourceClient<Solicitud> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => SolicitudError::NotFound(id),
            FrameworkError::Store(store) => SolicitudError::PersistenceFailed(store.to_string()),
            other => other
                .into_entity_error::<SolicitudError>()
                .unwrap_or_else(|e| SolicitudError::ActorCommunicationError(e.to_string())),
        }
    }
}

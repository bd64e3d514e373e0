//! # Cart Client
//!
//! High-level API for the `Cart` actor. Every call makes sure the user's cart
//! exists first, so callers never create carts explicitly.
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::model::{Cart, CartCreate, ProductId, UserId};
use crate::pricing::CartTotals;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    async fn ensure_cart(&self, user_id: UserId) -> Result<(), CartError> {
        match self.inner.create_with_id(user_id, CartCreate).await {
            Ok(_) => {
                debug!(%user_id, "Cart created");
                Ok(())
            }
            Err(FrameworkError::AlreadyExists(_)) => Ok(()),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    async fn act(&self, user_id: UserId, action: CartAction) -> Result<CartActionResult, CartError> {
        self.ensure_cart(user_id).await?;
        self.inner
            .perform_action(user_id, action)
            .await
            .map_err(Self::map_error)
    }

    async fn act_on_cart(&self, user_id: UserId, action: CartAction) -> Result<Cart, CartError> {
        match self.act(user_id, action).await? {
            CartActionResult::Updated(cart) => Ok(cart),
            other => Err(CartError::ActorCommunicationError(format!(
                "unexpected action result {other:?}"
            ))),
        }
    }

    /// The user's cart, empty if they never used it.
    #[instrument(skip(self))]
    pub async fn cart(&self, user_id: UserId) -> Result<Cart, CartError> {
        self.ensure_cart(user_id).await?;
        self.get(user_id)
            .await?
            .ok_or_else(|| CartError::NotFound(user_id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.act_on_cart(
            user_id,
            CartAction::AddItem {
                product_id,
                quantity,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, user_id: UserId, product_id: ProductId) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.act_on_cart(user_id, CartAction::RemoveItem(product_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: UserId) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.act_on_cart(user_id, CartAction::Clear).await
    }

    /// Takes checked-out quantities off the cart, leaving anything added since.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn remove_lines(
        &self,
        user_id: UserId,
        lines: BTreeMap<ProductId, u32>,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.act_on_cart(user_id, CartAction::RemoveLines(lines))
            .await
    }

    #[instrument(skip(self))]
    pub async fn totals(&self, user_id: UserId) -> Result<CartTotals, CartError> {
        match self.act(user_id, CartAction::Totals).await? {
            CartActionResult::Totals(totals) => Ok(totals),
            other => Err(CartError::ActorCommunicationError(format!(
                "unexpected action result {other:?}"
            ))),
        }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            FrameworkError::Store(store) => CartError::PersistenceFailed(store.to_string()),
            other => other
                .into_entity_error::<CartError>()
                .unwrap_or_else(|e| CartError::ActorCommunicationError(e.to_string())),
        }
    }
}

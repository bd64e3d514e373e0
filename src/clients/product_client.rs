//! # Product Client
//!
//! High-level API for the `Product` actor: catalog reads plus the stock ledger
//! operations (`check_stock`, `reserve_stock`, `release_stock`).
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::Store(store) => ProductError::Persistence(store.to_string()),
            other => other
                .into_entity_error::<ProductError>()
                .unwrap_or_else(|e| ProductError::ActorCommunicationError(e.to_string())),
        }
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result {result:?}"))
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Fetches a product, treating absence as an error.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!(%id, "Checking stock");
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Takes `quantity` units out of stock and returns what is left.
    ///
    /// The check and the decrement happen in one actor turn, so two concurrent
    /// reservations can never both pass the check against the same units.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!(%id, quantity, "Reserving stock");
        match self
            .inner
            .perform_action(id, ProductAction::Reserve(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::Reserve(left) => Ok(left),
            other => Err(unexpected(other)),
        }
    }

    /// Puts `quantity` units back and returns the new stock level.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!(%id, quantity, "Releasing stock");
        match self
            .inner
            .perform_action(id, ProductAction::Release(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::Release(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action};
    use actor_framework::StoreError;

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task = tokio::spawn(async move { product_client.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::CheckStock);

        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        assert_eq!(check_task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_reserve_stock_recovers_typed_error() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(1), 100).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(action, ProductAction::Reserve(100));

        let insufficient = ProductError::InsufficientStock {
            product: "Raqueta".into(),
            requested: 100,
            available: 2,
        };
        responder
            .send(Err(FrameworkError::EntityError(Box::new(insufficient.clone()))))
            .unwrap();

        assert_eq!(reserve_task.await.unwrap(), Err(insufficient));
    }

    #[tokio::test]
    async fn test_release_stock_reports_persistence_failure() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let release_task =
            tokio::spawn(async move { product_client.release_stock(ProductId(3), 2).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(3));
        assert_eq!(action, ProductAction::Release(2));

        responder
            .send(Err(StoreError::SaveRejected("product_3".into()).into()))
            .unwrap();

        assert!(matches!(
            release_task.await.unwrap(),
            Err(ProductError::Persistence(_))
        ));
    }

    #[tokio::test]
    async fn test_mismatched_result_is_an_error_not_a_panic() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move { product_client.check_stock(ProductId(1)).await });
        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder.send(Ok(ProductActionResult::Release(1))).unwrap();

        assert!(matches!(
            task.await.unwrap(),
            Err(ProductError::ActorCommunicationError(_))
        ));
    }
}

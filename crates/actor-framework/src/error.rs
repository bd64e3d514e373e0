//! # Framework Errors
//!
//! Common error type shared by every actor and client. Entity-specific errors travel
//! boxed in [`FrameworkError::EntityError`] so clients can downcast them back into
//! their own error enum.

use crate::store::StoreError;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type from an [`FrameworkError::EntityError`].
    ///
    /// Returns the original error untouched when it is a different variant or the boxed
    /// error is of another type.
    pub fn into_entity_error<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|boxed| *boxed)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }

    pub fn is_store_error(&self) -> bool {
        matches!(self, FrameworkError::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("out of stock")]
    struct OutOfStock;

    #[test]
    fn entity_errors_can_be_recovered_by_type() {
        let err = FrameworkError::EntityError(Box::new(OutOfStock));
        assert_eq!(err.into_entity_error::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn other_variants_are_handed_back() {
        let err = FrameworkError::NotFound("product_3".into());
        let back = err.into_entity_error::<OutOfStock>().unwrap_err();
        assert!(matches!(back, FrameworkError::NotFound(id) if id == "product_3"));

        let wrong_type = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        assert!(matches!(
            wrong_type.into_entity_error::<OutOfStock>(),
            Err(FrameworkError::EntityError(_))
        ));
    }

    #[test]
    fn store_errors_convert() {
        let err: FrameworkError = StoreError::SaveRejected("cart_1".into()).into();
        assert!(err.is_store_error());
    }
}

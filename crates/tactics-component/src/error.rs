use tactics_core::ids::ComponentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("component {0} is already registered in this catalog")]
    DuplicateComponent(ComponentId),

    #[error("component {0} is not registered in this catalog")]
    ComponentNotFound(ComponentId),

    #[error("no subscription for component {0} at scope {1:?}")]
    SubscriptionNotFound(ComponentId, crate::scope::CapabilityScope),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

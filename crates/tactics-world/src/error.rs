use tactics_core::ids::EntityId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("entity {0} is already published in this world")]
    AlreadyPublished(EntityId),

    #[error("entity {0} is not published in this world")]
    NotPublished(EntityId),
}

pub type WorldResult<T> = Result<T, WorldError>;

use tactics_core::ids::{EntityId, PlayerId, TeamId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EntityError {
    #[error("entity {0} already has owner {1}")]
    AlreadyOwned(EntityId, PlayerId),

    #[error("player {0} does not own entity {1}")]
    NotOwned(PlayerId, EntityId),

    #[error("no slot named {0:?}")]
    NoSuchSlot(String),

    #[error("slot {0:?} is already occupied")]
    SlotOccupied(String),

    #[error("property {0:?} already exists on this entity")]
    PropertyAlreadyExists(String),

    #[error("no property named {0:?}")]
    NoSuchProperty(String),

    #[error("team {0} is already a member of team {1}")]
    TeamCycle(TeamId, TeamId),
}

pub type EntityResult<T> = Result<T, EntityError>;

//! `GameError` — validation-tier failures at the game root (spec §7: the
//! taxonomy's "validation error" and "deserialization failure" tiers).
//! Invariant violations remain plain `panic!`s at the point they're
//! detected (`Game::new`'s singleton check, `Chunk`'s bounds check) since
//! by definition no caller should catch them.

use tactics_core::ids::{ComponentId, EntityId, PlayerId, TeamId, WorldId};
use tactics_entity::EntityError;
use tactics_nested::NestedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("world {0} not found")]
    WorldNotFound(WorldId),

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("team {0} not found")]
    TeamNotFound(TeamId),

    #[error("component {0} not found")]
    ComponentNotFound(ComponentId),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Nested(#[from] NestedError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("deserialization failed: {0}")]
    Deserialize(String),
}

pub type GameResult<T> = Result<T, GameError>;

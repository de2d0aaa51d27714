//! `ContainerId` — a non-owning tag naming any scope root.
//!
//! Used wherever the subscription graph, sensed-entity rollups, or the
//! action pipeline need to name a container (spec Design Notes §9: "store
//! subscriptions as `(container_id, role)` keys, not owning handles;
//! resolve to the container at dispatch time via the Game registry").
//! Keeping this tag in `tactics-core` rather than stringly-typed container
//! names lets every crate above it pattern-match instead of parsing.

use std::fmt;

use crate::ids::{EntityId, PlayerId, TeamId, WorldId};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainerId {
    Entity(EntityId),
    World(WorldId),
    Player(PlayerId),
    Team(TeamId),
    /// There is exactly one `Game` container process-wide, so it carries no
    /// payload.
    Game,
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerId::Entity(id) => write!(f, "entity:{id}"),
            ContainerId::World(id) => write!(f, "world:{id}"),
            ContainerId::Player(id) => write!(f, "player:{id}"),
            ContainerId::Team(id) => write!(f, "team:{id}"),
            ContainerId::Game => write!(f, "game"),
        }
    }
}

impl From<EntityId> for ContainerId {
    fn from(id: EntityId) -> Self {
        ContainerId::Entity(id)
    }
}

impl From<WorldId> for ContainerId {
    fn from(id: WorldId) -> Self {
        ContainerId::World(id)
    }
}

impl From<PlayerId> for ContainerId {
    fn from(id: PlayerId) -> Self {
        ContainerId::Player(id)
    }
}

impl From<TeamId> for ContainerId {
    fn from(id: TeamId) -> Self {
        ContainerId::Team(id)
    }
}

//! The serialize-for-client boundary (spec §6): `Game::serialize_for_scope`
//! builds the snapshot a viewer's client is allowed to see — only the
//! worlds it has a `Scope` on, and only the entities it senses or owns.
//!
//! Grounded on `dt-output`'s `row.rs`/`observer.rs` serialize boundary: a
//! handful of small, plain DTO structs with their own `Serialize` impl
//! rather than deriving it on the live registry types directly, so the
//! wire shape stays independent of internal field layout.

use indexmap::IndexMap;
use tactics_component::{ComponentContainer, Property};
use tactics_core::ids::{ComponentId, EntityId, PlayerId, TeamId, WorldId};
use tactics_core::vector::Vector;

use crate::game::Game;

#[derive(Debug, Clone, serde::Serialize)]
pub struct PropertySnapshot {
    pub current: f64,
    pub effective: f64,
    pub min: f64,
    pub max: f64,
}

impl From<&Property> for PropertySnapshot {
    fn from(p: &Property) -> Self {
        Self {
            current: p.current(),
            effective: p.effective_value(),
            min: p.min(),
            max: p.max(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub name: String,
    pub tags: Vec<String>,
    pub world: Option<WorldId>,
    pub position: Vector,
    pub published: bool,
    pub owners: Vec<PlayerId>,
    pub slots: IndexMap<String, Option<EntityId>>,
    pub properties: IndexMap<String, PropertySnapshot>,
    /// Only components whose `broadcast` flag is true (spec §6).
    pub components: Vec<ComponentId>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub entities: Vec<EntityId>,
    pub team: Option<TeamId>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TeamSnapshot {
    pub id: TeamId,
    pub players: Vec<PlayerId>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct WorldSnapshot {
    pub id: WorldId,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct GameSnapshot {
    pub id: PlayerId,
    pub players: Vec<PlayerSnapshot>,
    pub teams: Vec<TeamSnapshot>,
    pub worlds: Vec<WorldSnapshot>,
    pub entities: Vec<EntitySnapshot>,
}

impl<T> Game<T> {
    /// Build the snapshot `viewer` is allowed to see (spec §6):
    /// `worlds[]` is restricted to worlds the viewer has any `Scope` on;
    /// `entities[]` is restricted to entities the viewer owns or senses.
    pub fn serialize_for_scope(&self, viewer: PlayerId) -> Option<GameSnapshot> {
        let player = self.players.get(&viewer)?;
        let sensed_node = player.sensed_node_id();

        let worlds = player.scoped_worlds().map(|id| WorldSnapshot { id }).collect();

        let visible_entity_ids: Vec<EntityId> = self
            .entities
            .keys()
            .copied()
            .filter(|&id| player.owns(id) || self.sensed.contains(&sensed_node, &id))
            .collect();

        let entities = visible_entity_ids
            .into_iter()
            .filter_map(|id| self.entities.get(&id).map(|e| self.entity_snapshot(id, e)))
            .collect();

        let players = self
            .players
            .values()
            .map(|p| PlayerSnapshot {
                id: p.id(),
                entities: p.entities().collect(),
                team: p.team(),
            })
            .collect();

        let teams = self
            .teams
            .values()
            .map(|t| TeamSnapshot {
                id: t.id(),
                players: t.players().collect(),
            })
            .collect();

        Some(GameSnapshot {
            id: viewer,
            players,
            teams,
            worlds,
            entities,
        })
    }

    fn entity_snapshot(&self, id: EntityId, entity: &tactics_entity::Entity<tactics_action::Action>) -> EntitySnapshot {
        let properties = entity
            .properties()
            .map(|(name, p)| (name.to_string(), PropertySnapshot::from(p)))
            .collect();
        let components = entity
            .catalog()
            .all()
            .filter(|c| c.broadcast())
            .map(|c| c.id())
            .collect();
        EntitySnapshot {
            id,
            name: entity.name().to_string(),
            tags: entity.tags().map(str::to_string).collect(),
            world: entity.world(),
            position: entity.position(),
            published: entity.is_published(),
            owners: entity.owners().collect(),
            slots: entity.slots().map(|(name, item)| (name.to_string(), item)).collect(),
            properties,
            components,
        }
    }
}

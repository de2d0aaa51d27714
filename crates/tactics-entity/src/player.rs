//! `Player` — a container and viewer: owns entities, a per-world `Scope`,
//! and optionally belongs to a `Team` (spec §3).

use indexmap::{IndexMap, IndexSet};
use tactics_component::{CapabilityScope, ComponentCatalog, ComponentContainer};
use tactics_core::container::ContainerId;
use tactics_core::ids::{EntityId, PlayerId, TeamId, WorldId};
use tactics_world::Scope;

pub struct Player<A> {
    id: PlayerId,
    entities: IndexSet<EntityId>,
    scopes_by_world: IndexMap<WorldId, Scope>,
    team: Option<TeamId>,
    catalog: ComponentCatalog<A>,
}

impl<A> Player<A> {
    pub fn new(id: PlayerId) -> Self {
        let catalog = ComponentCatalog::new(ContainerId::Player(id), CapabilityScope::Player);
        Self {
            id,
            entities: IndexSet::new(),
            scopes_by_world: IndexMap::new(),
            team: None,
            catalog,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().copied()
    }

    pub fn owns(&self, entity: EntityId) -> bool {
        self.entities.contains(&entity)
    }

    /// Entity-side record is kept by [`crate::entity::Entity::_add_owner`];
    /// this is the player-side half of `OwnEntityAction`.
    pub fn _own_entity(&mut self, entity: EntityId) -> bool {
        self.entities.insert(entity)
    }

    pub fn _disown_entity(&mut self, entity: EntityId) -> bool {
        self.entities.shift_remove(&entity)
    }

    pub fn team(&self) -> Option<TeamId> {
        self.team
    }

    pub fn _join_team(&mut self, team: TeamId) {
        self.team = Some(team);
    }

    pub fn _leave_team(&mut self) {
        self.team = None;
    }

    /// The node id this player contributes to the shared sensed-entity
    /// `NestedMap` — see `Entity::sensed_node_id`'s doc for the rationale.
    pub fn sensed_node_id(&self) -> String {
        self.id.0.to_string()
    }

    pub fn scope(&self, world: WorldId) -> Option<&Scope> {
        self.scopes_by_world.get(&world)
    }

    /// Every world this player currently has a `Scope` on — the set
    /// `Game::serialize_for_scope` restricts the snapshot's `worlds[]` to.
    pub fn scoped_worlds(&self) -> impl Iterator<Item = WorldId> + '_ {
        self.scopes_by_world.keys().copied()
    }

    pub fn scope_mut(&mut self, world: WorldId) -> &mut Scope {
        self.scopes_by_world.entry(world).or_insert_with(|| Scope::new(world))
    }

    pub fn drop_scope(&mut self, world: WorldId) {
        self.scopes_by_world.shift_remove(&world);
    }
}

impl<A> ComponentContainer<A> for Player<A> {
    fn container_id(&self) -> ContainerId {
        ContainerId::Player(self.id)
    }

    /// Players have no publish/unpublish lifecycle; they exist as soon as
    /// they're registered.
    fn is_published(&self) -> bool {
        true
    }

    fn catalog(&self) -> &ComponentCatalog<A> {
        &self.catalog
    }

    fn catalog_mut(&mut self) -> &mut ComponentCatalog<A> {
        &mut self.catalog
    }

    fn get_container_by_scope(&self, scope: CapabilityScope) -> Option<ContainerId> {
        match scope {
            CapabilityScope::Team => self.team.map(ContainerId::Team),
            CapabilityScope::Game => Some(ContainerId::Game),
            _ => None,
        }
    }
}

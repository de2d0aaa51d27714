//! `Team` — aggregates players; rolls up sensed entities and scopes via the
//! sensed-entity `NestedMap`'s parent edge (spec §3).

use indexmap::IndexSet;
use tactics_component::{CapabilityScope, ComponentCatalog, ComponentContainer};
use tactics_core::container::ContainerId;
use tactics_core::ids::{PlayerId, TeamId};

pub struct Team<A> {
    id: TeamId,
    players: IndexSet<PlayerId>,
    catalog: ComponentCatalog<A>,
}

impl<A> Team<A> {
    pub fn new(id: TeamId) -> Self {
        let catalog = ComponentCatalog::new(ContainerId::Team(id), CapabilityScope::Team);
        Self {
            id,
            players: IndexSet::new(),
            catalog,
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().copied()
    }

    pub fn has_player(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    pub fn _add_player(&mut self, player: PlayerId) -> bool {
        self.players.insert(player)
    }

    pub fn _remove_player(&mut self, player: PlayerId) -> bool {
        self.players.shift_remove(&player)
    }

    /// The node id this team contributes to the shared sensed-entity
    /// `NestedMap` — see `Entity::sensed_node_id`'s doc for the rationale.
    pub fn sensed_node_id(&self) -> String {
        self.id.0.to_string()
    }
}

impl<A> ComponentContainer<A> for Team<A> {
    fn container_id(&self) -> ContainerId {
        ContainerId::Team(self.id)
    }

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
            CapabilityScope::Game => Some(ContainerId::Game),
            _ => None,
        }
    }
}

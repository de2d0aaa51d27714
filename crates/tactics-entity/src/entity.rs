//! `Entity` — the leaf container: published state, slots, properties,
//! abilities, and ownership (spec §3).
//!
//! # Field notes
//!
//! | Field              | Rationale                                                      |
//! |--------------------|------------------------------------------------------------------|
//! | `teams`            | Flat `IndexSet<TeamId>`, not a literal nested structure — team membership here is a lookup set `tactics-game` keeps in sync on ownership changes, distinct from the sensed-entity rollup below. |
//! | `sensed_entities`  | No field at all: the node id an entity contributes to the shared sensed-entity `NestedMap` is just its raw id text, computed on demand by [`Entity::sensed_node_id`]. The map itself is owned centrally by the game root (Design Notes §9's "store by id, resolve via registry" strategy), same as component subscriptions. |
//! | `catalog`          | Every `ComponentContainer` owns one (spec §3); not itemized in the entity field list but implied by the role it implements. |

use indexmap::{IndexMap, IndexSet};
use tactics_component::{CapabilityScope, ComponentCatalog, ComponentContainer};
use tactics_core::container::ContainerId;
use tactics_core::ids::{EntityId, PlayerId, TeamId, WorldId};
use tactics_core::vector::Vector;
use tactics_core::using::UsingRef;

use crate::error::{EntityError, EntityResult};
use crate::grant::Grant;

pub struct Entity<A> {
    id: EntityId,
    name: String,
    tags: IndexSet<String>,
    published: bool,
    active: bool,
    omnipotent: bool,
    properties: IndexMap<String, tactics_component::Property>,
    catalog: ComponentCatalog<A>,
    abilities: IndexMap<String, Vec<Grant>>,
    owners: IndexSet<PlayerId>,
    teams: IndexSet<TeamId>,
    slots: IndexMap<String, Option<EntityId>>,
    world: Option<WorldId>,
    position: Vector,
}

impl<A> Entity<A> {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        let catalog = ComponentCatalog::new(ContainerId::Entity(id), CapabilityScope::Entity);
        Self {
            id,
            name: name.into(),
            tags: IndexSet::new(),
            published: false,
            active: false,
            omnipotent: false,
            properties: IndexMap::new(),
            catalog,
            abilities: IndexMap::new(),
            owners: IndexSet::new(),
            teams: IndexSet::new(),
            slots: IndexMap::new(),
            world: None,
            position: Vector::new(0, 0),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.shift_remove(tag)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn omnipotent(&self) -> bool {
        self.omnipotent
    }

    pub fn set_omnipotent(&mut self, omnipotent: bool) {
        self.omnipotent = omnipotent;
    }

    pub fn world(&self) -> Option<WorldId> {
        self.world
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    /// The node id this entity contributes to the shared sensed-entity
    /// `NestedMap` — see the module doc for why there's no stored field.
    pub fn sensed_node_id(&self) -> String {
        self.id.0.to_string()
    }

    // ── Publish lifecycle (spec §4.6 `PublishEntityAction`/`UnpublishEntityAction`) ──

    pub fn is_published(&self) -> bool {
        self.published
    }

    /// Internal bookkeeping for `PublishEntityAction`. World-index
    /// maintenance and view preloading are the action's job; this method
    /// only updates the entity's own record.
    pub fn _publish(&mut self, world: WorldId, position: Vector) {
        self.world = Some(world);
        self.position = position;
        self.published = true;
    }

    pub fn _unpublish(&mut self) {
        self.world = None;
        self.published = false;
    }

    pub fn _move_to(&mut self, position: Vector) {
        self.position = position;
    }

    // ── Slots ───────────────────────────────────────────────────────────

    /// Register a new, empty slot. A no-op if the slot name already exists.
    pub fn add_slot(&mut self, name: impl Into<String>) {
        self.slots.entry(name.into()).or_insert(None);
    }

    pub fn remove_slot(&mut self, name: &str) -> EntityResult<()> {
        self.slots
            .shift_remove(name)
            .map(|_| ())
            .ok_or_else(|| EntityError::NoSuchSlot(name.to_string()))
    }

    pub fn slot(&self, name: &str) -> Option<Option<EntityId>> {
        self.slots.get(name).copied()
    }

    pub fn slots(&self) -> impl Iterator<Item = (&str, Option<EntityId>)> {
        self.slots.iter().map(|(name, item)| (name.as_str(), *item))
    }

    pub fn equip(&mut self, slot: &str, item: EntityId) -> EntityResult<()> {
        let current = self
            .slots
            .get_mut(slot)
            .ok_or_else(|| EntityError::NoSuchSlot(slot.to_string()))?;
        if current.is_some() {
            return Err(EntityError::SlotOccupied(slot.to_string()));
        }
        *current = Some(item);
        Ok(())
    }

    pub fn unequip(&mut self, slot: &str) -> EntityResult<Option<EntityId>> {
        let current = self
            .slots
            .get_mut(slot)
            .ok_or_else(|| EntityError::NoSuchSlot(slot.to_string()))?;
        Ok(current.take())
    }

    // ── Properties ──────────────────────────────────────────────────────

    pub fn add_property(&mut self, name: impl Into<String>, property: tactics_component::Property) -> EntityResult<()> {
        let name = name.into();
        if self.properties.contains_key(&name) {
            return Err(EntityError::PropertyAlreadyExists(name));
        }
        self.properties.insert(name, property);
        Ok(())
    }

    pub fn remove_property(&mut self, name: &str) -> EntityResult<tactics_component::Property> {
        self.properties
            .shift_remove(name)
            .ok_or_else(|| EntityError::NoSuchProperty(name.to_string()))
    }

    pub fn property(&self, name: &str) -> Option<&tactics_component::Property> {
        self.properties.get(name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut tactics_component::Property> {
        self.properties.get_mut(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &tactics_component::Property)> {
        self.properties.iter().map(|(name, p)| (name.as_str(), p))
    }

    // ── Abilities / Grants ──────────────────────────────────────────────

    /// Append `grant` under `ability`, unless an equivalent `(granted_by,
    /// using)` grant is already recorded.
    pub fn learn_ability(&mut self, ability: impl Into<String>, grant: Grant) {
        let list = self.abilities.entry(ability.into()).or_default();
        if !list.iter().any(|g| g.matches(grant.granted_by, grant.using)) {
            list.push(grant);
        }
    }

    /// Remove every grant under `ability` matching `(granted_by, using)`.
    /// Returns `true` if anything was removed.
    pub fn forget_ability(&mut self, ability: &str, granted_by: Option<EntityId>, using: Option<UsingRef>) -> bool {
        let Some(list) = self.abilities.get_mut(ability) else {
            return false;
        };
        let before = list.len();
        list.retain(|g| !g.matches(granted_by, using));
        let changed = list.len() != before;
        if list.is_empty() {
            self.abilities.shift_remove(ability);
        }
        changed
    }

    pub fn has_ability(&self, ability: &str) -> bool {
        self.abilities.get(ability).is_some_and(|l| !l.is_empty())
    }

    pub fn grants(&self, ability: &str) -> &[Grant] {
        self.abilities.get(ability).map_or(&[], |v| v.as_slice())
    }

    // ── Ownership & teams ───────────────────────────────────────────────

    pub fn owners(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.owners.iter().copied()
    }

    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owners.contains(&player)
    }

    /// Entity-side bookkeeping for `OwnEntityAction`; callers also update
    /// `Player::_own_entity` and any sensed-entity rollup.
    pub fn _add_owner(&mut self, player: PlayerId) -> EntityResult<()> {
        if !self.owners.insert(player) {
            return Err(EntityError::AlreadyOwned(self.id, player));
        }
        Ok(())
    }

    pub fn _remove_owner(&mut self, player: PlayerId) -> EntityResult<()> {
        if !self.owners.shift_remove(&player) {
            return Err(EntityError::NotOwned(player, self.id));
        }
        Ok(())
    }

    pub fn teams(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.teams.iter().copied()
    }

    pub fn _join_team(&mut self, team: TeamId) -> bool {
        self.teams.insert(team)
    }

    pub fn _leave_team(&mut self, team: TeamId) -> bool {
        self.teams.shift_remove(&team)
    }
}

impl<A> ComponentContainer<A> for Entity<A> {
    fn container_id(&self) -> ContainerId {
        ContainerId::Entity(self.id)
    }

    fn is_published(&self) -> bool {
        self.published
    }

    fn catalog(&self) -> &ComponentCatalog<A> {
        &self.catalog
    }

    fn catalog_mut(&mut self) -> &mut ComponentCatalog<A> {
        &mut self.catalog
    }

    fn get_container_by_scope(&self, scope: CapabilityScope) -> Option<ContainerId> {
        match scope {
            CapabilityScope::World => self.world.map(ContainerId::World),
            CapabilityScope::Player => self.owners.iter().next().copied().map(ContainerId::Player),
            CapabilityScope::Team => self.teams.iter().next().copied().map(ContainerId::Team),
            CapabilityScope::Game => Some(ContainerId::Game),
            CapabilityScope::Entity => None,
        }
    }
}

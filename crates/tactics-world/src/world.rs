//! `World` — an ordered layer stack plus the spatial index over published
//! entities.
//!
//! # Design
//!
//! Tile *contents* are out of scope for this engine (spec §1 names chunk
//! generators and tile data as external collaborators), so `World<T, A>` is
//! generic over whatever tile payload the application's terrain layer uses
//! — layer 0 is the canonical terrain layer by convention, any further
//! layers are the application's to define. What this crate actually owns
//! is the bookkeeping spec §3 calls out: the set of published entity ids
//! and the per-chunk entity index, kept in sync as entities publish, move,
//! and unpublish, plus the `ComponentCatalog` every container role
//! requires (spec §3 "ComponentContainer (role)"). `A` is the action type
//! the catalog's components react to — left generic for the same reason
//! `tactics-component` leaves it generic, so this crate never depends on
//! `tactics-action`.

use indexmap::{IndexMap, IndexSet};
use tactics_component::{CapabilityScope, ComponentCatalog, ComponentContainer};
use tactics_core::container::ContainerId;
use tactics_core::ids::{EntityId, WorldId};
use tactics_core::vector::{chunk_key, Vector};
use tactics_spatial::Layer;

use crate::error::{WorldError, WorldResult};

/// An ordered sequence of layers, the published-entity set, and the
/// chunk-keyed entity index that invariant §8 holds over it.
pub struct World<T, A> {
    id: WorldId,
    layers: Vec<Layer<T>>,
    published: IndexSet<EntityId>,
    /// Current chunk key for every published entity — kept so `reindex`
    /// can remove the *old* chunk entry without the caller needing to
    /// remember the entity's previous position.
    entity_chunk: IndexMap<EntityId, String>,
    chunk_entities: IndexMap<String, IndexSet<EntityId>>,
    catalog: ComponentCatalog<A>,
}

impl<T, A> World<T, A> {
    pub fn new(id: WorldId) -> Self {
        let catalog = ComponentCatalog::new(ContainerId::World(id), tactics_component::CapabilityScope::World);
        Self {
            id,
            layers: Vec::new(),
            published: IndexSet::new(),
            entity_chunk: IndexMap::new(),
            chunk_entities: IndexMap::new(),
            catalog,
        }
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn catalog(&self) -> &ComponentCatalog<A> {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut ComponentCatalog<A> {
        &mut self.catalog
    }

    // ── Layers ──────────────────────────────────────────────────────────

    pub fn push_layer(&mut self, layer: Layer<T>) {
        self.layers.push(layer);
    }

    pub fn layer(&self, index: usize) -> Option<&Layer<T>> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer<T>> {
        self.layers.get_mut(index)
    }

    /// Layer 0 — the canonical terrain layer, by convention.
    pub fn terrain(&self) -> Option<&Layer<T>> {
        self.layers.first()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    // ── Published entities & chunk index ───────────────────────────────

    pub fn is_published(&self, entity: EntityId) -> bool {
        self.published.contains(&entity)
    }

    /// Publish `entity` at `position`, indexing it into the chunk `position`
    /// falls in.
    pub fn publish(&mut self, entity: EntityId, position: Vector) -> WorldResult<()> {
        if self.published.contains(&entity) {
            return Err(WorldError::AlreadyPublished(entity));
        }
        let key = chunk_key(position.to_chunk_space());
        self.published.insert(entity);
        self.entity_chunk.insert(entity, key.clone());
        self.chunk_entities.entry(key).or_default().insert(entity);
        Ok(())
    }

    /// Remove `entity` from the published set and its chunk index entry.
    pub fn unpublish(&mut self, entity: EntityId) -> WorldResult<()> {
        if !self.published.shift_remove(&entity) {
            return Err(WorldError::NotPublished(entity));
        }
        if let Some(key) = self.entity_chunk.shift_remove(&entity) {
            if let Some(set) = self.chunk_entities.get_mut(&key) {
                set.shift_remove(&entity);
                if set.is_empty() {
                    self.chunk_entities.shift_remove(&key);
                }
            }
        }
        Ok(())
    }

    /// Update `entity`'s indexed position. Returns `true` if its chunk
    /// changed (the caller uses this to know whether viewer `Scope`s need
    /// re-evaluating).
    pub fn reindex(&mut self, entity: EntityId, new_position: Vector) -> WorldResult<bool> {
        if !self.published.contains(&entity) {
            return Err(WorldError::NotPublished(entity));
        }
        let new_key = chunk_key(new_position.to_chunk_space());
        let old_key = self.entity_chunk.get(&entity).cloned();
        if old_key.as_deref() == Some(new_key.as_str()) {
            return Ok(false);
        }
        if let Some(old_key) = &old_key {
            if let Some(set) = self.chunk_entities.get_mut(old_key) {
                set.shift_remove(&entity);
                if set.is_empty() {
                    self.chunk_entities.shift_remove(old_key);
                }
            }
        }
        self.chunk_entities.entry(new_key.clone()).or_default().insert(entity);
        self.entity_chunk.insert(entity, new_key);
        Ok(true)
    }

    pub fn entities_in_chunk(&self, chunk_space: Vector) -> impl Iterator<Item = EntityId> + '_ {
        self.chunk_entities
            .get(&chunk_key(chunk_space))
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Every published entity within Chebyshev `radius` chunks of
    /// `position`'s chunk, excluding `position`'s own entity when it
    /// matches `exclude`.
    pub fn entities_within(&self, position: Vector, radius: i32, exclude: Option<EntityId>) -> Vec<EntityId> {
        let center = position.to_chunk_space();
        let mut out = Vec::new();
        for chunk in center.chunk_square(radius) {
            if let Some(set) = self.chunk_entities.get(&chunk_key(chunk)) {
                out.extend(set.iter().copied().filter(|id| Some(*id) != exclude));
            }
        }
        out
    }

    pub fn published_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.published.iter().copied()
    }
}

impl<T, A> ComponentContainer<A> for World<T, A> {
    fn container_id(&self) -> ContainerId {
        ContainerId::World(self.id)
    }

    /// A world has no separate publish/unpublish lifecycle of its own — it
    /// exists as a container the moment it's constructed.
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

//! `ComponentCatalog` — per-container component storage and the mechanics
//! of the cross-scope subscription graph.
//!
//! # Design
//!
//! A catalog only knows about itself: it owns the components attached to
//! its container (`all`), the external components listening to *it*
//! (`subscribers`, one map per [`Role`]), and its own components'
//! outgoing subscriptions elsewhere (`subscriptions`, one map per
//! [`CapabilityScope`]). It does not know how to resolve "the world this
//! entity is published in" or otherwise reach another container — that
//! requires a registry (see `tactics-game::Game`), so wiring a
//! subscription to a *remote* catalog is necessarily a two-step dance
//! performed by the caller: resolve the target container id, borrow its
//! catalog, then call [`ComponentCatalog::subscribe`] /
//! `add_subscription` on each side in turn. This sidesteps holding two
//! simultaneous `&mut` catalogs and matches the source's own strategy of
//! storing subscriptions as non-owning `(container_id, role)` keys
//! resolved at dispatch time.

use indexmap::IndexMap;
use tactics_core::container::ContainerId;
use tactics_core::ids::ComponentId;

use crate::component::Component;
use crate::error::{CatalogError, CatalogResult};
use crate::scope::{CapabilityScope, Role};

/// A non-owning back-reference recording that `component` (owned by the
/// catalog at `owner`) listens to the catalog at `to` in role `role`.
#[derive(Clone, Debug)]
pub struct Subscription {
    pub component: ComponentId,
    pub owner: ContainerId,
    pub to: ContainerId,
    pub role: Role,
    pub scope: CapabilityScope,
}

/// Per-container component storage and subscription bookkeeping.
pub struct ComponentCatalog<A> {
    owner: ContainerId,
    parent_scope: CapabilityScope,
    all: IndexMap<ComponentId, Component<A>>,
    subscribers: IndexMap<Role, IndexMap<ComponentId, Subscription>>,
    subscriptions: IndexMap<CapabilityScope, IndexMap<ComponentId, Subscription>>,
}

impl<A> ComponentCatalog<A> {
    pub fn new(owner: ContainerId, parent_scope: CapabilityScope) -> Self {
        Self {
            owner,
            parent_scope,
            all: IndexMap::new(),
            subscribers: IndexMap::new(),
            subscriptions: IndexMap::new(),
        }
    }

    pub fn owner(&self) -> ContainerId {
        self.owner
    }

    pub fn parent_scope(&self) -> CapabilityScope {
        self.parent_scope
    }

    // ── Ownership (`all`) ──────────────────────────────────────────────

    /// Insert `component` into `all`. Fails if its id is already present.
    pub fn insert(&mut self, component: Component<A>) -> CatalogResult<()> {
        let id = component.id();
        if self.all.contains_key(&id) {
            return Err(CatalogError::DuplicateComponent(id));
        }
        self.all.insert(id, component);
        Ok(())
    }

    /// Remove and return `component_id` from `all`, if present.
    pub fn take(&mut self, component_id: ComponentId) -> Option<Component<A>> {
        self.all.shift_remove(&component_id)
    }

    pub fn get(&self, component_id: ComponentId) -> Option<&Component<A>> {
        self.all.get(&component_id)
    }

    pub fn contains(&self, component_id: ComponentId) -> bool {
        self.all.contains_key(&component_id)
    }

    pub fn all(&self) -> impl Iterator<Item = &Component<A>> {
        self.all.values()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Clear every owned component and every subscription, in either
    /// direction. Used for catalog teardown at container destruction.
    pub fn clear(&mut self) {
        self.all.clear();
        self.subscribers.clear();
        self.subscriptions.clear();
    }

    // ── Incoming (`subscribers[role]`) ─────────────────────────────────

    /// Register that `sub.component` (owned elsewhere) listens to this
    /// container in role `sub.role`.
    pub fn add_subscriber(&mut self, sub: Subscription) {
        self.subscribers
            .entry(sub.role)
            .or_default()
            .insert(sub.component, sub);
    }

    pub fn remove_subscriber(&mut self, component_id: ComponentId, role: Role) -> Option<Subscription> {
        self.subscribers.get_mut(&role)?.shift_remove(&component_id)
    }

    pub fn subscribers(&self, role: Role) -> impl Iterator<Item = &Subscription> {
        self.subscribers.get(&role).into_iter().flat_map(|m| m.values())
    }

    // ── Outgoing (`subscriptions[scope]`) ──────────────────────────────

    /// Record that one of our own components subscribes outward, per
    /// `sub.scope`.
    pub fn add_subscription(&mut self, sub: Subscription) {
        self.subscriptions
            .entry(sub.scope)
            .or_default()
            .insert(sub.component, sub);
    }

    pub fn remove_subscription(&mut self, component_id: ComponentId, scope: CapabilityScope) -> Option<Subscription> {
        self.subscriptions.get_mut(&scope)?.shift_remove(&component_id)
    }

    pub fn subscriptions(&self, scope: CapabilityScope) -> impl Iterator<Item = &Subscription> {
        self.subscriptions.get(&scope).into_iter().flat_map(|m| m.values())
    }

    /// Every outgoing subscription across all scopes, in insertion order
    /// within each scope.
    pub fn all_subscriptions(&self) -> impl Iterator<Item = &Subscription> {
        self.subscriptions.values().flat_map(|m| m.values())
    }

    /// Remove every outgoing subscription belonging to `component_id`,
    /// returning them so the caller can unwire the remote side too.
    pub fn take_subscriptions_of(&mut self, component_id: ComponentId) -> Vec<Subscription> {
        let mut taken = Vec::new();
        for map in self.subscriptions.values_mut() {
            if let Some(sub) = map.shift_remove(&component_id) {
                taken.push(sub);
            }
        }
        taken
    }
}

//! `ComponentContainer` — the capability set every scope root implements
//! (spec §3 "ComponentContainer (role)"): `Entity`, `World`, `Player`,
//! `Team`, and `Game` all own exactly one `ComponentCatalog` and expose it
//! through this trait.
//!
//! # Design
//!
//! `get_container_by_scope` only needs to resolve *this* container's own
//! composition edges (an entity knows its own world and owners; a player
//! knows its own team) — it never needs a registry, unlike the
//! subscription-wiring algorithm that consumes its result. That algorithm
//! (turning a resolved `ContainerId` into an actual borrowed catalog) lives
//! in `tactics-game`, same as `ComponentCatalog`'s own doc comment
//! explains for `add_component`/`remove_component`.

use tactics_core::container::ContainerId;

use crate::catalog::ComponentCatalog;
use crate::scope::CapabilityScope;

pub trait ComponentContainer<A> {
    fn container_id(&self) -> ContainerId;

    fn is_published(&self) -> bool;

    fn catalog(&self) -> &ComponentCatalog<A>;

    fn catalog_mut(&mut self) -> &mut ComponentCatalog<A>;

    /// The container reachable from `self` at `scope`, if `self` has an
    /// edge there. Callers should additionally check
    /// [`crate::scope::valid_target_scopes`] before relying on the result
    /// for subscription wiring — a container may have an edge to a scope
    /// a *component* isn't allowed to subscribe to directly.
    fn get_container_by_scope(&self, scope: CapabilityScope) -> Option<ContainerId>;
}

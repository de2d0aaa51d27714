//! `UsingRef` — "the thing this was done with", an entity or a component.
//!
//! Several spec records carry an optional `using` reference that may name
//! either kind of id (`Grant.using`, the action base's `using` field). A
//! plain `Option<EntityId>` can't express "or a component", so this small
//! sum type stands in for the spec's `Entity|Component` union.

use crate::ids::{ComponentId, EntityId};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsingRef {
    Entity(EntityId),
    Component(ComponentId),
}

impl From<EntityId> for UsingRef {
    fn from(id: EntityId) -> Self {
        UsingRef::Entity(id)
    }
}

impl From<ComponentId> for UsingRef {
    fn from(id: ComponentId) -> Self {
        UsingRef::Component(id)
    }
}

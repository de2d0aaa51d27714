//! Capability scopes and listener roles — the vocabulary the subscription
//! graph is built from.

/// The tier a container sits at, and the tier a component can subscribe
/// *outward* to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CapabilityScope {
    Entity,
    World,
    Player,
    Team,
    Game,
}

/// Which listener role a component fills for a given subscription.
///
/// `Roller` mirrors a role named in the source's subscribers table with no
/// call site; it is kept as a reserved, unused variant rather than silently
/// dropped.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    Sensor,
    Modifier,
    Reacter,
    Roller,
}

pub const ALL_ROLES: [Role; 4] = [Role::Sensor, Role::Modifier, Role::Reacter, Role::Roller];

/// Scopes a container at `parent_scope` may subscribe outward to.
///
/// A component's declared target scope must appear in this set or it falls
/// back to subscribing on its own catalog.
pub fn valid_target_scopes(parent_scope: CapabilityScope) -> &'static [CapabilityScope] {
    use CapabilityScope::*;
    match parent_scope {
        Entity => &[World, Player, Team, Game],
        World => &[Game],
        Player => &[Team, Game],
        Team => &[Game],
        Game => &[],
    }
}

//! `Component` — a pluggable behavior attached to exactly one container.
//!
//! # Design
//!
//! Roles (`sensor`/`modifier`/`reacter`) are duck-typed in the source: a
//! component "is" a sensor iff it implements that role's method. We model
//! that with a single trait, [`ComponentBehavior`], whose role methods are
//! all optional (default no-ops / `None`) plus matching `is_*` probes —
//! avoiding a hierarchy of marker traits or an inheritance chain.
//!
//! `ComponentBehavior` is generic over the action type `A` it reacts to
//! rather than naming a concrete `Action` type directly: the pipeline that
//! defines `Action` sits a layer above component storage, and this keeps
//! the dependency pointing one way. Concrete behaviors are written against
//! whatever `A` the layer above instantiates this with.

use tactics_core::container::ContainerId;
use tactics_core::ids::ComponentId;

use crate::scope::{CapabilityScope, Role};

/// Information a sensor reports about what it perceived while handling an
/// action. Left deliberately small — most sensors report nothing more than
/// "yes, I noticed this".
#[derive(Clone, Debug, PartialEq)]
pub enum SensedValue {
    Present,
    Tagged(String),
}

/// The behavior a [`Component`] wraps. All methods are optional; a type
/// implements only the roles it needs and reports its own capabilities via
/// the `is_*` probes.
pub trait ComponentBehavior<A>: Send + Sync {
    /// Record what this component perceived about `action`, if anything.
    fn sense(&self, _action: &A) -> Option<SensedValue> {
        None
    }

    /// Inspect or mutate `action` during the modify phase (vote on
    /// permission, adjust parameters). Any actions returned are executed
    /// as counter-actions, recursed through the pipeline one nesting level
    /// deeper than `action` itself.
    fn modify(&self, _action: &mut A) -> Vec<A> {
        Vec::new()
    }

    /// Observe `action` after it has resolved. Any actions returned are
    /// executed as follow-up reactions, one nesting level deeper.
    fn react(&self, _action: &A) -> Vec<A> {
        Vec::new()
    }

    fn is_sensor(&self) -> bool {
        false
    }

    fn is_modifier(&self) -> bool {
        false
    }

    fn is_reacter(&self) -> bool {
        false
    }
}

/// Per-role scopes a component wants to listen at. `None` means the
/// component does not fill that role at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoleScopes {
    pub sensor: Option<CapabilityScope>,
    pub modifier: Option<CapabilityScope>,
    pub reacter: Option<CapabilityScope>,
}

impl RoleScopes {
    pub fn get(&self, role: Role) -> Option<CapabilityScope> {
        match role {
            Role::Sensor => self.sensor,
            Role::Modifier => self.modifier,
            Role::Reacter => self.reacter,
            Role::Roller => None,
        }
    }
}

/// A behavior attached to exactly one container (its `parent`), carrying
/// the scopes at which it wants to listen for each role it implements.
pub struct Component<A> {
    id: ComponentId,
    parent: ContainerId,
    target_scopes: RoleScopes,
    broadcast: bool,
    behavior: Box<dyn ComponentBehavior<A>>,
}

impl<A> Component<A> {
    pub fn new(parent: ContainerId, target_scopes: RoleScopes, behavior: Box<dyn ComponentBehavior<A>>) -> Self {
        Self {
            id: ComponentId::new(),
            parent,
            target_scopes,
            broadcast: false,
            behavior,
        }
    }

    /// Mark this component visible to clients in `Game::serialize_for_scope`
    /// (spec §6: "Entity serialization includes only components whose
    /// `broadcast` flag is true").
    pub fn with_broadcast(mut self, broadcast: bool) -> Self {
        self.broadcast = broadcast;
        self
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn parent(&self) -> ContainerId {
        self.parent
    }

    pub fn broadcast(&self) -> bool {
        self.broadcast
    }

    pub fn target_scope(&self, role: Role) -> Option<CapabilityScope> {
        self.target_scopes.get(role)
    }

    pub fn is_sensor(&self) -> bool {
        self.behavior.is_sensor()
    }

    pub fn is_modifier(&self) -> bool {
        self.behavior.is_modifier()
    }

    pub fn is_reacter(&self) -> bool {
        self.behavior.is_reacter()
    }

    /// Roles this component fills, in (sensor, modifier, reacter) order.
    pub fn roles(&self) -> Vec<Role> {
        let mut roles = Vec::with_capacity(3);
        if self.is_sensor() {
            roles.push(Role::Sensor);
        }
        if self.is_modifier() {
            roles.push(Role::Modifier);
        }
        if self.is_reacter() {
            roles.push(Role::Reacter);
        }
        roles
    }

    pub fn sense(&self, action: &A) -> Option<SensedValue> {
        self.behavior.sense(action)
    }

    pub fn modify(&self, action: &mut A) -> Vec<A> {
        self.behavior.modify(action)
    }

    pub fn react(&self, action: &A) -> Vec<A> {
        self.behavior.react(action)
    }
}

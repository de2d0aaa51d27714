//! `Action` — the record every variant in §4.4's catalog specializes, and
//! the fixed-order pipeline fields it carries through `execute` (spec
//! §4.3). The pipeline driver itself — `collect_listeners`, sense, modify,
//! apply, react — needs a container registry to resolve `ContainerId`s to
//! live catalogs, so it lives in `tactics-game`; this crate owns the data
//! the driver reads and writes plus the logic that's pure given that data
//! (permission resolution, recursion-depth guard).

use indexmap::{IndexMap, IndexSet};
use tactics_component::{Modification, SensedValue};
use tactics_core::container::ContainerId;
use tactics_core::ids::{ComponentId, EntityId, PlayerId, WorldId};
use tactics_core::using::UsingRef;
use tactics_core::vector::Vector;
use tactics_entity::Grant;
use tactics_nested::NestedChanges;

use crate::permission::{Permission, PermissionTable};

/// Maximum reaction/counter nesting depth (spec §4.3, §8: "any action
/// chain terminates in ≤ 10 levels").
pub const MAX_NESTED_DEPTH: u32 = 10;

/// `true` if an action nested `depth` levels deep is still allowed to
/// recurse (spawn a reaction or counter-action).
pub fn can_recurse(depth: u32) -> bool {
    depth < MAX_NESTED_DEPTH
}

/// What a listener reported back from `sense()` — either a structured
/// reading or a bare presence flag (the caster is recorded this way,
/// spec §4.3 step 4: "The caster is inserted last with value `true`").
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorReading {
    Info(SensedValue),
    Present(bool),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VisibilityChangeKind {
    Add,
    Remove,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityChange {
    pub kind: VisibilityChangeKind,
    pub changes: NestedChanges<EntityId>,
}

/// Fan-out rule `Game.queue_for_broadcast` applies after an action
/// executes (spec §4.6).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BroadcastType {
    None,
    Direct,
    Full,
    #[default]
    SenseGated,
}

/// Initial values for a property created by `AddPropertyAction` — the
/// real `tactics_component::Property` also needs the owning entity id,
/// which is only known once `apply()` resolves `target`.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertySpec {
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

/// The per-variant payload (spec §4.4's catalog table).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    AttachComponent { component: ComponentId },
    PublishEntity { world: WorldId, position: Vector },
    UnpublishEntity,
    ChangeWorld { world: WorldId, position: Vector },
    Move { position: Vector },
    RelativeMove { delta: Vector },
    OwnEntity { player: PlayerId },
    EquipItem { item: EntityId, slot: String },
    AddSlot { name: String },
    RemoveSlot { name: String },
    AddProperty { name: String, spec: PropertySpec },
    RemoveProperty { name: String },
    LearnAbility { ability: String, grant: Grant },
    ForgetAbility { ability: String, granted_by: Option<EntityId>, using: Option<UsingRef> },
    ModifyProperty { name: String, modification: Modification },
    PropertyAdjustment { name: String, amount: f64 },
    SenseEntity { sensed: EntityId },
    LoseEntity { sensed: EntityId },
    Custom { name: String, payload: Option<serde_json::Value> },
}

impl ActionKind {
    /// `PublishEntityAction` sets `movement_action=true` and needs its
    /// world/position preloaded *before* listeners are collected (spec
    /// §4.4's `initialize` note) so yet-unpublished entities still get a
    /// listener in place.
    pub fn additional_listen_points(&self) -> Vec<(WorldId, Vector)> {
        match self {
            ActionKind::PublishEntity { world, position } => vec![(*world, *position)],
            _ => vec![],
        }
    }

    pub fn is_movement(&self) -> bool {
        matches!(self, ActionKind::PublishEntity { .. } | ActionKind::Move { .. } | ActionKind::RelativeMove { .. })
    }
}

/// An abstract pipeline record (spec §4.3). Fields common to every
/// variant; `kind` carries the variant-specific payload.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub caster: Option<EntityId>,
    pub target: Option<EntityId>,
    pub using: Option<UsingRef>,

    pub tags: IndexSet<String>,
    pub breadcrumbs: IndexSet<String>,

    pub public: bool,
    pub absolute: bool,

    pub permissions: PermissionTable,
    pub permitted: bool,
    pub deciding_permission: Option<Permission>,

    pub nested: u32,
    pub movement_action: bool,

    pub anticipators: IndexSet<ComponentId>,
    pub sensors: IndexMap<ContainerId, SensorReading>,
    pub visibility_changes: Option<VisibilityChange>,

    pub listeners: Vec<ContainerId>,
    pub listener_ids: IndexSet<ContainerId>,
    pub additional_listen_points: Vec<(WorldId, Vector)>,
    pub additional_listeners: Vec<ContainerId>,

    pub broadcast_type: BroadcastType,
    pub applied: bool,

    pub kind: ActionKind,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        let movement_action = kind.is_movement();
        let additional_listen_points = kind.additional_listen_points();
        Self {
            caster: None,
            target: None,
            using: None,
            tags: IndexSet::new(),
            breadcrumbs: IndexSet::new(),
            public: true,
            absolute: false,
            permissions: PermissionTable::new(),
            permitted: true,
            deciding_permission: None,
            nested: 0,
            movement_action,
            anticipators: IndexSet::new(),
            sensors: IndexMap::new(),
            visibility_changes: None,
            listeners: Vec::new(),
            listener_ids: IndexSet::new(),
            additional_listen_points,
            additional_listeners: Vec::new(),
            broadcast_type: BroadcastType::default(),
            applied: false,
            kind,
        }
    }

    pub fn with_caster(mut self, caster: EntityId) -> Self {
        self.caster = Some(caster);
        self
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_using(mut self, using: impl Into<UsingRef>) -> Self {
        self.using = Some(using.into());
        self
    }

    /// Record a listener, deduplicated by id (spec §8: "for each listener
    /// added, `listener.id` appears in `listener_ids` exactly once").
    /// Returns `true` if this was a new listener.
    pub fn add_listener(&mut self, id: ContainerId) -> bool {
        if self.listener_ids.insert(id) {
            self.listeners.push(id);
            true
        } else {
            false
        }
    }

    pub fn permit(&mut self, priority: i32, by: Option<ContainerId>, using: Option<UsingRef>, message: Option<String>) {
        self.permissions.record(priority, Permission { permitted: true, by, using, message });
    }

    pub fn deny(&mut self, priority: i32, by: Option<ContainerId>, using: Option<UsingRef>, message: Option<String>) {
        self.permissions.record(priority, Permission { permitted: false, by, using, message });
    }

    /// Resolve `permissions` into `permitted`/`deciding_permission` (spec
    /// §4.3 step 6).
    pub fn decide_permission(&mut self) {
        let (permitted, deciding) = self.permissions.decide();
        self.permitted = permitted;
        self.deciding_permission = deciding;
    }

    /// Whether `apply()` should run this pipeline pass (spec §4.3 step 7).
    pub fn should_apply(&self, force: bool) -> bool {
        force || self.permitted
    }

    /// Whether this action (at its current nesting depth) may still spawn
    /// a reaction or counter-action (spec §4.3 step 11, §8).
    pub fn can_recurse(&self) -> bool {
        can_recurse(self.nested)
    }

    /// Build the reaction/counter-action that follows from this one,
    /// bumping the nesting counter (spec §4.3: "recursively `execute` with
    /// `a'.nested = self.nested + 1`").
    pub fn nested_action(&self, kind: ActionKind) -> Action {
        let mut a = Action::new(kind);
        a.nested = self.nested + 1;
        a
    }
}

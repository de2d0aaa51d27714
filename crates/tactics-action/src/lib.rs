//! `tactics-action` — the `Action` record, permission resolution, and the
//! event queue abilities enqueue into.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|---------------------------------------------------------------|
//! | [`action`]    | `Action`, `ActionKind`, `SensorReading`, `BroadcastType`       |
//! | [`permission`]| `Permission`, `PermissionTable`                                |
//! | [`queue`]     | `Event`, `ActionQueue`                                         |
//! | [`error`]     | `ActionError`, `ActionResult<T>`                                |
//!
//! # What lives where
//!
//! This crate owns the *data* every action carries through the pipeline
//! (spec §4.3) and the logic that's pure given that data: building an
//! `Action`, recording `permit`/`deny` calls into a `PermissionTable`,
//! resolving `decide_permission`, and the recursion-depth guard. The
//! pipeline *driver* — `collect_listeners`, and the sense/modify/apply/
//! react dispatch that visits each listener's catalog — needs a container
//! registry to turn a `ContainerId` into a live `Entity`/`World`/`Player`/
//! `Team`, so it lives in `tactics-game`.

pub mod action;
pub mod error;
pub mod permission;
pub mod queue;


pub use action::{
    can_recurse, Action, ActionKind, BroadcastType, PropertySpec, SensorReading, VisibilityChange, VisibilityChangeKind,
    MAX_NESTED_DEPTH,
};
pub use error::{ActionError, ActionResult};
pub use permission::{Permission, PermissionTable};
pub use queue::{ActionQueue, Event};

//! `tactics-component` — component storage, Property/Value modification
//! chains, and the mechanics of the cross-scope subscription graph.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|-----------------------------------------------------------------|
//! | [`property`] | `Property`, `Modification` — named numeric stats                |
//! | [`component`]| `ComponentBehavior`, `Component<A>`, `RoleScopes`, `SensedValue` |
//! | [`catalog`]  | `ComponentCatalog<A>`, `Subscription`                            |
//! | [`scope`]    | `CapabilityScope`, `Role`, `valid_target_scopes`                 |
//! | [`container`]| `ComponentContainer<A>` — the role every scope root implements   |
//! | [`error`]    | `CatalogError`, `CatalogResult<T>`                               |
//!
//! # Subscription wiring (summary)
//!
//! The full `add_component`/`remove_component` algorithm — resolving a
//! component's declared target scope to a concrete remote container, or
//! falling back to a local subscription when the scope is invalid or the
//! parent is unpublished — lives one layer up, in `tactics-game`, where a
//! registry can resolve container ids to catalogs. This crate provides the
//! primitives that algorithm is built from: owning storage (`all`),
//! incoming listeners (`subscribers[role]`), and outgoing back-references
//! (`subscriptions[scope]`).

pub mod catalog;
pub mod component;
pub mod container;
pub mod error;
pub mod property;
pub mod scope;


pub use catalog::{ComponentCatalog, Subscription};
pub use component::{Component, ComponentBehavior, RoleScopes, SensedValue};
pub use container::ComponentContainer;
pub use error::{CatalogError, CatalogResult};
pub use property::{Modification, Property};
pub use scope::{valid_target_scopes, CapabilityScope, Role, ALL_ROLES};

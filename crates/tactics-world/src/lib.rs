//! `tactics-world` — the spatial index over published entities and the
//! per-viewer visibility bookkeeping built on top of it.
//!
//! # Crate layout
//!
//! | Module               | Contents                                          |
//! |-----------------------|---------------------------------------------------|
//! | [`world`]             | `World<T, A>` — layer stack + chunk-indexed entities + catalog |
//! | [`scope`]              | `Scope`, `ScopeChange` — per-viewer chunk visibility |
//! | [`legacy_visibility`]  | The §4.7 visibility lattice, kept for old tests   |
//! | [`error`]              | `WorldError`, `WorldResult<T>`                    |

pub mod error;
pub mod legacy_visibility;
pub mod scope;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::{WorldError, WorldResult};
pub use scope::{Scope, ScopeChange};
pub use world::World;

//! `tactics-core` — foundational types for the tactics simulation engine.
//!
//! This crate is a dependency of every other `tactics-*` crate. It
//! intentionally has no `tactics-*` dependencies and minimal external ones
//! (only `uuid` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]       | `EntityId`, `ComponentId`, `PlayerId`, `TeamId`, `WorldId` |
//! | [`container`] | `ContainerId` — non-owning tag naming any scope root       |
//! | [`using`]     | `UsingRef` — "an entity or a component" sum type           |
//! | [`vector`]    | `Vector`, chunk-space arithmetic, `chunk_key`              |
//! | [`config`]    | `EngineConfig`, `PerceptionGrouping`                       |
//! | [`error`]     | `EngineError`, `EngineResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.    |

pub mod config;
pub mod container;
pub mod error;
pub mod ids;
pub mod using;
pub mod vector;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EngineConfig, PerceptionGrouping};
pub use container::ContainerId;
pub use error::{EngineError, EngineResult};
pub use ids::{ComponentId, EntityId, PlayerId, TeamId, WorldId};
pub use using::UsingRef;
pub use vector::{chunk_key, parse_chunk_key, Vector, CHUNK_WIDTH};

//! Root error taxonomy.
//!
//! Sub-crates define their own narrower error enums (see `DESIGN.md`'s
//! grounding ledger) and convert into `EngineError` via `From` at the
//! `tactics-game` boundary, or keep them separate and wrap `EngineError` as
//! one variant — both patterns are used elsewhere in this workspace.
//!
//! Spec §7 distinguishes invariant violations (fatal, never caught) from
//! validation errors (surfaced as a message to the client, no state
//! change) from deserialization failures (abort the enclosing message).
//! `EngineError` covers the latter two; invariant violations are raised as
//! plain `panic!`s per spec §7/§8 ("Chunk access at (-1,0): invariant
//! violation") since by definition no caller should ever catch them.

use thiserror::Error;

/// The top-level error type for validation and deserialization failures.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("entity {0} not found")]
    EntityNotFound(String),

    #[error("world {0} not found")]
    WorldNotFound(String),

    #[error("player {0} not found")]
    PlayerNotFound(String),

    #[error("team {0} not found")]
    TeamNotFound(String),

    #[error("component {0} not found")]
    ComponentNotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("deserialization failed: {0}")]
    Deserialize(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for the engine's validation/deserialization paths.
pub type EngineResult<T> = Result<T, EngineError>;

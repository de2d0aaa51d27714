//! `tactics-game` — the `Game` root registry, the action pipeline driver,
//! broadcast fan-out, and the client-facing message envelope.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                          |
//! |----------------|--------------------------------------------------------------------|
//! | [`game`]       | `Game<T>` — the registries every world/entity/player/team lives in |
//! | [`subscription`] | Component attach/detach and the subscription-wiring algorithm     |
//! | [`pipeline`]   | `execute`, `run_tick`, `collect_listeners`, the `apply()` dispatch  |
//! | [`ability`]    | `Ability` trait, `CastArgs`, `Game::cast`                           |
//! | [`message`]    | The `CONNECTION`/`CAST`/`ACTION` JSON message envelope              |
//! | [`serialize`]  | `Game::serialize_for_scope` — the client-visible snapshot boundary  |
//! | [`observer`]   | `GameObserver` tick-boundary instrumentation hook                   |
//! | [`error`]      | `GameError`, `GameResult<T>`                                        |
//!
//! # Design
//!
//! `Game` is the only singleton this engine has (everything else is
//! reachable from it); the pipeline driver lives here rather than in
//! `tactics-action` because walking `collect_listeners`/sense/modify/apply/
//! react requires resolving `ContainerId`s against live registries, which
//! only `Game` owns.

pub mod ability;
pub mod error;
pub mod game;
pub mod message;
pub mod observer;
pub mod pipeline;
pub mod serialize;
pub mod subscription;

#[cfg(test)]
mod tests;

pub use ability::{Ability, CastArgs};
pub use error::{GameError, GameResult};
pub use game::Game;
pub use message::{CastRejection, CasterType, ClientMessage, ServerMessage};
pub use observer::{GameObserver, NoopObserver};
pub use serialize::{EntitySnapshot, GameSnapshot, PlayerSnapshot, PropertySnapshot, TeamSnapshot, WorldSnapshot};

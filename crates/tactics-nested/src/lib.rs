//! `tactics-nested` — the incremental rollup tree behind sensed-entity
//! aggregation and scope propagation.
//!
//! # Crate layout
//!
//! | Module      | Contents                                    |
//! |-------------|----------------------------------------------|
//! | [`nested`]  | `NestedMap<K, V>` — the rollup tree itself   |
//! | [`changes`] | `NestedChanges<K>` — the delta report an `add`/`remove` returns |
//! | [`error`]   | `NestedError`, `NestedResult<T>`              |
//!
//! # Model (summary)
//!
//! Nodes form a DAG: every node has zero or more parents and children, plus
//! a `local` map of ids it contributes directly. A node's *effective*
//! contents are its local ids plus everything rolled up from its children,
//! transitively. `NestedMap` tracks this with a per-node refcount so that
//! `add`/`remove` only touch the ancestor chain of the node that changed,
//! and only emit a [`NestedChanges`] entry where presence actually flipped
//! (0 → 1 or 1 → 0), never on redundant re-adds from a sibling path.

pub mod changes;
pub mod error;
pub mod nested;

#[cfg(test)]
mod tests;

pub use changes::NestedChanges;
pub use error::{NestedError, NestedResult};
pub use nested::NestedMap;

//! `tactics-spatial` — the 16×16 chunk grid backing every world layer.
//!
//! # Crate layout
//!
//! | Module    | Contents                                    |
//! |-----------|----------------------------------------------|
//! | [`chunk`] | `Chunk<T>` — fixed 16×16 tile grid             |
//! | [`layer`] | `Layer<T>` — sparse chunk-keyed tile storage   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Chunk<T>`.       |

pub mod chunk;
pub mod layer;


pub use chunk::Chunk;
pub use layer::Layer;

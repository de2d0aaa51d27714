//! `Chunk<T>` — a fixed 16×16 grid of tile values.
//!
//! # Design
//!
//! A chunk stores its 256 tiles in a single flat `Vec<T>` indexed by
//! `rel.y * 16 + rel.x`, where `rel` is the tile's position relative to the
//! chunk's origin (`0..16` on both axes). Out-of-bounds access is an
//! invariant violation per spec §3/§8 — it panics rather than returning a
//! `Result`, because by construction every caller has already translated an
//! absolute coordinate into chunk-relative space via
//! [`Layer`][crate::Layer]'s `setTile`/`getTile`, and a relative coordinate
//! outside `0..16` can only mean a caller bug.

use tactics_core::vector::{Vector, CHUNK_WIDTH};

/// A 16×16 grid of `T`, addressed by chunk-relative coordinates.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chunk<T> {
    tiles: Vec<T>,
}

impl<T: Clone> Chunk<T> {
    /// Build a new chunk with every tile set to `fill`.
    pub fn filled(fill: T) -> Self {
        Self {
            tiles: vec![fill; (CHUNK_WIDTH * CHUNK_WIDTH) as usize],
        }
    }

    /// Chunk-relative tile lookup.
    ///
    /// # Panics
    /// Panics if `rel.x` or `rel.y` is outside `0..16` — an invariant
    /// violation (spec §8: "Chunk access at (-1,0) or (16,0)").
    pub fn get(&self, rel: Vector) -> &T {
        &self.tiles[Self::index(rel)]
    }

    /// Mutable chunk-relative tile lookup. Panics under the same condition
    /// as [`Chunk::get`].
    pub fn get_mut(&mut self, rel: Vector) -> &mut T {
        let idx = Self::index(rel);
        &mut self.tiles[idx]
    }

    /// Overwrite the tile at chunk-relative `rel`. Panics under the same
    /// condition as [`Chunk::get`].
    pub fn set(&mut self, rel: Vector, value: T) {
        *self.get_mut(rel) = value;
    }

    fn index(rel: Vector) -> usize {
        if rel.x < 0 || rel.x >= CHUNK_WIDTH || rel.y < 0 || rel.y >= CHUNK_WIDTH {
            panic!(
                "invariant violation: chunk-relative coordinate {rel} out of bounds (0..{CHUNK_WIDTH})"
            );
        }
        (rel.y * CHUNK_WIDTH + rel.x) as usize
    }
}

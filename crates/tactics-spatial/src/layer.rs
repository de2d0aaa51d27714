//! `Layer<T>` — sparse chunk storage addressed by absolute tile coordinate.
//!
//! # Design
//!
//! A `Layer` only allocates a [`Chunk`] the first time a tile within it is
//! written. Reading a tile whose chunk was never allocated yields "unset"
//! (`None`) rather than panicking — the spec is explicit that a missing
//! chunk is a normal, common case (most of a world's chunk-space is empty
//! at any given time), not an error.

use indexmap::IndexMap;

use tactics_core::vector::{chunk_key, Vector};

use crate::chunk::Chunk;

/// A sparse 2-D grid of `T`, backed by on-demand [`Chunk`]s.
///
/// Layer 0 is the canonical terrain layer in a [`World`][crate::World]'s
/// layer stack; further layers may hold overlays (fog, paint, whatever the
/// embedding application needs) with their own `fill` default.
pub struct Layer<T> {
    chunks: IndexMap<String, Chunk<T>>,
    /// Default value a freshly allocated chunk is filled with.
    fill: T,
}

impl<T: Clone> Layer<T> {
    /// Create an empty layer whose chunks, once allocated, start filled
    /// with `fill`.
    pub fn new(fill: T) -> Self {
        Self {
            chunks: IndexMap::new(),
            fill,
        }
    }

    /// Read the tile at absolute coordinate `pos`.
    ///
    /// Returns `None` if the containing chunk was never allocated — this is
    /// "unset", not an error.
    pub fn get_tile(&self, pos: Vector) -> Option<&T> {
        let key = chunk_key(pos.to_chunk_space());
        self.chunks.get(&key).map(|c| c.get(pos.to_chunk_relative()))
    }

    /// Write the tile at absolute coordinate `pos`, allocating its chunk
    /// (filled with [`Layer::fill`]) if it does not already exist.
    pub fn set_tile(&mut self, pos: Vector, value: T) {
        let key = chunk_key(pos.to_chunk_space());
        let fill = self.fill.clone();
        self.chunks
            .entry(key)
            .or_insert_with(|| Chunk::filled(fill))
            .set(pos.to_chunk_relative(), value);
    }

    /// Access the chunk at chunk-space coordinate `chunk_space`, if it has
    /// been allocated.
    pub fn chunk(&self, chunk_space: Vector) -> Option<&Chunk<T>> {
        self.chunks.get(&chunk_key(chunk_space))
    }

    /// `true` iff a chunk has been allocated at `chunk_space`.
    pub fn has_chunk(&self, chunk_space: Vector) -> bool {
        self.chunks.contains_key(&chunk_key(chunk_space))
    }

    /// Allocate the chunk at `chunk_space` (filled with [`Layer::fill`]) if
    /// it does not already exist. Used by `World::add_view` to preload
    /// chunks entering a viewer's scope, independent of any tile write.
    pub fn ensure_chunk(&mut self, chunk_space: Vector) {
        let fill = self.fill.clone();
        self.chunks
            .entry(chunk_key(chunk_space))
            .or_insert_with(|| Chunk::filled(fill));
    }

    /// Number of allocated chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

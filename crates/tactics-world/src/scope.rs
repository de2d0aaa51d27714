//! `Scope` — per (viewer owner × world) chunk-viewer bookkeeping.
//!
//! # Design
//!
//! `add_viewer`/`remove_viewer` take both the new and old position so they
//! only touch the *delta* between the two Chebyshev squares: a chunk that
//! stays in view across a move is never redundantly re-inserted, and only
//! chunks whose viewer set flips between empty and non-empty are reported
//! in the returned [`ScopeChange`] — that flip is what drives chunk
//! load/unload reference counting (spec §5) and, one layer up, publish/
//! unpublish side effects (spec §4.6).

use indexmap::{IndexMap, IndexSet};
use tactics_core::ids::WorldId;
use tactics_core::vector::{chunk_key, Vector};

/// Chunk keys whose active status flipped as the result of one
/// `add_viewer`/`remove_viewer` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeChange {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ScopeChange {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

fn chunk_square_keys(position: Vector, radius: i32) -> IndexSet<String> {
    position
        .to_chunk_space()
        .chunk_square(radius)
        .into_iter()
        .map(chunk_key)
        .collect()
}

/// Per (viewer owner × world) visibility bookkeeping.
pub struct Scope {
    world: WorldId,
    active: IndexSet<String>,
    chunk_viewers: IndexMap<String, IndexSet<String>>,
}

impl Scope {
    pub fn new(world: WorldId) -> Self {
        Self {
            world,
            active: IndexSet::new(),
            chunk_viewers: IndexMap::new(),
        }
    }

    pub fn world(&self) -> WorldId {
        self.world
    }

    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(String::as_str)
    }

    pub fn is_active(&self, chunk: &str) -> bool {
        self.active.contains(chunk)
    }

    pub fn viewers_of(&self, chunk: &str) -> impl Iterator<Item = &str> {
        self.chunk_viewers.get(chunk).into_iter().flat_map(|s| s.iter().map(String::as_str))
    }

    /// Bring `viewer` into view of the Chebyshev square of `view_distance`
    /// chunks around `to`. If `from` is given (a move, not a fresh publish)
    /// only the chunks newly covered by `to` but not already covered by
    /// `from` are touched.
    pub fn add_viewer(&mut self, viewer: &str, to: Vector, from: Option<Vector>, view_distance: i32) -> ScopeChange {
        let new_chunks = chunk_square_keys(to, view_distance);
        let old_chunks = from.map(|f| chunk_square_keys(f, view_distance)).unwrap_or_default();

        let mut change = ScopeChange::default();
        for chunk in new_chunks {
            if old_chunks.contains(&chunk) {
                continue;
            }
            let viewers = self.chunk_viewers.entry(chunk.clone()).or_default();
            let was_empty = viewers.is_empty();
            viewers.insert(viewer.to_string());
            if was_empty {
                self.active.insert(chunk.clone());
                change.added.push(chunk);
            }
        }
        change
    }

    /// Drop `viewer` from the Chebyshev square of `view_distance` chunks
    /// around `from`. If `to` is given (a move) chunks also covered by the
    /// new position are left untouched.
    pub fn remove_viewer(&mut self, viewer: &str, from: Vector, to: Option<Vector>, view_distance: i32) -> ScopeChange {
        let old_chunks = chunk_square_keys(from, view_distance);
        let new_chunks = to.map(|t| chunk_square_keys(t, view_distance)).unwrap_or_default();

        let mut change = ScopeChange::default();
        for chunk in old_chunks {
            if new_chunks.contains(&chunk) {
                continue;
            }
            let Some(viewers) = self.chunk_viewers.get_mut(&chunk) else {
                continue;
            };
            viewers.shift_remove(viewer);
            if viewers.is_empty() {
                self.chunk_viewers.shift_remove(&chunk);
                self.active.shift_remove(&chunk);
                change.removed.push(chunk);
            }
        }
        change
    }
}

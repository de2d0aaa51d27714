//! Integer world coordinates and tile↔chunk-space arithmetic.
//!
//! # Design
//!
//! Positions are always integer tile coordinates. Chunk width is a fixed
//! constant (16); a tile's chunk-space coordinate is `floor(tile / 16)`,
//! which for negative coordinates is *not* the same as truncating division
//! (`-1 / 16 == 0` in Rust, but `floor(-1.0 / 16.0) == -1`) — `div_euclid`
//! gives us the floor behaviour directly.

use std::fmt;

/// Width (and height) of a chunk, in tiles.
pub const CHUNK_WIDTH: i32 = 16;

/// An integer 2-D world coordinate (tile space).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The chunk-space coordinate containing this tile: `floor(tile / 16)`.
    #[inline]
    pub fn to_chunk_space(self) -> Vector {
        Vector::new(
            self.x.div_euclid(CHUNK_WIDTH),
            self.y.div_euclid(CHUNK_WIDTH),
        )
    }

    /// This tile's position relative to the chunk it falls in, in `0..16`.
    #[inline]
    pub fn to_chunk_relative(self) -> Vector {
        Vector::new(
            self.x.rem_euclid(CHUNK_WIDTH),
            self.y.rem_euclid(CHUNK_WIDTH),
        )
    }

    /// `true` iff `self` and `other` fall in different chunks.
    #[inline]
    pub fn different_chunk(self, other: Vector) -> bool {
        self.to_chunk_space() != other.to_chunk_space()
    }

    /// Chebyshev (king-move) distance between two tiles: `max(|dx|, |dy|)`.
    /// This is the metric the spec uses for view distance and listen
    /// distance — a square "radius", not a circle.
    #[inline]
    pub fn chebyshev_distance(self, other: Vector) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// `true` iff `other` lies within Chebyshev `radius` tiles of `self`.
    #[inline]
    pub fn within_chebyshev(self, other: Vector, radius: i32) -> bool {
        self.chebyshev_distance(other) <= radius
    }

    /// All chunk-space keys within Chebyshev `radius` chunks of this
    /// chunk-space coordinate (inclusive), as `"x,y"` keys.
    ///
    /// `self` is expected to already be in chunk space (the caller converts
    /// via [`Vector::to_chunk_space`] first); this is the primitive that
    /// both `Scope::add_viewer`/`remove_viewer` and `World`'s
    /// entities-within-radius queries build on.
    pub fn chunk_square(self, radius: i32) -> Vec<Vector> {
        let mut out = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                out.push(Vector::new(self.x + dx, self.y + dy));
            }
        }
        out
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;
    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vector {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Format a chunk-space coordinate as the `"x,y"` key used to index chunks
/// within a `Layer` and viewer sets within a `Scope`.
#[inline]
pub fn chunk_key(chunk_space: Vector) -> String {
    format!("{},{}", chunk_space.x, chunk_space.y)
}

/// Parse a `"x,y"` chunk key back into a chunk-space `Vector`. Returns
/// `None` for malformed keys — callers treat this as "unset", never panic,
/// matching the spec's `Layer` semantics for missing chunks.
pub fn parse_chunk_key(key: &str) -> Option<Vector> {
    let (x_str, y_str) = key.split_once(',')?;
    Some(Vector::new(x_str.parse().ok()?, y_str.parse().ok()?))
}

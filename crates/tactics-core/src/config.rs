//! Top-level engine configuration.
//!
//! Plain, serde-derived data — exactly like the teacher's `SimConfig`, the
//! engine crate only defines the shape and its defaults; an embedding
//! application is responsible for loading it from TOML/JSON/wherever and
//! handing a `Game` the finished value.

/// Which tier of the player/team hierarchy drives visibility and
/// sense-gated broadcast. See spec §3 ("Player / Team").
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PerceptionGrouping {
    Player,
    Team,
}

impl Default for PerceptionGrouping {
    fn default() -> Self {
        PerceptionGrouping::Player
    }
}

/// Per-`Game` configuration (spec §6).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Chebyshev chunk radius of a player's active `Scope` around each of
    /// their entities. Default: 6.
    pub view_distance: i32,

    /// Chebyshev chunk radius kept active around entities that are
    /// published but not currently `active`. Default: 1.
    pub inactive_view_distance: i32,

    /// Chebyshev tile radius used by `collect_listeners` when gathering
    /// nearby entities for the action pipeline. Default: 25.
    pub listen_distance: i32,

    /// Which tier (`player` or `team`) drives visibility/broadcast
    /// rollups. Default: `player`.
    pub perception_grouping: PerceptionGrouping,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            view_distance: 6,
            inactive_view_distance: 1,
            listen_distance: 25,
            perception_grouping: PerceptionGrouping::default(),
        }
    }
}

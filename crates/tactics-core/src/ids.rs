//! Strongly typed, process-wide identifiers.
//!
//! Spec: every entity, component, player, team, world, and chunk has a
//! stable string identifier (a 128-bit UUID as text), immutable and unique
//! process-wide. Rather than passing `uuid::Uuid` around bare — which would
//! let an `EntityId` and a `TeamId` be silently swapped at a call site —
//! each scope gets its own newtype wrapper via the `typed_id!` macro below.

use std::fmt;

use uuid::Uuid;

/// Generate a typed ID wrapper around `uuid::Uuid`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub Uuid);

        impl $name {
            /// Allocate a fresh, randomly generated id.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            /// A fresh random id — there is no sentinel "invalid" `Uuid`,
            /// unlike the dense-index ids this type replaces.
            #[inline]
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

typed_id! {
    /// Identifies an `Entity`.
    pub struct EntityId;
}

typed_id! {
    /// Identifies a `Component` (attached to exactly one catalog at a time).
    pub struct ComponentId;
}

typed_id! {
    /// Identifies a `Player`.
    pub struct PlayerId;
}

typed_id! {
    /// Identifies a `Team`.
    pub struct TeamId;
}

typed_id! {
    /// Identifies a `World`.
    pub struct WorldId;
}

//! The legacy visibility lattice (spec §4.7).
//!
//! Kept alongside the primary `NestedChanges`/`Scope` visibility path
//! because some older dispatch tests reference it (spec §9 Open Questions).
//! Not wired into the broadcast path — `tactics-game` decides who sees an
//! action via sensed-entity/ownership rollup, not this lattice.

/// `NOT_VISIBLE < CASTER_UNKNOWN < TARGET_UNKNOWN < VISIBLE`, plus a
/// `Defer` sentinel meaning "ask the next level up (entity → player →
/// team)".
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Visibility {
    NotVisible,
    CasterUnknown,
    TargetUnknown,
    Visible,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VisibilityCheck {
    Defer,
    Resolved(Visibility),
}

impl Visibility {
    /// `CASTER_UNKNOWN ⊔ TARGET_UNKNOWN = VISIBLE`; otherwise the join is
    /// just the greater of the two.
    pub fn join(self, other: Visibility) -> Visibility {
        use Visibility::*;
        match (self, other) {
            (CasterUnknown, TargetUnknown) | (TargetUnknown, CasterUnknown) => Visible,
            _ => self.max(other),
        }
    }
}

/// Escalate entity → player → team, taking the maximum of resolved levels;
/// a `Defer` at any level is skipped in favor of the next one, and if every
/// level defers the result is `NOT_VISIBLE`.
pub fn escalate(levels: [VisibilityCheck; 3]) -> Visibility {
    levels
        .into_iter()
        .filter_map(|level| match level {
            VisibilityCheck::Defer => None,
            VisibilityCheck::Resolved(v) => Some(v),
        })
        .fold(Visibility::NotVisible, Visibility::join)
}

use thiserror::Error;

/// Validation-level failures (spec §7's "validation error" tier) —
/// recoverable, reported back to the client, no state change. Fatal
/// invariant violations (singleton re-construction, out-of-bounds tile)
/// live closer to where the invariant is enforced, not here.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("unknown action variant {0:?}")]
    UnknownVariant(String),

    #[error("action references unknown id {0}")]
    UnknownReference(String),

    #[error("recursion limit exceeded at depth {0}")]
    RecursionLimitExceeded(u32),
}

pub type ActionResult<T> = Result<T, ActionError>;

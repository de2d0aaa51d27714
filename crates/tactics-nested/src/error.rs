use thiserror::Error;

#[derive(Debug, Error)]
pub enum NestedError {
    #[error("node {0} not found")]
    NodeNotFound(String),

    #[error("adding {child} as a child of {parent} would create a cycle")]
    Cycle { child: String, parent: String },
}

pub type NestedResult<T> = Result<T, NestedError>;

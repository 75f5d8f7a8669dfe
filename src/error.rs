use thiserror::Error;

/// Errors reported by tree operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A single removal was requested for a value the tree does not hold.
    #[error("value not found in tree")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error taxonomy shared by the engines and the HTTP services.

use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input reached the engine (blank id, title, or collection name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A translation was requested for an item or collection with no
    /// default-locale anchor.
    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, Error>;

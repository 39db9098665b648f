//! Error types.

/// Result type for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to read a value from a pattern.
#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum GetError {
    /// The object is not present in the pattern.
    #[error("object not present in pattern")]
    NoMatch,
    /// The object is present but the index is out of range.
    #[error("value index out of range")]
    NoId,
    /// The value exists but has a different type than requested.
    #[error("value has a different type")]
    TypeMismatch,
}

/// Failure to construct a rule or register an object.
#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown object {0:?}")]
    UnknownObject(String),

    #[error("edit of {object} with a value of type {found}")]
    InvalidEditType {
        object: String,
        found: &'static str,
    },

    #[error("object {0:?} is already defined")]
    DuplicateObject(String),

    #[error("invalid value {value:?} for {object}")]
    InvalidValue { object: String, value: String },
}

/// All the errors surfaced by the core APIs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Get(#[from] GetError),

    #[error("font data was not recognized by any loader")]
    InvalidFont,

    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported cache version {found} (expected {expected})")]
    CacheVersionMismatch { expected: u8, found: u8 },

    #[error("corrupt cache: {0}")]
    CacheCorrupt(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

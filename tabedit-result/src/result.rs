use crate::error::Error;

/// Result type alias used throughout tabedit.
pub type Result<T> = std::result::Result<T, Error>;

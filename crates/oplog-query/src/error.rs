use std::fmt;

/// Result type for oplog-query operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while translating operator input
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Duration unit not in the accepted set (s, m, h, d, w, M, y)
    InvalidUnit(char),

    /// Duration string did not have the `<integer><unit>` shape
    InvalidDuration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidUnit(unit) => {
                write!(f, "invalid duration unit '{}': expected one of s, m, h, d, w, M, y", unit)
            }
            Error::InvalidDuration(spec) => {
                write!(f, "invalid duration '{}': expected <integer><unit>", spec)
            }
        }
    }
}

impl std::error::Error for Error {}

use std::fmt;

/// Errors raised by the trip log. An empty report is not an error, see `aggregate::Report`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Record rejected before anything was written
    Validation(String),
    /// CSV header does not carry the expected columns
    Schema(String),
    /// Underlying file or CSV failure, the operation was aborted
    Storage(String),
    /// Configuration file exists but cannot be read or understood
    Config(String),
    /// Command text does not match any known command
    Parse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Validation(s) => write!(f, "invalid record: {}", s),
            Error::Schema(s) => write!(f, "schema error: {}", s),
            Error::Storage(s) => write!(f, "storage error: {}", s),
            Error::Config(s) => write!(f, "config error: {}", s),
            Error::Parse(s) => write!(f, "unable to parse command: {}", s),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Storage(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Storage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = Error::Validation("amount must not be negative".to_string());
        assert_eq!(e.to_string(), "invalid record: amount must not be negative");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(Error::from(io), Error::Storage(_)));
    }
}

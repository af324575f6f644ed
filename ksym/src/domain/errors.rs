//! Structured error types for ksym
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! Malformed source lines and unresolved addresses are deliberately absent:
//! the builder skips the former and lookups return `None` for the latter.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KsymError {
    /// The source does not exist, e.g. a kernel built without module support.
    #[error("Symbol source {0} is not present")]
    SourceAbsent(String),

    #[error("Failed to open symbol source {source_name}: {source}")]
    SourceOpenFailed {
        source_name: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot allocate {0}")]
    AllocationFailed(&'static str),

    #[error("Failed to read symbol source: {0}")]
    Read(#[from] io::Error),
}

impl KsymError {
    /// Expected on systems without the kernel feature; never fatal.
    #[must_use]
    pub fn is_source_absent(&self) -> bool {
        matches!(self, KsymError::SourceAbsent(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("Empty address")]
    Empty,

    #[error("Invalid hexadecimal address: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_open_failed_display() {
        let err = KsymError::SourceOpenFailed {
            source_name: "/proc/kallsyms".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/proc/kallsyms"));
        assert!(msg.contains("permission denied"));
        assert!(!err.is_source_absent());
    }

    #[test]
    fn test_source_absent() {
        let err = KsymError::SourceAbsent("/proc/kallsyms".to_string());
        assert!(err.is_source_absent());
        assert_eq!(err.to_string(), "Symbol source /proc/kallsyms is not present");
    }

    #[test]
    fn test_read_error_from_io() {
        let err: KsymError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, KsymError::Read(_)));
    }
}

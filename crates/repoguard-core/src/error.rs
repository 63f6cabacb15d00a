//! # Error Hierarchy
//!
//! Structured errors for every repoguard check, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every variant that originates from a file carries the offending path so
//! a failure inside a large closure walk can be traced back to the exact
//! project or filter descriptor that broke it.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for results carrying a [`RepoError`].
pub type RepoResult<T> = Result<T, RepoError>;

/// Top-level error type for repository convention checks.
#[derive(Error, Debug)]
pub enum RepoError {
    /// An empty base or reference path was handed to the path resolver.
    #[error("invalid argument: {0} must be non-empty")]
    InvalidArgument(&'static str),

    /// A project descriptor referenced by the graph does not exist on disk.
    #[error("project not found: {}", path.display())]
    ProjectNotFound {
        /// The resolved path that was expected to hold a project file.
        path: PathBuf,
    },

    /// A project descriptor could not be parsed.
    #[error("cannot read {} - is it invalid or in an unsupported format? {reason}", path.display())]
    MalformedProject {
        /// The project descriptor that failed to parse.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// A solution filter descriptor is not valid JSON.
    #[error("solution filter {} is not valid JSON: {source}", path.display())]
    MalformedFilter {
        /// The filter descriptor.
        path: PathBuf,
        /// The underlying parse failure.
        source: serde_json::Error,
    },

    /// A solution filter descriptor lacks a required field.
    #[error("solution filter {} is missing required field `{field}`", path.display())]
    MissingField {
        /// The filter descriptor.
        path: PathBuf,
        /// Dotted name of the absent or blank field.
        field: &'static str,
    },

    /// No ancestor directory carries the repository root marker.
    #[error("failed to locate repository root: no `{marker}` found above {}", start.display())]
    RootNotFound {
        /// Where the upward search began.
        start: PathBuf,
        /// The marker entry that identifies the root.
        marker: String,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration at {}: {source}", path.display())]
    Config {
        /// The configuration file.
        path: PathBuf,
        /// The underlying YAML error.
        source: serde_yaml::Error,
    },

    /// I/O failure on a specific path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl RepoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_names_the_argument() {
        let err = RepoError::InvalidArgument("reference");
        assert_eq!(
            err.to_string(),
            "invalid argument: reference must be non-empty"
        );
    }

    #[test]
    fn malformed_project_display_carries_path_and_reason() {
        let err = RepoError::MalformedProject {
            path: PathBuf::from("/repo/A/A.csproj"),
            reason: "unexpected end of file".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("A.csproj"));
        assert!(msg.contains("unexpected end of file"));
    }

    #[test]
    fn missing_field_display() {
        let err = RepoError::MissingField {
            path: PathBuf::from("web.slnf"),
            field: "solution.path",
        };
        assert!(err.to_string().contains("`solution.path`"));
    }

    #[test]
    fn root_not_found_display() {
        let err = RepoError::RootNotFound {
            start: PathBuf::from("/tmp/x"),
            marker: ".git".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains(".git"));
        assert!(msg.contains("/tmp/x"));
    }

    #[test]
    fn io_helper_wraps_source() {
        let err = RepoError::io(
            "/nope",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, RepoError::Io { .. }));
        assert!(err.to_string().contains("gone"));
    }
}

//! Unified error types for the sitestack workspace.
//!
//! The composer itself raises very few errors: provider-side failures belong
//! to the provisioning system. What remains are configuration, lookup and
//! graph-construction failures, all of which abort a composition.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum SitestackError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// No hosted zone could be resolved for a domain name.
    #[error("no hosted zone found for domain {domain}")]
    ZoneNotFound {
        /// Domain whose zone lookup failed.
        domain: String,
    },

    /// Two resources in one composition share a logical id.
    #[error("duplicate resource logical id: {id}")]
    DuplicateResource {
        /// The conflicting logical id.
        id: String,
    },

    /// A pipeline stage was appended out of order or with a dangling input.
    #[error("invalid pipeline stage: {message}")]
    InvalidStage {
        /// Description of the ordering violation.
        message: String,
    },

    /// The resource graph contains a dependency cycle.
    #[error("cyclic dependency detected in resource graph at {id}")]
    CyclicDependency {
        /// Logical id of a resource on the cycle.
        id: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// YAML deserialization failed.
    #[error("YAML error: {source}")]
    Yaml {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SitestackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_message_is_prefixed() {
        let err = SitestackError::Config {
            message: "alias must not be empty".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: alias must not be empty"
        );
    }

    #[test]
    fn zone_not_found_names_the_domain() {
        let err = SitestackError::ZoneNotFound {
            domain: "foo.example.com".into(),
        };
        assert!(err.to_string().contains("foo.example.com"));
    }

    #[test]
    fn json_errors_convert_via_from() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: SitestackError = source.into();
        assert!(matches!(err, SitestackError::Serialization { .. }));
    }
}
